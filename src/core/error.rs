//! Domain errors callers are expected to match on.

use thiserror::Error;

/// Why a subscription draft cannot be turned into a subscription.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Name must not be empty")]
    EmptyName,

    #[error("Cost is required")]
    EmptyCost,

    #[error("Cost is not a number: {0}")]
    InvalidCost(String),

    #[error("Cost must not be negative: {0}")]
    NegativeCost(f64),

    #[error("Cost must not exceed {max}: {cost}")]
    CostTooLarge { cost: f64, max: f64 },

    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),
}

/// Errors raised by the onboarding flow.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    #[error("Cannot {action} while {state}")]
    InvalidState {
        action: &'static str,
        state: String,
    },

    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("Select at least one service before configuring")]
    EmptySelection,

    #[error("Step rejected: {0}")]
    Rejected(#[from] ValidationError),
}
