//! Domain logic: subscriptions, cost normalization, statistics and onboarding

pub mod assistant;
pub mod catalog;
pub mod config;
pub mod error;
pub mod log;
pub mod normalize;
pub mod onboarding;
pub mod statistics;
pub mod subscription;

// Re-export main types for cleaner imports
pub use assistant::Answer;
pub use catalog::PredefinedService;
pub use error::{FlowError, ValidationError};
pub use normalize::monthly_equivalent;
pub use onboarding::{FlowState, OnboardingFlow, StepOutcome, SubscriptionDraft};
pub use statistics::{CategoryStat, PieSlice, StatisticsPeriod, StatisticsReport};
pub use subscription::{Category, PaymentCycle, Subscription};
