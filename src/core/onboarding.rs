//! Forward-only onboarding: pick services from the catalog, then configure
//! one subscription per picked service before committing them all at once.

use crate::core::catalog::PredefinedService;
use crate::core::error::{FlowError, ValidationError};
use crate::core::subscription::{Category, PaymentCycle, Subscription};
use crate::store::SubscriptionStore;
use chrono::NaiveDate;
use std::collections::HashSet;
use std::fmt::Display;
use tracing::{debug, info};

/// Currencies offered when configuring a subscription.
pub const SUPPORTED_CURRENCIES: [&str; 3] = ["EUR", "USD", "GBP"];
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Largest cost accepted for a single payment. Keeps every derived total
/// (monthly, yearly, summed over categories) finite.
pub const MAX_COST: f64 = 1_000_000_000.0;

/// Form state for configuring a single subscription.
///
/// Fields hold raw user input; nothing is checked until [`validate`] or
/// [`build`] is called.
///
/// [`validate`]: SubscriptionDraft::validate
/// [`build`]: SubscriptionDraft::build
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionDraft {
    pub name: String,
    pub cost: String,
    pub currency: String,
    pub renewal_date: NaiveDate,
    pub payment_cycle: PaymentCycle,
    pub category: Category,
}

impl SubscriptionDraft {
    /// Pre-fills the form for `service`: its name and category, no cost, EUR,
    /// renewing `today`, billed monthly.
    pub fn for_service(service: &PredefinedService, today: NaiveDate) -> Self {
        Self {
            name: service.name.to_string(),
            cost: String::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            renewal_date: today,
            payment_cycle: PaymentCycle::Monthly,
            category: service.category,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn parsed_cost(&self) -> Result<f64, ValidationError> {
        let raw = self.cost.trim();
        if raw.is_empty() {
            return Err(ValidationError::EmptyCost);
        }
        let cost: f64 = raw
            .parse()
            .map_err(|_| ValidationError::InvalidCost(self.cost.clone()))?;
        if !cost.is_finite() {
            return Err(ValidationError::InvalidCost(self.cost.clone()));
        }
        if cost < 0.0 {
            return Err(ValidationError::NegativeCost(cost));
        }
        if cost > MAX_COST {
            return Err(ValidationError::CostTooLarge {
                cost,
                max: MAX_COST,
            });
        }
        Ok(cost)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        self.parsed_cost()?;
        if !SUPPORTED_CURRENCIES.contains(&self.currency.as_str()) {
            return Err(ValidationError::UnsupportedCurrency(self.currency.clone()));
        }
        Ok(())
    }

    /// Produces the subscription. `is_custom` always comes from `service`,
    /// never from the form.
    pub fn build(&self, service: &PredefinedService) -> Result<Subscription, ValidationError> {
        self.validate()?;
        let cost = self.parsed_cost()?;
        Ok(Subscription::new(
            self.name.trim(),
            cost,
            self.currency.clone(),
            self.renewal_date,
            self.payment_cycle,
            self.category,
            service.is_custom,
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    NotStarted,
    Selecting,
    Configuring(usize),
    Complete,
}

impl Display for FlowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowState::NotStarted => write!(f, "not started"),
            FlowState::Selecting => write!(f, "selecting services"),
            FlowState::Configuring(i) => write!(f, "configuring step {}", i + 1),
            FlowState::Complete => write!(f, "complete"),
        }
    }
}

/// Result of a successfully submitted step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Moved on to the step with this index.
    Advanced(usize),
    /// The last step was submitted and this many subscriptions were added to
    /// the store.
    Completed(usize),
}

/// One onboarding session.
///
/// Configured subscriptions stay inside the session until the last step is
/// submitted; only then are they added to the store. Dropping the flow
/// before that discards them.
pub struct OnboardingFlow<'a> {
    catalog: &'a [PredefinedService],
    state: FlowState,
    selected: HashSet<&'static str>,
    services: Vec<PredefinedService>,
    configured: Vec<Subscription>,
}

impl<'a> OnboardingFlow<'a> {
    pub fn new(catalog: &'a [PredefinedService]) -> Self {
        Self {
            catalog,
            state: FlowState::NotStarted,
            selected: HashSet::new(),
            services: Vec::new(),
            configured: Vec::new(),
        }
    }

    /// The current state, with an out-of-range cursor reported as complete.
    pub fn state(&self) -> FlowState {
        match self.state {
            FlowState::Configuring(i) if i >= self.services.len() => {
                debug_assert!(
                    false,
                    "onboarding cursor {i} past {} steps",
                    self.services.len()
                );
                FlowState::Complete
            }
            state => state,
        }
    }

    pub fn catalog(&self) -> &'a [PredefinedService] {
        self.catalog
    }

    pub fn begin(&mut self) -> Result<(), FlowError> {
        self.expect_state(FlowState::NotStarted, "begin")?;
        self.state = FlowState::Selecting;
        debug!("Onboarding started");
        Ok(())
    }

    /// Flips membership of `service_id` in the selection. Returns whether
    /// the service is selected afterwards.
    pub fn toggle(&mut self, service_id: &str) -> Result<bool, FlowError> {
        self.expect_state(FlowState::Selecting, "change the selection")?;
        let service = self
            .catalog
            .iter()
            .find(|s| s.id == service_id)
            .ok_or_else(|| FlowError::UnknownService(service_id.to_string()))?;

        let selected = if self.selected.remove(service.id) {
            false
        } else {
            self.selected.insert(service.id);
            true
        };
        debug!("Toggled {} -> {selected}", service.id);
        Ok(selected)
    }

    pub fn is_selected(&self, service_id: &str) -> bool {
        self.selected.contains(service_id)
    }

    pub fn selection_count(&self) -> usize {
        self.selected.len()
    }

    /// Freezes the selection, in catalog order, and moves to the first step.
    pub fn start_configuration(&mut self) -> Result<(), FlowError> {
        self.expect_state(FlowState::Selecting, "start configuration")?;
        if self.selected.is_empty() {
            return Err(FlowError::EmptySelection);
        }
        self.services = self
            .catalog
            .iter()
            .filter(|s| self.selected.contains(s.id))
            .copied()
            .collect();
        self.configured.clear();
        self.state = FlowState::Configuring(0);
        info!("Configuring {} selected services", self.services.len());
        Ok(())
    }

    /// Leaves onboarding without configuring anything.
    pub fn skip(&mut self, store: &mut SubscriptionStore) -> Result<(), FlowError> {
        self.expect_state(FlowState::Selecting, "skip")?;
        self.state = FlowState::Complete;
        store.set_logged_in(true);
        info!("Onboarding skipped");
        Ok(())
    }

    pub fn current_step(&self) -> Option<usize> {
        match self.state() {
            FlowState::Configuring(i) => Some(i),
            _ => None,
        }
    }

    pub fn total_steps(&self) -> usize {
        self.services.len()
    }

    /// Services being configured in this session, in step order.
    pub fn services(&self) -> &[PredefinedService] {
        &self.services
    }

    pub fn current_service(&self) -> Option<&PredefinedService> {
        self.current_step().map(|i| &self.services[i])
    }

    /// A fresh form for the current step.
    pub fn draft(&self, today: NaiveDate) -> Option<SubscriptionDraft> {
        self.current_service()
            .map(|service| SubscriptionDraft::for_service(service, today))
    }

    /// Subscriptions configured so far in this session.
    pub fn configured(&self) -> &[Subscription] {
        &self.configured
    }

    pub fn is_complete(&self) -> bool {
        self.state() == FlowState::Complete
    }

    /// Submits the form for the current step.
    ///
    /// A rejected draft leaves the step unchanged. After the last step every
    /// configured subscription is added to `store` in step order and the
    /// user is marked as logged in.
    pub fn submit(
        &mut self,
        draft: &SubscriptionDraft,
        store: &mut SubscriptionStore,
    ) -> Result<StepOutcome, FlowError> {
        let step = match self.state() {
            FlowState::Configuring(i) => i,
            state => {
                return Err(FlowError::InvalidState {
                    action: "submit a step",
                    state: state.to_string(),
                });
            }
        };

        let subscription = draft.build(&self.services[step])?;
        debug!("Step {} configured as {}", step + 1, subscription.name);
        self.configured.push(subscription);

        let next = step + 1;
        if next < self.services.len() {
            self.state = FlowState::Configuring(next);
            return Ok(StepOutcome::Advanced(next));
        }

        let committed = self.configured.len();
        for subscription in self.configured.drain(..) {
            store.add(subscription);
        }
        store.set_logged_in(true);
        self.state = FlowState::Complete;
        info!("Onboarding complete, added {committed} subscriptions");
        Ok(StepOutcome::Completed(committed))
    }

    fn expect_state(&self, expected: FlowState, action: &'static str) -> Result<(), FlowError> {
        let state = self.state();
        if state != expected {
            return Err(FlowError::InvalidState {
                action,
                state: state.to_string(),
            });
        }
        Ok(())
    }
}
