use crate::core::catalog;
use crate::core::onboarding::SubscriptionDraft;
use crate::core::subscription::{Category, PaymentCycle, Subscription};
use crate::store::SubscriptionStore;
use anyhow::{Result, anyhow};
use chrono::NaiveDate;
use tracing::info;
use uuid::Uuid;

/// User input for adding a subscription directly, outside onboarding.
#[derive(Debug, Clone)]
pub struct NewSubscription {
    pub name: String,
    pub cost: String,
    pub currency: Option<String>,
    pub payment_cycle: PaymentCycle,
    pub category: Category,
    pub renewal_date: Option<NaiveDate>,
}

/// Validates `input` with the same rules as an onboarding step and adds the
/// result to the store as a custom subscription.
pub fn add(
    store: &mut SubscriptionStore,
    input: NewSubscription,
    default_currency: &str,
    today: NaiveDate,
) -> Result<Subscription> {
    let service = catalog::custom_service();
    let draft = SubscriptionDraft {
        name: input.name,
        cost: input.cost,
        currency: input
            .currency
            .map(|c| c.to_uppercase())
            .unwrap_or_else(|| default_currency.to_string()),
        renewal_date: input.renewal_date.unwrap_or(today),
        payment_cycle: input.payment_cycle,
        category: input.category,
    };
    let subscription = draft
        .build(service)
        .map_err(|e| anyhow!("Invalid subscription: {e}"))?;

    info!("Adding {} ({})", subscription.name, subscription.id);
    store.add(subscription.clone());
    Ok(subscription)
}

pub fn delete(store: &mut SubscriptionStore, id: Uuid) -> Result<Subscription> {
    store
        .delete(id)
        .ok_or_else(|| anyhow!("No subscription with id {id}"))
}

/// Deletes every subscription. Returns how many were removed.
pub fn clear(store: &mut SubscriptionStore) -> usize {
    let removed = store.len();
    store.clear();
    info!("Deleted all {removed} subscriptions");
    removed
}
