pub mod disk;
pub mod memory;

use crate::core::subscription::Subscription;
use anyhow::Result;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Durable load/save capability injected into the [`SubscriptionStore`].
pub trait SubscriptionRepository {
    fn load_subscriptions(&self) -> Result<Vec<Subscription>>;
    fn save_subscriptions(&self, subscriptions: &[Subscription]) -> Result<()>;
    fn load_logged_in(&self) -> Result<bool>;
    fn save_logged_in(&self, logged_in: bool) -> Result<()>;
}

/// Owns the subscription list and the login flag. Every mutation writes the
/// full state back through the repository.
///
/// Persistence failures never abort a mutation: the in-memory state stays
/// authoritative and the failure is kept until every unwritten part has been
/// saved. Each save retries whatever is still unwritten.
pub struct SubscriptionStore {
    subscriptions: Vec<Subscription>,
    logged_in: bool,
    repository: Box<dyn SubscriptionRepository>,
    subscriptions_dirty: bool,
    login_dirty: bool,
    save_error: Option<String>,
}

impl SubscriptionStore {
    /// Loads existing state. Load failures start the store empty.
    pub fn open(repository: Box<dyn SubscriptionRepository>) -> Self {
        let subscriptions = repository.load_subscriptions().unwrap_or_else(|e| {
            warn!("Failed to load subscriptions, starting empty: {e:#}");
            Vec::new()
        });
        let logged_in = repository.load_logged_in().unwrap_or_else(|e| {
            warn!("Failed to load login state, assuming logged out: {e:#}");
            false
        });
        info!(
            "Opened store with {} subscriptions (logged in: {logged_in})",
            subscriptions.len()
        );

        Self {
            subscriptions,
            logged_in,
            repository,
            subscriptions_dirty: false,
            login_dirty: false,
            save_error: None,
        }
    }

    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&Subscription> {
        self.subscriptions.iter().find(|s| s.id == id)
    }

    /// Subscriptions ordered by renewal date, soonest first.
    pub fn sorted_by_renewal(&self) -> Vec<&Subscription> {
        let mut sorted: Vec<_> = self.subscriptions.iter().collect();
        sorted.sort_by_key(|s| s.renewal_date);
        sorted
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in
    }

    pub fn add(&mut self, subscription: Subscription) {
        debug!("Adding subscription {} ({})", subscription.name, subscription.id);
        self.subscriptions.push(subscription);
        self.subscriptions_dirty = true;
        self.persist();
    }

    /// Removes the subscription with `id`, leaving all others untouched.
    pub fn delete(&mut self, id: Uuid) -> Option<Subscription> {
        let index = self.subscriptions.iter().position(|s| s.id == id)?;
        let removed = self.subscriptions.remove(index);
        debug!("Deleted subscription {} ({})", removed.name, removed.id);
        self.subscriptions_dirty = true;
        self.persist();
        Some(removed)
    }

    pub fn replace_all(&mut self, subscriptions: Vec<Subscription>) {
        debug!("Replacing all subscriptions with {}", subscriptions.len());
        self.subscriptions = subscriptions;
        self.subscriptions_dirty = true;
        self.persist();
    }

    pub fn clear(&mut self) {
        self.replace_all(Vec::new());
    }

    pub fn set_logged_in(&mut self, logged_in: bool) {
        self.logged_in = logged_in;
        self.login_dirty = true;
        self.persist();
    }

    /// The last save failure, while any part of the state is still unwritten.
    pub fn pending_save_error(&self) -> Option<&str> {
        self.save_error.as_deref()
    }

    /// Writes the full state again, reporting any failure to the caller.
    pub fn flush(&mut self) -> Result<()> {
        self.repository.save_subscriptions(&self.subscriptions)?;
        self.subscriptions_dirty = false;
        self.repository.save_logged_in(self.logged_in)?;
        self.login_dirty = false;
        self.save_error = None;
        Ok(())
    }

    fn persist(&mut self) {
        if self.subscriptions_dirty {
            match self.repository.save_subscriptions(&self.subscriptions) {
                Ok(()) => self.subscriptions_dirty = false,
                Err(e) => {
                    warn!("Failed to save subscriptions, keeping them in memory: {e:#}");
                    self.save_error = Some(format!("{e:#}"));
                }
            }
        }
        if self.login_dirty {
            match self.repository.save_logged_in(self.logged_in) {
                Ok(()) => self.login_dirty = false,
                Err(e) => {
                    warn!("Failed to save login state: {e:#}");
                    self.save_error = Some(format!("{e:#}"));
                }
            }
        }
        if !self.subscriptions_dirty && !self.login_dirty {
            self.save_error = None;
        }
    }
}
