use super::SubscriptionRepository;
use crate::core::subscription::Subscription;
use anyhow::{Result, bail};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

#[derive(Default)]
struct MemoryState {
    subscriptions: Vec<Subscription>,
    logged_in: bool,
    save_count: usize,
    fail_loads: bool,
    fail_saves: bool,
}

/// In-memory repository. Clones share the same state, so a handle kept
/// outside the store can observe what was saved.
#[derive(Clone, Default)]
pub struct MemoryRepository {
    inner: Arc<Mutex<MemoryState>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_subscriptions(subscriptions: Vec<Subscription>) -> Self {
        let repo = Self::new();
        repo.state().subscriptions = subscriptions;
        repo
    }

    /// Makes every subsequent load fail until switched off.
    pub fn fail_loads(&self, fail: bool) {
        self.state().fail_loads = fail;
    }

    /// Makes every subsequent save fail until switched off.
    pub fn fail_saves(&self, fail: bool) {
        self.state().fail_saves = fail;
    }

    pub fn saved_subscriptions(&self) -> Vec<Subscription> {
        self.state().subscriptions.clone()
    }

    pub fn saved_logged_in(&self) -> bool {
        self.state().logged_in
    }

    /// Number of successful subscription saves.
    pub fn save_count(&self) -> usize {
        self.state().save_count
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        // A poisoned lock only means another test thread panicked
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl SubscriptionRepository for MemoryRepository {
    fn load_subscriptions(&self) -> Result<Vec<Subscription>> {
        let state = self.state();
        if state.fail_loads {
            bail!("Simulated load failure");
        }
        Ok(state.subscriptions.clone())
    }

    fn save_subscriptions(&self, subscriptions: &[Subscription]) -> Result<()> {
        let mut state = self.state();
        if state.fail_saves {
            bail!("Simulated save failure");
        }
        state.subscriptions = subscriptions.to_vec();
        state.save_count += 1;
        debug!("Memory SAVE of {} subscriptions", subscriptions.len());
        Ok(())
    }

    fn load_logged_in(&self) -> Result<bool> {
        let state = self.state();
        if state.fail_loads {
            bail!("Simulated load failure");
        }
        Ok(state.logged_in)
    }

    fn save_logged_in(&self, logged_in: bool) -> Result<()> {
        let mut state = self.state();
        if state.fail_saves {
            bail!("Simulated save failure");
        }
        state.logged_in = logged_in;
        Ok(())
    }
}
