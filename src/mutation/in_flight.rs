//! Registry of mutations currently running, keyed by user and resource.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex, MutexGuard},
};

type Key = (String, String);

#[derive(Clone, Debug, Default)]
pub struct InFlight {
    active: Arc<Mutex<HashSet<Key>>>,
}

impl InFlight {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims `(owner, resource)`. Returns `None` while another claim on the
    /// same pair is alive; the claim is released when the guard drops.
    #[must_use]
    pub fn try_acquire(&self, owner: &str, resource: &str) -> Option<InFlightGuard> {
        let key = (owner.to_string(), resource.to_string());
        if !self.lock().insert(key.clone()) {
            return None;
        }
        Some(InFlightGuard {
            registry: self.clone(),
            key,
        })
    }

    #[must_use]
    pub fn is_active(&self, owner: &str, resource: &str) -> bool {
        self.lock()
            .contains(&(owner.to_string(), resource.to_string()))
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<Key>> {
        // A panic while holding the lock leaves the set consistent.
        self.active
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[derive(Debug)]
pub struct InFlightGuard {
    registry: InFlight,
    key: Key,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.key);
    }
}
