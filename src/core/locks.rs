//! Optional per-username serialization of the chat history append.
//!
//! Without it two concurrent chats for the same user can both read the history and the
//! later write wins. The lock only covers this process; separate processes sharing the
//! database still race.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Default)]
pub struct UserLocks {
    enabled: bool,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl UserLocks {
    pub fn new(enabled: bool) -> UserLocks {
        UserLocks {
            enabled,
            locks: DashMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Waits for exclusive access to `username`. Returns `None` when locking is disabled.
    pub async fn acquire(&self, username: &str) -> Option<OwnedMutexGuard<()>> {
        if !self.enabled {
            return None;
        }

        // drop entries nobody holds or waits on
        self.locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        let lock = self.locks.entry(username.to_owned()).or_default().clone();

        Some(lock.lock_owned().await)
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.locks.len()
    }
}
