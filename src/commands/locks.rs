use std::{collections::HashMap, sync::Arc};

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Named async locks, created on first use
///
/// Holding the guard for a key gives exclusive access to whatever that key stands for, e.g. a
/// club or a competition, across `.await` points.
#[derive(Clone, Debug, Default)]
pub struct KeyedLocks {
    locks: Arc<Mutex<HashMap<String, Arc<Mutex<()>>>>>,
}

impl KeyedLocks {
    pub async fn lock(&self, key: impl Into<String>) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .lock()
            .await
            .entry(key.into())
            .or_default()
            .clone();
        lock.lock_owned().await
    }

    /// Number of keys that were ever locked
    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.locks.lock().await.len()
    }
}
