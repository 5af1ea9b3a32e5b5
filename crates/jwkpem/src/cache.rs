//! Process-wide key set cache with a readiness gate
//!
//! The cache starts empty and not ready. The first [`KeySetCache::update`]
//! publishes a key set and flips readiness; later updates replace the key set
//! and leave readiness set. Readers get immutable snapshots and never observe
//! a partially built key set.

use crate::error::{Error, Result};
use crate::jwks::codec::ConvertedKey;
use crate::jwks::key_set::KeySet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;

#[derive(Debug, Clone)]
struct Snapshot {
    key_set: Arc<KeySet>,
    ready: bool,
}

/// Shared handle to the most recently built key set
///
/// Cloning the handle is cheap; all clones observe the same state.
#[derive(Debug, Clone)]
pub struct KeySetCache {
    state: Arc<watch::Sender<Snapshot>>,
}

impl KeySetCache {
    /// Create an empty, not-ready cache
    pub fn new() -> Self {
        let (state, _) = watch::channel(Snapshot {
            key_set: Arc::new(KeySet::new()),
            ready: false,
        });
        Self {
            state: Arc::new(state),
        }
    }

    /// Replace the stored key set and mark the cache ready
    ///
    /// Returns the snapshot that was published.
    pub fn update(&self, key_set: KeySet) -> Arc<KeySet> {
        let key_set = Arc::new(key_set);
        self.state.send_replace(Snapshot {
            key_set: Arc::clone(&key_set),
            ready: true,
        });
        key_set
    }

    /// Current key set; empty before the first update
    pub fn get(&self) -> Arc<KeySet> {
        Arc::clone(&self.state.borrow().key_set)
    }

    /// Look up one converted key by `kid`
    pub fn get_key(&self, kid: &str) -> Option<ConvertedKey> {
        self.state.borrow().key_set.get(kid).cloned()
    }

    pub fn is_ready(&self) -> bool {
        self.state.borrow().ready
    }

    /// Wait until the cache is ready, up to `timeout`
    ///
    /// Returns immediately when already ready.
    ///
    /// # Errors
    ///
    /// [`Error::ReadyTimeout`] when no update arrives in time. The cache is
    /// not affected.
    pub async fn await_ready(&self, timeout: Duration) -> Result<Arc<KeySet>> {
        let mut rx = self.state.subscribe();
        let outcome =
            match tokio::time::timeout(timeout, rx.wait_for(|snapshot| snapshot.ready)).await {
                Ok(Ok(snapshot)) => Ok(Arc::clone(&snapshot.key_set)),
                Ok(Err(_)) => Err(Error::CacheClosed),
                Err(_) => Err(Error::ReadyTimeout { waited: timeout }),
            };
        outcome
    }
}

impl Default for KeySetCache {
    fn default() -> Self {
        Self::new()
    }
}
