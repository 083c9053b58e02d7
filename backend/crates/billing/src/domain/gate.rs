//! Per-Key Serialization Gate
//!
//! Maps a key (the username) to a lazily created async mutex. Every caller
//! for the same key resolves to the same mutex, so at most one journal
//! mutation per user is in flight while different users never contend.
//!
//! The registry only grows: entries live for the lifetime of the gate.

use std::fmt;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of per-key exclusivity tokens
#[derive(Debug, Default)]
pub struct KeyGate {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl KeyGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until the caller holds `key` exclusively.
    ///
    /// Construct-or-fetch happens under the map shard lock, so concurrent
    /// first callers for an unseen key share a single token. The shard lock
    /// is released before awaiting.
    pub async fn acquire(&self, key: &str) -> GateGuard {
        let lock = self.token(key);
        let guard = lock.lock_owned().await;
        GateGuard {
            key: key.to_string(),
            _guard: guard,
        }
    }

    /// Take `key` only if nobody holds it right now.
    #[cfg(test)]
    pub(crate) fn try_acquire(&self, key: &str) -> Option<GateGuard> {
        let lock = self.token(key);
        let guard = lock.try_lock_owned().ok()?;
        Some(GateGuard {
            key: key.to_string(),
            _guard: guard,
        })
    }

    /// Number of distinct keys seen so far
    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }

    fn token(&self, key: &str) -> Arc<Mutex<()>> {
        if let Some(existing) = self.locks.get(key) {
            return existing.clone();
        }
        self.locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

/// Proof that the holder has exclusive access to one key.
///
/// Released on drop, whichever way the critical section ends.
pub struct GateGuard {
    key: String,
    _guard: OwnedMutexGuard<()>,
}

impl GateGuard {
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for GateGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GateGuard").field("key", &self.key).finish()
    }
}
