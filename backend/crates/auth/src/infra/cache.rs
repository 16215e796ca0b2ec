//! Identity Cache
//!
//! Process-local cache of verified identity snapshots, keyed by the login
//! email. A hit inside the TTL window short-circuits the store fetch on
//! repeat logins.
//!
//! Bounded: `store` sweeps expired entries and evicts the least-recently-
//! used live entry once the configured capacity is reached. Lookups never
//! purge; a stale entry simply reads as a miss until overwritten or swept.
//!
//! Each process keeps its own cache — there is no cross-instance
//! coherence, so a multi-instance deployment can serve snapshots up to one
//! TTL stale.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::domain::entity::identity::IdentitySnapshot;

#[derive(Debug, Clone)]
struct CacheEntry {
    snapshot: IdentitySnapshot,
    inserted_at: Instant,
    last_used: Instant,
}

/// Shared handle to the identity cache. Cloning is cheap; all clones see
/// the same entries. Same-key races resolve last-write-wins.
#[derive(Debug, Clone)]
pub struct IdentityCache {
    inner: Arc<RwLock<HashMap<String, CacheEntry>>>,
    ttl: Duration,
    capacity: usize,
}

impl IdentityCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// Get a cached snapshot if present and within the TTL window.
    pub async fn lookup(&self, key: &str) -> Option<IdentitySnapshot> {
        let mut cache = self.inner.write().await;

        let entry = cache.get_mut(key)?;
        if entry.inserted_at.elapsed() >= self.ttl {
            tracing::debug!(key = %key, "identity cache entry stale");
            return None;
        }

        entry.last_used = Instant::now();
        tracing::debug!(key = %key, "identity cache hit");
        Some(entry.snapshot.clone())
    }

    /// Upsert a snapshot, recording the insertion time. Evicts before
    /// inserting when the cache is full: expired entries first, then the
    /// least-recently-used live one.
    pub async fn store(&self, key: &str, snapshot: IdentitySnapshot) {
        let mut cache = self.inner.write().await;

        if !cache.contains_key(key) && cache.len() >= self.capacity {
            let ttl = self.ttl;
            cache.retain(|_, entry| entry.inserted_at.elapsed() < ttl);

            if cache.len() >= self.capacity {
                let lru = cache
                    .iter()
                    .min_by_key(|(_, entry)| entry.last_used)
                    .map(|(k, _)| k.clone());
                if let Some(lru) = lru {
                    tracing::debug!(key = %lru, "evicting least-recently-used identity");
                    cache.remove(&lru);
                }
            }
        }

        let now = Instant::now();
        cache.insert(
            key.to_string(),
            CacheEntry {
                snapshot,
                inserted_at: now,
                last_used: now,
            },
        );
    }

    /// Number of entries currently held (live and stale)
    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
