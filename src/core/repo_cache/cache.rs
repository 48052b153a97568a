//! Repository cache implementation

use super::types::{CacheLookup, CacheStats, CachedRepoEntry};
use crate::core::clock::{SharedClock, SystemClock};
use crate::core::github::GitHubRepo;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

/// TTL cache of upstream repository outcomes
///
/// Expired entries are dropped when read, and all of them are swept whenever
/// a write leaves the map above its soft capacity. There is no hard cap and
/// no background task.
pub struct RepoCache {
    entries: RwLock<HashMap<String, CachedRepoEntry>>,
    soft_capacity: usize,
    clock: SharedClock,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl RepoCache {
    pub fn new(soft_capacity: usize) -> Self {
        Self::with_clock(soft_capacity, Arc::new(SystemClock))
    }

    pub fn with_clock(soft_capacity: usize, clock: SharedClock) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            soft_capacity,
            clock,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Look up an unexpired entry, evicting it if stale
    pub async fn get(&self, key: &str) -> CacheLookup {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;

        let lookup = match entries.get(key) {
            Some(entry) if !entry.is_expired(now) => CacheLookup::Hit(entry.payload.clone()),
            Some(_) => {
                entries.remove(key);
                debug!("Evicted expired cache entry: {}", key);
                CacheLookup::Miss
            }
            None => CacheLookup::Miss,
        };

        match lookup {
            CacheLookup::Hit(_) => self.hits.fetch_add(1, Ordering::Relaxed),
            CacheLookup::Miss => self.misses.fetch_add(1, Ordering::Relaxed),
        };
        lookup
    }

    /// Store an outcome, replacing whatever was there
    pub async fn set(&self, key: &str, payload: Option<GitHubRepo>, ttl: Duration) {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;

        entries.insert(
            key.to_string(),
            CachedRepoEntry {
                payload,
                stored_at: now,
                ttl,
            },
        );

        if entries.len() > self.soft_capacity {
            let before = entries.len();
            entries.retain(|_, entry| !entry.is_expired(now));
            debug!(
                "Cache above soft capacity ({}), swept {} expired entries",
                self.soft_capacity,
                before - entries.len()
            );
        }
    }

    /// Number of stored entries, expired or not
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.len().await,
        }
    }
}
