//! In-process cache backends

use super::{DecisionCache, Outcome};
use crate::utils::error::Result;
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Cache entry with expiry metadata
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The cached value
    pub value: T,
    /// When the entry was created
    pub created_at: Instant,
    /// When the entry expires
    pub expires_at: Instant,
}

impl<T> CacheEntry<T> {
    /// Create a new cache entry
    pub fn new(value: T, ttl: Duration) -> Self {
        let now = Instant::now();
        Self {
            value,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Check if the entry is expired
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }

    /// Time left before expiry
    pub fn remaining(&self) -> Duration {
        self.expires_at.saturating_duration_since(Instant::now())
    }
}

/// Sharded in-memory cache with lazy expiry.
///
/// Reads only take a shard read lock. Expired entries are dropped when read or
/// when the cache is full and [`purge_expired`](Self::purge_expired) runs.
#[derive(Debug)]
pub struct MemoryDecisionCache {
    entries: DashMap<String, CacheEntry<Outcome>>,
    max_entries: usize,
}

impl MemoryDecisionCache {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            max_entries: max_entries.max(1),
        }
    }

    /// Number of stored entries, expired or not
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Time left before `key` expires, `None` if absent or expired
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.remaining())
    }

    /// Drop every expired entry and return how many were removed
    pub fn purge_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired());
        let removed = before.saturating_sub(self.entries.len());

        if removed > 0 {
            info!("Purged {} expired decision cache entries", removed);
        }
        removed
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

impl Default for MemoryDecisionCache {
    fn default() -> Self {
        Self::new(10_000)
    }
}

#[async_trait::async_trait]
impl DecisionCache for MemoryDecisionCache {
    async fn get(&self, key: &str) -> Result<Option<Outcome>> {
        match self.entries.get(key) {
            Some(entry) if !entry.is_expired() => return Ok(Some(entry.value)),
            Some(_) => {}
            None => return Ok(None),
        }

        self.entries.remove_if(key, |_, entry| entry.is_expired());
        Ok(None)
    }

    async fn set(&self, key: &str, outcome: Outcome, ttl_secs: u64) -> Result<()> {
        if ttl_secs == 0 {
            return Ok(());
        }

        if self.entries.len() >= self.max_entries && !self.entries.contains_key(key) {
            self.purge_expired();
            if self.entries.len() >= self.max_entries {
                debug!("Decision cache full, not caching key: {}", key);
                return Ok(());
            }
        }

        self.entries.insert(
            key.to_string(),
            CacheEntry::new(outcome, Duration::from_secs(ttl_secs)),
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Backend used when caching is disabled: every lookup misses
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopDecisionCache;

#[async_trait::async_trait]
impl DecisionCache for NoopDecisionCache {
    async fn get(&self, _key: &str) -> Result<Option<Outcome>> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _outcome: Outcome, _ttl_secs: u64) -> Result<()> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<()> {
        Ok(())
    }
}
