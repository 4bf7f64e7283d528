//! Fault-tolerant access to a decision cache backend

use super::{DecisionCache, DecisionKey, DecisionTtl, Outcome};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Wraps a [`DecisionCache`] backend so its failures never reach a verdict.
///
/// A failed lookup is a miss and a failed write is logged and dropped, so the
/// engine behaves exactly as if the entry had never been cached.
#[derive(Clone)]
pub struct VerdictCache {
    backend: Arc<dyn DecisionCache>,
    ttl: DecisionTtl,
}

impl VerdictCache {
    pub fn new(backend: Arc<dyn DecisionCache>, ttl: DecisionTtl) -> Self {
        Self { backend, ttl }
    }

    pub fn ttl(&self) -> &DecisionTtl {
        &self.ttl
    }

    /// Cached outcome for `key`, if any
    pub async fn lookup(&self, key: &DecisionKey) -> Option<Outcome> {
        match self.backend.get(key.as_str()).await {
            Ok(Some(outcome)) => {
                debug!("Decision cache hit: {} = {}", key, outcome);
                Some(outcome)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Decision cache lookup failed for {}, treating as miss: {}", key, e);
                None
            }
        }
    }

    /// Store `outcome` for its retention
    pub async fn record(&self, key: &DecisionKey, outcome: Outcome) {
        let ttl_secs = self.ttl.for_outcome(outcome);
        if let Err(e) = self.backend.set(key.as_str(), outcome, ttl_secs).await {
            error!("Failed to cache decision {} for {}s: {}", key, ttl_secs, e);
        }
    }

    /// Drop the entry for `key`, returning whether the backend accepted the delete
    pub async fn forget(&self, key: &DecisionKey) -> bool {
        match self.backend.delete(key.as_str()).await {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to invalidate cached decision {}: {}", key, e);
                false
            }
        }
    }
}

impl std::fmt::Debug for VerdictCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerdictCache")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
