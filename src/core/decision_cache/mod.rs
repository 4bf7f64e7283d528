//! Decision cache
//!
//! Memoizes the verdict of a single (principal, target, action) check. The
//! cache is never authoritative: every backend, including [`NoopDecisionCache`],
//! must lead to identical verdicts, only at different cost.
//!
//! Retention is asymmetric and driven by why a verdict was reached, see
//! [`Outcome`] and [`DecisionTtl`].

pub mod key;
pub mod memory;
pub mod policy;
pub mod verdicts;
#[cfg(feature = "redis")]
pub mod redis;

pub use key::DecisionKey;
pub use memory::{MemoryDecisionCache, NoopDecisionCache};
pub use policy::{DecisionTtl, Outcome};
pub use verdicts::VerdictCache;
#[cfg(feature = "redis")]
pub use self::redis::RedisDecisionCache;

use crate::utils::error::Result;

/// Key/value store with per-entry TTL holding decision outcomes.
///
/// The verdict of an entry is whether its [`Outcome`] is granted; keeping the
/// outcome lets a cached denial still say why it was denied.
///
/// Implementations must be safe for many concurrent readers. No cross-key
/// sweep is ever requested: callers delete exactly the keys they know may be
/// stale.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DecisionCache: Send + Sync {
    /// Fetch a cached outcome, `None` on miss or expiry
    async fn get(&self, key: &str) -> Result<Option<Outcome>>;

    /// Store an outcome for `ttl_secs` seconds
    async fn set(&self, key: &str, outcome: Outcome, ttl_secs: u64) -> Result<()>;

    /// Drop a cached verdict; deleting a missing key is not an error
    async fn delete(&self, key: &str) -> Result<()>;
}
