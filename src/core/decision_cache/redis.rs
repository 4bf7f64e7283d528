//! Redis cache backend
//!
//! Outcomes are stored by name (`granted`, `found_but_denied`, `not_found`)
//! under a configurable key prefix, with the TTL delegated to `SETEX`.

use super::{DecisionCache, Outcome};
use crate::utils::error::{AuthzError, Result};
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::info;

/// Decision cache shared between processes through Redis
#[derive(Clone)]
pub struct RedisDecisionCache {
    conn: ConnectionManager,
    prefix: String,
}

impl std::fmt::Debug for RedisDecisionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisDecisionCache")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl RedisDecisionCache {
    /// Connect to the Redis server at `url`
    pub async fn connect(url: &str, prefix: impl Into<String>) -> Result<Self> {
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        let prefix = prefix.into();

        info!("Connected decision cache to Redis with prefix '{}'", prefix);
        Ok(Self { conn, prefix })
    }

    fn full_key(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_string()
        } else {
            format!("{}:{}", self.prefix, key)
        }
    }
}

#[async_trait::async_trait]
impl DecisionCache for RedisDecisionCache {
    async fn get(&self, key: &str) -> Result<Option<Outcome>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = conn.get(self.full_key(key)).await?;

        value
            .map(|value| {
                value.parse::<Outcome>().map_err(|e| {
                    AuthzError::cache(format!("bad cached entry for key {}: {}", key, e))
                })
            })
            .transpose()
    }

    async fn set(&self, key: &str, outcome: Outcome, ttl_secs: u64) -> Result<()> {
        if ttl_secs == 0 {
            return Ok(());
        }

        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(self.full_key(key), outcome.as_str(), ttl_secs)
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let _: () = conn.del(self.full_key(key)).await?;
        Ok(())
    }
}
