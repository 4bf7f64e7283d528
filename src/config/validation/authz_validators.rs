//! Engine configuration validators

use super::trait_def::Validate;
use crate::config::models::*;

impl Validate for TtlConfig {
    fn validate(&self) -> Result<(), String> {
        if self.found_but_denied == 0 || self.not_found == 0 || self.granted == 0 {
            return Err("Decision TTLs must be greater than 0".to_string());
        }

        // Found-but-denied is the most likely verdict to be fixed by an administrator
        if self.found_but_denied >= self.not_found {
            return Err(format!(
                "found_but_denied TTL ({}s) must be shorter than not_found TTL ({}s)",
                self.found_but_denied, self.not_found
            ));
        }

        if self.not_found >= self.granted {
            return Err(format!(
                "not_found TTL ({}s) must be shorter than granted TTL ({}s)",
                self.not_found, self.granted
            ));
        }

        Ok(())
    }
}

impl Validate for DecisionCacheConfig {
    fn validate(&self) -> Result<(), String> {
        self.ttl.validate()?;

        if self.max_entries == 0 {
            return Err("Cache max entries must be greater than 0".to_string());
        }

        if self.enabled && self.backend == CacheBackendKind::Redis {
            match &self.redis_url {
                None => return Err("Redis cache backend requires redis_url".to_string()),
                Some(url) if !url.starts_with("redis://") && !url.starts_with("rediss://") => {
                    return Err(format!("Invalid Redis URL: {}", url));
                }
                Some(_) => {}
            }
        }

        Ok(())
    }
}

impl Validate for StockFallbackConfig {
    fn validate(&self) -> Result<(), String> {
        if self.kinds.iter().any(|k| k.trim().is_empty()) {
            return Err("Stock fallback kinds cannot be empty strings".to_string());
        }

        Ok(())
    }
}

impl Validate for AuthzConfig {
    fn validate(&self) -> Result<(), String> {
        self.cache
            .validate()
            .map_err(|e| format!("Cache config error: {}", e))?;
        self.stock_fallback
            .validate()
            .map_err(|e| format!("Stock fallback config error: {}", e))?;
        Ok(())
    }
}
