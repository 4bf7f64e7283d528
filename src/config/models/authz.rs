//! Top-level engine configuration

use super::*;
use crate::utils::error::{AuthzError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Everything the authorizer needs besides its collaborators
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthzConfig {
    #[serde(default)]
    pub cache: DecisionCacheConfig,
    #[serde(default)]
    pub stock_fallback: StockFallbackConfig,
    #[serde(default)]
    pub audit: AuditConfig,
}

impl AuthzConfig {
    /// Build from `AUTHZ_*` environment variables, defaulting what is unset
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(enabled) = parse_var(&lookup, "AUTHZ_CACHE_ENABLED")? {
            config.cache.enabled = enabled;
        }
        if let Some(backend) = lookup("AUTHZ_CACHE_BACKEND") {
            config.cache.backend = CacheBackendKind::from_str(&backend)
                .map_err(|e| AuthzError::config(format!("AUTHZ_CACHE_BACKEND: {}", e)))?;
        }
        if let Some(max_entries) = parse_var(&lookup, "AUTHZ_CACHE_MAX_ENTRIES")? {
            config.cache.max_entries = max_entries;
        }
        if let Some(url) = lookup("AUTHZ_REDIS_URL") {
            config.cache.redis_url = Some(url);
        }
        if let Some(prefix) = lookup("AUTHZ_CACHE_PREFIX") {
            config.cache.key_prefix = prefix;
        }
        if let Some(ttl) = parse_var(&lookup, "AUTHZ_TTL_GRANTED")? {
            config.cache.ttl.granted = ttl;
        }
        if let Some(ttl) = parse_var(&lookup, "AUTHZ_TTL_FOUND_BUT_DENIED")? {
            config.cache.ttl.found_but_denied = ttl;
        }
        if let Some(ttl) = parse_var(&lookup, "AUTHZ_TTL_NOT_FOUND")? {
            config.cache.ttl.not_found = ttl;
        }
        if let Some(enabled) = parse_var(&lookup, "AUTHZ_STOCK_FALLBACK_ENABLED")? {
            config.stock_fallback.enabled = enabled;
        }
        if let Some(kinds) = lookup("AUTHZ_STOCK_FALLBACK_KINDS") {
            config.stock_fallback.kinds = kinds
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(enabled) = parse_var(&lookup, "AUTHZ_AUDIT_ENABLED")? {
            config.audit.enabled = enabled;
        }
        if let Some(record_grants) = parse_var(&lookup, "AUTHZ_AUDIT_RECORD_GRANTS")? {
            config.audit.record_grants = record_grants;
        }

        Ok(config)
    }

    /// Merge two configurations, with other taking precedence
    pub fn merge(mut self, other: Self) -> Self {
        self.cache = self.cache.merge(other.cache);
        self.stock_fallback = self.stock_fallback.merge(other.stock_fallback);
        self.audit = self.audit.merge(other.audit);
        self
    }
}

fn parse_var<F, T>(lookup: &F, name: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(name)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|e| AuthzError::config(format!("{}: invalid value '{}': {}", name, raw, e)))
        })
        .transpose()
}
