//! Decision cache configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Where cached decisions live
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackendKind {
    #[default]
    Memory,
    Redis,
}

impl std::str::FromStr for CacheBackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "redis" => Ok(Self::Redis),
            other => Err(format!("unknown cache backend '{}'", other)),
        }
    }
}

/// Per-outcome retention in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtlConfig {
    #[serde(default = "default_granted_ttl")]
    pub granted: u64,
    #[serde(default = "default_found_but_denied_ttl")]
    pub found_but_denied: u64,
    #[serde(default = "default_not_found_ttl")]
    pub not_found: u64,
}

impl Default for TtlConfig {
    fn default() -> Self {
        Self {
            granted: default_granted_ttl(),
            found_but_denied: default_found_but_denied_ttl(),
            not_found: default_not_found_ttl(),
        }
    }
}

impl TtlConfig {
    pub fn policy(&self) -> DecisionTtl {
        DecisionTtl {
            granted: self.granted,
            found_but_denied: self.found_but_denied,
            not_found: self.not_found,
        }
    }

    pub fn merge(mut self, other: Self) -> Self {
        if other.granted != default_granted_ttl() {
            self.granted = other.granted;
        }
        if other.found_but_denied != default_found_but_denied_ttl() {
            self.found_but_denied = other.found_but_denied;
        }
        if other.not_found != default_not_found_ttl() {
            self.not_found = other.not_found;
        }
        self
    }
}

/// Decision cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionCacheConfig {
    /// Disabling the cache changes latency only, never verdicts
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub backend: CacheBackendKind,
    #[serde(default)]
    pub ttl: TtlConfig,
    /// Capacity of the in-memory backend
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
    /// Required for the Redis backend
    #[serde(default)]
    pub redis_url: Option<String>,
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
}

impl Default for DecisionCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            backend: CacheBackendKind::default(),
            ttl: TtlConfig::default(),
            max_entries: default_max_entries(),
            redis_url: None,
            key_prefix: default_key_prefix(),
        }
    }
}

impl DecisionCacheConfig {
    /// Merge cache configurations
    pub fn merge(mut self, other: Self) -> Self {
        if !other.enabled {
            self.enabled = other.enabled;
        }
        if other.backend != CacheBackendKind::default() {
            self.backend = other.backend;
        }
        self.ttl = self.ttl.merge(other.ttl);
        if other.max_entries != default_max_entries() {
            self.max_entries = other.max_entries;
        }
        if other.redis_url.is_some() {
            self.redis_url = other.redis_url;
        }
        if other.key_prefix != default_key_prefix() {
            self.key_prefix = other.key_prefix;
        }
        self
    }
}
