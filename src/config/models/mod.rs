//! Configuration data models
//!
//! This module defines all configuration structures used by the engine.

#![allow(missing_docs)]

pub mod audit;
pub mod authz;
pub mod cache;
pub mod stock;

// Re-export all configuration types
pub use audit::*;
pub use authz::*;
pub use cache::*;
pub use stock::*;

use crate::core::decision_cache::DecisionTtl;

pub fn default_true() -> bool {
    true
}

pub fn default_granted_ttl() -> u64 {
    DecisionTtl::DEFAULT_GRANTED_SECS
}

pub fn default_found_but_denied_ttl() -> u64 {
    DecisionTtl::DEFAULT_FOUND_BUT_DENIED_SECS
}

pub fn default_not_found_ttl() -> u64 {
    DecisionTtl::DEFAULT_NOT_FOUND_SECS
}

/// Default maximum number of in-memory cache entries
pub fn default_max_entries() -> usize {
    10_000
}

pub fn default_key_prefix() -> String {
    "authz".to_string()
}

/// Object kinds that carry stock and may be reached through a warehouse
pub fn default_stock_kinds() -> Vec<String> {
    vec!["product".to_string()]
}
