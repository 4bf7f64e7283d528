//! Stock fallback configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Controls the coarse "viewable through a stocked warehouse" allowance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockFallbackConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Object kinds eligible for the fallback
    #[serde(default = "default_stock_kinds")]
    pub kinds: Vec<String>,
}

impl Default for StockFallbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            kinds: default_stock_kinds(),
        }
    }
}

impl StockFallbackConfig {
    pub fn applies_to(&self, kind: &str) -> bool {
        self.enabled && self.kinds.iter().any(|k| k == kind)
    }

    pub fn merge(mut self, other: Self) -> Self {
        if !other.enabled {
            self.enabled = other.enabled;
        }
        if other.kinds != default_stock_kinds() {
            self.kinds = other.kinds;
        }
        self
    }
}
