//! Audit configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Audit configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Emit denials and superuser overrides to the tracing audit target
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Also record ordinary grants, not only denials and overrides
    #[serde(default)]
    pub record_grants: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            record_grants: false,
        }
    }
}

impl AuditConfig {
    pub fn merge(mut self, other: Self) -> Self {
        if !other.enabled {
            self.enabled = other.enabled;
        }
        if other.record_grants {
            self.record_grants = other.record_grants;
        }
        self
    }
}
