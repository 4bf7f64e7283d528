//! Deterministic cache keys

use crate::core::types::{ObjectAction, ObjectRef, PrincipalId, WarehouseAction, WarehouseId};
use std::fmt::{self, Display};

/// Cache key derived from (principal, target kind, target id, action)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecisionKey(String);

impl DecisionKey {
    /// Key for a warehouse check: `warehouse_access:<principal>:<warehouse>:<action>`
    pub fn warehouse(principal: PrincipalId, warehouse: WarehouseId, action: WarehouseAction) -> Self {
        Self(format!("warehouse_access:{}:{}:{}", principal, warehouse, action))
    }

    /// Key for an object check: `object_permission:<principal>:<kind>:<id>:<action>`
    pub fn object(principal: PrincipalId, target: &ObjectRef, action: ObjectAction) -> Self {
        Self(format!(
            "object_permission:{}:{}:{}:{}",
            principal, target.kind, target.id, action
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for DecisionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DecisionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
