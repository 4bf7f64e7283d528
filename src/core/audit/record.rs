//! Audit record types

use crate::core::decision::{Decision, DecisionReason};
use crate::core::types::{Capability, ObjectRef, PrincipalId, WarehouseId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use uuid::Uuid;

/// What a check was about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditTarget {
    Warehouse(WarehouseId),
    Object(ObjectRef),
    Capability(Capability),
}

impl Display for AuditTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warehouse(id) => write!(f, "warehouse:{}", id),
            Self::Object(target) => write!(f, "{}", target),
            Self::Capability(capability) => write!(f, "capability:{}", capability),
        }
    }
}

/// One audited decision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub principal: PrincipalId,
    pub target: AuditTarget,
    pub action: String,
    pub allowed: bool,
    pub reason: DecisionReason,
}

impl AuditRecord {
    pub fn new(
        principal: PrincipalId,
        target: AuditTarget,
        action: impl Into<String>,
        decision: &Decision,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp,
            principal,
            target,
            action: action.into(),
            allowed: decision.allowed,
            reason: decision.reason.clone(),
        }
    }

    pub fn is_denial(&self) -> bool {
        !self.allowed
    }

    pub fn is_superuser_override(&self) -> bool {
        matches!(self.reason, DecisionReason::SuperuserOverride)
    }
}
