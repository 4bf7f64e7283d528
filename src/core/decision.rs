//! Verdicts and the reasons behind them

use crate::core::decision_cache::Outcome;
use crate::core::grants::GrantSubject;
use crate::core::types::{PrincipalId, RoleName, WarehouseId};
use crate::storage::IdentityProvider;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use tracing::warn;

/// Why a check ended the way it did
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum DecisionReason {
    /// The principal is a system administrator
    SuperuserOverride,
    /// Served from the decision cache, with the outcome of the original check
    CacheHit(Outcome),
    /// The grant held by this subject covers the action
    GrantMatched(GrantSubject),
    /// Grants exist for these subjects but none covers the action at this time
    GrantInsufficient(Vec<GrantSubject>),
    /// No grant exists for the principal or any of its units
    NoGrant,
    /// An object is reachable through a viewable warehouse holding stock of it
    StockFallback(WarehouseId),
    /// The capability is assigned to the principal directly
    CapabilityAssigned,
    /// The capability comes with this role, held directly or inherited
    RoleCapability(RoleName),
    /// A collaborator failed; access is denied
    ResolutionFailed(String),
}

impl DecisionReason {
    /// Outcome class used to choose the cache retention of a fresh verdict
    pub fn outcome(&self, allowed: bool) -> Outcome {
        match self {
            Self::CacheHit(outcome) => *outcome,
            Self::GrantInsufficient(_) => Outcome::FoundButDenied,
            Self::NoGrant | Self::ResolutionFailed(_) => Outcome::NotFound,
            _ if allowed => Outcome::Granted,
            _ => Outcome::NotFound,
        }
    }
}

impl Display for DecisionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SuperuserOverride => f.write_str("superuser override"),
            Self::CacheHit(outcome) => write!(f, "cached verdict ({})", outcome),
            Self::GrantMatched(subject) => write!(f, "grant held by {}", subject),
            Self::GrantInsufficient(subjects) => {
                let subjects: Vec<String> = subjects.iter().map(ToString::to_string).collect();
                write!(f, "grants for {} do not cover the action", subjects.join(", "))
            }
            Self::NoGrant => f.write_str("no grant found"),
            Self::StockFallback(warehouse) => {
                write!(f, "stocked in viewable warehouse {}", warehouse)
            }
            Self::CapabilityAssigned => f.write_str("capability assigned directly"),
            Self::RoleCapability(role) => write!(f, "capability via role {}", role),
            Self::ResolutionFailed(error) => write!(f, "resolution failed: {}", error),
        }
    }
}

/// A verdict together with its reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub allowed: bool,
    pub reason: DecisionReason,
}

impl Decision {
    pub fn allow(reason: DecisionReason) -> Self {
        Self {
            allowed: true,
            reason,
        }
    }

    pub fn deny(reason: DecisionReason) -> Self {
        Self {
            allowed: false,
            reason,
        }
    }

    pub fn superuser() -> Self {
        Self::allow(DecisionReason::SuperuserOverride)
    }

    pub fn cached(outcome: Outcome) -> Self {
        Self {
            allowed: outcome.is_granted(),
            reason: DecisionReason::CacheHit(outcome),
        }
    }

    /// Fail-closed denial for a collaborator error
    pub fn failed(error: impl Display) -> Self {
        Self::deny(DecisionReason::ResolutionFailed(error.to_string()))
    }

    pub fn outcome(&self) -> Outcome {
        self.reason.outcome(self.allowed)
    }

    pub fn is_superuser_override(&self) -> bool {
        matches!(self.reason, DecisionReason::SuperuserOverride)
    }

    pub fn is_cache_hit(&self) -> bool {
        matches!(self.reason, DecisionReason::CacheHit(_))
    }
}

/// Superuser short-circuit shared by the resolvers.
///
/// A failing superuser lookup is not a denial on its own: the principal is
/// checked like anyone else.
pub(crate) async fn superuser_override(
    identity: &dyn IdentityProvider,
    principal: PrincipalId,
) -> Option<Decision> {
    match identity.is_superuser(principal).await {
        Ok(true) => Some(Decision::superuser()),
        Ok(false) => None,
        Err(e) => {
            warn!(
                "Superuser lookup failed for principal {}, checking grants instead: {}",
                principal, e
            );
            None
        }
    }
}
