//! Role-based capability checks

use super::system::Authorizer;
use crate::core::audit::AuditTarget;
use crate::core::decision::{superuser_override, Decision, DecisionReason};
use crate::core::types::{Capability, PrincipalId, RoleName};
use crate::utils::error::Result;
use std::collections::HashSet;
use tracing::warn;

/// Action name recorded in the audit trail for capability checks
const USE_ACTION: &str = "use";

impl Authorizer {
    /// Whether `principal` holds `capability`, directly or through any role
    /// it holds or inherits.
    pub async fn authorize(&self, principal: PrincipalId, capability: &str) -> bool {
        self.check_capability(principal, &Capability::new(capability))
            .await
            .allowed
    }

    /// Capability check for an action in a functional area, e.g.
    /// `("inventory", "view")` checks `can_view_inventory`
    pub async fn authorize_area(&self, principal: PrincipalId, area: &str, action: &str) -> bool {
        self.check_capability(principal, &Capability::for_area(area, action))
            .await
            .allowed
    }

    /// Capability check with its reason. Capability checks are not cached.
    pub async fn check_capability(&self, principal: PrincipalId, capability: &Capability) -> Decision {
        let decision = match superuser_override(self.identity.as_ref(), principal).await {
            Some(decision) => decision,
            None => self.resolve_capability(principal, capability).await,
        };

        self.audit(
            principal,
            AuditTarget::Capability(capability.clone()),
            USE_ACTION,
            &decision,
        )
        .await;
        decision
    }

    async fn resolve_capability(&self, principal: PrincipalId, capability: &Capability) -> Decision {
        match self.identity.direct_capabilities(principal).await {
            Ok(direct) if direct.contains(capability) => {
                return Decision::allow(DecisionReason::CapabilityAssigned);
            }
            Ok(_) => {}
            Err(e) => {
                warn!(
                    "Cannot resolve capabilities of principal {}, denying {}: {}",
                    principal, capability, e
                );
                return Decision::failed(e);
            }
        }

        let roles = match self.effective_roles(principal).await {
            Ok(roles) => roles,
            Err(e) => {
                warn!(
                    "Cannot resolve roles of principal {}, denying {}: {}",
                    principal, capability, e
                );
                return Decision::failed(e);
            }
        };

        let mut roles: Vec<_> = roles.into_iter().collect();
        roles.sort();

        for role in roles {
            match self.grants.role_capabilities(&role).await {
                Ok(capabilities) if capabilities.contains(capability) => {
                    return Decision::allow(DecisionReason::RoleCapability(role));
                }
                Ok(_) => {}
                Err(e) => {
                    warn!(
                        "Cannot load capabilities of role {}, denying {}: {}",
                        role, capability, e
                    );
                    return Decision::failed(e);
                }
            }
        }

        Decision::deny(DecisionReason::NoGrant)
    }

    /// Roles held by `principal` plus every ancestor of those roles
    pub async fn effective_roles(&self, principal: PrincipalId) -> Result<HashSet<RoleName>> {
        let held = self.identity.roles_of(principal).await?;
        let graph = self.roles.snapshot(self.grants.as_ref()).await?;
        Ok(graph.expand(&held))
    }

    /// Every capability `principal` holds, directly or through roles
    pub async fn effective_capabilities(&self, principal: PrincipalId) -> Result<HashSet<Capability>> {
        let mut capabilities = self.identity.direct_capabilities(principal).await?;
        for role in self.effective_roles(principal).await? {
            capabilities.extend(self.grants.role_capabilities(&role).await?);
        }
        Ok(capabilities)
    }
}
