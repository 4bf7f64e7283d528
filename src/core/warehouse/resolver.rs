//! Warehouse access resolver

use crate::core::decision::{superuser_override, Decision, DecisionReason};
use crate::core::decision_cache::{DecisionKey, VerdictCache};
use crate::core::grants::GrantSubject;
use crate::core::types::{PrincipalId, WarehouseAction, WarehouseId};
use crate::storage::{GrantStore, IdentityProvider};
use std::sync::Arc;
use tracing::{debug, warn};

/// Decides view/edit/manage-stock access to a warehouse
#[derive(Clone)]
pub struct WarehouseResolver {
    identity: Arc<dyn IdentityProvider>,
    grants: Arc<dyn GrantStore>,
    cache: VerdictCache,
}

impl WarehouseResolver {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        grants: Arc<dyn GrantStore>,
        cache: VerdictCache,
    ) -> Self {
        Self {
            identity,
            grants,
            cache,
        }
    }

    /// Decide whether `principal` may perform `action` on `warehouse`.
    ///
    /// Superusers are always allowed and never cached. Everything else is
    /// served from the cache when possible; a fresh verdict is cached for the
    /// retention matching its outcome. Collaborator failures deny.
    pub async fn has_warehouse_access(
        &self,
        principal: PrincipalId,
        warehouse: WarehouseId,
        action: WarehouseAction,
    ) -> Decision {
        if let Some(decision) = superuser_override(self.identity.as_ref(), principal).await {
            return decision;
        }

        let key = DecisionKey::warehouse(principal, warehouse, action);
        if let Some(outcome) = self.cache.lookup(&key).await {
            return Decision::cached(outcome);
        }

        let decision = self.resolve(principal, warehouse, action).await;
        self.cache.record(&key, decision.outcome()).await;
        decision
    }

    async fn resolve(
        &self,
        principal: PrincipalId,
        warehouse: WarehouseId,
        action: WarehouseAction,
    ) -> Decision {
        let units = match self.identity.units_of(principal).await {
            Ok(units) => units,
            Err(e) => {
                warn!(
                    "Cannot resolve units of principal {}, denying {} on warehouse {}: {}",
                    principal, action, warehouse, e
                );
                return Decision::failed(e);
            }
        };

        let mut units: Vec<_> = units.into_iter().collect();
        units.sort();

        let mut found = Vec::new();
        for unit in units {
            let grant = match self.grants.warehouse_grant(unit, warehouse).await {
                Ok(Some(grant)) => grant,
                Ok(None) => continue,
                Err(e) => {
                    warn!(
                        "Warehouse grant lookup failed for unit {} on warehouse {}, denying: {}",
                        unit, warehouse, e
                    );
                    return Decision::failed(e);
                }
            };

            if grant.allows(action) {
                debug!(
                    "Principal {} may {} warehouse {} through unit {}",
                    principal, action, warehouse, unit
                );
                return Decision::allow(DecisionReason::GrantMatched(GrantSubject::Unit(unit)));
            }
            found.push(GrantSubject::Unit(unit));
        }

        if found.is_empty() {
            Decision::deny(DecisionReason::NoGrant)
        } else {
            Decision::deny(DecisionReason::GrantInsufficient(found))
        }
    }
}

impl std::fmt::Debug for WarehouseResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WarehouseResolver")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
