//! Object permission resolver

use crate::core::clock::Clock;
use crate::core::decision::{superuser_override, Decision, DecisionReason};
use crate::core::decision_cache::{DecisionKey, VerdictCache};
use crate::core::grants::{GrantSubject, ObjectGrant};
use crate::core::types::{ObjectAction, ObjectRef, PrincipalId};
use crate::storage::{GrantStore, IdentityProvider};
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::{debug, warn};

/// Decides view/edit/delete permission on an arbitrary domain object
#[derive(Clone)]
pub struct ObjectResolver {
    identity: Arc<dyn IdentityProvider>,
    grants: Arc<dyn GrantStore>,
    cache: VerdictCache,
    clock: Arc<dyn Clock>,
}

impl ObjectResolver {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        grants: Arc<dyn GrantStore>,
        cache: VerdictCache,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            identity,
            grants,
            cache,
            clock,
        }
    }

    /// Decide whether `principal` may perform `action` on `target`.
    ///
    /// The grant addressed to the principal is consulted first, then the
    /// grants of each of its units. An expired or insufficient direct grant
    /// does not stop the search.
    pub async fn has_object_permission(
        &self,
        principal: PrincipalId,
        target: &ObjectRef,
        action: ObjectAction,
    ) -> Decision {
        if let Some(decision) = superuser_override(self.identity.as_ref(), principal).await {
            return decision;
        }

        let key = DecisionKey::object(principal, target, action);
        if let Some(outcome) = self.cache.lookup(&key).await {
            return Decision::cached(outcome);
        }

        let decision = self.resolve(principal, target, action).await;
        self.cache.record(&key, decision.outcome()).await;
        decision
    }

    async fn resolve(
        &self,
        principal: PrincipalId,
        target: &ObjectRef,
        action: ObjectAction,
    ) -> Decision {
        let mut found = Vec::new();
        let mut window_error = None;

        match self.grants.object_grant_for_principal(principal, target).await {
            Ok(Some(grant)) => match self.satisfies(&grant, action) {
                Ok(true) => return Decision::allow(DecisionReason::GrantMatched(grant.subject)),
                Ok(false) => found.push(grant.subject),
                Err(e) => window_error = Some(e),
            },
            Ok(None) => {}
            Err(e) => {
                warn!(
                    "Object grant lookup failed for principal {} on {}, denying: {}",
                    principal, target, e
                );
                return Decision::failed(e);
            }
        }

        let units = match self.identity.units_of(principal).await {
            Ok(units) => units,
            Err(e) => {
                warn!(
                    "Cannot resolve units of principal {}, denying {} on {}: {}",
                    principal, action, target, e
                );
                return Decision::failed(e);
            }
        };

        let mut units: Vec<_> = units.into_iter().collect();
        units.sort();

        for unit in units {
            match self.grants.object_grant_for_unit(unit, target).await {
                Ok(Some(grant)) => match self.satisfies(&grant, action) {
                    Ok(true) => {
                        debug!(
                            "Principal {} may {} {} through unit {}",
                            principal, action, target, unit
                        );
                        return Decision::allow(DecisionReason::GrantMatched(GrantSubject::Unit(
                            unit,
                        )));
                    }
                    Ok(false) => found.push(GrantSubject::Unit(unit)),
                    Err(e) => window_error = window_error.or(Some(e)),
                },
                Ok(None) => {}
                Err(e) => {
                    warn!(
                        "Object grant lookup failed for unit {} on {}, denying: {}",
                        unit, target, e
                    );
                    return Decision::failed(e);
                }
            }
        }

        // An unreadable window is a failed resolution, not a near miss
        if let Some(e) = window_error {
            return Decision::failed(e);
        }

        if found.is_empty() {
            Decision::deny(DecisionReason::NoGrant)
        } else {
            Decision::deny(DecisionReason::GrantInsufficient(found))
        }
    }

    /// Whether `grant` is valid right now and covers `action`.
    /// A window that cannot be evaluated is reported as an error.
    fn satisfies(&self, grant: &ObjectGrant, action: ObjectAction) -> Result<bool> {
        match grant.window.check(self.clock.now()) {
            Ok(true) => Ok(grant.allows(action)),
            Ok(false) => {
                debug!(
                    "Grant for {} on {} is outside its validity window",
                    grant.subject, grant.target
                );
                Ok(false)
            }
            Err(e) => {
                warn!(
                    "Treating grant for {} on {} as invalid: {}",
                    grant.subject, grant.target, e
                );
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for ObjectResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectResolver")
            .field("cache", &self.cache)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
