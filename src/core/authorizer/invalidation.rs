//! Cache invalidation hooks
//!
//! Called after a grant write has committed. Only the keys the write can
//! affect are deleted; there is no broader sweep. A reader racing the write
//! may still cache a stale verdict, bounded by its TTL.

use super::system::Authorizer;
use crate::core::decision_cache::DecisionKey;
use crate::core::grants::GrantSubject;
use crate::core::types::{ObjectAction, ObjectRef, PrincipalId, UnitId, WarehouseAction, WarehouseId};
use tracing::{error, info};

impl Authorizer {
    /// Drop cached warehouse decisions of every member of `unit` for
    /// `warehouse`, for all three actions. Returns the number of keys deleted.
    pub async fn invalidate_warehouse_grant_cache(
        &self,
        unit: UnitId,
        warehouse: WarehouseId,
    ) -> usize {
        let members = match self.identity.members_of(unit).await {
            Ok(members) => members,
            Err(e) => {
                error!(
                    "Cannot list members of unit {}; cached decisions for warehouse {} stay until expiry: {}",
                    unit, warehouse, e
                );
                return 0;
            }
        };

        let mut deleted = 0;
        for principal in &members {
            for action in WarehouseAction::ALL {
                let key = DecisionKey::warehouse(*principal, warehouse, action);
                if self.cache.forget(&key).await {
                    deleted += 1;
                }
            }
        }

        info!(
            "Invalidated {} cached decisions for unit {} on warehouse {} ({} members)",
            deleted,
            unit,
            warehouse,
            members.len()
        );
        deleted
    }

    /// Drop cached object decisions affected by a grant to `subject` on
    /// `target`, for all three actions. Returns the number of keys deleted.
    pub async fn invalidate_object_grant_cache(
        &self,
        subject: GrantSubject,
        target: &ObjectRef,
    ) -> usize {
        let principals: Vec<PrincipalId> = match subject {
            GrantSubject::Principal(principal) => vec![principal],
            GrantSubject::Unit(unit) => match self.identity.members_of(unit).await {
                Ok(members) => members,
                Err(e) => {
                    error!(
                        "Cannot list members of unit {}; cached decisions for {} stay until expiry: {}",
                        unit, target, e
                    );
                    return 0;
                }
            },
        };

        let mut deleted = 0;
        for principal in &principals {
            for action in ObjectAction::ALL {
                let key = DecisionKey::object(*principal, target, action);
                if self.cache.forget(&key).await {
                    deleted += 1;
                }
            }
        }

        info!(
            "Invalidated {} cached decisions for {} on {}",
            deleted, subject, target
        );
        deleted
    }

    /// Re-read role edges and publish the new hierarchy.
    ///
    /// On failure the previous hierarchy stays in effect and `false` is
    /// returned.
    pub async fn reload_role_hierarchy(&self) -> bool {
        match self.roles.reload(self.grants.as_ref()).await {
            Ok(_) => true,
            Err(e) => {
                error!("Failed to reload role hierarchy, keeping previous graph: {}", e);
                false
            }
        }
    }
}
