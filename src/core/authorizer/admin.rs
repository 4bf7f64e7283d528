//! Grant administration

use super::system::Authorizer;
use crate::core::grants::{GrantSubject, ObjectGrant, WarehouseGrant};
use crate::core::types::{ObjectRef, UnitId, WarehouseId};
use crate::storage::GrantWriter;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::info;

/// Writes grants and invalidates the affected cache entries in the same call
#[derive(Clone)]
pub struct GrantAdmin {
    writer: Arc<dyn GrantWriter>,
    authorizer: Authorizer,
}

impl GrantAdmin {
    pub fn new(writer: Arc<dyn GrantWriter>, authorizer: Authorizer) -> Self {
        Self { writer, authorizer }
    }

    pub fn authorizer(&self) -> &Authorizer {
        &self.authorizer
    }

    /// Create or replace the grant for (unit, warehouse)
    pub async fn put_warehouse_grant(&self, grant: WarehouseGrant) -> Result<Option<WarehouseGrant>> {
        let (unit, warehouse) = (grant.unit, grant.warehouse);
        let previous = self.writer.put_warehouse_grant(grant).await?;
        self.authorizer
            .invalidate_warehouse_grant_cache(unit, warehouse)
            .await;
        Ok(previous)
    }

    pub async fn remove_warehouse_grant(
        &self,
        unit: UnitId,
        warehouse: WarehouseId,
    ) -> Result<Option<WarehouseGrant>> {
        let removed = self.writer.remove_warehouse_grant(unit, warehouse).await?;
        if removed.is_some() {
            self.authorizer
                .invalidate_warehouse_grant_cache(unit, warehouse)
                .await;
        }
        Ok(removed)
    }

    /// Create or replace the grant for (subject, target)
    pub async fn put_object_grant(&self, grant: ObjectGrant) -> Result<Option<ObjectGrant>> {
        let subject = grant.subject;
        let target = grant.target.clone();
        let previous = self.writer.put_object_grant(grant).await?;
        self.authorizer
            .invalidate_object_grant_cache(subject, &target)
            .await;
        Ok(previous)
    }

    pub async fn remove_object_grant(
        &self,
        subject: GrantSubject,
        target: &ObjectRef,
    ) -> Result<Option<ObjectGrant>> {
        let removed = self.writer.remove_object_grant(subject, target).await?;
        if removed.is_some() {
            self.authorizer
                .invalidate_object_grant_cache(subject, target)
                .await;
        }
        Ok(removed)
    }

    /// Object grants whose validity window has already ended
    pub async fn expired_object_grants(&self) -> Result<Vec<ObjectGrant>> {
        let now = self.authorizer.clock().now();
        let mut expired: Vec<ObjectGrant> = self
            .authorizer
            .grants
            .object_grants()
            .await?
            .into_iter()
            .filter(|grant| grant.window.has_expired(now))
            .collect();
        expired.sort_by(|a, b| {
            (a.target.kind.as_str(), a.target.id).cmp(&(b.target.kind.as_str(), b.target.id))
        });
        Ok(expired)
    }

    /// Delete every expired object grant, returning how many were removed
    pub async fn purge_expired_object_grants(&self) -> Result<usize> {
        let expired = self.expired_object_grants().await?;
        let mut removed = 0;
        for grant in expired {
            if self
                .remove_object_grant(grant.subject, &grant.target)
                .await?
                .is_some()
            {
                removed += 1;
            }
        }
        info!("Purged {} expired object grants", removed);
        Ok(removed)
    }
}

impl std::fmt::Debug for GrantAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GrantAdmin")
            .field("authorizer", &self.authorizer)
            .finish_non_exhaustive()
    }
}
