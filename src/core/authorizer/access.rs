//! Warehouse and object checks

use super::system::Authorizer;
use crate::core::audit::AuditTarget;
use crate::core::decision::{Decision, DecisionReason};
use crate::core::types::{ObjectAction, ObjectRef, PrincipalId, WarehouseAction, WarehouseId};
use crate::utils::error::Result;
use tracing::{debug, warn};

impl Authorizer {
    /// Whether `principal` may perform the named action on `warehouse`.
    ///
    /// Fails only when `action` is not one of `view`, `edit` or
    /// `manage_stock`; every other problem is a denial.
    pub async fn authorize_warehouse(
        &self,
        principal: PrincipalId,
        warehouse: WarehouseId,
        action: &str,
    ) -> Result<bool> {
        let action: WarehouseAction = action.parse()?;
        Ok(self.check_warehouse(principal, warehouse, action).await.allowed)
    }

    /// Typed warehouse check returning the full decision
    pub async fn check_warehouse(
        &self,
        principal: PrincipalId,
        warehouse: WarehouseId,
        action: WarehouseAction,
    ) -> Decision {
        let decision = self
            .warehouses
            .has_warehouse_access(principal, warehouse, action)
            .await;
        self.audit(
            principal,
            AuditTarget::Warehouse(warehouse),
            action.as_str(),
            &decision,
        )
        .await;
        decision
    }

    /// Whether `principal` may perform the named action on `target`.
    ///
    /// Fails only when `action` is not one of `view`, `edit` or `delete`.
    pub async fn authorize_object(
        &self,
        principal: PrincipalId,
        target: &ObjectRef,
        action: &str,
    ) -> Result<bool> {
        let action: ObjectAction = action.parse()?;
        Ok(self.check_object(principal, target, action).await.allowed)
    }

    /// Typed object check returning the full decision.
    ///
    /// When object grants deny `view` on a stock-bearing kind, the object is
    /// still viewable if some warehouse the principal may view holds stock
    /// of it.
    pub async fn check_object(
        &self,
        principal: PrincipalId,
        target: &ObjectRef,
        action: ObjectAction,
    ) -> Decision {
        let mut decision = self
            .objects
            .has_object_permission(principal, target, action)
            .await;

        if !decision.allowed
            && action == ObjectAction::View
            && self.config.stock_fallback.applies_to(&target.kind)
        {
            if let Some(fallback) = self.stock_fallback(principal, target).await {
                decision = fallback;
            }
        }

        self.audit(
            principal,
            AuditTarget::Object(target.clone()),
            action.as_str(),
            &decision,
        )
        .await;
        decision
    }

    async fn stock_fallback(&self, principal: PrincipalId, target: &ObjectRef) -> Option<Decision> {
        let stock = self.stock.as_ref()?;

        let warehouses = match stock.warehouses_with_stock(target).await {
            Ok(warehouses) => warehouses,
            Err(e) => {
                warn!("Stock lookup failed for {}, skipping fallback: {}", target, e);
                return None;
            }
        };

        for warehouse in warehouses {
            let access = self
                .warehouses
                .has_warehouse_access(principal, warehouse, WarehouseAction::View)
                .await;
            if access.allowed {
                debug!(
                    "Principal {} may view {} through stocked warehouse {}",
                    principal, target, warehouse
                );
                return Some(Decision::allow(DecisionReason::StockFallback(warehouse)));
            }
        }
        None
    }

    /// The subset of `candidates` that `principal` may view, in input order
    pub async fn accessible_warehouses(
        &self,
        principal: PrincipalId,
        candidates: &[WarehouseId],
    ) -> Vec<WarehouseId> {
        let mut accessible = Vec::with_capacity(candidates.len());
        for &warehouse in candidates {
            if self
                .warehouses
                .has_warehouse_access(principal, warehouse, WarehouseAction::View)
                .await
                .allowed
            {
                accessible.push(warehouse);
            }
        }
        accessible
    }
}
