//! Collaborator adapters
//!
//! The engine never talks to a database directly. Identity data, grant
//! records and stock levels reach it through the traits defined here; the
//! surrounding application supplies implementations backed by its own store.
//! In-memory implementations live in [`memory`], and [`snapshot`] loads them
//! from a YAML document.

pub mod memory;
pub mod snapshot;

pub use memory::{InMemoryDirectory, InMemoryGrantStore, InMemoryStock};
pub use snapshot::{Snapshot, SnapshotStores};

use crate::core::grants::{GrantSubject, ObjectGrant, WarehouseGrant};
use crate::core::roles::RoleEdge;
use crate::core::types::{Capability, ObjectRef, PrincipalId, RoleName, UnitId, WarehouseId};
use crate::utils::error::Result;
use std::collections::HashSet;

/// Who a principal is and what it belongs to.
///
/// Implementations must never provision anything from these lookups: a
/// principal without a profile is reported through
/// [`units_of`](Self::units_of) as an error. Provisioning happens in
/// [`ensure_units_initialized`](Self::ensure_units_initialized), which the
/// adapter runs before the engine sees the principal.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Whether the principal is a system administrator
    async fn is_superuser(&self, principal: PrincipalId) -> Result<bool>;

    /// Organizational units the principal belongs to
    async fn units_of(&self, principal: PrincipalId) -> Result<HashSet<UnitId>>;

    /// Principals currently in `unit`
    async fn members_of(&self, unit: UnitId) -> Result<Vec<PrincipalId>>;

    /// Roles held by the principal through its role groups
    async fn roles_of(&self, principal: PrincipalId) -> Result<HashSet<RoleName>>;

    /// Capabilities assigned to the principal directly, outside any role
    async fn direct_capabilities(&self, principal: PrincipalId) -> Result<HashSet<Capability>>;

    /// Create an empty profile for the principal if it has none
    async fn ensure_units_initialized(&self, principal: PrincipalId) -> Result<()>;
}

/// Read access to grant records
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait GrantStore: Send + Sync {
    /// The grant tying `unit` to `warehouse`, if any
    async fn warehouse_grant(
        &self,
        unit: UnitId,
        warehouse: WarehouseId,
    ) -> Result<Option<WarehouseGrant>>;

    /// The object grant addressed directly to `principal` for `target`, if any
    async fn object_grant_for_principal(
        &self,
        principal: PrincipalId,
        target: &ObjectRef,
    ) -> Result<Option<ObjectGrant>>;

    /// The object grant addressed to `unit` for `target`, if any
    async fn object_grant_for_unit(
        &self,
        unit: UnitId,
        target: &ObjectRef,
    ) -> Result<Option<ObjectGrant>>;

    /// Every role-to-role edge
    async fn role_edges(&self) -> Result<Vec<RoleEdge>>;

    /// Capabilities bundled in `role` itself, excluding inherited ones
    async fn role_capabilities(&self, role: &RoleName) -> Result<HashSet<Capability>>;

    /// Every object grant, for periodic review
    async fn object_grants(&self) -> Result<Vec<ObjectGrant>>;
}

/// Write access to grant records.
///
/// Writes go through [`GrantAdmin`](crate::core::authorizer::GrantAdmin) so
/// that each one is followed by cache invalidation. Every `put` replaces the
/// record with the same key, keeping one grant per (unit, warehouse) and per
/// (subject, target).
#[async_trait::async_trait]
pub trait GrantWriter: Send + Sync {
    /// Insert or replace, returning the previous record
    async fn put_warehouse_grant(&self, grant: WarehouseGrant) -> Result<Option<WarehouseGrant>>;

    async fn remove_warehouse_grant(
        &self,
        unit: UnitId,
        warehouse: WarehouseId,
    ) -> Result<Option<WarehouseGrant>>;

    /// Insert or replace, returning the previous record
    async fn put_object_grant(&self, grant: ObjectGrant) -> Result<Option<ObjectGrant>>;

    async fn remove_object_grant(
        &self,
        subject: GrantSubject,
        target: &ObjectRef,
    ) -> Result<Option<ObjectGrant>>;
}

/// Where stock of an object is held
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait StockLocator: Send + Sync {
    /// Warehouses holding a positive quantity of `target`
    async fn warehouses_with_stock(&self, target: &ObjectRef) -> Result<Vec<WarehouseId>>;
}
