//! In-memory grant store

use crate::core::grants::{GrantSubject, ObjectGrant, WarehouseGrant};
use crate::core::roles::RoleEdge;
use crate::core::types::{Capability, ObjectRef, PrincipalId, RoleName, UnitId, WarehouseId};
use crate::storage::{GrantStore, GrantWriter};
use crate::utils::error::{AuthzError, Result};
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Grant records held in memory.
///
/// Counts point lookups so callers can observe cache effectiveness, and can be
/// switched offline to simulate an unavailable store.
#[derive(Debug, Default)]
pub struct InMemoryGrantStore {
    warehouse_grants: DashMap<(UnitId, WarehouseId), WarehouseGrant>,
    object_grants: DashMap<(GrantSubject, ObjectRef), ObjectGrant>,
    role_edges: RwLock<HashSet<RoleEdge>>,
    role_capabilities: DashMap<RoleName, HashSet<Capability>>,
    lookups: AtomicU64,
    offline: AtomicBool,
}

impl InMemoryGrantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a warehouse grant without going through the writer
    pub fn insert_warehouse_grant(&self, grant: WarehouseGrant) -> Option<WarehouseGrant> {
        self.warehouse_grants
            .insert((grant.unit, grant.warehouse), grant)
    }

    /// Insert or replace an object grant without going through the writer
    pub fn insert_object_grant(&self, grant: ObjectGrant) -> Option<ObjectGrant> {
        self.object_grants
            .insert((grant.subject, grant.target.clone()), grant)
    }

    pub fn add_role_edge(&self, edge: RoleEdge) {
        self.role_edges.write().insert(edge);
    }

    pub fn remove_role_edge(&self, edge: &RoleEdge) -> bool {
        self.role_edges.write().remove(edge)
    }

    pub fn add_role_capability(&self, role: RoleName, capability: Capability) {
        self.role_capabilities
            .entry(role)
            .or_default()
            .insert(capability);
    }

    /// Number of point lookups served since creation or the last reset
    pub fn lookup_count(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }

    pub fn reset_lookup_count(&self) {
        self.lookups.store(0, Ordering::Relaxed);
    }

    /// While offline every read fails with a lookup error
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Relaxed);
    }

    fn begin_lookup(&self) -> Result<()> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        if self.offline.load(Ordering::Relaxed) {
            return Err(AuthzError::grant_lookup("grant store offline"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl GrantStore for InMemoryGrantStore {
    async fn warehouse_grant(
        &self,
        unit: UnitId,
        warehouse: WarehouseId,
    ) -> Result<Option<WarehouseGrant>> {
        self.begin_lookup()?;
        Ok(self
            .warehouse_grants
            .get(&(unit, warehouse))
            .map(|g| g.clone()))
    }

    async fn object_grant_for_principal(
        &self,
        principal: PrincipalId,
        target: &ObjectRef,
    ) -> Result<Option<ObjectGrant>> {
        self.begin_lookup()?;
        Ok(self
            .object_grants
            .get(&(GrantSubject::Principal(principal), target.clone()))
            .map(|g| g.clone()))
    }

    async fn object_grant_for_unit(
        &self,
        unit: UnitId,
        target: &ObjectRef,
    ) -> Result<Option<ObjectGrant>> {
        self.begin_lookup()?;
        Ok(self
            .object_grants
            .get(&(GrantSubject::Unit(unit), target.clone()))
            .map(|g| g.clone()))
    }

    async fn role_edges(&self) -> Result<Vec<RoleEdge>> {
        self.begin_lookup()?;
        Ok(self.role_edges.read().iter().cloned().collect())
    }

    async fn role_capabilities(&self, role: &RoleName) -> Result<HashSet<Capability>> {
        self.begin_lookup()?;
        Ok(self
            .role_capabilities
            .get(role)
            .map(|caps| caps.clone())
            .unwrap_or_default())
    }

    async fn object_grants(&self) -> Result<Vec<ObjectGrant>> {
        self.begin_lookup()?;
        Ok(self
            .object_grants
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }
}

#[async_trait::async_trait]
impl GrantWriter for InMemoryGrantStore {
    async fn put_warehouse_grant(&self, grant: WarehouseGrant) -> Result<Option<WarehouseGrant>> {
        Ok(self.insert_warehouse_grant(grant))
    }

    async fn remove_warehouse_grant(
        &self,
        unit: UnitId,
        warehouse: WarehouseId,
    ) -> Result<Option<WarehouseGrant>> {
        Ok(self
            .warehouse_grants
            .remove(&(unit, warehouse))
            .map(|(_, grant)| grant))
    }

    async fn put_object_grant(&self, grant: ObjectGrant) -> Result<Option<ObjectGrant>> {
        Ok(self.insert_object_grant(grant))
    }

    async fn remove_object_grant(
        &self,
        subject: GrantSubject,
        target: &ObjectRef,
    ) -> Result<Option<ObjectGrant>> {
        Ok(self
            .object_grants
            .remove(&(subject, target.clone()))
            .map(|(_, grant)| grant))
    }
}
