//! YAML snapshot of identities, grants and stock
//!
//! A snapshot fully describes an authorization world and can be loaded into
//! the in-memory adapters, which is how the `authz-check` binary evaluates
//! checks offline.

use super::memory::{InMemoryDirectory, InMemoryGrantStore, InMemoryStock, Profile};
use crate::core::grants::{GrantSubject, ObjectGrant, WarehouseGrant};
use crate::core::roles::RoleEdge;
use crate::core::types::{Capability, ObjectRef, PrincipalId, RoleName, UnitId, WarehouseId};
use crate::utils::error::{AuthzError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// One principal and its memberships
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrincipalEntry {
    pub id: PrincipalId,
    #[serde(default)]
    pub superuser: bool,
    #[serde(default)]
    pub units: Vec<UnitId>,
    #[serde(default)]
    pub roles: Vec<RoleName>,
    #[serde(default)]
    pub capabilities: Vec<Capability>,
}

/// One role, its own capabilities and the roles it inherits from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleEntry {
    pub name: RoleName,
    #[serde(default)]
    pub capabilities: Vec<Capability>,
    #[serde(default)]
    pub parents: Vec<RoleName>,
}

/// Quantity of one object held in one warehouse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockEntry {
    pub target: ObjectRef,
    pub warehouse: WarehouseId,
    pub quantity: i64,
}

/// Complete authorization state as a YAML document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub principals: Vec<PrincipalEntry>,
    #[serde(default)]
    pub roles: Vec<RoleEntry>,
    #[serde(default)]
    pub warehouse_grants: Vec<WarehouseGrant>,
    #[serde(default)]
    pub object_grants: Vec<ObjectGrant>,
    #[serde(default)]
    pub stock: Vec<StockEntry>,
}

/// In-memory adapters populated from a [`Snapshot`]
#[derive(Debug, Default)]
pub struct SnapshotStores {
    pub directory: InMemoryDirectory,
    pub grants: InMemoryGrantStore,
    pub stock: InMemoryStock,
}

impl Snapshot {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            AuthzError::config(format!(
                "Failed to read snapshot file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_yaml_str(&content)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Check the uniqueness invariants the stores rely on
    pub fn validate(&self) -> Result<()> {
        let mut principals = HashSet::new();
        for entry in &self.principals {
            if !principals.insert(entry.id) {
                return Err(AuthzError::config(format!(
                    "principal {} is listed twice",
                    entry.id
                )));
            }
        }

        let mut roles = HashSet::new();
        for entry in &self.roles {
            if !roles.insert(&entry.name) {
                return Err(AuthzError::config(format!(
                    "role {} is listed twice",
                    entry.name
                )));
            }
        }

        let mut warehouse_keys = HashSet::new();
        for grant in &self.warehouse_grants {
            if !warehouse_keys.insert((grant.unit, grant.warehouse)) {
                return Err(AuthzError::config(format!(
                    "more than one grant for unit {} on warehouse {}",
                    grant.unit, grant.warehouse
                )));
            }
        }

        let mut object_keys: HashSet<(GrantSubject, &ObjectRef)> = HashSet::new();
        for grant in &self.object_grants {
            if !object_keys.insert((grant.subject, &grant.target)) {
                return Err(AuthzError::config(format!(
                    "more than one grant for {} on {}",
                    grant.subject, grant.target
                )));
            }
        }

        Ok(())
    }

    /// Validate and load everything into fresh in-memory adapters
    pub fn into_stores(self) -> Result<SnapshotStores> {
        self.validate()?;
        let stores = SnapshotStores::default();

        for entry in self.principals {
            stores.directory.insert(
                entry.id,
                Profile {
                    superuser: entry.superuser,
                    units: entry.units.into_iter().collect(),
                    roles: entry.roles.into_iter().collect(),
                    capabilities: entry.capabilities.into_iter().collect(),
                },
            );
        }

        for role in self.roles {
            for capability in role.capabilities {
                stores.grants.add_role_capability(role.name.clone(), capability);
            }
            for parent in role.parents {
                stores
                    .grants
                    .add_role_edge(RoleEdge::new(parent, role.name.clone()));
            }
        }

        let warehouse_grants = self.warehouse_grants.len();
        for grant in self.warehouse_grants {
            stores.grants.insert_warehouse_grant(grant);
        }

        let object_grants = self.object_grants.len();
        for grant in self.object_grants {
            stores.grants.insert_object_grant(grant);
        }

        for entry in self.stock {
            stores
                .stock
                .set_quantity(entry.target, entry.warehouse, entry.quantity);
        }

        info!(
            "Loaded snapshot: {} principals, {} warehouse grants, {} object grants",
            stores.directory.len(),
            warehouse_grants,
            object_grants
        );
        Ok(stores)
    }
}
