//! Test fixtures
//!
//! [`TestWorld`] wires real in-memory adapters to an [`Authorizer`]. Nothing
//! here is mocked.

use chrono::{TimeZone, Utc};
use inventory_authz::{
    Authorizer, AuthzConfig, GrantAdmin, InMemoryDirectory, InMemoryGrantStore, InMemoryStock,
    ManualClock, MemoryAuditSink, MemoryDecisionCache, PrincipalId, Snapshot, UnitId, WarehouseId,
};
use std::sync::Arc;

pub const CLERK: PrincipalId = PrincipalId::new(1);
pub const PICKER: PrincipalId = PrincipalId::new(2);
pub const AUDITOR: PrincipalId = PrincipalId::new(3);
pub const ADMIN: PrincipalId = PrincipalId::new(99);

pub const OPS: UnitId = UnitId::new(10);
pub const SALES: UnitId = UnitId::new(20);

pub const CENTRAL: WarehouseId = WarehouseId::new(7);
pub const HARBOR: WarehouseId = WarehouseId::new(8);
pub const OUTLET: WarehouseId = WarehouseId::new(9);

/// A small inventory organisation
pub const WORLD_YAML: &str = r#"
principals:
  - id: 1
    units: [10]
    roles: [inventory_clerk]
  - id: 2
    units: [10, 20]
  - id: 3
    capabilities: [can_view_reports]
  - id: 99
    superuser: true
roles:
  - name: inventory_manager
    capabilities: [can_create_order, can_approve_order]
  - name: warehouse_manager
    capabilities: [can_edit_inventory]
    parents: [inventory_manager]
  - name: inventory_clerk
    capabilities: [can_view_inventory]
    parents: [warehouse_manager]
warehouse_grants:
  - { warehouse: 7, unit: 10, can_view: true, can_manage_stock: true }
  - { warehouse: 8, unit: 20, can_view: true, can_edit: true }
object_grants:
  - subject: { principal: 1 }
    target: { kind: document, id: 5 }
    can_view: true
    valid_until: "2024-06-01T00:00:00Z"
  - subject: { unit: 10 }
    target: { kind: document, id: 5 }
    can_view: true
    can_edit: true
    valid_from: "2024-05-01T00:00:00Z"
  - subject: { unit: 20 }
    target: { kind: product, id: 42 }
    can_edit: true
stock:
  - target: { kind: product, id: 42 }
    warehouse: 7
    quantity: 12
  - target: { kind: product, id: 43 }
    warehouse: 9
    quantity: 4
"#;

/// Fully wired engine over in-memory collaborators
pub struct TestWorld {
    pub directory: Arc<InMemoryDirectory>,
    pub grants: Arc<InMemoryGrantStore>,
    pub stock: Arc<InMemoryStock>,
    pub cache: Arc<MemoryDecisionCache>,
    pub audit: Arc<MemoryAuditSink>,
    pub clock: Arc<ManualClock>,
    pub authorizer: Authorizer,
}

impl TestWorld {
    /// The organisation described by [`WORLD_YAML`] at 2024-06-15 12:00 UTC
    pub fn new() -> Self {
        Self::with_config(AuthzConfig::default())
    }

    pub fn with_config(config: AuthzConfig) -> Self {
        Self::from_yaml(WORLD_YAML, config)
    }

    pub fn from_yaml(yaml: &str, config: AuthzConfig) -> Self {
        let stores = Snapshot::from_yaml_str(yaml)
            .expect("fixture snapshot parses")
            .into_stores()
            .expect("fixture snapshot is consistent");

        let directory = Arc::new(stores.directory);
        let grants = Arc::new(stores.grants);
        let stock = Arc::new(stores.stock);
        let cache = Arc::new(MemoryDecisionCache::default());
        let audit = Arc::new(MemoryAuditSink::new());
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap(),
        ));

        let authorizer = Authorizer::builder(directory.clone(), grants.clone())
            .cache(cache.clone())
            .stock(stock.clone())
            .audit(audit.clone())
            .clock(clock.clone())
            .config(config)
            .build()
            .expect("fixture config is valid");

        Self {
            directory,
            grants,
            stock,
            cache,
            audit,
            clock,
            authorizer,
        }
    }

    pub fn admin(&self) -> GrantAdmin {
        GrantAdmin::new(self.grants.clone(), self.authorizer.clone())
    }
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}
