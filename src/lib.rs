//! # inventory-authz
//!
//! Authorization resolution engine for warehouse and inventory backends.
//!
//! Given a principal and a target (a warehouse, an arbitrary domain object or
//! a named capability) the engine decides whether an action is permitted. It
//! is meant to be called on every request.
//!
//! ## Features
//!
//! - **Warehouse grants**: per-unit `view`, `edit` and `manage_stock` flags
//! - **Object grants**: addressed to a principal or a unit, optionally time-bounded
//! - **Role inheritance**: capabilities flow down a role graph that may contain cycles
//! - **Decision cache**: verdicts cached for a retention chosen by *why* they were reached
//! - **Fail-closed**: collaborator failures deny access and are cached like a missing grant
//! - **Audit trail**: every denial and superuser override goes to an [`AuditSink`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use inventory_authz::{Authorizer, PrincipalId, Snapshot, WarehouseId};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let stores = Snapshot::from_file("authz.yaml").await?.into_stores()?;
//!     let authorizer = Authorizer::builder(Arc::new(stores.directory), Arc::new(stores.grants))
//!         .stock(Arc::new(stores.stock))
//!         .build()?;
//!
//!     let allowed = authorizer
//!         .authorize_warehouse(PrincipalId::new(1), WarehouseId::new(7), "view")
//!         .await?;
//!     println!("allowed: {}", allowed);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::{AuthzConfig, Config};
pub use crate::core::audit::{AuditRecord, AuditSink, AuditTarget, MemoryAuditSink, TracingAuditSink};
pub use crate::core::authorizer::{Authorizer, AuthorizerBuilder, GrantAdmin, cache_from_config};
pub use crate::core::clock::{Clock, ManualClock, SystemClock};
pub use crate::core::decision::{Decision, DecisionReason};
pub use crate::core::decision_cache::{
    DecisionCache, DecisionKey, DecisionTtl, MemoryDecisionCache, NoopDecisionCache, Outcome,
};
pub use crate::core::grants::{GrantSubject, ObjectGrant, TimeWindow, WarehouseGrant};
pub use crate::core::roles::{RoleEdge, RoleGraph, RoleHierarchy};
pub use crate::core::types::{
    Capability, ObjectAction, ObjectRef, PrincipalId, RoleName, UnitId, WarehouseAction,
    WarehouseId,
};
pub use storage::{
    GrantStore, GrantWriter, IdentityProvider, InMemoryDirectory, InMemoryGrantStore,
    InMemoryStock, Snapshot, StockLocator,
};
pub use utils::error::{AuthzError, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
