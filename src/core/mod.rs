//! Core authorization engine
//!
//! Leaf-first: domain types and grants, the decision cache, the role
//! hierarchy, the warehouse and object resolvers, and the [`authorizer`]
//! façade that combines them.

pub mod audit;
pub mod authorizer;
pub mod clock;
pub mod decision;
pub mod decision_cache;
pub mod grants;
pub mod objects;
pub mod roles;
pub mod types;
pub mod warehouse;
