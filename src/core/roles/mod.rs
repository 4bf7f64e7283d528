//! Role hierarchy resolution
//!
//! Roles inherit every capability of their parent roles, transitively. The
//! role graph is administrator-managed and not guaranteed to be acyclic, so
//! ancestry is always computed iteratively with a visited set.

mod hierarchy;

pub use hierarchy::{RoleEdge, RoleGraph, RoleHierarchy};
