//! Integration tests for inventory-authz
//!
//! These tests drive the public API over real in-memory collaborators and
//! check observable behavior without mocking.

pub mod authorizer_tests;
pub mod config_tests;
pub mod object_tests;
pub mod role_tests;
pub mod warehouse_tests;
