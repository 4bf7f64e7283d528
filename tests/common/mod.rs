//! Common test utilities for inventory-authz
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::TestWorld;
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let world = TestWorld::new();
//!     // ...
//! }
//! ```

pub mod assertions;
pub mod fixtures;

// Re-export commonly used items
pub use assertions::DecisionAssertions;
pub use fixtures::TestWorld;
