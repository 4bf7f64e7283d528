//! In-memory collaborator adapters
//!
//! Backed by `DashMap` so reads never block each other. Suitable for tests,
//! embedding, and evaluating YAML snapshots offline.

mod directory;
mod grants;
mod stock;

pub use directory::{InMemoryDirectory, Profile};
pub use grants::InMemoryGrantStore;
pub use stock::InMemoryStock;
