//! Warehouse access resolution
//!
//! Warehouse access flows only through organizational units: a principal may
//! act on a warehouse when one of its units holds a grant covering the action.

mod resolver;

pub use resolver::WarehouseResolver;
