//! Authorization façade
//!
//! [`Authorizer`] combines role capabilities, warehouse grants and object
//! grants behind the boolean API the rest of the application calls on every
//! request. It also owns cache invalidation and the audit trail.
//!
//! The implementation is split across files by concern:
//! - `system`: construction and wiring
//! - `capabilities`: role-based capability checks
//! - `access`: warehouse and object checks
//! - `invalidation`: cache invalidation hooks
//! - `admin`: grant writes followed by invalidation

mod access;
mod admin;
mod capabilities;
mod invalidation;
mod system;

pub use admin::GrantAdmin;
pub use system::{Authorizer, AuthorizerBuilder, cache_from_config};
