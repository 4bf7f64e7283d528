//! Configuration validation
//!
//! - `trait_def`: Core Validate trait definition
//! - `authz_validators`: Validators for the engine configuration sections
//! - `tests`: Test suite for all validators

mod authz_validators;
mod trait_def;

pub use trait_def::Validate;
