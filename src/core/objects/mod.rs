//! Object permission resolution
//!
//! Object grants are addressed either to a principal directly or to one of
//! its units, and may be bounded in time. Validity is re-checked on every
//! evaluation, never only when a grant is created.

mod resolver;

pub use resolver::ObjectResolver;
