//! Utility modules
//!
//! - **error**: The engine's error type and `Result` alias
//! - **logging**: `tracing` subscriber setup for binaries

pub mod error;
pub mod logging;

pub use error::{AuthzError, Result};
pub use logging::{LogFormat, init_logging};
