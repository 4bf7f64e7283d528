//! Error handling utilities
//!
//! This module provides the engine's error type and the crate-wide `Result` alias.

pub mod error;

// Re-export commonly used types and functions
pub use error::*;
