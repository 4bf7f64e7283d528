//! Error handling for the authorization engine
//!
//! This module defines all error types used throughout the engine. Only
//! [`AuthzError::InvalidAction`] and configuration errors ever reach a caller of
//! the `authorize*` functions; everything else is recovered as a denial.

#![allow(missing_docs)]

use thiserror::Error;

/// Result type alias for the engine
pub type Result<T> = std::result::Result<T, AuthzError>;

/// Main error type for the engine
#[derive(Error, Debug)]
pub enum AuthzError {
    /// A principal's organizational units could not be determined
    #[error("Identity resolution error: {0}")]
    IdentityResolution(String),

    /// Grant store unavailable or returned a malformed record
    #[error("Grant lookup error: {0}")]
    GrantLookup(String),

    /// Action name not recognized for the target kind
    #[error("Invalid action '{action}' for {target_kind}")]
    InvalidAction { action: String, target_kind: String },

    /// Grant validity window could not be evaluated
    #[error("Invalid time window: {0}")]
    InvalidTimeWindow(String),

    /// Decision cache backend errors
    #[error("Cache error: {0}")]
    Cache(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Redis errors
    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

/// Helper functions for creating specific errors
impl AuthzError {
    pub fn identity<S: Into<String>>(message: S) -> Self {
        Self::IdentityResolution(message.into())
    }

    pub fn grant_lookup<S: Into<String>>(message: S) -> Self {
        Self::GrantLookup(message.into())
    }

    pub fn invalid_action<A: Into<String>, K: Into<String>>(action: A, target_kind: K) -> Self {
        Self::InvalidAction {
            action: action.into(),
            target_kind: target_kind.into(),
        }
    }

    pub fn time_window<S: Into<String>>(message: S) -> Self {
        Self::InvalidTimeWindow(message.into())
    }

    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache(message.into())
    }

    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Whether the engine recovers this error locally as a denial.
    ///
    /// Invalid actions and bad configuration are programming errors and are
    /// surfaced to the caller instead.
    pub fn is_fail_closed(&self) -> bool {
        !matches!(self, Self::InvalidAction { .. } | Self::Config(_))
    }

    /// Short, stable name of the error kind for audit records.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::IdentityResolution(_) => "identity_resolution",
            Self::GrantLookup(_) => "grant_lookup",
            Self::InvalidAction { .. } => "invalid_action",
            Self::InvalidTimeWindow(_) => "invalid_time_window",
            Self::Cache(_) => "cache",
            Self::Config(_) => "config",
            Self::Yaml(_) => "yaml",
            Self::Serialization(_) => "serialization",
            Self::Io(_) => "io",
            #[cfg(feature = "redis")]
            Self::Redis(_) => "redis",
        }
    }
}
