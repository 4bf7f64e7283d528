//! Configuration management for the engine
//!
//! This module handles loading, validation, and merging of the engine configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{AuthzError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub authz: AuthzConfig,
}

impl Config {
    /// Load configuration from file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AuthzError::config(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_yaml_str(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let authz: AuthzConfig = serde_yaml::from_str(content)
            .map_err(|e| AuthzError::config(format!("Failed to parse config: {}", e)))?;

        let config = Self { authz };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let authz = AuthzConfig::from_env()?;
        let config = Self { authz };

        config.validate()?;
        Ok(config)
    }

    pub fn authz(&self) -> &AuthzConfig {
        &self.authz
    }

    pub fn cache(&self) -> &DecisionCacheConfig {
        &self.authz.cache
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");
        self.authz.validate().map_err(AuthzError::Config)
    }

    /// Merge with another configuration (other takes precedence)
    pub fn merge(mut self, other: Self) -> Self {
        self.authz = self.authz.merge(other.authz);
        self
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.authz)
            .map_err(|e| AuthzError::config(format!("Failed to serialize config to JSON: {}", e)))
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.authz)
            .map_err(|e| AuthzError::config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
