//! Configuration Module
//!
//! This module defines all configuration structures for the batcher.
//! Configuration is loaded from TOML files and parsed using serde; the
//! private key itself never lives in the file and is read from the environment.

use serde::Deserialize;
use std::{env, fs};

/// Main configuration structure
///
/// # Example TOML
/// ```toml
/// [api]
/// host = "127.0.0.1"
/// port = 8000
/// max_body_bytes = 1048576
///
/// [signing]
/// private_key_env = "PRIVATE_KEY"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    #[serde(default)]
    pub signing: SigningConfig,
}

/// API server configuration
///
/// # Fields
/// - `host`: IP address to bind to (e.g., "127.0.0.1" or "0.0.0.0")
/// - `port`: TCP port to listen on
/// - `max_body_bytes`: Largest accepted transaction list body
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Batch signing configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SigningConfig {
    /// Name of the environment variable holding the hex private key
    #[serde(default = "default_private_key_env")]
    pub private_key_env: String,
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            private_key_env: default_private_key_env(),
        }
    }
}

impl SigningConfig {
    /// Read the private key from the configured environment variable
    ///
    /// Unset and empty variables both mean "no key".
    pub fn private_key(&self) -> Option<String> {
        env::var(&self.private_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

fn default_max_body_bytes() -> usize {
    1024 * 1024
}

fn default_private_key_env() -> String {
    "PRIVATE_KEY".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Returns
    /// * `Ok(Config)` if the file was successfully loaded and parsed
    /// * `Err` if the file couldn't be read or the TOML is invalid
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}
