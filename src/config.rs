//! Configuration management
//!
//! Loads gateway settings from an optional `config.toml` with `GATEWAY_*`
//! environment overrides, falling back to built-in defaults.

use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

/// Gateway configuration.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GatewayConfig {
    /// IP address the HTTP listener binds to
    pub bind_address: String,

    /// Port for the HTTP listener
    pub port: u16,

    /// Root directory all client-addressable paths resolve under
    pub root_dir: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 3000,
            // Local example directory. Fine for trying the gateway out, not
            // a safe default for production deployments.
            root_dir: "./example".to_string(),
        }
    }
}

impl GatewayConfig {
    /// Load from `config.toml` if present, then apply environment
    /// overrides (e.g. `GATEWAY_ROOT_DIR`, `GATEWAY_PORT`).
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("GATEWAY"))
            .build()?;

        let config: GatewayConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.port == 0 {
            return Err(config::ConfigError::Message("port cannot be 0".into()));
        }
        if self.root_dir.is_empty() {
            return Err(config::ConfigError::Message(
                "root_dir cannot be empty".into(),
            ));
        }
        Ok(())
    }

    /// Bind address and port as a socket address string.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }

    /// Root directory as a path.
    pub fn root_path(&self) -> PathBuf {
        PathBuf::from(&self.root_dir)
    }
}
