//! Runtime configuration for the fulfillment engine.
//!
//! Loaded from TOML, with a couple of environment overrides for the values
//! operators tune most:
//!
//! ```toml
//! removal_grace = "3s"
//! store_buffer = 32
//! bus_capacity = 256
//! view_capacity = 64
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub const REMOVAL_GRACE_ENV: &str = "FULFILLMENT_REMOVAL_GRACE_MS";
pub const STORE_BUFFER_ENV: &str = "FULFILLMENT_STORE_BUFFER";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    ZeroCapacity(&'static str),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FulfillmentConfig {
    /// How long a completed order stays on screen before it is dropped from
    /// the working set.
    #[serde(with = "humantime_serde")]
    pub removal_grace: Duration,

    /// Request buffer of each store table actor.
    pub store_buffer: usize,

    /// Capacity of the cross-client broadcast bus.
    pub bus_capacity: usize,

    /// Capacity of each dashboard's UI event channel.
    pub view_capacity: usize,
}

impl Default for FulfillmentConfig {
    fn default() -> Self {
        Self {
            removal_grace: Duration::from_secs(3),
            store_buffer: 32,
            bus_capacity: 256,
            view_capacity: 64,
        }
    }
}

impl FulfillmentConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()
    }

    /// Reads `path` and applies environment overrides on top.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Loaded config file");
        Self::from_toml_str(&content)?.with_overrides(|var| std::env::var(var).ok())
    }

    /// Defaults plus environment overrides.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides(|var| std::env::var(var).ok())
    }

    /// Applies overrides looked up by variable name.
    pub fn with_overrides(
        mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(value) = lookup(REMOVAL_GRACE_ENV) {
            let ms = parse_env(REMOVAL_GRACE_ENV, value)?;
            self.removal_grace = Duration::from_millis(ms);
        }
        if let Some(value) = lookup(STORE_BUFFER_ENV) {
            self.store_buffer = parse_env(STORE_BUFFER_ENV, value)?;
        }
        self.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        // Tokio panics on zero-capacity channels.
        if self.store_buffer == 0 {
            return Err(ConfigError::ZeroCapacity("store_buffer"));
        }
        if self.bus_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("bus_capacity"));
        }
        if self.view_capacity == 0 {
            return Err(ConfigError::ZeroCapacity("view_capacity"));
        }
        Ok(self)
    }
}

fn parse_env<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { var, value })
}
