//! Runtime configuration for the syntax engine
//!
//! Layered as defaults, then an optional TOML file, then `TYPEWRITER_*`
//! environment variables.

use crate::error::{Result, SyntaxError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Environment variable prefix for overrides (e.g. `TYPEWRITER_TIMEOUT_MS`)
const ENV_PREFIX: &str = "TYPEWRITER";

/// Syntax engine configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntaxConfig {
    /// Quiet period after the last edit before classification runs
    pub debounce_ms: u64,

    /// Per-request deadline for a classification reply
    pub timeout_ms: u64,

    /// Capacity of the bounded request channel into the worker
    pub request_capacity: usize,

    /// Classification cache size (0 disables caching)
    pub cache_capacity: usize,
}

impl Default for SyntaxConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 150,
            timeout_ms: 5000,
            request_capacity: 32,
            cache_capacity: 64,
        }
    }
}

impl SyntaxConfig {
    /// Load configuration from an optional file plus environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let settings: SyntaxConfig = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the dispatcher cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.timeout_ms == 0 {
            return Err(SyntaxError::Config(config::ConfigError::Message(
                "timeout_ms must be greater than zero".to_string(),
            )));
        }
        if self.request_capacity == 0 {
            return Err(SyntaxError::Config(config::ConfigError::Message(
                "request_capacity must be greater than zero".to_string(),
            )));
        }
        Ok(())
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
