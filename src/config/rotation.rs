//! Scheduler configuration.

use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::core::{AppResult, ConfigError};

/// Environment variable overriding [`RotationConfig::min_interval_secs`].
pub const MIN_INTERVAL_ENV: &str = "BANNER_MIN_INTERVAL_SECS";
/// Environment variable overriding [`RotationConfig::control_capacity`].
pub const CONTROL_CAPACITY_ENV: &str = "BANNER_CONTROL_CAPACITY";

/// Rotation scheduler configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Shortest interval the administrative surface accepts, in seconds.
    pub min_interval_secs: u64,
    /// Buffered control messages before callers wait on the loop.
    pub control_capacity: usize,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            min_interval_secs: 15 * 60,
            control_capacity: 16,
        }
    }
}

impl RotationConfig {
    /// Minimum interval as a `Duration`.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        Duration::from_secs(self.min_interval_secs)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "min_interval_secs must be greater than 0".into(),
            ));
        }
        if self.control_capacity == 0 {
            return Err(ConfigError::Invalid(
                "control_capacity must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Parse configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed JSON, `ConfigError::Invalid`
    /// for out-of-range values.
    pub fn from_json_str(input: &str) -> Result<Self, ConfigError> {
        let cfg: Self =
            serde_json::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from the environment, reading `.env` if present.
    /// Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Fails if a variable is set but not a valid number, or validation fails.
    pub fn from_env() -> AppResult<Self> {
        let _ = dotenvy::dotenv();
        let mut cfg = Self::default();

        if let Ok(raw) = std::env::var(MIN_INTERVAL_ENV) {
            cfg.min_interval_secs = raw
                .trim()
                .parse()
                .with_context(|| format!("{MIN_INTERVAL_ENV}={raw} is not a number"))?;
        }
        if let Ok(raw) = std::env::var(CONTROL_CAPACITY_ENV) {
            cfg.control_capacity = raw
                .trim()
                .parse()
                .with_context(|| format!("{CONTROL_CAPACITY_ENV}={raw} is not a number"))?;
        }

        cfg.validate().context("rotation config invalid")?;
        Ok(cfg)
    }
}
