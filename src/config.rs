//! Code generation settings
//!
//! Defaults match the values baked into the generated snippets historically.
//! Each setting can be overridden from the environment and, in the server binary,
//! from the command line.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Environment variable overriding [`GeneratorConfig::max_diff_pixel_ratio`]
pub const ENV_MAX_DIFF_PIXEL_RATIO: &str = "INSPECT_ASSERT_MAX_DIFF_PIXEL_RATIO";
/// Environment variable overriding [`GeneratorConfig::dropdown_settle_ms`]
pub const ENV_DROPDOWN_SETTLE_MS: &str = "INSPECT_ASSERT_DROPDOWN_SETTLE_MS";
/// Environment variable overriding [`GeneratorConfig::dropdown_timeout_ms`]
pub const ENV_DROPDOWN_TIMEOUT_MS: &str = "INSPECT_ASSERT_DROPDOWN_TIMEOUT_MS";

/// Errors raised when a setting is out of range or cannot be parsed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("max_diff_pixel_ratio must be within [0, 1], got {0}")]
    RatioOutOfRange(f64),
    #[error("dropdown_timeout_ms must be greater than zero")]
    ZeroTimeout,
    #[error("invalid value {value:?} for {name}")]
    Unparsable { name: String, value: String },
}

/// Settings that flow into the generated assertion code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Fraction of pixels allowed to differ in screenshot comparisons
    pub max_diff_pixel_ratio: f64,
    /// Fixed wait after clicking a select, so a previously opened dropdown can close
    pub dropdown_settle_ms: u64,
    /// Bound on the first wait for the dropdown before the trigger is clicked again
    pub dropdown_timeout_ms: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_diff_pixel_ratio: 0.01,
            dropdown_settle_ms: 1000,
            dropdown_timeout_ms: 3000,
        }
    }
}

impl GeneratorConfig {
    pub fn with_max_diff_pixel_ratio(mut self, ratio: f64) -> Self {
        self.max_diff_pixel_ratio = ratio;
        self
    }

    pub fn with_dropdown_settle_ms(mut self, millis: u64) -> Self {
        self.dropdown_settle_ms = millis;
        self
    }

    pub fn with_dropdown_timeout_ms(mut self, millis: u64) -> Self {
        self.dropdown_timeout_ms = millis;
        self
    }

    /// Reject values that would produce a meaningless assertion
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.max_diff_pixel_ratio) {
            return Err(ConfigError::RatioOutOfRange(self.max_diff_pixel_ratio));
        }
        if self.dropdown_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// Defaults overlaid with any `INSPECT_ASSERT_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().overlay(|name| std::env::var(name).ok())
    }

    /// Apply overrides from a variable lookup, then validate.
    pub fn overlay<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_MAX_DIFF_PIXEL_RATIO) {
            self.max_diff_pixel_ratio = parse_setting(ENV_MAX_DIFF_PIXEL_RATIO, &raw)?;
            debug!("max_diff_pixel_ratio overridden: {}", self.max_diff_pixel_ratio);
        }
        if let Some(raw) = lookup(ENV_DROPDOWN_SETTLE_MS) {
            self.dropdown_settle_ms = parse_setting(ENV_DROPDOWN_SETTLE_MS, &raw)?;
            debug!("dropdown_settle_ms overridden: {}", self.dropdown_settle_ms);
        }
        if let Some(raw) = lookup(ENV_DROPDOWN_TIMEOUT_MS) {
            self.dropdown_timeout_ms = parse_setting(ENV_DROPDOWN_TIMEOUT_MS, &raw)?;
            debug!("dropdown_timeout_ms overridden: {}", self.dropdown_timeout_ms);
        }
        self.validate().inspect_err(|e| warn!("Rejected generator config: {e}"))?;
        Ok(self)
    }
}

fn parse_setting<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::Unparsable {
        name: name.to_string(),
        value: raw.to_string(),
    })
}
