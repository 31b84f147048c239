//! Engine configuration.
//!
//! Policy values such as the central-bank base rate are supplied by the caller
//! (TOML file, CLI flag or environment) rather than compiled in.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Statutory ceiling on any legal conversion rate, in percent.
pub const LEGAL_RATE_CEILING: f64 = 10.0;

/// Spread added to the base rate to obtain the legal cap, in percentage points.
pub const LEGAL_RATE_SPREAD: f64 = 2.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunables for one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Central-bank base rate in percent.
    pub bok_base_rate: f64,
    /// Number of past months to request from the transaction source.
    pub months_back: u32,
    /// Raw transactions a tier needs before it is considered sufficient.
    pub min_transactions: usize,
    /// Relative half-width of the exclusive-area band (0.1 = ±10%).
    pub area_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bok_base_rate: 2.5,
            months_back: 6,
            min_transactions: 5,
            area_tolerance: 0.1,
        }
    }
}

impl EngineConfig {
    /// Legal conversion-rate cap: `min(10, base rate + 2)`.
    pub fn legal_rate_cap(&self) -> f64 {
        (self.bok_base_rate + LEGAL_RATE_SPREAD).min(LEGAL_RATE_CEILING)
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        info!(path = %path.display(), cap = config.legal_rate_cap(), "loaded engine config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.bok_base_rate.is_finite() || self.bok_base_rate < 0.0 {
            return Err(ConfigError::Invalid {
                field: "bok_base_rate",
                reason: format!("must be a non-negative percentage, got {}", self.bok_base_rate),
            });
        }
        if self.months_back == 0 {
            return Err(ConfigError::Invalid {
                field: "months_back",
                reason: "must be at least 1".into(),
            });
        }
        if self.min_transactions < 2 {
            return Err(ConfigError::Invalid {
                field: "min_transactions",
                reason: format!("must be at least 2, got {}", self.min_transactions),
            });
        }
        if !(0.0..1.0).contains(&self.area_tolerance) {
            return Err(ConfigError::Invalid {
                field: "area_tolerance",
                reason: format!("must be in [0, 1), got {}", self.area_tolerance),
            });
        }
        Ok(())
    }
}
