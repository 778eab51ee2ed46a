//! Converter configuration: TOML file plus `PIONEER_*` environment overrides.

use crate::converter::{AmountConverter, DECIMAL_PLACES, DEFAULT_PRECISION, MAX_DECIMAL_PLACES};
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const ENV_DECIMAL_PLACES: &str = "PIONEER_DECIMAL_PLACES";
pub const ENV_DEFAULT_PRECISION: &str = "PIONEER_DEFAULT_PRECISION";
pub const ENV_SYMBOL: &str = "PIONEER_SYMBOL";

/// Token denomination settings shared by every conversion in the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    /// Decimal places `D`: one token is `10^D` smallest units
    pub decimal_places: u32,
    /// Fractional digits shown when the caller does not ask for a precision
    pub default_precision: u32,
    /// Unit symbol appended by symbol-aware formatting
    pub symbol: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            decimal_places: DECIMAL_PLACES,
            default_precision: DEFAULT_PRECISION,
            symbol: "JOY".to_string(),
        }
    }
}

impl ConverterConfig {
    /// Load from an optional TOML file, then apply environment overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|name| env::var(name).ok())?;
        config.validate()?;

        info!(
            decimal_places = config.decimal_places,
            default_precision = config.default_precision,
            symbol = %config.symbol,
            "Loaded converter config"
        );
        Ok(config)
    }

    /// Parse a TOML file; missing keys fall back to defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Read converter config from {}", path.display());
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in `load`).
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_DECIMAL_PLACES) {
            self.decimal_places = parse_env(ENV_DECIMAL_PLACES, &value)?;
        }
        if let Some(value) = lookup(ENV_DEFAULT_PRECISION) {
            self.default_precision = parse_env(ENV_DEFAULT_PRECISION, &value)?;
        }
        if let Some(value) = lookup(ENV_SYMBOL) {
            self.symbol = value.trim().to_string();
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(ConfigError::DecimalPlacesOutOfRange {
                decimals: self.decimal_places,
                max: MAX_DECIMAL_PLACES,
            });
        }
        if self.default_precision > self.decimal_places {
            return Err(ConfigError::InvalidValue(format!(
                "default_precision {} exceeds decimal_places {}",
                self.default_precision, self.decimal_places
            )));
        }
        if self.symbol.is_empty() {
            return Err(ConfigError::InvalidValue("symbol must not be empty".into()));
        }
        Ok(())
    }

    /// Build the converter described by this config
    pub fn converter(&self) -> Result<AmountConverter, ConfigError> {
        AmountConverter::new(self.decimal_places)
    }
}

fn parse_env(name: &'static str, value: &str) -> Result<u32, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        name,
        value: value.to_string(),
    })
}
