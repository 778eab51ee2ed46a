use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while converting token amounts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("invalid numeric format {input:?}: {reason}")]
    InvalidNumericFormat { input: String, reason: &'static str },
}

impl AmountError {
    pub(crate) fn invalid(input: &str, reason: &'static str) -> Self {
        Self::InvalidNumericFormat {
            input: input.to_string(),
            reason,
        }
    }
}

/// Errors raised while loading converter configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for environment variable {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("decimal places {decimals} exceed maximum {max}")]
    DecimalPlacesOutOfRange { decimals: u32, max: u32 },

    #[error("invalid config value: {0}")]
    InvalidValue(String),
}

pub type Result<T> = std::result::Result<T, AmountError>;
