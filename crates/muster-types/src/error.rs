//! Error hierarchy for Muster.

use thiserror::Error;

/// A rank code that is not one of the 19 catalog values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RankError {
    #[error("Invalid rank '{code}'. Use E1–E9 or O1–O10.")]
    Invalid { code: String },
}

impl RankError {
    pub fn invalid(code: impl Into<String>) -> Self {
        RankError::Invalid { code: code.into() }
    }
}

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file parse error at {path}: {message}")]
    Parse { path: String, message: String },

    #[error("Missing required configuration: {key}")]
    MissingKey { key: String },

    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}
