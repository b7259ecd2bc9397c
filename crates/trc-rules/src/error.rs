//! # Error Types
//!
//! Failures while loading rule and rate tables or validating user-supplied
//! amounts and country codes. Lookups of unknown countries or currencies
//! are not errors; they return `None`.

use thiserror::Error;

/// Errors raised by `trc-rules`.
#[derive(Error, Debug)]
pub enum RulesError {
    /// Country code was empty or whitespace-only.
    #[error("invalid country code: {0:?}")]
    InvalidCountryCode(String),

    /// Amount input was empty.
    #[error("amount is empty")]
    EmptyAmount,

    /// Amount input was not a non-negative integer that fits in 64 bits.
    #[error("invalid amount: {0:?} (expected digits only)")]
    InvalidAmount(String),

    /// JSON table could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML table could not be parsed.
    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Table file could not be read.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for `trc-rules` operations.
pub type RulesResult<T> = Result<T, RulesError>;
