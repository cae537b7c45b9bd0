//! Error types for the screening engine.
//!
//! Only misconfiguration is an error. Missing or incomplete metrics are data
//! conditions that the category scorers record as findings.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building screening configuration.
#[derive(Debug, Error)]
pub enum ScreenerError {
    /// Category weights do not sum to 1.0 within tolerance.
    #[error("scoring weights must sum to 1.0 (±0.01), got {total:.4}")]
    InvalidWeights { total: f64 },

    /// A single category weight is negative.
    #[error("weight for {category} must be non-negative, got {value}")]
    NegativeWeight { category: &'static str, value: f64 },

    /// The settings file exists but could not be read.
    #[error("failed to read settings file {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON for [`crate::config::Settings`].
    #[error("failed to parse settings: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScreenerError>;
