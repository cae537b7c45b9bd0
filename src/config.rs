//! Runtime settings for the screener binary.
//!
//! Settings are read from a JSON file. Every section is optional:
//!
//! ```json
//! {
//!   "criteria": { "valuation": { "pe_ratio_max": 20.0 } },
//!   "weights": { "valuation": 0.3, "profitability": 0.3, "risk": 0.2, "dividend": 0.2 },
//!   "observability": { "log_level": "debug", "log_format": "json" },
//!   "report": { "format": "markdown", "output_dir": "./reports" }
//! }
//! ```

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ScreenerError};
use crate::screener::config::{ScoringWeights, ScreeningCriteria};
use crate::screener::report::ReportFormat;

/// Environment variable naming an explicit settings file.
pub const CONFIG_ENV_VAR: &str = "FUNDAMENTAL_SCREENER_CONFIG";

const CONFIG_DIR_NAME: &str = "fundamental-screener";
const CONFIG_FILE_NAME: &str = "config.json";

/// Application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub criteria: ScreeningCriteria,
    pub weights: ScoringWeights,
    pub observability: ObservabilityConfig,
    pub report: ReportConfig,
}

/// Logging options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// pretty | compact | json
    #[serde(default = "default_log_format")]
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

/// Report output options.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: ReportFormat,
    /// Directory reports are written to; stdout when unset
    pub output_dir: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the usual places.
    ///
    /// Looks at the path in `FUNDAMENTAL_SCREENER_CONFIG` first, then
    /// `<config dir>/fundamental-screener/config.json`. Falls back to defaults
    /// when neither file exists.
    pub fn load() -> Result<Self> {
        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&path));
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                debug!("No settings file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Read settings from a specific file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ScreenerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&content)?;
        debug!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    /// Parse settings from a JSON string. Weights are validated while parsing.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// `<config dir>/fundamental-screener/config.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }
}
