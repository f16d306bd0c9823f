//! YAML configuration file support for the triage service.
//!
//! One file describes where model artifacts live, which recovery plan table
//! to use, how symptom text is normalized, the two rejection thresholds and
//! logging.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//!
//! artifacts_dir: "artifacts"
//! # Omit to use the bundled table.
//! recovery_plans: "plans.yaml"
//!
//! canonical:
//!   version: 1
//!   normalize_unicode: true
//!   lowercase: true
//!   min_token_chars: 2
//!
//! decision:
//!   percent_threshold: 0.40
//!   margin_threshold: 0.5
//!
//! log_level: "info"
//! log_json: false
//! ```
//!
//! ## Environment overrides
//!
//! [`TriageConfig::apply_env_overrides`] lets deployments retune without
//! editing the file:
//!
//! | Variable | Field |
//! |---|---|
//! | `TRIAGE_PERCENT_THRESHOLD` | `decision.percent_threshold` |
//! | `TRIAGE_MARGIN_THRESHOLD` | `decision.margin_threshold` |
//! | `TRIAGE_ARTIFACTS_DIR` | `artifacts_dir` |
//! | `TRIAGE_RECOVERY_PLANS` | `recovery_plans` |

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use canonical::CanonicalizeConfig;
use decision::DecisionConfig;

pub const ENV_PERCENT_THRESHOLD: &str = "TRIAGE_PERCENT_THRESHOLD";
pub const ENV_MARGIN_THRESHOLD: &str = "TRIAGE_MARGIN_THRESHOLD";
pub const ENV_ARTIFACTS_DIR: &str = "TRIAGE_ARTIFACTS_DIR";
pub const ENV_RECOVERY_PLANS: &str = "TRIAGE_RECOVERY_PLANS";

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),

    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("failed to load recovery plans: {0}")]
    Recovery(#[from] recovery::RecoveryError),
}

/// Top-level configuration for the triage pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TriageConfig {
    /// Configuration format version
    pub version: String,

    /// Directory holding `vectorizer.json`, `classifier.json` and
    /// `labels.json`.
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,

    /// Recovery plan table (JSON or YAML). The bundled table is used when
    /// absent.
    #[serde(default)]
    pub recovery_plans: Option<PathBuf>,

    #[serde(default)]
    pub canonical: CanonicalizeConfig,

    #[serde(default)]
    pub decision: DecisionConfig,

    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON log lines instead of the human-readable format.
    #[serde(default)]
    pub log_json: bool,
}

impl TriageConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: TriageConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        if self.artifacts_dir.as_os_str().is_empty() {
            return Err(ConfigLoadError::Validation(
                "artifacts_dir must not be empty".to_string(),
            ));
        }
        self.canonical
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("canonical: {err}")))?;
        self.decision
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("decision: {err}")))?;
        Ok(())
    }

    /// Apply `TRIAGE_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigLoadError> {
        self.apply_overrides_from(|var| std::env::var(var).ok())
    }

    /// Apply `TRIAGE_*` overrides from an arbitrary lookup, then revalidate.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_PERCENT_THRESHOLD) {
            self.decision.percent_threshold = parse_threshold(ENV_PERCENT_THRESHOLD, value)?;
        }
        if let Some(value) = lookup(ENV_MARGIN_THRESHOLD) {
            self.decision.margin_threshold = parse_threshold(ENV_MARGIN_THRESHOLD, value)?;
        }
        if let Some(value) = lookup(ENV_ARTIFACTS_DIR) {
            self.artifacts_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup(ENV_RECOVERY_PLANS) {
            self.recovery_plans = Some(PathBuf::from(value));
        }
        self.validate()
    }
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            artifacts_dir: default_artifacts_dir(),
            recovery_plans: None,
            canonical: CanonicalizeConfig::default(),
            decision: DecisionConfig::default(),
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

fn parse_threshold(var: &'static str, value: String) -> Result<f64, ConfigLoadError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| ConfigLoadError::InvalidEnv { var, value })
}

fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

fn default_log_level() -> String {
    "info".to_string()
}
