//! Recovery plan mapper.
//!
//! A [`RecoveryTable`] maps a resolved diagnosis label to a static
//! [`RecoveryPlan`]. Lookup is exact-match and total: any label that is not in
//! the table, including the "Unknown Condition" sentinel, gets the single
//! default plan.
//!
//! The table is data, not code. [`RecoveryTable::builtin`] parses the copy
//! bundled with the crate (`data/recovery_plans.json`);
//! [`RecoveryTable::from_file`] loads an operator-supplied JSON or YAML file
//! of the same shape so plans can change without a rebuild:
//!
//! ```yaml
//! default:
//!   title: Balanced Recovery Bowl
//!   tags: [Nutrient Dense, Healing]
//!   details: [Fresh seasonal vegetables and fruits]
//! plans:
//!   Migraine:
//!     title: Trigger-Free Nutrition
//!     tags: [Mg Rich, Hydrating]
//!     details: [Stay consistently hydrated throughout the day]
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUILTIN_PLANS: &str = include_str!("../data/recovery_plans.json");

/// Dietary and behavioral recommendation record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryPlan {
    pub title: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub details: Vec<String>,
}

/// Errors raised while loading a recovery table.
#[derive(Debug, Error)]
pub enum RecoveryError {
    #[error("failed to read recovery plans: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse recovery plans JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("failed to parse recovery plans YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Diagnosis label to plan mapping with one fallback record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveryTable {
    default: RecoveryPlan,
    #[serde(default)]
    plans: BTreeMap<String, RecoveryPlan>,
}

impl RecoveryTable {
    pub fn new(
        default: RecoveryPlan,
        plans: BTreeMap<String, RecoveryPlan>,
    ) -> Result<Self, RecoveryError> {
        let table = Self { default, plans };
        table.validate()?;
        Ok(table)
    }

    /// The table bundled with the crate.
    pub fn builtin() -> Result<Self, RecoveryError> {
        Self::from_json(BUILTIN_PLANS)
    }

    pub fn from_json(json: &str) -> Result<Self, RecoveryError> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, RecoveryError> {
        let table: Self = serde_yaml::from_str(yaml)?;
        table.validate()?;
        Ok(table)
    }

    /// Load a table file; `.yaml`/`.yml` files are parsed as YAML, anything
    /// else as JSON.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RecoveryError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let is_yaml = matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("yaml" | "yml")
        );
        let table = if is_yaml {
            Self::from_yaml(&content)?
        } else {
            Self::from_json(&content)?
        };
        tracing::info!(
            path = %path.display(),
            plans = table.len(),
            "recovery plans loaded"
        );
        Ok(table)
    }

    fn validate(&self) -> Result<(), RecoveryError> {
        if self.default.title.trim().is_empty() {
            return Err(RecoveryError::Validation(
                "default plan must have a title".into(),
            ));
        }
        for (label, plan) in &self.plans {
            if label.trim().is_empty() {
                return Err(RecoveryError::Validation(
                    "plan labels must not be empty".into(),
                ));
            }
            if plan.title.trim().is_empty() {
                return Err(RecoveryError::Validation(format!(
                    "plan for {label:?} must have a title"
                )));
            }
        }
        Ok(())
    }

    /// Plan for `label`, or the default plan on a miss. Never fails.
    pub fn lookup(&self, label: &str) -> &RecoveryPlan {
        self.plans.get(label).unwrap_or(&self.default)
    }

    /// Plan for `label` only when the table has one.
    pub fn get(&self, label: &str) -> Option<&RecoveryPlan> {
        self.plans.get(label)
    }

    pub fn default_plan(&self) -> &RecoveryPlan {
        &self.default
    }

    /// Number of keyed plans, not counting the default.
    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.plans.keys().map(String::as_str)
    }
}
