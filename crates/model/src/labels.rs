use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::artifact::read_json;
use crate::error::ModelError;
use crate::traits::LabelTable;

/// Class index to disease name mapping (`labels.json`).
///
/// ```json
/// { "classes": ["Acne", "Allergy", "Arthritis"] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Result<Self, ModelError> {
        let encoder = Self { classes };
        encoder.validate()?;
        Ok(encoder)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let encoder: Self = read_json(path.as_ref())?;
        encoder.validate()?;
        Ok(encoder)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    fn validate(&self) -> Result<(), ModelError> {
        let mut seen = HashSet::with_capacity(self.classes.len());
        for (index, name) in self.classes.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ModelError::InvalidArtifact(format!(
                    "class {index} has an empty name"
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(ModelError::InvalidArtifact(format!(
                    "class name {name:?} appears more than once"
                )));
            }
        }
        Ok(())
    }
}

impl LabelTable for LabelEncoder {
    fn len(&self) -> usize {
        self.classes.len()
    }

    fn name_of(&self, index: usize) -> Result<&str, ModelError> {
        self.classes
            .get(index)
            .map(String::as_str)
            .ok_or(ModelError::UnknownClass {
                index,
                classes: self.classes.len(),
            })
    }
}
