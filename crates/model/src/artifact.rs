use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::ModelError;

/// File name of the vectorizer artifact inside an artifacts directory.
pub const VECTORIZER_FILE: &str = "vectorizer.json";
/// File name of the classifier artifact inside an artifacts directory.
pub const CLASSIFIER_FILE: &str = "classifier.json";
/// File name of the label encoder artifact inside an artifacts directory.
pub const LABELS_FILE: &str = "labels.json";

pub(crate) fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ModelError> {
    let content = fs::read_to_string(path).map_err(|source| ModelError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ModelError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
