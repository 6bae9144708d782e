//! Bundled sermon library shipped as a JSON file.

use std::path::Path;

use crate::domain::{Sermon, SourceError};

pub fn load_sermon_bundle(path: &Path) -> Result<Vec<Sermon>, SourceError> {
    let raw = std::fs::read_to_string(path).map_err(|e| {
        SourceError::Fetch(format!(
            "Failed to read sermon bundle {}: {}",
            path.display(),
            e
        ))
    })?;

    serde_json::from_str(&raw)
        .map_err(|e| SourceError::Parsing(format!("Failed to parse sermon bundle: {}", e)))
}
