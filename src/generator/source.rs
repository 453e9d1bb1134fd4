//! Source documents
//!
//! Validates where the sample document comes from and loads it.

use crate::error::{Error, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stem used for output files when the document did not come from a file
pub const DEFAULT_STEM: &str = "output";

/// Construction options: exactly one source must be set
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptions {
    /// Path of a JSON file
    pub file_path: Option<PathBuf>,
    /// Already-parsed JSON document
    pub json_object: Option<Value>,
    /// JSON-encoded document
    pub json_string: Option<String>,
}

impl GeneratorOptions {
    /// Create empty options
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the document from a file
    #[must_use]
    pub fn file_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    /// Use an in-memory document
    #[must_use]
    pub fn json_object(mut self, value: Value) -> Self {
        self.json_object = Some(value);
        self
    }

    /// Parse the document from a JSON string
    #[must_use]
    pub fn json_string(mut self, json: impl Into<String>) -> Self {
        self.json_string = Some(json.into());
        self
    }

    /// Validate that exactly one source is set. Performs no I/O.
    pub fn into_source(self) -> Result<SchemaSource> {
        match (self.file_path, self.json_object, self.json_string) {
            (Some(path), None, None) => Ok(SchemaSource::File(path)),
            (None, Some(value), None) => Ok(SchemaSource::Object(value)),
            (None, None, Some(json)) => Ok(SchemaSource::Text(json)),
            (None, None, None) => Err(Error::invalid_parameter(
                "one of file_path, json_object or json_string must be set",
            )),
            _ => Err(Error::invalid_parameter(
                "only one of file_path, json_object or json_string may be set",
            )),
        }
    }
}

/// A validated document source
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaSource {
    /// JSON file on disk
    File(PathBuf),
    /// Already-parsed document
    Object(Value),
    /// JSON-encoded document
    Text(String),
}

/// A loaded sample document
#[derive(Debug, Clone)]
pub struct SourceDocument {
    file_path: Option<PathBuf>,
    value: Value,
}

impl SourceDocument {
    /// Load the document from its source
    pub fn load(source: SchemaSource) -> Result<Self> {
        match source {
            SchemaSource::File(path) => {
                if !path.exists() {
                    return Err(Error::file_not_found(path.display().to_string()));
                }
                let bytes = std::fs::read(&path)?;
                let value = serde_json::from_slice(&bytes)?;
                debug!(path = %path.display(), "Loaded source document");
                Ok(Self {
                    file_path: Some(path),
                    value,
                })
            }
            SchemaSource::Object(value) => Ok(Self {
                file_path: None,
                value,
            }),
            SchemaSource::Text(json) => Ok(Self {
                file_path: None,
                value: serde_json::from_str(&json)?,
            }),
        }
    }

    /// The whole document
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Path the document was read from, if any
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// File stem used to name the output, `"output"` without a file
    pub fn stem(&self) -> String {
        self.file_path
            .as_deref()
            .and_then(Path::file_stem)
            .map_or_else(
                || DEFAULT_STEM.to_string(),
                |stem| stem.to_string_lossy().into_owned(),
            )
    }

    /// Deep copy of the message value.
    ///
    /// `None` when the document is not a mapping, lacks the key, or maps it
    /// to `null`. Sibling keys are never part of the result.
    pub fn message(&self, key: &str) -> Option<Value> {
        self.value
            .as_object()?
            .get(key)
            .filter(|message| !message.is_null())
            .cloned()
    }
}
