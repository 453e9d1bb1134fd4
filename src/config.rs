//! Generator configuration
//!
//! Settings that control where schemas are written and how the rewrite
//! passes behave. Loaded from YAML or built in code; every field has a
//! default so an empty document is a valid configuration.

use crate::error::{Error, Result, ResultExt};
use crate::rewrite::CollisionPolicy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration threaded into every generator at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Project base directory; default output paths are resolved against it
    #[serde(default = "default_base_dir")]
    pub base_dir: PathBuf,

    /// Directory (relative to `base_dir`) that receives schema files
    #[serde(default = "default_schema_dir")]
    pub schema_dir: String,

    /// Prefix of generated schema file names
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Top-level document key whose value is subject to inference
    #[serde(default = "default_message_key")]
    pub message_key: String,

    /// What flattening does when a property name is already a descriptor key
    #[serde(default)]
    pub on_collision: CollisionPolicy,

    /// Detect string formats (date-time, uri, ...) during inference
    #[serde(default)]
    pub infer_formats: bool,
}

fn default_base_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_schema_dir() -> String {
    "schema".to_string()
}

fn default_file_prefix() -> String {
    "schema_".to_string()
}

fn default_message_key() -> String {
    "message".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            base_dir: default_base_dir(),
            schema_dir: default_schema_dir(),
            file_prefix: default_file_prefix(),
            message_key: default_message_key(),
            on_collision: CollisionPolicy::default(),
            infer_formats: false,
        }
    }
}

impl GeneratorConfig {
    /// Create a configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the project base directory
    #[must_use]
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    /// Set the collision policy used by the flattening pass
    #[must_use]
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.on_collision = policy;
        self
    }

    /// Enable/disable string format detection
    #[must_use]
    pub fn with_format_detection(mut self, enabled: bool) -> Self {
        self.infer_formats = enabled;
        self
    }

    /// Parse and validate a configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        // An empty document deserializes to unit, not to a mapping
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: GeneratorConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::file_not_found(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file '{}'", path.display()))?;
        Self::from_yaml_str(&content)
    }

    /// Check field values that serde cannot
    pub fn validate(&self) -> Result<()> {
        if self.schema_dir.trim().is_empty() {
            return Err(Error::config("schema_dir cannot be empty"));
        }
        if self.message_key.is_empty() {
            return Err(Error::config("message_key cannot be empty"));
        }
        Ok(())
    }

    /// Directory that receives schema files
    pub fn schema_dir_path(&self) -> PathBuf {
        self.base_dir.join(&self.schema_dir)
    }

    /// Default output path for a source with the given stem
    pub fn output_path_for(&self, stem: &str) -> PathBuf {
        self.schema_dir_path()
            .join(format!("{}{stem}.json", self.file_prefix))
    }
}
