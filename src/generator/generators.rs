//! Schema generators
//!
//! Each generator owns its source document and the last schema it produced.
//! Inference is delegated to an [`InferenceEngine`] held as a field; the
//! engine is cloned per run so every run starts from an empty state.

use super::source::{GeneratorOptions, SourceDocument};
use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::rewrite::SchemaRewriter;
use crate::schema::{InferenceEngine, SchemaBuilder, SchemaNode};
use serde_json::Map;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Capability shared by all generator variants
pub trait SchemaGenerator {
    /// Produce the schema for the source document and keep it for saving
    fn generate_schema(&mut self) -> Result<SchemaNode>;
}

/// State every generator variant carries
#[derive(Debug, Clone)]
struct GeneratorCore {
    document: SourceDocument,
    config: GeneratorConfig,
    schema: Option<SchemaNode>,
}

impl GeneratorCore {
    fn new(options: GeneratorOptions, config: GeneratorConfig) -> Result<Self> {
        // Option validation runs before any file is touched
        let source = options.into_source()?;
        config.validate()?;
        let document = SourceDocument::load(source)?;

        Ok(Self {
            document,
            config,
            schema: None,
        })
    }

    /// Inferred schema of the message value, `None` when there is none
    fn infer<E: InferenceEngine + Clone>(&self, prototype: &E) -> Option<SchemaNode> {
        let Some(message) = self.document.message(&self.config.message_key) else {
            debug!(
                key = %self.config.message_key,
                "Document has no message value, schema is empty"
            );
            return None;
        };

        let mut engine = prototype.clone();
        engine.add_sample(&message);
        Some(engine.to_schema())
    }

    fn default_output_path(&self) -> PathBuf {
        self.config.output_path_for(&self.document.stem())
    }

    fn save(&self, path: Option<&Path>) -> Result<PathBuf> {
        let schema = self.schema.as_ref().ok_or(Error::SchemaNotGenerated)?;
        let path = path.map_or_else(|| self.default_output_path(), Path::to_path_buf);
        write_schema(schema, &path)?;
        Ok(path)
    }
}

impl fmt::Display for GeneratorCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}"),
            None => f.write_str("null"),
        }
    }
}

/// Write a schema as pretty-printed JSON, replacing any existing file
pub fn write_schema(schema: &SchemaNode, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string_pretty(schema)?;
    std::fs::write(path, contents)?;
    info!(path = %path.display(), "Schema written");
    Ok(())
}

// ============================================================================
// Inferred + rewritten schema
// ============================================================================

/// Generator producing the flattened, annotated message schema
#[derive(Debug, Clone)]
pub struct InferredSchemaGenerator<E: InferenceEngine + Clone = SchemaBuilder> {
    core: GeneratorCore,
    engine: E,
    rewriter: SchemaRewriter,
}

impl InferredSchemaGenerator<SchemaBuilder> {
    /// Validate the options, load the document and set up the default engine
    pub fn new(options: GeneratorOptions, config: GeneratorConfig) -> Result<Self> {
        let engine = SchemaBuilder::new().with_format_detection(config.infer_formats);
        Self::with_engine(options, config, engine)
    }
}

impl<E: InferenceEngine + Clone> InferredSchemaGenerator<E> {
    /// Like [`InferredSchemaGenerator::new`] with a caller-supplied engine
    pub fn with_engine(options: GeneratorOptions, config: GeneratorConfig, engine: E) -> Result<Self> {
        let rewriter = SchemaRewriter::new(config.on_collision);
        Ok(Self {
            core: GeneratorCore::new(options, config)?,
            engine,
            rewriter,
        })
    }

    /// Last generated schema
    pub fn schema(&self) -> Option<&SchemaNode> {
        self.core.schema.as_ref()
    }

    /// The loaded source document
    pub fn document(&self) -> &SourceDocument {
        &self.core.document
    }

    /// Where [`Self::save_schema`] writes when no path is given
    pub fn default_output_path(&self) -> PathBuf {
        self.core.default_output_path()
    }

    /// Persist the last generated schema, returning the written path
    pub fn save_schema(&self, path: Option<&Path>) -> Result<PathBuf> {
        self.core.save(path)
    }
}

impl<E: InferenceEngine + Clone> SchemaGenerator for InferredSchemaGenerator<E> {
    fn generate_schema(&mut self) -> Result<SchemaNode> {
        let schema = match self.core.infer(&self.engine) {
            Some(mut schema) => {
                let stats = self.rewriter.rewrite(&mut schema)?;
                debug!(
                    annotated = stats.annotated,
                    compressed = stats.compressed,
                    flattened = stats.flattened,
                    "Schema rewritten"
                );
                schema
            }
            None => SchemaNode::Object(Map::new()),
        };
        self.core.schema = Some(schema.clone());
        Ok(schema)
    }
}

impl<E: InferenceEngine + Clone> fmt::Display for InferredSchemaGenerator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.core, f)
    }
}

// ============================================================================
// Raw inference output
// ============================================================================

/// Generator producing the engine's output without any rewriting
#[derive(Debug, Clone)]
pub struct RawSchemaGenerator<E: InferenceEngine + Clone = SchemaBuilder> {
    core: GeneratorCore,
    engine: E,
}

impl RawSchemaGenerator<SchemaBuilder> {
    /// Validate the options, load the document and set up the default engine
    pub fn new(options: GeneratorOptions, config: GeneratorConfig) -> Result<Self> {
        let engine = SchemaBuilder::new().with_format_detection(config.infer_formats);
        Self::with_engine(options, config, engine)
    }
}

impl<E: InferenceEngine + Clone> RawSchemaGenerator<E> {
    /// Like [`RawSchemaGenerator::new`] with a caller-supplied engine
    pub fn with_engine(options: GeneratorOptions, config: GeneratorConfig, engine: E) -> Result<Self> {
        Ok(Self {
            core: GeneratorCore::new(options, config)?,
            engine,
        })
    }

    /// Last generated schema
    pub fn schema(&self) -> Option<&SchemaNode> {
        self.core.schema.as_ref()
    }

    /// Persist the last generated schema, returning the written path
    pub fn save_schema(&self, path: Option<&Path>) -> Result<PathBuf> {
        self.core.save(path)
    }
}

impl<E: InferenceEngine + Clone> SchemaGenerator for RawSchemaGenerator<E> {
    fn generate_schema(&mut self) -> Result<SchemaNode> {
        let schema = self
            .core
            .infer(&self.engine)
            .unwrap_or_else(|| SchemaNode::Object(Map::new()));
        self.core.schema = Some(schema.clone());
        Ok(schema)
    }
}

impl<E: InferenceEngine + Clone> fmt::Display for RawSchemaGenerator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.core, f)
    }
}
