//! CLI runner - executes the generation

use crate::cli::commands::Cli;
use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::generator::{
    GeneratorOptions, InferredSchemaGenerator, RawSchemaGenerator, SchemaGenerator,
};
use crate::rewrite::CollisionPolicy;
use std::path::PathBuf;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Generate and save the schema, returning the written path
    pub fn run(&self) -> Result<PathBuf> {
        if !self.cli.path.exists() {
            return Err(Error::file_not_found(self.cli.path.display().to_string()));
        }

        let config = self.load_config()?;
        let options = GeneratorOptions::new().file_path(&self.cli.path);
        let output = self.cli.output.as_deref();

        let written = if self.cli.raw {
            let mut generator = RawSchemaGenerator::new(options, config)?;
            generator.generate_schema()?;
            generator.save_schema(output)?
        } else {
            let mut generator = InferredSchemaGenerator::new(options, config)?;
            generator.generate_schema()?;
            generator.save_schema(output)?
        };

        info!(source = %self.cli.path.display(), "Schema generated");
        Ok(written)
    }

    /// Load configuration, applying command-line overrides
    fn load_config(&self) -> Result<GeneratorConfig> {
        let mut config = match &self.cli.config {
            Some(path) => GeneratorConfig::from_file(path)?,
            None => GeneratorConfig::default(),
        };

        if let Some(base_dir) = &self.cli.base_dir {
            config.base_dir.clone_from(base_dir);
        }
        if self.cli.overwrite_collisions {
            config.on_collision = CollisionPolicy::Overwrite;
        }
        if self.cli.infer_formats {
            config.infer_formats = true;
        }

        Ok(config)
    }
}
