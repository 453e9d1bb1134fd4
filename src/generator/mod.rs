//! Generator facade
//!
//! Ties the pieces together: validates where the document comes from,
//! loads it, extracts the message value, runs inference and the rewrite
//! passes, and writes the result.
//!
//! ```rust,ignore
//! use message_schema::generator::{GeneratorOptions, InferredSchemaGenerator, SchemaGenerator};
//! use message_schema::GeneratorConfig;
//!
//! let options = GeneratorOptions::new().file_path("data/data_1.json");
//! let mut generator = InferredSchemaGenerator::new(options, GeneratorConfig::default())?;
//! generator.generate_schema()?;
//! generator.save_schema(None)?; // ./schema/schema_data_1.json
//! ```

mod generators;
mod source;

pub use generators::{write_schema, InferredSchemaGenerator, RawSchemaGenerator, SchemaGenerator};
pub use source::{GeneratorOptions, SchemaSource, SourceDocument, DEFAULT_STEM};

#[cfg(test)]
mod tests;
