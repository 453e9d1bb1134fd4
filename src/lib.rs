//! # message-schema
//!
//! Infers a structural schema from a sample JSON document and rewrites it
//! into a flat, annotated message contract.
//!
//! ## Pipeline
//!
//! ```text
//! document ──► message value ──► inference ──► rewrite passes ──► schema/schema_<stem>.json
//!                                               │
//!                          ┌────────────────────┼─────────────────────┐
//!                          │ metadata injection │ type compression    │ structure flattening
//!                          │ required/desc/tag  │ array<string> → enum│ properties → siblings
//!                          └────────────────────┴─────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use message_schema::generator::{GeneratorOptions, InferredSchemaGenerator, SchemaGenerator};
//! use message_schema::{GeneratorConfig, Result};
//!
//! fn main() -> Result<()> {
//!     let options = GeneratorOptions::new()
//!         .json_string(r#"{"message": {"key_str": "a", "key_enum": ["a", "b"]}}"#);
//!     let mut generator = InferredSchemaGenerator::new(options, GeneratorConfig::default())?;
//!
//!     let schema = generator.generate_schema()?;
//!     assert_eq!(schema["key_enum"]["type"], "enum");
//!
//!     generator.save_schema(None)?; // ./schema/schema_output.json
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Generator configuration
pub mod config;

/// Schema inference from JSON samples
pub mod schema;

/// Schema rewrite passes
pub mod rewrite;

/// Generator facade: loading, generation, persistence
pub mod generator;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::GeneratorConfig;
pub use error::{Error, Result};
pub use generator::{
    GeneratorOptions, InferredSchemaGenerator, RawSchemaGenerator, SchemaGenerator,
};
pub use rewrite::{CollisionPolicy, SchemaRewriter};
pub use schema::{InferenceEngine, SchemaBuilder, SchemaNode};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
