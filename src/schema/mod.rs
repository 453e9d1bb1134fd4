//! Schema inference module
//!
//! Derives a JSON-Schema-like descriptor tree from sample JSON values.
//!
//! # Features
//!
//! - **Type Inference**: Infers types from JSON values
//! - **Sample Merging**: Folds several samples into one schema
//! - **Union Types**: Alternative scalar shapes become a type list, richer
//!   ones an `anyOf`
//! - **Array Type Inference**: Infers a single merged item schema
//! - **Format Detection**: Optional date-time/date/uri/email/uuid hints

mod inference;
mod types;

pub use inference::{infer_schema, InferenceEngine, SchemaBuilder};
pub use types::{
    is_truthy, JsonType, SchemaNode, ANY_OF_KEY, FORMAT_KEY, ITEMS_KEY, PROPERTIES_KEY,
    REQUIRED_KEY, TYPE_KEY,
};
