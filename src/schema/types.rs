//! Schema types

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A node of an inferred or rewritten schema tree.
///
/// Schema trees stay untyped so the rewrite passes can reshape them freely;
/// every pass dispatches over the `Value` variants.
pub type SchemaNode = Value;

/// Descriptor key holding the type name
pub const TYPE_KEY: &str = "type";
/// Descriptor key holding nested object properties
pub const PROPERTIES_KEY: &str = "properties";
/// Descriptor key holding the array item schema
pub const ITEMS_KEY: &str = "items";
/// Descriptor key holding required property names (inference) or the
/// requiredness flag (after rewriting)
pub const REQUIRED_KEY: &str = "required";
/// Descriptor key holding alternative schemas
pub const ANY_OF_KEY: &str = "anyOf";
/// Descriptor key holding a detected string format
pub const FORMAT_KEY: &str = "format";

/// JSON Schema type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl JsonType {
    /// Type name as it appears in a descriptor
    pub fn as_str(self) -> &'static str {
        match self {
            JsonType::Array => "array",
            JsonType::Boolean => "boolean",
            JsonType::Integer => "integer",
            JsonType::Null => "null",
            JsonType::Number => "number",
            JsonType::Object => "object",
            JsonType::String => "string",
        }
    }

    /// Type of a concrete JSON value
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => JsonType::Null,
            Value::Bool(_) => JsonType::Boolean,
            Value::Number(n) if n.is_f64() => JsonType::Number,
            Value::Number(_) => JsonType::Integer,
            Value::String(_) => JsonType::String,
            Value::Array(_) => JsonType::Array,
            Value::Object(_) => JsonType::Object,
        }
    }

    /// Whether a descriptor's `type` field names this type
    pub fn matches(self, descriptor_type: Option<&Value>) -> bool {
        descriptor_type.and_then(Value::as_str) == Some(self.as_str())
    }
}

impl std::fmt::Display for JsonType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loose truthiness of a JSON value: `null`, `false`, `0`, and empty
/// strings, arrays and objects are falsy
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
