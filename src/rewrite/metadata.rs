//! Metadata injection pass
//!
//! Every typed descriptor receives the contract annotations consumers fill
//! in later: `required`, `description` and `tag`.

use crate::schema::{is_truthy, SchemaNode, REQUIRED_KEY, TYPE_KEY};
use serde_json::{Map, Value};

/// Descriptor key holding a human-readable description
pub const DESCRIPTION_KEY: &str = "description";
/// Descriptor key holding a free-form tag
pub const TAG_KEY: &str = "tag";

/// Annotate every descriptor with a truthy `type`, depth-first pre-order.
///
/// Mappings without a type are not annotated but their children are still
/// visited. Returns the number of annotated descriptors.
pub fn inject_metadata(node: &mut SchemaNode) -> usize {
    match node {
        Value::Object(map) => {
            let annotated = usize::from(annotate(map));
            annotated + map.values_mut().map(inject_metadata).sum::<usize>()
        }
        Value::Array(items) => items.iter_mut().map(inject_metadata).sum(),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => 0,
    }
}

fn annotate(map: &mut Map<String, Value>) -> bool {
    if !map.get(TYPE_KEY).is_some_and(is_truthy) {
        return false;
    }
    // No requiredness is inferred; an inferred `required` list is replaced
    map.insert(REQUIRED_KEY.to_string(), Value::Bool(false));
    map.insert(DESCRIPTION_KEY.to_string(), Value::from(""));
    map.insert(TAG_KEY.to_string(), Value::from(""));
    true
}
