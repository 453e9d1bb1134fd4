//! Type compression pass

use crate::schema::{JsonType, SchemaNode, ITEMS_KEY, TYPE_KEY};
use serde_json::{Map, Value};

/// Type name given to arrays whose items are strings
pub const ENUM_TYPE: &str = "enum";

/// Rename `"array"` descriptors whose immediate `items` are strings to
/// `"enum"`, depth-first pre-order. `items` itself is left untouched.
///
/// Returns the number of renamed descriptors.
pub fn compress_types(node: &mut SchemaNode) -> usize {
    match node {
        Value::Object(map) => {
            let renamed = if is_string_array(map) {
                map.insert(TYPE_KEY.to_string(), Value::from(ENUM_TYPE));
                1
            } else {
                0
            };
            renamed + map.values_mut().map(compress_types).sum::<usize>()
        }
        Value::Array(items) => items.iter_mut().map(compress_types).sum(),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => 0,
    }
}

fn is_string_array(map: &Map<String, Value>) -> bool {
    JsonType::Array.matches(map.get(TYPE_KEY))
        && map
            .get(ITEMS_KEY)
            .and_then(Value::as_object)
            .is_some_and(|items| JsonType::String.matches(items.get(TYPE_KEY)))
}
