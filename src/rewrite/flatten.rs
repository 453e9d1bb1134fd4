//! Structure flattening pass
//!
//! Lifts the entries of every `properties` map onto the descriptor that
//! owns it, so nested field schemas are read by name directly on their
//! parent.

use super::CollisionPolicy;
use crate::error::{Error, Result};
use crate::schema::{SchemaNode, PROPERTIES_KEY};
use serde_json::{Map, Value};
use tracing::warn;

/// Flatten every `properties` map in the tree, depth-first pre-order.
///
/// Lifted children are visited after the merge and flattened in turn.
/// Existing keys keep their position; lifted properties are appended in
/// their original order. Returns the number of flattened descriptors.
pub fn flatten_structure(node: &mut SchemaNode, policy: CollisionPolicy) -> Result<usize> {
    let mut path = String::new();
    flatten_at(node, policy, &mut path)
}

fn flatten_at(node: &mut SchemaNode, policy: CollisionPolicy, path: &mut String) -> Result<usize> {
    match node {
        Value::Object(map) => {
            let mut flattened = 0;
            if matches!(map.get(PROPERTIES_KEY), Some(Value::Object(_))) {
                lift_properties(map, policy, path)?;
                flattened += 1;
            }
            for (key, child) in map.iter_mut() {
                let len = path.len();
                push_segment(path, key);
                flattened += flatten_at(child, policy, path)?;
                path.truncate(len);
            }
            Ok(flattened)
        }
        Value::Array(items) => {
            let mut flattened = 0;
            for (index, item) in items.iter_mut().enumerate() {
                let len = path.len();
                push_segment(path, &index.to_string());
                flattened += flatten_at(item, policy, path)?;
                path.truncate(len);
            }
            Ok(flattened)
        }
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => Ok(0),
    }
}

fn lift_properties(
    map: &mut Map<String, Value>,
    policy: CollisionPolicy,
    path: &str,
) -> Result<()> {
    let Some(Value::Object(properties)) = map.get(PROPERTIES_KEY) else {
        return Ok(());
    };

    // `properties` itself counts: a field of that name would reintroduce it
    let collisions: Vec<String> = properties
        .keys()
        .filter(|key| map.contains_key(key.as_str()))
        .cloned()
        .collect();
    if let Some(key) = collisions.first() {
        match policy {
            CollisionPolicy::Reject => {
                return Err(Error::key_collision(key.clone(), display_path(path)));
            }
            CollisionPolicy::Overwrite => {
                for key in &collisions {
                    warn!(key = %key, path = %display_path(path), "Property overwrites descriptor key");
                }
            }
        }
    }

    let entries = std::mem::take(map);
    let mut lifted = Map::new();
    for (key, value) in entries {
        if key == PROPERTIES_KEY {
            if let Value::Object(properties) = value {
                lifted = properties;
            }
        } else {
            map.insert(key, value);
        }
    }

    for (key, value) in lifted {
        if key == PROPERTIES_KEY {
            // Removed together with the container, like the map it replaced
            continue;
        }
        map.insert(key, value);
    }

    Ok(())
}

/// Append a JSON pointer segment
fn push_segment(path: &mut String, segment: &str) {
    path.push('/');
    path.push_str(&segment.replace('~', "~0").replace('/', "~1"));
}

fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "/"
    } else {
        path
    }
}
