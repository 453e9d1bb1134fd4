//! Schema inference from JSON values
//!
//! Produces genson-shaped descriptors: every node carries `type`, objects
//! carry `properties` and `required`, arrays carry a single merged `items`
//! schema. Alternative shapes seen at the same node are merged into a type
//! list or an `anyOf`.

use super::types::{
    JsonType, SchemaNode, ANY_OF_KEY, FORMAT_KEY, ITEMS_KEY, PROPERTIES_KEY, REQUIRED_KEY,
    TYPE_KEY,
};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Capability the generators need from a schema inference engine
pub trait InferenceEngine {
    /// Fold one sample value into the accumulated schema
    fn add_sample(&mut self, value: &Value);

    /// Render the accumulated schema as a fresh, caller-owned tree
    fn to_schema(&self) -> SchemaNode;
}

/// Incremental schema builder
#[derive(Debug, Clone, Default)]
pub struct SchemaBuilder {
    /// Detect string formats (date-time, uri, ...)
    detect_formats: bool,
    /// Number of samples folded in so far
    sample_count: usize,
    /// Accumulated shapes of the root value
    root: ShapeSet,
}

impl SchemaBuilder {
    /// Create a new builder with format detection disabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable/disable string format detection
    #[must_use]
    pub fn with_format_detection(mut self, enabled: bool) -> Self {
        self.detect_formats = enabled;
        self
    }

    /// Number of samples added so far
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }
}

impl InferenceEngine for SchemaBuilder {
    fn add_sample(&mut self, value: &Value) {
        self.root.observe(value, self.detect_formats);
        self.sample_count += 1;
    }

    fn to_schema(&self) -> SchemaNode {
        self.root.to_schema()
    }
}

/// Infer a schema from a single JSON value (convenience function)
pub fn infer_schema(value: &Value) -> SchemaNode {
    let mut builder = SchemaBuilder::new();
    builder.add_sample(value);
    builder.to_schema()
}

/// Every shape observed at one position of the sample tree
#[derive(Debug, Clone, Default)]
struct ShapeSet {
    null: bool,
    boolean: bool,
    /// `Integer` until a non-integral number is seen, then `Number`
    number: Option<JsonType>,
    string: Option<StringFormat>,
    /// Merged shape of all array elements
    array: Option<Box<ShapeSet>>,
    object: Option<ObjectShape>,
}

impl ShapeSet {
    fn observe(&mut self, value: &Value, detect_formats: bool) {
        match value {
            Value::Null => self.null = true,
            Value::Bool(_) => self.boolean = true,
            Value::Number(_) => {
                self.number = match (self.number, JsonType::of(value)) {
                    (Some(JsonType::Number), _) => Some(JsonType::Number),
                    (_, observed) => Some(observed),
                };
            }
            Value::String(s) => {
                let format = if detect_formats { detect_format(s) } else { None };
                let state = self.string.get_or_insert(StringFormat::Pending);
                *state = state.observe(format);
            }
            Value::Array(items) => {
                let shape = self.array.get_or_insert_with(Box::default);
                for item in items {
                    shape.observe(item, detect_formats);
                }
            }
            Value::Object(map) => {
                self.object
                    .get_or_insert_with(ObjectShape::default)
                    .observe(map, detect_formats);
            }
        }
    }

    fn to_schema(&self) -> SchemaNode {
        let mut schemas = Vec::new();
        if self.null {
            schemas.push(type_only(JsonType::Null));
        }
        if self.boolean {
            schemas.push(type_only(JsonType::Boolean));
        }
        if let Some(number) = self.number {
            schemas.push(type_only(number));
        }
        if let Some(string) = &self.string {
            let mut schema = type_only(JsonType::String);
            if let (Some(format), Value::Object(map)) = (string.format(), &mut schema) {
                map.insert(FORMAT_KEY.to_string(), Value::from(format));
            }
            schemas.push(schema);
        }
        if let Some(items) = &self.array {
            let mut schema = type_only(JsonType::Array);
            let items = items.to_schema();
            if let (Value::Object(map), false) = (&mut schema, is_empty_schema(&items)) {
                map.insert(ITEMS_KEY.to_string(), items);
            }
            schemas.push(schema);
        }
        if let Some(object) = &self.object {
            schemas.push(object.to_schema());
        }
        combine(schemas)
    }
}

/// Format state of the strings seen at one position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StringFormat {
    Pending,
    Detected(&'static str),
    Plain,
}

impl StringFormat {
    fn observe(self, format: Option<&'static str>) -> Self {
        match (self, format) {
            (StringFormat::Pending, Some(f)) => StringFormat::Detected(f),
            (StringFormat::Detected(a), Some(b)) if a == b => self,
            _ => StringFormat::Plain,
        }
    }

    fn format(self) -> Option<&'static str> {
        match self {
            StringFormat::Detected(f) => Some(f),
            StringFormat::Pending | StringFormat::Plain => None,
        }
    }
}

/// Merged shape of all object samples at one position
#[derive(Debug, Clone, Default)]
struct ObjectShape {
    /// Properties in first-seen order
    properties: Vec<(String, ShapeSet)>,
    /// Keys present in every sample so far; `None` before the first sample
    required: Option<BTreeSet<String>>,
}

impl ObjectShape {
    fn observe(&mut self, map: &Map<String, Value>, detect_formats: bool) {
        for (key, value) in map {
            if let Some((_, shape)) = self.properties.iter_mut().find(|(k, _)| k == key) {
                shape.observe(value, detect_formats);
            } else {
                let mut shape = ShapeSet::default();
                shape.observe(value, detect_formats);
                self.properties.push((key.clone(), shape));
            }
        }

        let keys: BTreeSet<String> = map.keys().cloned().collect();
        self.required = Some(match self.required.take() {
            Some(required) => required.intersection(&keys).cloned().collect(),
            None => keys,
        });
    }

    fn to_schema(&self) -> SchemaNode {
        let mut map = Map::new();
        map.insert(TYPE_KEY.to_string(), Value::from(JsonType::Object.as_str()));

        if !self.properties.is_empty() {
            let properties: Map<String, Value> = self
                .properties
                .iter()
                .map(|(key, shape)| (key.clone(), shape.to_schema()))
                .collect();
            map.insert(PROPERTIES_KEY.to_string(), Value::Object(properties));
        }

        if let Some(required) = self.required.as_ref().filter(|r| !r.is_empty()) {
            let names = required.iter().cloned().map(Value::from).collect();
            map.insert(REQUIRED_KEY.to_string(), Value::Array(names));
        }

        Value::Object(map)
    }
}

fn type_only(json_type: JsonType) -> SchemaNode {
    let mut map = Map::new();
    map.insert(TYPE_KEY.to_string(), Value::from(json_type.as_str()));
    Value::Object(map)
}

fn is_empty_schema(schema: &SchemaNode) -> bool {
    schema.as_object().is_some_and(Map::is_empty)
}

/// Type name of a schema that says nothing beyond its type
fn bare_type(schema: &SchemaNode) -> Option<&str> {
    match schema {
        Value::Object(map) if map.len() == 1 => map.get(TYPE_KEY).and_then(Value::as_str),
        _ => None,
    }
}

/// Merge per-shape schemas: bare types collapse into one `type` (sorted
/// when several), anything richer goes to `anyOf` after them
fn combine(schemas: Vec<SchemaNode>) -> SchemaNode {
    let mut types = BTreeSet::new();
    let mut detailed = Vec::new();
    for schema in schemas {
        match bare_type(&schema) {
            Some(name) => {
                types.insert(name.to_string());
            }
            None => detailed.push(schema),
        }
    }

    let mut alternatives = Vec::with_capacity(detailed.len() + 1);
    if !types.is_empty() {
        let type_value = if types.len() == 1 {
            Value::from(types.into_iter().next().unwrap_or_default())
        } else {
            Value::Array(types.into_iter().map(Value::from).collect())
        };
        let mut map = Map::new();
        map.insert(TYPE_KEY.to_string(), type_value);
        alternatives.push(Value::Object(map));
    }
    alternatives.extend(detailed);

    match alternatives.len() {
        0 => Value::Object(Map::new()),
        1 => alternatives.remove(0),
        _ => {
            let mut map = Map::new();
            map.insert(ANY_OF_KEY.to_string(), Value::Array(alternatives));
            Value::Object(map)
        }
    }
}

// Format detection helpers

static DATETIME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}").expect("valid datetime regex")
});

static DATE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date regex"));

static UUID_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("valid uuid regex")
});

fn detect_format(s: &str) -> Option<&'static str> {
    if DATETIME_REGEX.is_match(s) {
        Some("date-time")
    } else if DATE_REGEX.is_match(s) {
        Some("date")
    } else if s.starts_with("http://") || s.starts_with("https://") {
        Some("uri")
    } else if is_email(s) {
        Some("email")
    } else if UUID_REGEX.is_match(s) {
        Some("uuid")
    } else {
        None
    }
}

fn is_email(s: &str) -> bool {
    // Simple email check - contains @ and .
    s.contains('@') && s.contains('.') && s.len() > 5
}
