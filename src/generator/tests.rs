//! Tests for the generator facade

use super::*;
use crate::config::GeneratorConfig;
use crate::error::Error;
use crate::rewrite::CollisionPolicy;
use crate::schema::{InferenceEngine, SchemaNode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::path::PathBuf;
use tempfile::tempdir;
use test_case::test_case;

fn generate(document: Value) -> SchemaNode {
    let options = GeneratorOptions::new().json_object(document);
    let mut generator = InferredSchemaGenerator::new(options, GeneratorConfig::default()).unwrap();
    generator.generate_schema().unwrap()
}

// ============================================================================
// Option Validation
// ============================================================================

#[test]
fn test_options_require_a_source() {
    let err = GeneratorOptions::new().into_source().unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { .. }));
}

#[test]
fn test_options_single_source() {
    let source = GeneratorOptions::new()
        .file_path("data/data_1.json")
        .into_source()
        .unwrap();
    assert_eq!(source, SchemaSource::File(PathBuf::from("data/data_1.json")));

    let source = GeneratorOptions::new()
        .json_string("{}")
        .into_source()
        .unwrap();
    assert_eq!(source, SchemaSource::Text("{}".to_string()));
}

#[test_case(GeneratorOptions::new().file_path("/no/such/file.json").json_object(json!({})) ; "file and object")]
#[test_case(GeneratorOptions::new().file_path("/no/such/file.json").json_string("{}") ; "file and string")]
#[test_case(GeneratorOptions::new().json_object(json!({})).json_string("{}") ; "object and string")]
#[test_case(
    GeneratorOptions::new()
        .file_path("/no/such/file.json")
        .json_object(json!({}))
        .json_string("{}")
    ; "all three"
)]
fn test_multiple_sources_fail_before_io(options: GeneratorOptions) {
    // The path does not exist: an I/O attempt would report FileNotFound
    let err = InferredSchemaGenerator::new(options, GeneratorConfig::default()).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter { .. }));
    assert!(err.is_usage_error());
}

// ============================================================================
// Loading
// ============================================================================

#[test]
fn test_missing_file() {
    let options = GeneratorOptions::new().file_path("/no/such/file.json");
    let err = InferredSchemaGenerator::new(options, GeneratorConfig::default()).unwrap_err();
    assert!(matches!(err, Error::FileNotFound { .. }));
}

#[test]
fn test_malformed_json_string() {
    let options = GeneratorOptions::new().json_string("{\"message\": ");
    let err = InferredSchemaGenerator::new(options, GeneratorConfig::default()).unwrap_err();
    assert!(matches!(err, Error::JsonParse(_)));
}

#[test]
fn test_malformed_json_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{not json").unwrap();

    let options = GeneratorOptions::new().file_path(&path);
    let err = InferredSchemaGenerator::new(options, GeneratorConfig::default()).unwrap_err();
    assert!(matches!(err, Error::JsonParse(_)));
}

#[test]
fn test_document_stem() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("orders.v2.json");
    std::fs::write(&path, "{}").unwrap();

    let document = SourceDocument::load(SchemaSource::File(path.clone())).unwrap();
    assert_eq!(document.stem(), "orders.v2");
    assert_eq!(document.file_path(), Some(path.as_path()));

    let document = SourceDocument::load(SchemaSource::Object(json!({}))).unwrap();
    assert_eq!(document.stem(), DEFAULT_STEM);
    assert!(document.file_path().is_none());
}

#[test_case(json!({"message": {"a": 1}, "other": 2}), Some(json!({"a": 1})) ; "with siblings")]
#[test_case(json!({"message": null}), None ; "null message")]
#[test_case(json!({"other": 2}), None ; "missing key")]
#[test_case(json!([{"message": {}}]), None ; "array document")]
#[test_case(json!("message"), None ; "string document")]
#[test_case(json!({"message": []}), Some(json!([])) ; "array message")]
fn test_document_message(value: Value, expected: Option<Value>) {
    let document = SourceDocument::load(SchemaSource::Object(value)).unwrap();
    assert_eq!(document.message("message"), expected);
}

// ============================================================================
// Generation
// ============================================================================

#[test]
fn test_scenario_string_field() {
    let schema = generate(json!({"message": {"key_str": "a"}}));
    assert_eq!(
        schema["key_str"],
        json!({"type": "string", "required": false, "description": "", "tag": ""})
    );
}

#[test]
fn test_scenario_enum_field() {
    let schema = generate(json!({"message": {"key_enum": ["a", "b"]}}));
    assert_eq!(schema["key_enum"]["type"], "enum");
    assert_eq!(schema["key_enum"]["items"]["type"], "string");
}

#[test]
fn test_scenario_array_field() {
    let schema = generate(json!({"message": {"key_array": [1, 2]}}));
    assert_eq!(schema["key_array"]["type"], "array");
}

#[test_case(json!({}) ; "empty document")]
#[test_case(json!({"data": {"a": 1}}) ; "no message key")]
#[test_case(json!({"message": null}) ; "null message")]
#[test_case(json!([1, 2, 3]) ; "array document")]
fn test_scenario_no_message(document: Value) {
    assert_eq!(generate(document), json!({}));
}

#[test]
fn test_scenario_nested_object() {
    let schema = generate(json!({"message": {"a": {"b": "x"}}}));

    assert_eq!(schema["a"]["type"], "object");
    assert_eq!(schema["a"]["b"]["type"], "string");
    assert!(!schema.to_string().contains("properties"));
}

#[test]
fn test_root_carries_message_descriptor() {
    let schema = generate(json!({"message": {"key_str": "a"}}));
    assert_eq!(schema["type"], "object");
    assert_eq!(schema["required"], json!(false));
    assert_eq!(schema["description"], "");
    assert_eq!(schema["tag"], "");
}

#[test]
fn test_sibling_keys_are_ignored() {
    let schema = generate(json!({
        "header": {"id": 1},
        "message": {"body": "hi"}
    }));
    assert!(schema.get("header").is_none());
    assert!(schema.get("id").is_none());
    assert!(schema.get("body").is_some());
}

#[test]
fn test_source_document_is_not_mutated() {
    let document = json!({"message": {"a": {"b": ["x"]}}, "other": true});
    let options = GeneratorOptions::new().json_object(document.clone());
    let mut generator =
        InferredSchemaGenerator::new(options, GeneratorConfig::default()).unwrap();

    generator.generate_schema().unwrap();
    assert_eq!(generator.document().value(), &document);
}

#[test]
fn test_generate_twice_is_stable() {
    let options = GeneratorOptions::new().json_string(r#"{"message": {"a": [1, "x"]}}"#);
    let mut generator =
        InferredSchemaGenerator::new(options, GeneratorConfig::default()).unwrap();

    let first = generator.generate_schema().unwrap();
    let second = generator.generate_schema().unwrap();
    assert_eq!(first, second);
    assert_eq!(generator.schema(), Some(&second));
}

#[test]
fn test_custom_message_key() {
    let mut config = GeneratorConfig::default();
    config.message_key = "payload".to_string();

    let options = GeneratorOptions::new().json_object(json!({
        "message": {"ignored": 1},
        "payload": {"used": true}
    }));
    let mut generator = InferredSchemaGenerator::new(options, config).unwrap();
    let schema = generator.generate_schema().unwrap();

    assert!(schema.get("used").is_some());
    assert!(schema.get("ignored").is_none());
}

#[test]
fn test_format_detection_from_config() {
    let config = GeneratorConfig::default().with_format_detection(true);
    let options = GeneratorOptions::new().json_object(json!({
        "message": {"created": "2024-01-15T10:30:00Z"}
    }));
    let mut generator = InferredSchemaGenerator::new(options, config).unwrap();
    let schema = generator.generate_schema().unwrap();

    assert_eq!(schema["created"]["format"], "date-time");
    assert_eq!(schema["created"]["tag"], "");
}

#[test]
fn test_collision_policy_from_config() {
    let document = json!({"message": {"tag": "v1", "name": "x"}});

    let options = GeneratorOptions::new().json_object(document.clone());
    let mut generator =
        InferredSchemaGenerator::new(options, GeneratorConfig::default()).unwrap();
    let err = generator.generate_schema().unwrap_err();
    assert!(matches!(err, Error::KeyCollision { ref key, .. } if key == "tag"));
    assert!(generator.schema().is_none());

    let config = GeneratorConfig::default().with_collision_policy(CollisionPolicy::Overwrite);
    let options = GeneratorOptions::new().json_object(document);
    let mut generator = InferredSchemaGenerator::new(options, config).unwrap();
    let schema = generator.generate_schema().unwrap();
    assert_eq!(schema["tag"]["type"], "string");
    assert_eq!(schema["name"]["type"], "string");
}

#[test]
fn test_display() {
    let options = GeneratorOptions::new().json_object(json!({"message": {"a": true}}));
    let mut generator =
        InferredSchemaGenerator::new(options, GeneratorConfig::default()).unwrap();
    assert_eq!(generator.to_string(), "null");

    let schema = generator.generate_schema().unwrap();
    let rendered: Value = serde_json::from_str(&generator.to_string()).unwrap();
    assert_eq!(rendered, schema);
    assert!(!generator.to_string().contains('\n'));
}

// ============================================================================
// Raw Generator
// ============================================================================

#[test]
fn test_raw_generator_skips_rewriting() {
    let options = GeneratorOptions::new().json_object(json!({
        "message": {"tags": ["a"], "user": {"id": 1}}
    }));
    let mut generator = RawSchemaGenerator::new(options, GeneratorConfig::default()).unwrap();
    let schema = generator.generate_schema().unwrap();

    assert_eq!(
        schema,
        json!({
            "type": "object",
            "properties": {
                "tags": {"type": "array", "items": {"type": "string"}},
                "user": {
                    "type": "object",
                    "properties": {"id": {"type": "integer"}},
                    "required": ["id"]
                }
            },
            "required": ["tags", "user"]
        })
    );
}

#[test]
fn test_raw_generator_without_message() {
    let options = GeneratorOptions::new().json_string("{}");
    let mut generator = RawSchemaGenerator::new(options, GeneratorConfig::default()).unwrap();
    assert_eq!(generator.generate_schema().unwrap(), json!({}));
    assert_eq!(generator.schema(), Some(&json!({})));
}

// ============================================================================
// Custom Engine
// ============================================================================

/// Engine that reports a fixed schema and records what it was fed
#[derive(Debug, Clone, Default)]
struct FixedEngine {
    samples: Vec<Value>,
}

impl InferenceEngine for FixedEngine {
    fn add_sample(&mut self, value: &Value) {
        self.samples.push(value.clone());
    }

    fn to_schema(&self) -> SchemaNode {
        json!({
            "type": "object",
            "properties": {
                "samples": {"type": "integer", "const": self.samples.len()}
            }
        })
    }
}

#[test]
fn test_with_engine_runs_fresh_engine_per_generation() {
    let options = GeneratorOptions::new().json_object(json!({"message": {"x": 1}}));
    let mut generator = InferredSchemaGenerator::with_engine(
        options,
        GeneratorConfig::default(),
        FixedEngine::default(),
    )
    .unwrap();

    generator.generate_schema().unwrap();
    let schema = generator.generate_schema().unwrap();

    // A reused engine would have seen two samples by now
    assert_eq!(schema["samples"]["const"], 1);
    assert_eq!(schema["samples"]["tag"], "");
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn test_save_before_generate() {
    let options = GeneratorOptions::new().json_object(json!({"message": {}}));
    let generator = InferredSchemaGenerator::new(options, GeneratorConfig::default()).unwrap();

    let err = generator.save_schema(None).unwrap_err();
    assert!(matches!(err, Error::SchemaNotGenerated));
}

#[test]
fn test_save_default_path_from_file_stem() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("data_1.json");
    std::fs::write(&source, r#"{"message": {"key_str": "a"}}"#).unwrap();

    let config = GeneratorConfig::default().with_base_dir(dir.path());
    let options = GeneratorOptions::new().file_path(&source);
    let mut generator = InferredSchemaGenerator::new(options, config).unwrap();
    generator.generate_schema().unwrap();

    let written = generator.save_schema(None).unwrap();
    assert_eq!(written, dir.path().join("schema").join("schema_data_1.json"));
    assert_eq!(written, generator.default_output_path());

    let contents = std::fs::read_to_string(&written).unwrap();
    assert!(contents.starts_with("{\n  \"type\": \"object\""));
    let saved: Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(Some(&saved), generator.schema());
}

#[test]
fn test_save_default_stem_without_file() {
    let dir = tempdir().unwrap();
    let config = GeneratorConfig::default().with_base_dir(dir.path());
    let options = GeneratorOptions::new().json_string("{}");
    let mut generator = InferredSchemaGenerator::new(options, config).unwrap();
    generator.generate_schema().unwrap();

    let written = generator.save_schema(None).unwrap();
    assert_eq!(written, dir.path().join("schema").join("schema_output.json"));
    assert_eq!(std::fs::read_to_string(&written).unwrap(), "{}");
}

#[test]
fn test_save_explicit_path_overwrites() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("out.json");
    std::fs::write(&target, "stale contents that are much longer than the schema").unwrap();

    let options = GeneratorOptions::new().json_object(json!({"message": {"a": 1}}));
    let mut generator = RawSchemaGenerator::new(options, GeneratorConfig::default()).unwrap();
    generator.generate_schema().unwrap();

    let written = generator.save_schema(Some(&target)).unwrap();
    assert_eq!(written, target);

    let saved: Value = serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
    assert_eq!(saved["properties"]["a"]["type"], "integer");
}

#[test]
fn test_write_schema_creates_parent_dirs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("deeper").join("s.json");
    write_schema(&json!({"a": [1]}), &path).unwrap();

    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "{\n  \"a\": [\n    1\n  ]\n}"
    );
}
