//! Fan-out on write versus first-path-only reads.

use recordpath::{
    FieldSchema, FieldValue, JsonMapper, Record, RecordSchema, TypeRegistry, TypeSchema,
};
use serde_json::json;

fn two_path_schema() -> RecordSchema {
    RecordSchema::new("Status").with_field(
        FieldSchema::new("status", TypeSchema::String)
            .with_path("order.status")
            .with_path("audit.lastStatus"),
    )
}

#[test]
fn test_write_populates_every_annotated_path() {
    let registry = TypeRegistry::new();
    let schema = registry.register("io.acme", two_path_schema()).unwrap();
    let mapper = JsonMapper::new(registry);

    let record = Record::new(schema).with("status", FieldValue::String("open".into()));
    let tree = mapper.json_tree_from_record(&record).unwrap();

    assert_eq!(
        tree,
        json!({
            "order": {"status": "open"},
            "audit": {"lastStatus": "open"}
        })
    );
}

#[test]
fn test_read_consults_first_path_only() {
    let registry = TypeRegistry::new();
    registry.register("io.acme", two_path_schema()).unwrap();
    let mapper = JsonMapper::new(registry);

    // Both locations present and disagreeing: the first annotation wins.
    let record = mapper
        .record_from_json_text(
            r#"{"order":{"status":"from-first"},"audit":{"lastStatus":"from-second"}}"#,
            "io.acme",
            "Status",
        )
        .unwrap();
    assert_eq!(
        record.get("status"),
        Some(&FieldValue::String("from-first".into()))
    );

    // Only the second location present: the field stays at its default.
    // The read direction does not fan in.
    let record = mapper
        .record_from_json_text(
            r#"{"audit":{"lastStatus":"from-second"}}"#,
            "io.acme",
            "Status",
        )
        .unwrap();
    assert_eq!(record.get("status"), Some(&FieldValue::Null));
}

#[test]
fn test_fields_without_annotation_are_inert() {
    let registry = TypeRegistry::new();
    let schema = registry
        .register(
            "io.acme",
            RecordSchema::new("Half")
                .with_field(FieldSchema::new("mapped", TypeSchema::String).with_path("mapped"))
                .with_field(FieldSchema::new("unmapped", TypeSchema::String)),
        )
        .unwrap();
    let mapper = JsonMapper::new(registry);

    let record = Record::new(schema)
        .with("mapped", FieldValue::String("m".into()))
        .with("unmapped", FieldValue::String("u".into()));

    let tree = mapper.json_tree_from_record(&record).unwrap();
    assert_eq!(tree, json!({"mapped": "m"}));

    let back = mapper
        .record_from_json_text(r#"{"mapped":"m","unmapped":"u"}"#, "io.acme", "Half")
        .unwrap();
    assert_eq!(back.get("unmapped"), Some(&FieldValue::Null));
}
