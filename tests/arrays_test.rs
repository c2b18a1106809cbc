//! Array conversion: arrays of records and arrays of strings, including
//! the wrapper-object element form.

use recordpath::{
    FieldSchema, FieldValue, JsonMapper, Record, RecordSchema, TypeRegistry, TypeSchema,
};
use serde_json::json;

#[test]
fn test_array_of_records_round_trips_in_order() {
    let registry = TypeRegistry::new();
    registry
        .register(
            "io.acme",
            RecordSchema::new("Line")
                .with_field(FieldSchema::new("sku", TypeSchema::String).with_path("sku"))
                .with_field(FieldSchema::new("qty", TypeSchema::Int).with_path("qty")),
        )
        .unwrap();
    let schema = registry
        .register(
            "io.acme",
            RecordSchema::new("Order").with_field(
                FieldSchema::new(
                    "lines",
                    TypeSchema::array(TypeSchema::record("Line")),
                )
                .with_path("order.lines"),
            ),
        )
        .unwrap();
    let line_schema = registry.get("io.acme", "Line").unwrap();
    let mapper = JsonMapper::new(registry);

    let lines = vec![
        FieldValue::Record(
            Record::new(line_schema.clone())
                .with("sku", FieldValue::String("A-1".into()))
                .with("qty", FieldValue::Int(2)),
        ),
        FieldValue::Record(
            Record::new(line_schema)
                .with("sku", FieldValue::String("B-7".into()))
                .with("qty", FieldValue::Int(1)),
        ),
    ];
    let record = Record::new(schema).with("lines", FieldValue::Array(lines));

    let tree = mapper.json_tree_from_record(&record).unwrap();
    assert_eq!(
        tree,
        json!({"order": {"lines": [
            {"sku": "A-1", "qty": "2"},
            {"sku": "B-7", "qty": "1"}
        ]}})
    );

    let back = mapper
        .record_from_json_text(&tree.to_string(), "io.acme", "Order")
        .unwrap();
    assert_eq!(back, record);
}

#[test]
fn test_array_of_strings_writes_plain_values() {
    let registry = TypeRegistry::new();
    let schema = registry
        .register(
            "io.acme",
            RecordSchema::new("Tagged").with_field(
                FieldSchema::new("tags", TypeSchema::array(TypeSchema::String))
                    .with_path("tags"),
            ),
        )
        .unwrap();
    let mapper = JsonMapper::new(registry);

    let record = Record::new(schema).with(
        "tags",
        FieldValue::Array(vec![
            FieldValue::String("red".into()),
            FieldValue::String("blue".into()),
        ]),
    );

    let tree = mapper.json_tree_from_record(&record).unwrap();
    assert_eq!(tree, json!({"tags": ["red", "blue"]}));
}

#[test]
fn test_array_of_wrapper_objects_reads_element_path() {
    let registry = TypeRegistry::new();
    registry
        .register(
            "io.acme",
            RecordSchema::new("Wrapped").with_field(
                FieldSchema::new(
                    "values",
                    TypeSchema::array(TypeSchema::String).with_property("jsonpath", "value"),
                )
                .with_path("container.entries"),
            ),
        )
        .unwrap();
    let mapper = JsonMapper::new(registry);

    let record = mapper
        .record_from_json_text(
            r#"{"container":{"entries":[{"value":"field1-value1"},{"value":"field1-value2"}]}}"#,
            "io.acme",
            "Wrapped",
        )
        .unwrap();

    assert_eq!(
        record.get("values"),
        Some(&FieldValue::Array(vec![
            FieldValue::String("field1-value1".into()),
            FieldValue::String("field1-value2".into()),
        ]))
    );
}

#[test]
fn test_array_of_plain_strings_reads_without_element_path() {
    let registry = TypeRegistry::new();
    registry
        .register(
            "io.acme",
            RecordSchema::new("Tagged").with_field(
                FieldSchema::new("tags", TypeSchema::array(TypeSchema::String))
                    .with_path("tags"),
            ),
        )
        .unwrap();
    let mapper = JsonMapper::new(registry);

    let record = mapper
        .record_from_json_text(r#"{"tags":["red","blue"]}"#, "io.acme", "Tagged")
        .unwrap();

    assert_eq!(
        record.get("tags"),
        Some(&FieldValue::Array(vec![
            FieldValue::String("red".into()),
            FieldValue::String("blue".into()),
        ]))
    );
}

#[test]
fn test_array_of_ints_coerces_each_element() {
    let registry = TypeRegistry::new();
    registry
        .register(
            "io.acme",
            RecordSchema::new("Counts").with_field(
                FieldSchema::new("counts", TypeSchema::array(TypeSchema::Int))
                    .with_path("counts"),
            ),
        )
        .unwrap();
    let mapper = JsonMapper::new(registry);

    let record = mapper
        .record_from_json_text(r#"{"counts":["1","nope","3"]}"#, "io.acme", "Counts")
        .unwrap();

    // Uncoercible elements become null rather than failing the conversion.
    assert_eq!(
        record.get("counts"),
        Some(&FieldValue::Array(vec![
            FieldValue::Int(1),
            FieldValue::Null,
            FieldValue::Int(3),
        ]))
    );
}

#[test]
fn test_empty_array_is_not_emitted() {
    let registry = TypeRegistry::new();
    let schema = registry
        .register(
            "io.acme",
            RecordSchema::new("Tagged").with_field(
                FieldSchema::new("tags", TypeSchema::array(TypeSchema::String))
                    .with_path("tags"),
            ),
        )
        .unwrap();
    let mapper = JsonMapper::new(registry);

    let record = Record::new(schema).with("tags", FieldValue::Array(Vec::new()));
    let tree = mapper.json_tree_from_record(&record).unwrap();

    assert_eq!(tree, json!({}));
}

#[test]
fn test_optional_array_element_types_resolve() {
    let registry = TypeRegistry::new();
    registry
        .register(
            "io.acme",
            RecordSchema::new("Maybe").with_field(
                FieldSchema::new(
                    "values",
                    TypeSchema::optional(TypeSchema::array(TypeSchema::optional(
                        TypeSchema::String,
                    ))),
                )
                .with_path("values"),
            ),
        )
        .unwrap();
    let mapper = JsonMapper::new(registry);

    let record = mapper
        .record_from_json_text(r#"{"values":["x"]}"#, "io.acme", "Maybe")
        .unwrap();

    assert_eq!(
        record.get("values"),
        Some(&FieldValue::Array(vec![FieldValue::String("x".into())]))
    );
}
