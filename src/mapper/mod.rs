//! Conversion entry points.
//!
//! This module provides [`JsonMapper`], the facade over the two recursive
//! builders. Every operation comes in a pair: the plain form reads path
//! annotations under the default `jsonpath` selector, the `_with` form
//! takes an explicit selector key so one schema can carry several
//! independent mappings.

mod from_json;
mod to_json;

use log::warn;
use serde_json::Value;

use crate::error::MapperError;
use crate::record::Record;
use crate::registry::TypeRegistry;
use crate::schema::PATH_SELECTOR_DEFAULT;

/// Lenient top-level document parser.
///
/// Malformed input, and a top-level value that is not a JSON object, is
/// logged and discarded rather than raised: the caller observes `None`.
/// This leniency belongs to this entry point only; the strict read path
/// reports unparsable input through its single conversion error.
pub fn parse_json_document(text: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(text) {
        Ok(document @ Value::Object(_)) => Some(document),
        Ok(other) => {
            warn!(
                "discarding JSON input: expected a top-level object, got {}",
                kind(&other)
            );
            None
        }
        Err(error) => {
            warn!("discarding unparsable JSON input: {error}");
            None
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// The conversion facade: a [`TypeRegistry`] plus the engine's operations,
/// building a record from JSON text and a JSON tree or text from a record.
///
/// The mapper is stateless apart from the registry reference; all
/// operations are safe to invoke concurrently on independent inputs.
///
/// # Example
///
/// ```rust
/// use recordpath::{
///     FieldSchema, FieldValue, JsonMapper, Record, RecordSchema, TypeRegistry, TypeSchema,
/// };
///
/// let registry = TypeRegistry::new();
/// let schema = registry
///     .register(
///         "com.acme",
///         RecordSchema::new("Order")
///             .with_field(FieldSchema::new("id", TypeSchema::String).with_path("order.id")),
///     )
///     .unwrap();
///
/// let mapper = JsonMapper::new(registry);
///
/// let record = Record::new(schema).with("id", FieldValue::String("A-1".into()));
/// let text = mapper.json_text_from_record(&record).unwrap();
/// assert_eq!(text, r#"{"order":{"id":"A-1"}}"#);
///
/// let back = mapper.record_from_json_text(&text, "com.acme", "Order").unwrap();
/// assert_eq!(back, record);
/// ```
pub struct JsonMapper {
    registry: TypeRegistry,
}

impl JsonMapper {
    /// Creates a mapper over the given registry.
    pub fn new(registry: TypeRegistry) -> Self {
        Self { registry }
    }

    /// The registry backing nested-record lookups.
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Converts JSON text into a record of `{namespace}.{type_name}`,
    /// reading path annotations under the default selector.
    ///
    /// # Errors
    ///
    /// [`MapperError::TypeNotFound`] when the target type is not
    /// registered; otherwise any failure of the descent, including
    /// unparsable input text, arrives as a single
    /// [`MapperError::Conversion`] wrapping the root cause. A field whose
    /// path is absent from the document is not a failure; it keeps its
    /// schema default.
    pub fn record_from_json_text(
        &self,
        text: &str,
        namespace: &str,
        type_name: &str,
    ) -> Result<Record, MapperError> {
        self.record_from_json_text_with(text, namespace, type_name, PATH_SELECTOR_DEFAULT)
    }

    /// Like [`record_from_json_text`](Self::record_from_json_text) with an
    /// explicit selector key.
    pub fn record_from_json_text_with(
        &self,
        text: &str,
        namespace: &str,
        type_name: &str,
        selector: &str,
    ) -> Result<Record, MapperError> {
        let qualified = format!("{namespace}.{type_name}");
        let schema =
            self.registry
                .get(namespace, type_name)
                .ok_or_else(|| MapperError::TypeNotFound {
                    name: qualified.clone(),
                })?;

        let wrap = |source: MapperError| MapperError::Conversion {
            type_name: qualified.clone(),
            source: Box::new(source),
        };

        let Some(document) = parse_json_document(text) else {
            return Err(wrap(MapperError::UnparsableDocument));
        };
        from_json::convert(&document, namespace, &schema, &self.registry, selector).map_err(wrap)
    }

    /// Builds a JSON tree from a record under the default selector.
    ///
    /// # Errors
    ///
    /// Schema-malformed conditions only: degenerate unions, map-typed
    /// fields, unsupported array element types, and unusable path
    /// annotations.
    pub fn json_tree_from_record(&self, record: &Record) -> Result<Value, MapperError> {
        self.json_tree_from_record_with(record, PATH_SELECTOR_DEFAULT)
    }

    /// Like [`json_tree_from_record`](Self::json_tree_from_record) with an
    /// explicit selector key.
    pub fn json_tree_from_record_with(
        &self,
        record: &Record,
        selector: &str,
    ) -> Result<Value, MapperError> {
        to_json::build_document(record, selector)
    }

    /// Builds serialized JSON text from a record under the default selector.
    pub fn json_text_from_record(&self, record: &Record) -> Result<String, MapperError> {
        self.json_text_from_record_with(record, PATH_SELECTOR_DEFAULT)
    }

    /// Like [`json_text_from_record`](Self::json_text_from_record) with an
    /// explicit selector key.
    pub fn json_text_from_record_with(
        &self,
        record: &Record,
        selector: &str,
    ) -> Result<String, MapperError> {
        Ok(self.json_tree_from_record_with(record, selector)?.to_string())
    }
}
