//! Record-level schema type.

use indexmap::IndexMap;
use serde_json::Value;
use std::sync::Arc;

use crate::schema::FieldSchema;

/// The schema of one record type: a name and an ordered field sequence.
///
/// A record schema is built once, registered, and shared as
/// `Arc<RecordSchema>` across conversions; it is never copied per call.
/// Like fields, the record itself carries a property map: a path annotation
/// on the record schema selects the effective root object when a document
/// is built from an instance of this type.
///
/// # Example
///
/// ```rust
/// use recordpath::{FieldSchema, RecordSchema, TypeSchema};
///
/// let schema = RecordSchema::new("Order")
///     .with_field(FieldSchema::new("id", TypeSchema::String).with_path("order.id"))
///     .with_field(FieldSchema::new("total", TypeSchema::Double).with_path("order.total"));
///
/// assert_eq!(schema.name(), "Order");
/// assert_eq!(schema.fields().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSchema {
    name: String,
    fields: Vec<FieldSchema>,
    properties: IndexMap<String, Value>,
}

impl RecordSchema {
    /// Creates an empty record schema with the given type name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            properties: IndexMap::new(),
        }
    }

    /// Appends a field; fields keep their declared order.
    pub fn with_field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Sets a record-level schema property.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Wraps this schema for sharing across conversions.
    pub fn shared(self) -> Arc<RecordSchema> {
        Arc::new(self)
    }

    /// The record's type name (unqualified).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fields, in declared order.
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// Looks up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|field| field.name() == name)
    }

    /// Reads a record-level property.
    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    /// The record-level path annotation under `selector`, if any.
    ///
    /// On the write direction this selects the object the record's fields
    /// are placed under, relative to the document root.
    pub fn root_path(&self, selector: &str) -> Option<&str> {
        self.properties.get(selector).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TypeSchema;

    #[test]
    fn test_fields_keep_declared_order() {
        let schema = RecordSchema::new("T")
            .with_field(FieldSchema::new("b", TypeSchema::String))
            .with_field(FieldSchema::new("a", TypeSchema::String));

        let names: Vec<_> = schema.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_field_lookup() {
        let schema =
            RecordSchema::new("T").with_field(FieldSchema::new("a", TypeSchema::Int));
        assert!(schema.field("a").is_some());
        assert!(schema.field("missing").is_none());
    }

    #[test]
    fn test_root_path() {
        let schema = RecordSchema::new("T").with_property("jsonpath", "envelope.body");
        assert_eq!(schema.root_path("jsonpath"), Some("envelope.body"));
        assert_eq!(schema.root_path("altpath"), None);
    }
}
