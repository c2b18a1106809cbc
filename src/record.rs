//! Record instances: typed values for one record schema.
//!
//! A [`Record`] is created fresh per top-level conversion and owns its
//! nested records and sequences exclusively. Fields are initialized from
//! their schema defaults, then set depth-first as the builders walk the
//! schema.

use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use indexmap::IndexMap;
use serde_json::Value;

use crate::schema::{FieldSchema, RecordSchema, TypeSchema};

/// A typed value held by one record field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// No value.
    Null,
    /// A boolean.
    Boolean(bool),
    /// A 32-bit integer.
    Int(i32),
    /// A 64-bit integer.
    Long(i64),
    /// A 32-bit float.
    Float(f32),
    /// A 64-bit float.
    Double(f64),
    /// A byte sequence.
    Bytes(Vec<u8>),
    /// A UTF-8 string.
    String(String),
    /// A canonical instant, held by longs with a `timestamp*` subtype.
    Timestamp(DateTime<Utc>),
    /// A nested record.
    Record(Record),
    /// An ordered sequence of values.
    Array(Vec<FieldValue>),
}

impl FieldValue {
    /// The write-side text form of this value.
    ///
    /// Scalars render through their natural display form; timestamps render
    /// as RFC 3339 instants in UTC. `Null`, `Bytes`, nested records, and
    /// sequences have no text form.
    pub fn to_text(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Boolean(v) => Some(v.to_string()),
            FieldValue::Int(v) => Some(v.to_string()),
            FieldValue::Long(v) => Some(v.to_string()),
            FieldValue::Float(v) => Some(v.to_string()),
            FieldValue::Double(v) => Some(v.to_string()),
            FieldValue::String(v) => Some(v.clone()),
            FieldValue::Timestamp(v) => Some(v.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            FieldValue::Bytes(_) | FieldValue::Record(_) | FieldValue::Array(_) => None,
        }
    }

    /// Returns true for `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    fn from_default(default: &Value, effective: &TypeSchema) -> FieldValue {
        if effective.is_timestamp() {
            return default
                .as_i64()
                .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
                .map(FieldValue::Timestamp)
                .unwrap_or(FieldValue::Null);
        }
        match effective {
            TypeSchema::Boolean => default
                .as_bool()
                .map(FieldValue::Boolean)
                .unwrap_or(FieldValue::Null),
            TypeSchema::Int => default
                .as_i64()
                .map(|v| FieldValue::Int(v as i32))
                .unwrap_or(FieldValue::Null),
            TypeSchema::Long { .. } => default
                .as_i64()
                .map(FieldValue::Long)
                .unwrap_or(FieldValue::Null),
            TypeSchema::Float => default
                .as_f64()
                .map(|v| FieldValue::Float(v as f32))
                .unwrap_or(FieldValue::Null),
            TypeSchema::Double => default
                .as_f64()
                .map(FieldValue::Double)
                .unwrap_or(FieldValue::Null),
            TypeSchema::String => default
                .as_str()
                .map(|v| FieldValue::String(v.to_string()))
                .unwrap_or(FieldValue::Null),
            _ => FieldValue::Null,
        }
    }
}

/// One instance of a [`RecordSchema`]: field name → [`FieldValue`].
///
/// # Example
///
/// ```rust
/// use recordpath::{FieldSchema, FieldValue, Record, RecordSchema, TypeSchema};
///
/// let schema = RecordSchema::new("Order")
///     .with_field(FieldSchema::new("id", TypeSchema::String).with_path("order.id"))
///     .shared();
///
/// let record = Record::new(schema).with("id", FieldValue::String("A-1".into()));
/// assert_eq!(record.get("id"), Some(&FieldValue::String("A-1".into())));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    schema: Arc<RecordSchema>,
    values: IndexMap<String, FieldValue>,
}

impl Record {
    /// Creates an instance with every field set to its declared default,
    /// or `Null` when the field declares none.
    pub fn new(schema: Arc<RecordSchema>) -> Self {
        let mut values = IndexMap::with_capacity(schema.fields().len());
        for field in schema.fields() {
            values.insert(field.name().to_string(), default_for(field));
        }
        Self { schema, values }
    }

    /// The schema this instance belongs to.
    pub fn schema(&self) -> &Arc<RecordSchema> {
        &self.schema
    }

    /// Sets a field value, replacing any previous one.
    pub fn set(&mut self, name: impl Into<String>, value: FieldValue) {
        self.values.insert(name.into(), value);
    }

    /// Chaining form of [`set`](Self::set), for construction.
    pub fn with(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.set(name, value);
        self
    }

    /// Reads a field value.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }
}

fn default_for(field: &FieldSchema) -> FieldValue {
    let Some(default) = field.default_value() else {
        return FieldValue::Null;
    };
    if default.is_null() {
        return FieldValue::Null;
    }
    match field.schema().effective() {
        Ok(effective) => FieldValue::from_default(default, effective),
        Err(_) => FieldValue::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema_with(field: FieldSchema) -> Arc<RecordSchema> {
        RecordSchema::new("T").with_field(field).shared()
    }

    #[test]
    fn test_new_applies_scalar_default() {
        let schema = schema_with(
            FieldSchema::new("status", TypeSchema::String).with_default(json!("open")),
        );
        let record = Record::new(schema);
        assert_eq!(record.get("status"), Some(&FieldValue::String("open".into())));
    }

    #[test]
    fn test_new_applies_timestamp_default_as_instant() {
        let schema = schema_with(
            FieldSchema::new("at", TypeSchema::optional(TypeSchema::timestamp_millis()))
                .with_default(json!(1_620_000_000_000_i64)),
        );
        let record = Record::new(schema);
        let expected = Utc.timestamp_millis_opt(1_620_000_000_000).unwrap();
        assert_eq!(record.get("at"), Some(&FieldValue::Timestamp(expected)));
    }

    #[test]
    fn test_new_leaves_undeclared_defaults_null() {
        let schema = schema_with(FieldSchema::new("a", TypeSchema::Int));
        let record = Record::new(schema);
        assert_eq!(record.get("a"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_null_default_stays_null() {
        let schema = schema_with(
            FieldSchema::new("a", TypeSchema::optional(TypeSchema::String))
                .with_default(Value::Null),
        );
        let record = Record::new(schema);
        assert_eq!(record.get("a"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_to_text_scalars() {
        assert_eq!(FieldValue::Int(42).to_text(), Some("42".to_string()));
        assert_eq!(FieldValue::Boolean(true).to_text(), Some("true".to_string()));
        assert_eq!(FieldValue::Double(1.5).to_text(), Some("1.5".to_string()));
        assert_eq!(FieldValue::Null.to_text(), None);
        assert_eq!(FieldValue::Bytes(vec![1, 2]).to_text(), None);
    }

    #[test]
    fn test_to_text_timestamp_is_rfc3339_utc() {
        let instant = Utc.with_ymd_and_hms(2021, 5, 1, 8, 0, 0).unwrap();
        assert_eq!(
            FieldValue::Timestamp(instant).to_text(),
            Some("2021-05-01T08:00:00Z".to_string())
        );
    }
}
