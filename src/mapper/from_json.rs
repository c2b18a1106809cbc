//! The JSON→record builder.
//!
//! Walks a target schema in field order, resolving each field's first
//! annotated path against a read-only JSON tree and instantiating a fresh
//! record. A path that resolves to nothing leaves the field at its schema
//! default and moves on; partial population from a partial document is
//! expected. Everything else that goes wrong propagates as an error and is
//! wrapped once at the entry point.

use std::borrow::Cow;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::coerce::coerce;
use crate::datetime::normalize;
use crate::error::MapperError;
use crate::path::JsonPath;
use crate::record::{FieldValue, Record};
use crate::registry::TypeRegistry;
use crate::schema::{RecordSchema, TypeSchema};

/// Recursively instantiates a record of `schema` from `node`.
pub(crate) fn convert(
    node: &Value,
    base_namespace: &str,
    schema: &Arc<RecordSchema>,
    registry: &TypeRegistry,
    selector: &str,
) -> Result<Record, MapperError> {
    let mut record = Record::new(Arc::clone(schema));

    for field in schema.fields() {
        let effective = field.schema().effective()?;

        // Read direction consults the first annotated path only.
        let paths = field.paths(selector);
        let Some(path) = paths.first() else { continue };
        let Some(field_node) = JsonPath::parse(path)?.resolve_read(node) else {
            continue;
        };

        match effective {
            TypeSchema::Null | TypeSchema::Union { .. } | TypeSchema::Enum { .. } => {}
            TypeSchema::Record { name } => {
                let nested_schema = lookup(registry, base_namespace, name)?;
                let nested =
                    convert(field_node, base_namespace, &nested_schema, registry, selector)?;
                record.set(field.name(), FieldValue::Record(nested));
            }
            TypeSchema::Array {
                element,
                properties,
            } => {
                let entries = field_node.as_array().map(Vec::as_slice).unwrap_or(&[]);
                let element_effective = element.effective()?;
                let mut items = Vec::with_capacity(entries.len());

                match element_effective {
                    TypeSchema::Record { name } => {
                        let nested_schema = lookup(registry, base_namespace, name)?;
                        for entry in entries {
                            items.push(FieldValue::Record(convert(
                                entry,
                                base_namespace,
                                &nested_schema,
                                registry,
                                selector,
                            )?));
                        }
                    }
                    scalar if scalar.tag().is_scalar() => {
                        // Each element's value sits at the array type's own
                        // annotated path inside the element node, which is
                        // what makes arrays of single-field wrapper objects
                        // readable. Without an annotation the element node
                        // itself is the value.
                        let element_path = properties
                            .get(selector)
                            .and_then(Value::as_str)
                            .map(JsonPath::parse)
                            .transpose()?;
                        for entry in entries {
                            let value_node = match &element_path {
                                Some(path) => path.resolve_read(entry),
                                None => Some(entry),
                            };
                            let item = value_node
                                .and_then(node_text)
                                .and_then(|text| coerce(scalar.tag(), &text))
                                .unwrap_or(FieldValue::Null);
                            items.push(item);
                        }
                    }
                    other => {
                        return Err(MapperError::UnsupportedElementType {
                            field: field.name().to_string(),
                            tag: other.tag(),
                        })
                    }
                }
                record.set(field.name(), FieldValue::Array(items));
            }
            TypeSchema::Map { .. } => {}
            long @ TypeSchema::Long { .. } if long.is_timestamp() => {
                let instant = node_text(field_node)
                    .and_then(|text| normalize(&text))
                    .or_else(|| {
                        field
                            .default_value()
                            .and_then(Value::as_i64)
                            .and_then(|millis| Utc.timestamp_millis_opt(millis).single())
                    });
                record.set(
                    field.name(),
                    instant.map(FieldValue::Timestamp).unwrap_or(FieldValue::Null),
                );
            }
            TypeSchema::Long { .. } => {
                // Plain longs parse strictly, unlike generic coercion.
                let text = node_text(field_node).unwrap_or(Cow::Borrowed(""));
                let value = text.parse::<i64>().map_err(|_| MapperError::InvalidLong {
                    field: field.name().to_string(),
                    text: text.to_string(),
                })?;
                record.set(field.name(), FieldValue::Long(value));
            }
            TypeSchema::Bytes => {}
            scalar => {
                let value = node_text(field_node)
                    .and_then(|text| coerce(scalar.tag(), &text))
                    .unwrap_or(FieldValue::Null);
                record.set(field.name(), value);
            }
        }
    }

    Ok(record)
}

fn lookup(
    registry: &TypeRegistry,
    namespace: &str,
    name: &str,
) -> Result<Arc<RecordSchema>, MapperError> {
    registry
        .get(namespace, name)
        .ok_or_else(|| MapperError::TypeNotFound {
            name: format!("{namespace}.{name}"),
        })
}

/// The text form of a JSON leaf node. Objects, arrays, and nulls have none.
fn node_text(node: &Value) -> Option<Cow<'_, str>> {
    match node {
        Value::String(text) => Some(Cow::Borrowed(text.as_str())),
        Value::Number(number) => Some(Cow::Owned(number.to_string())),
        Value::Bool(flag) => Some(Cow::Owned(flag.to_string())),
        _ => None,
    }
}
