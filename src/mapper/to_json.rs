//! The record→JSON builder.
//!
//! Walks a record's schema in field order and populates a caller-owned
//! JSON tree according to each field's path annotations. Side effects are
//! confined to the output tree; the record itself is never mutated.

use serde_json::{Map, Value};

use crate::error::MapperError;
use crate::path::JsonPath;
use crate::record::{FieldValue, Record};
use crate::schema::{TypeSchema, TypeTag};

/// Builds a fresh document from `record`.
///
/// When the record schema itself carries a path annotation under
/// `selector`, the record's fields are placed under the object at that
/// path (created if missing); otherwise they land on the document root.
pub(crate) fn build_document(record: &Record, selector: &str) -> Result<Value, MapperError> {
    let mut document = Value::Object(Map::new());
    let target = match record.schema().root_path(selector) {
        Some(path) => JsonPath::parse(path)?.resolve_or_create(&mut document)?,
        None => &mut document,
    };
    build_child_nodes(record, target, selector)?;
    Ok(document)
}

/// Recursively emits `record`'s fields into `node`.
pub(crate) fn build_child_nodes(
    record: &Record,
    node: &mut Value,
    selector: &str,
) -> Result<(), MapperError> {
    for field in record.schema().fields() {
        let effective = field.schema().effective()?;
        match effective {
            TypeSchema::Null | TypeSchema::Union { .. } | TypeSchema::Enum { .. } => {}
            TypeSchema::Record { .. } => {
                let paths = field.paths(selector);
                let Some(path) = paths.first() else { continue };
                let Some(FieldValue::Record(nested)) = record.get(field.name()) else {
                    continue;
                };
                let parsed = JsonPath::parse(path)?;
                let target = parsed.resolve_or_create(node)?;
                if !target.is_object() {
                    *target = Value::Object(Map::new());
                }
                build_child_nodes(nested, target, selector)?;
            }
            TypeSchema::Array { element, .. } => {
                let paths = field.paths(selector);
                let Some(path) = paths.first() else { continue };
                let Some(FieldValue::Array(items)) = record.get(field.name()) else {
                    continue;
                };
                if items.is_empty() {
                    continue;
                }

                let mut entries = Vec::with_capacity(items.len());
                match element.effective()?.tag() {
                    TypeTag::Record => {
                        for item in items {
                            if let FieldValue::Record(nested) = item {
                                let mut entry = Value::Object(Map::new());
                                build_child_nodes(nested, &mut entry, selector)?;
                                entries.push(entry);
                            }
                        }
                    }
                    TypeTag::String => {
                        for item in items {
                            if let FieldValue::String(value) = item {
                                entries.push(Value::String(value.clone()));
                            }
                        }
                    }
                    tag => {
                        return Err(MapperError::UnsupportedElementType {
                            field: field.name().to_string(),
                            tag,
                        })
                    }
                }

                let parsed = JsonPath::parse(path)?;
                let (map, leaf) = parsed.resolve_write(node)?;
                map.insert(leaf.to_string(), Value::Array(entries));
            }
            TypeSchema::Map { .. } => {
                return Err(MapperError::UnsupportedMap {
                    field: field.name().to_string(),
                })
            }
            _ => {
                // Scalar: the stringified value fans out to every
                // annotated path. Unset and empty values are not emitted.
                let Some(text) = record.get(field.name()).and_then(FieldValue::to_text) else {
                    continue;
                };
                if text.is_empty() {
                    continue;
                }
                for path in field.paths(selector) {
                    let parsed = JsonPath::parse(path)?;
                    let (map, leaf) = parsed.resolve_write(node)?;
                    map.insert(leaf.to_string(), Value::String(text.clone()));
                }
            }
        }
    }
    Ok(())
}
