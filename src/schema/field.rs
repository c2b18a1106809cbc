//! Field-level schema types.
//!
//! This module provides [`TypeTag`], [`TypeSchema`] and [`FieldSchema`],
//! the type descriptions the conversion engine walks. A field's mapping to
//! the JSON tree is not positional: it is declared by path annotations
//! stored in the field's property map under a selector key, and interpreted
//! at conversion time.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::Value;

use crate::error::MapperError;
use crate::schema::PATH_SELECTOR_DEFAULT;

/// The primitive or composite kind of a [`TypeSchema`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    /// The null type.
    Null,
    /// A boolean.
    Boolean,
    /// A 32-bit signed integer.
    Int,
    /// A 64-bit signed integer, possibly carrying a logical subtype.
    Long,
    /// A 32-bit float.
    Float,
    /// A 64-bit float.
    Double,
    /// A byte sequence.
    Bytes,
    /// A UTF-8 string.
    String,
    /// A named enumeration.
    Enum,
    /// A nested record, referenced by type name.
    Record,
    /// An ordered sequence of one element type.
    Array,
    /// A string-keyed map of one value type.
    Map,
    /// A union of member types.
    Union,
}

impl TypeTag {
    /// Returns true for the scalar tags a JSON text value can coerce into.
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            TypeTag::Boolean
                | TypeTag::Int
                | TypeTag::Long
                | TypeTag::Float
                | TypeTag::Double
                | TypeTag::String
        )
    }
}

impl Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeTag::Null => "null",
            TypeTag::Boolean => "boolean",
            TypeTag::Int => "int",
            TypeTag::Long => "long",
            TypeTag::Float => "float",
            TypeTag::Double => "double",
            TypeTag::Bytes => "bytes",
            TypeTag::String => "string",
            TypeTag::Enum => "enum",
            TypeTag::Record => "record",
            TypeTag::Array => "array",
            TypeTag::Map => "map",
            TypeTag::Union => "union",
        };
        f.write_str(name)
    }
}

/// A structured type description for one schema position.
///
/// Unions are resolved through [`effective`](TypeSchema::effective) rather
/// than re-inspected at every use site. Array types carry their own
/// property map: on scalar arrays, the path selector property located there
/// gives the position of each *element's* value inside the element node,
/// which is what makes arrays of single-field wrapper objects readable.
///
/// # Example
///
/// ```rust
/// use recordpath::TypeSchema;
///
/// // The common `[null, string]` optional pattern.
/// let optional_string = TypeSchema::optional(TypeSchema::String);
/// let effective = optional_string.effective().unwrap();
/// assert_eq!(effective, &TypeSchema::String);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum TypeSchema {
    /// The null type.
    Null,
    /// A boolean.
    Boolean,
    /// A 32-bit signed integer.
    Int,
    /// A 64-bit signed integer.
    Long {
        /// Optional logical subtype, e.g. `"timestamp-millis"`.
        logical: Option<String>,
    },
    /// A 32-bit float.
    Float,
    /// A 64-bit float.
    Double,
    /// A byte sequence.
    Bytes,
    /// A UTF-8 string.
    String,
    /// A named enumeration over a fixed symbol set.
    Enum {
        /// The enumeration's type name.
        name: String,
        /// The allowed symbols, in declared order.
        symbols: Vec<String>,
    },
    /// A nested record, resolved against the type registry by name.
    Record {
        /// The nested record's type name (unqualified).
        name: String,
    },
    /// An ordered sequence of one element type.
    Array {
        /// The element type.
        element: Box<TypeSchema>,
        /// Properties of the array type itself; the path selector property
        /// here locates each element's value inside the element node.
        properties: IndexMap<String, Value>,
    },
    /// A string-keyed map of one value type.
    Map {
        /// The value type.
        value: Box<TypeSchema>,
    },
    /// A union of member types.
    Union {
        /// The member types, in declared order.
        branches: Vec<TypeSchema>,
    },
}

impl TypeSchema {
    /// A plain 64-bit integer type with no logical subtype.
    pub fn long() -> Self {
        TypeSchema::Long { logical: None }
    }

    /// A long carrying the `timestamp-millis` logical subtype.
    pub fn timestamp_millis() -> Self {
        TypeSchema::Long {
            logical: Some("timestamp-millis".to_string()),
        }
    }

    /// An enumeration type over the given symbols.
    pub fn enum_type(
        name: impl Into<String>,
        symbols: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        TypeSchema::Enum {
            name: name.into(),
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    /// A nested record type, referenced by its unqualified name.
    pub fn record(name: impl Into<String>) -> Self {
        TypeSchema::Record { name: name.into() }
    }

    /// An array of the given element type.
    pub fn array(element: TypeSchema) -> Self {
        TypeSchema::Array {
            element: Box::new(element),
            properties: IndexMap::new(),
        }
    }

    /// A map with the given value type.
    pub fn map(value: TypeSchema) -> Self {
        TypeSchema::Map {
            value: Box::new(value),
        }
    }

    /// A union over the given branches, in declared order.
    pub fn union(branches: impl IntoIterator<Item = TypeSchema>) -> Self {
        TypeSchema::Union {
            branches: branches.into_iter().collect(),
        }
    }

    /// The `[null, T]` optional pattern.
    pub fn optional(inner: TypeSchema) -> Self {
        TypeSchema::union([TypeSchema::Null, inner])
    }

    /// Attaches a named property to this type.
    ///
    /// Properties are only consulted on array types, where the path
    /// selector property gives the location of each element's value; on
    /// any other variant this is a no-op.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        if let TypeSchema::Array { properties, .. } = &mut self {
            properties.insert(key.into(), value.into());
        }
        self
    }

    /// Reads a named property off this type, if the variant carries any.
    pub fn property(&self, key: &str) -> Option<&Value> {
        match self {
            TypeSchema::Array { properties, .. } => properties.get(key),
            _ => None,
        }
    }

    /// Returns the kind of this type.
    pub fn tag(&self) -> TypeTag {
        match self {
            TypeSchema::Null => TypeTag::Null,
            TypeSchema::Boolean => TypeTag::Boolean,
            TypeSchema::Int => TypeTag::Int,
            TypeSchema::Long { .. } => TypeTag::Long,
            TypeSchema::Float => TypeTag::Float,
            TypeSchema::Double => TypeTag::Double,
            TypeSchema::Bytes => TypeTag::Bytes,
            TypeSchema::String => TypeTag::String,
            TypeSchema::Enum { .. } => TypeTag::Enum,
            TypeSchema::Record { .. } => TypeTag::Record,
            TypeSchema::Array { .. } => TypeTag::Array,
            TypeSchema::Map { .. } => TypeTag::Map,
            TypeSchema::Union { .. } => TypeTag::Union,
        }
    }

    /// Resolves this type to its effective (non-null) type.
    ///
    /// A union yields its first non-null branch; every other type yields
    /// itself. A union whose branches are all null is schema-malformed.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError::DegenerateUnion`] when no non-null branch
    /// exists.
    pub fn effective(&self) -> Result<&TypeSchema, MapperError> {
        match self {
            TypeSchema::Union { branches } => branches
                .iter()
                .find(|branch| branch.tag() != TypeTag::Null)
                .ok_or(MapperError::DegenerateUnion),
            other => Ok(other),
        }
    }

    /// True when this is a long with a `timestamp*` logical subtype.
    pub fn is_timestamp(&self) -> bool {
        match self {
            TypeSchema::Long { logical } => logical
                .as_deref()
                .is_some_and(|logical| logical.starts_with("timestamp")),
            _ => false,
        }
    }
}

/// One named field of a [`RecordSchema`](crate::schema::RecordSchema).
///
/// A field's path annotations live in its property map under a selector
/// key. A property may hold a single path string or an ordered array of
/// path strings; the latter makes one record field fan out to several
/// JSON locations on the write direction. A field with no annotation under
/// the selector in use is inert in both directions.
///
/// # Example
///
/// ```rust
/// use recordpath::{FieldSchema, TypeSchema};
///
/// let field = FieldSchema::new("status", TypeSchema::String)
///     .with_path("order.status")
///     .with_path("audit.lastStatus");
///
/// assert_eq!(
///     field.paths("jsonpath"),
///     vec!["order.status", "audit.lastStatus"]
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    name: String,
    schema: TypeSchema,
    properties: IndexMap<String, Value>,
    default: Option<Value>,
}

impl FieldSchema {
    /// Creates a field with the given name and type and no annotations.
    pub fn new(name: impl Into<String>, schema: TypeSchema) -> Self {
        Self {
            name: name.into(),
            schema,
            properties: IndexMap::new(),
            default: None,
        }
    }

    /// Adds a path annotation under the default selector key.
    ///
    /// The first call stores a single path; further calls grow it into an
    /// ordered list, enabling write-side fan-out.
    pub fn with_path(self, path: impl Into<String>) -> Self {
        self.with_path_for(PATH_SELECTOR_DEFAULT, path)
    }

    /// Adds a path annotation under an explicit selector key.
    pub fn with_path_for(mut self, selector: &str, path: impl Into<String>) -> Self {
        let path = Value::String(path.into());
        match self.properties.entry(selector.to_string()) {
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(path);
            }
            indexmap::map::Entry::Occupied(mut slot) => match slot.get_mut() {
                Value::Array(items) => items.push(path),
                existing => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, path]);
                }
            },
        }
        self
    }

    /// Sets an arbitrary schema property, replacing any previous value.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Sets the field's declared default value.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// The field's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The field's type.
    pub fn schema(&self) -> &TypeSchema {
        &self.schema
    }

    /// The field's declared default, if any.
    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Reads the path annotations stored under `selector`, in declared order.
    ///
    /// An absent or null property yields an empty sequence, a string
    /// property a one-element sequence, and an array property its string
    /// elements in order.
    pub fn paths(&self, selector: &str) -> Vec<&str> {
        match self.properties.get(selector) {
            Some(Value::String(path)) => vec![path.as_str()],
            Some(Value::Array(items)) => items.iter().filter_map(Value::as_str).collect(),
            _ => Vec::new(),
        }
    }
}
