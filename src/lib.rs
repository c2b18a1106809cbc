//! # recordpath
//!
//! A schema-driven, bidirectional mapper between typed records and JSON
//! documents. The mapping between a record field and a JSON location is
//! not positional: each field carries one or more *path annotations*
//! (`a.b[0].c`) in its schema, and the engine interprets them at
//! conversion time, with no generated, type-specific code.
//!
//! ## Core Types
//!
//! - [`RecordSchema`] / [`FieldSchema`] / [`TypeSchema`]: the schema-side
//!   model with type tags, optional logical subtypes, defaults, and path
//!   annotations under a configurable selector key
//! - [`Record`] / [`FieldValue`]: one typed instance of a record schema
//! - [`TypeRegistry`]: qualified-name lookup for nested record types
//! - [`JsonMapper`]: the conversion facade over both directions
//! - [`JsonPath`]: the dot/bracket path grammar and its tree resolution
//!
//! ## Example
//!
//! ```rust
//! use recordpath::{
//!     FieldSchema, FieldValue, JsonMapper, Record, RecordSchema, TypeRegistry, TypeSchema,
//! };
//!
//! let registry = TypeRegistry::new();
//! let schema = registry
//!     .register(
//!         "com.acme",
//!         RecordSchema::new("Contact")
//!             .with_field(
//!                 FieldSchema::new("email", TypeSchema::optional(TypeSchema::String))
//!                     .with_path("contact.email"),
//!             ),
//!     )
//!     .unwrap();
//! let mapper = JsonMapper::new(registry);
//!
//! // Read: a partial document still converts; unmapped fields keep
//! // their schema defaults.
//! let record = mapper
//!     .record_from_json_text(
//!         r#"{"contact": {"email": "a@acme.com"}}"#,
//!         "com.acme",
//!         "Contact",
//!     )
//!     .unwrap();
//! assert_eq!(record.get("email"), Some(&FieldValue::String("a@acme.com".into())));
//!
//! // Write: the path annotation rebuilds the nested shape.
//! let text = mapper.json_text_from_record(&record).unwrap();
//! assert_eq!(text, r#"{"contact":{"email":"a@acme.com"}}"#);
//! ```

pub mod coerce;
pub mod datetime;
pub mod error;
pub mod mapper;
pub mod path;
pub mod record;
pub mod registry;
pub mod schema;

pub use error::MapperError;
pub use mapper::{parse_json_document, JsonMapper};
pub use path::{JsonPath, PathSegment};
pub use record::{FieldValue, Record};
pub use registry::{RegistryError, TypeRegistry};
pub use schema::{
    FieldSchema, RecordSchema, TypeSchema, TypeTag, FORMAT_PROPERTY, PATH_SELECTOR_DEFAULT,
    SCALE_OUT_PROPERTY, TIMEZONE_PROPERTY,
};
