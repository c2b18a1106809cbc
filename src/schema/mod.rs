//! Schema definitions for the mapping engine.
//!
//! This module provides the schema-side data model: structured type
//! descriptions ([`TypeSchema`]), named fields carrying path annotations
//! ([`FieldSchema`]), and the record type that owns them
//! ([`RecordSchema`]). Schemas are built once, registered, and reused
//! across conversions.
//!
//! # Example
//!
//! ```rust
//! use recordpath::{FieldSchema, RecordSchema, TypeSchema};
//!
//! let schema = RecordSchema::new("Shipment")
//!     .with_field(
//!         FieldSchema::new("carrier", TypeSchema::optional(TypeSchema::String))
//!             .with_path("shipment.carrier"),
//!     )
//!     .with_field(
//!         FieldSchema::new("shipped_at", TypeSchema::optional(TypeSchema::timestamp_millis()))
//!             .with_path("shipment.shippedAt"),
//!     );
//!
//! assert_eq!(schema.fields().len(), 2);
//! ```

mod field;
mod record;

pub use field::{FieldSchema, TypeSchema, TypeTag};
pub use record::RecordSchema;

/// Default name of the schema property holding path annotations.
pub const PATH_SELECTOR_DEFAULT: &str = "jsonpath";

/// Schema property key for date format hints on timestamp fields.
pub const FORMAT_PROPERTY: &str = "format";

/// Schema property key for time-zone hints on timestamp fields.
pub const TIMEZONE_PROPERTY: &str = "timezone";

/// Schema property key for the output scale of decimal fields.
pub const SCALE_OUT_PROPERTY: &str = "scaleOut";
