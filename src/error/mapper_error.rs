//! Conversion error taxonomy.
//!
//! This module provides [`MapperError`], the single error type surfaced by
//! both conversion directions. Absence (a path that resolves to nothing, a
//! date string no strategy can parse, a scalar that will not coerce) is
//! never an error; those outcomes are modeled as `Option` at the point they
//! occur. `MapperError` covers the conditions that abort a conversion.

use thiserror::Error;

use crate::schema::TypeTag;

/// An error raised while converting between a record and a JSON document.
///
/// The read direction (`JsonMapper::record_from_json_text`) wraps whatever
/// went wrong during the recursive descent in a single [`Conversion`]
/// variant carrying the original cause, so callers always observe one typed
/// error per failed call. The write direction surfaces schema-malformed
/// conditions directly at the point of detection.
///
/// [`Conversion`]: MapperError::Conversion
#[derive(Debug, Error)]
pub enum MapperError {
    /// A union type contains no non-null branch.
    #[error("union type resolves to no non-null branch")]
    DegenerateUnion,

    /// A map-typed field was encountered while building a document.
    #[error("field '{field}': map types are not supported when building a document")]
    UnsupportedMap {
        /// Name of the offending field.
        field: String,
    },

    /// An array field's element type is outside the supported set.
    #[error("field '{field}': array elements of type {tag} are not supported")]
    UnsupportedElementType {
        /// Name of the offending field.
        field: String,
        /// The unsupported element type tag.
        tag: TypeTag,
    },

    /// A nested record type was not found in the registry.
    #[error("type '{name}' not found in registry")]
    TypeNotFound {
        /// Fully qualified `{namespace}.{type name}`.
        name: String,
    },

    /// A path annotation does not follow the `a.b[0].c` grammar.
    #[error("invalid path expression '{path}': {reason}")]
    InvalidPath {
        /// The annotation text as written in the schema.
        path: String,
        /// What made it unparsable.
        reason: String,
    },

    /// A path containing an array index was used on the write direction.
    #[error("path '{path}' cannot be written: array indices are read-only")]
    IndexedWrite {
        /// The offending path.
        path: String,
    },

    /// Write-mode resolution ran into an existing non-object node.
    #[error("path '{path}' traverses a non-object node")]
    PathObstructed {
        /// The offending path.
        path: String,
    },

    /// A plain (non-timestamp) long field carried unparsable text.
    #[error("field '{field}': cannot parse '{text}' as a 64-bit integer")]
    InvalidLong {
        /// Name of the offending field.
        field: String,
        /// The text that failed to parse.
        text: String,
    },

    /// The top-level input text is not a JSON object document.
    #[error("input is not a parsable JSON document")]
    UnparsableDocument,

    /// A JSON→record conversion failed; the cause carries the detail.
    #[error("failed to convert document into record '{type_name}'")]
    Conversion {
        /// Fully qualified name of the target record type.
        type_name: String,
        /// The underlying failure.
        #[source]
        source: Box<MapperError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_conversion_carries_source() {
        let error = MapperError::Conversion {
            type_name: "com.acme.Order".to_string(),
            source: Box::new(MapperError::TypeNotFound {
                name: "com.acme.Line".to_string(),
            }),
        };

        assert!(error.to_string().contains("com.acme.Order"));
        let source = error.source().expect("conversion error has a cause");
        assert!(source.to_string().contains("com.acme.Line"));
    }

    #[test]
    fn test_display_includes_field_context() {
        let error = MapperError::UnsupportedElementType {
            field: "tags".to_string(),
            tag: TypeTag::Map,
        };
        assert!(error.to_string().contains("tags"));
        assert!(error.to_string().contains("map"));
    }
}
