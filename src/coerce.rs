//! Best-effort scalar coercion.
//!
//! Text from a JSON node is converted to the field's scalar type through
//! the natural Rust parse; any parse failure is swallowed to `None`. This
//! lenient contract is deliberately distinct from the strict parsing of
//! plain long fields in the JSON→record builder.

use crate::record::FieldValue;
use crate::schema::TypeTag;

/// Attempts the natural parse of `text` into the scalar type for `tag`.
///
/// Strings pass through unchanged. Non-scalar tags yield `None`, as does
/// any failed parse.
///
/// # Example
///
/// ```rust
/// use recordpath::coerce::coerce;
/// use recordpath::{FieldValue, TypeTag};
///
/// assert_eq!(coerce(TypeTag::Int, "42"), Some(FieldValue::Int(42)));
/// assert_eq!(coerce(TypeTag::Int, "forty-two"), None);
/// ```
pub fn coerce(tag: TypeTag, text: &str) -> Option<FieldValue> {
    match tag {
        TypeTag::String => Some(FieldValue::String(text.to_string())),
        TypeTag::Int => text.parse().ok().map(FieldValue::Int),
        TypeTag::Long => text.parse().ok().map(FieldValue::Long),
        TypeTag::Float => text.parse().ok().map(FieldValue::Float),
        TypeTag::Double => text.parse().ok().map(FieldValue::Double),
        TypeTag::Boolean => text.parse().ok().map(FieldValue::Boolean),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_parses() {
        assert_eq!(coerce(TypeTag::Int, "7"), Some(FieldValue::Int(7)));
        assert_eq!(coerce(TypeTag::Int, "-12"), Some(FieldValue::Int(-12)));
    }

    #[test]
    fn test_long_parses() {
        assert_eq!(
            coerce(TypeTag::Long, "9007199254740993"),
            Some(FieldValue::Long(9_007_199_254_740_993))
        );
    }

    #[test]
    fn test_float_and_double_parse() {
        assert_eq!(coerce(TypeTag::Float, "1.5"), Some(FieldValue::Float(1.5)));
        assert_eq!(coerce(TypeTag::Double, "2.25"), Some(FieldValue::Double(2.25)));
    }

    #[test]
    fn test_boolean_parses() {
        assert_eq!(coerce(TypeTag::Boolean, "true"), Some(FieldValue::Boolean(true)));
        assert_eq!(coerce(TypeTag::Boolean, "false"), Some(FieldValue::Boolean(false)));
    }

    #[test]
    fn test_string_passes_through() {
        assert_eq!(
            coerce(TypeTag::String, "as-is"),
            Some(FieldValue::String("as-is".to_string()))
        );
    }

    #[test]
    fn test_failures_are_swallowed() {
        assert_eq!(coerce(TypeTag::Int, "1.5"), None);
        assert_eq!(coerce(TypeTag::Long, "abc"), None);
        assert_eq!(coerce(TypeTag::Double, ""), None);
        assert_eq!(coerce(TypeTag::Boolean, "yes"), None);
    }

    #[test]
    fn test_non_scalar_tags_yield_none() {
        assert_eq!(coerce(TypeTag::Record, "x"), None);
        assert_eq!(coerce(TypeTag::Map, "x"), None);
        assert_eq!(coerce(TypeTag::Bytes, "x"), None);
    }
}
