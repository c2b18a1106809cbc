//! Type registry for nested record resolution.
//!
//! This module provides the [`TypeRegistry`] that maps a fully qualified
//! `{namespace}.{type name}` to its [`RecordSchema`]. The JSON→record
//! builder consults it whenever the target schema nests a record type:
//! an explicit, injected lookup table rather than runtime reflection.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::schema::RecordSchema;

/// Type alias for the schema storage map.
type SchemaMap = Arc<RwLock<HashMap<String, Arc<RecordSchema>>>>;

/// A thread-safe registry of record schemas keyed by qualified name.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>`:
/// - Multiple conversions can look up schemas concurrently (read access)
/// - Registration operations are serialized (write access)
///
/// # Example
///
/// ```rust
/// use recordpath::{FieldSchema, RecordSchema, TypeRegistry, TypeSchema};
///
/// let registry = TypeRegistry::new();
///
/// registry
///     .register(
///         "com.acme",
///         RecordSchema::new("Address")
///             .with_field(FieldSchema::new("city", TypeSchema::String).with_path("city")),
///     )
///     .unwrap();
///
/// assert!(registry.get("com.acme", "Address").is_some());
/// assert!(registry.get("com.acme", "Unknown").is_none());
/// ```
pub struct TypeRegistry {
    schemas: SchemaMap,
}

impl TypeRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            schemas: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Registers a record schema under `{namespace}.{schema name}`.
    ///
    /// Returns the stored `Arc` so the caller can build instances of the
    /// type without a second lookup.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateType`] if the qualified name is
    /// already registered.
    pub fn register(
        &self,
        namespace: &str,
        schema: RecordSchema,
    ) -> Result<Arc<RecordSchema>, RegistryError> {
        let qualified = qualified_name(namespace, schema.name());
        let mut schemas = self.schemas.write();

        if schemas.contains_key(&qualified) {
            return Err(RegistryError::DuplicateType(qualified));
        }

        let schema = schema.shared();
        schemas.insert(qualified, Arc::clone(&schema));
        Ok(schema)
    }

    /// Retrieves a schema by namespace and unqualified type name.
    pub fn get(&self, namespace: &str, name: &str) -> Option<Arc<RecordSchema>> {
        self.schemas.read().get(&qualified_name(namespace, name)).cloned()
    }

    /// Returns true if the qualified name is registered.
    pub fn contains(&self, namespace: &str, name: &str) -> bool {
        self.schemas.read().contains_key(&qualified_name(namespace, name))
    }
}

fn qualified_name(namespace: &str, name: &str) -> String {
    format!("{namespace}.{name}")
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for TypeRegistry {
    fn clone(&self) -> Self {
        Self {
            schemas: Arc::clone(&self.schemas),
        }
    }
}

/// Errors that can occur during registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Attempted to register a type under a qualified name that exists.
    #[error("type '{0}' already registered")]
    DuplicateType(String),
}
