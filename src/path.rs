//! Path annotations and their resolution against a JSON tree.
//!
//! This module provides [`JsonPath`] and [`PathSegment`] for the static
//! path grammar used by schema annotations: dot-separated field segments,
//! each optionally followed by a single `[index]`. Paths resolve against a
//! `serde_json::Value` tree in two modes: read, where absence is a normal
//! first-class outcome, and write, where missing intermediate objects are
//! created on the way to the leaf.

use std::fmt::{self, Display};

use serde_json::{Map, Value};

use crate::error::MapperError;

/// A segment of a path annotation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A field/property access (e.g. `order`, `status`).
    Field(String),
    /// An array index access (e.g. `[0]`).
    Index(usize),
}

impl PathSegment {
    /// Creates a new field segment.
    pub fn field(name: impl Into<String>) -> Self {
        PathSegment::Field(name.into())
    }

    /// Creates a new index segment.
    pub fn index(idx: usize) -> Self {
        PathSegment::Index(idx)
    }
}

/// A parsed path annotation locating a value in a JSON tree.
///
/// The grammar is deliberately small: segments separated by `.`, where a
/// segment may carry one trailing `[<non-negative integer>]` applied after
/// navigating the named child. This is not a JSONPath engine: there are
/// no wildcards, filters, or recursive descent.
///
/// # Example
///
/// ```rust
/// use recordpath::JsonPath;
/// use serde_json::json;
///
/// let path = JsonPath::parse("order.lines[0].sku").unwrap();
/// let tree = json!({"order": {"lines": [{"sku": "A-1"}]}});
///
/// assert_eq!(path.resolve_read(&tree), Some(&json!("A-1")));
/// assert_eq!(JsonPath::parse("order.missing").unwrap().resolve_read(&tree), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct JsonPath {
    segments: Vec<PathSegment>,
}

impl JsonPath {
    /// Creates an empty path addressing the root value.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses the `a.b[0].c` grammar.
    ///
    /// # Errors
    ///
    /// Returns [`MapperError::InvalidPath`] on empty segments, unclosed or
    /// misplaced brackets, and non-numeric indices.
    pub fn parse(text: &str) -> Result<Self, MapperError> {
        let invalid = |reason: &str| MapperError::InvalidPath {
            path: text.to_string(),
            reason: reason.to_string(),
        };

        let mut segments = Vec::new();
        for part in text.split('.') {
            match part.find('[') {
                None => {
                    if part.is_empty() {
                        return Err(invalid("empty segment"));
                    }
                    segments.push(PathSegment::Field(part.to_string()));
                }
                Some(open) => {
                    let name = &part[..open];
                    if name.is_empty() {
                        return Err(invalid("index without a field name"));
                    }
                    let index = part[open + 1..]
                        .strip_suffix(']')
                        .ok_or_else(|| invalid("unclosed index bracket"))?;
                    let index: usize = index
                        .parse()
                        .map_err(|_| invalid("index is not a non-negative integer"))?;
                    segments.push(PathSegment::Field(name.to_string()));
                    segments.push(PathSegment::Index(index));
                }
            }
        }
        Ok(Self { segments })
    }

    /// Returns a new path with a field segment appended.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Field(name.into()));
        Self { segments }
    }

    /// Returns a new path with an index segment appended.
    pub fn push_index(&self, index: usize) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::Index(index));
        Self { segments }
    }

    /// Returns true if this is the root path (no segments).
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the number of segments in this path.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns true if this path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns an iterator over the path segments.
    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Walks the tree in read mode.
    ///
    /// Navigates segments in order; a missing child, an out-of-bounds
    /// index, or an explicit JSON null at any step stops resolution and
    /// yields `None`. Absence is an expected outcome, not an error.
    pub fn resolve_read<'a>(&self, root: &'a Value) -> Option<&'a Value> {
        let mut node = root;
        for segment in &self.segments {
            node = match segment {
                PathSegment::Field(name) => node.get(name.as_str())?,
                PathSegment::Index(index) => node.get(*index)?,
            };
            if node.is_null() {
                return None;
            }
        }
        Some(node)
    }

    /// Walks the tree in write mode, up to the leaf's parent.
    ///
    /// Every segment except the last is navigated as an object member,
    /// creating empty objects where missing. Returns the container the
    /// final segment's leaf should be set on, together with the leaf name.
    ///
    /// # Errors
    ///
    /// Index segments are not writable ([`MapperError::IndexedWrite`]); an
    /// existing non-object node along the way is
    /// [`MapperError::PathObstructed`]; the root path itself has no leaf to
    /// set and is rejected as [`MapperError::InvalidPath`].
    pub fn resolve_write<'a>(
        &self,
        root: &'a mut Value,
    ) -> Result<(&'a mut Map<String, Value>, &str), MapperError> {
        let (last, init) = self
            .segments
            .split_last()
            .ok_or_else(|| MapperError::InvalidPath {
                path: self.to_string(),
                reason: "cannot write to the root path".to_string(),
            })?;
        let PathSegment::Field(leaf) = last else {
            return Err(MapperError::IndexedWrite {
                path: self.to_string(),
            });
        };

        let mut node = root;
        for segment in init {
            let PathSegment::Field(name) = segment else {
                return Err(MapperError::IndexedWrite {
                    path: self.to_string(),
                });
            };
            let map = node
                .as_object_mut()
                .ok_or_else(|| MapperError::PathObstructed {
                    path: self.to_string(),
                })?;
            node = map
                .entry(name.as_str())
                .or_insert_with(|| Value::Object(Map::new()));
        }

        let map = node
            .as_object_mut()
            .ok_or_else(|| MapperError::PathObstructed {
                path: self.to_string(),
            })?;
        Ok((map, leaf.as_str()))
    }

    /// Walks the tree in write mode over *all* segments.
    ///
    /// Returns the node at the full path, creating empty objects where
    /// missing. Used where an object (rather than a leaf) is the target:
    /// nested record placement and the write-side root path.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`resolve_write`](Self::resolve_write).
    pub fn resolve_or_create<'a>(&self, root: &'a mut Value) -> Result<&'a mut Value, MapperError> {
        let mut node = root;
        for segment in &self.segments {
            let PathSegment::Field(name) = segment else {
                return Err(MapperError::IndexedWrite {
                    path: self.to_string(),
                });
            };
            let map = node
                .as_object_mut()
                .ok_or_else(|| MapperError::PathObstructed {
                    path: self.to_string(),
                })?;
            node = map
                .entry(name.as_str())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        Ok(node)
    }
}

impl Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) => {
                    if i > 0 {
                        write!(f, ".")?;
                    }
                    write!(f, "{}", name)?;
                }
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}
