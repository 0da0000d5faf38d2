//! The document tree and its dotted-path accessors.
//!
//! This module provides [`Document`], a wrapper around [`IndexMap`] mapping keys to
//! [`Node`]s. One `Document` holds the contents of the top level, of one `[table]`, or
//! of one element of an `[[array]]`. Nested documents are owned by the `Table` and
//! `ArrayOfTables` nodes that hold them, so the whole tree has a single owner.
//!
//! ## Why IndexMap?
//!
//! Key order carries no meaning, and two documents with the same entries compare
//! equal in any order. Insertion order is still retained so the serializer writes
//! keys in the order they were read.
//!
//! ## Dotted paths
//!
//! Accessors take a path such as `"database.ports"`: every segment but the last
//! must name a table, and the last names the value.
//!
//! ```rust
//! use fiptoml::parse_str;
//!
//! let doc = parse_str("[owner]\nname = \"Tom\"\n").unwrap();
//! assert_eq!(doc.get_str("owner.name").unwrap(), "Tom");
//! assert_eq!(doc.get_or("owner.age", 30i64), 30);
//! assert!(doc.lookup("owner.").is_err());
//! ```

use crate::{Error, Node, Result};
use chrono::{DateTime, FixedOffset};
use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

/// An unordered mapping of unique keys to nodes.
///
/// # Examples
///
/// ```rust
/// use fiptoml::{Document, Node};
///
/// let mut doc = Document::new();
/// doc.insert("title".to_string(), Node::from("Example"));
/// assert_eq!(doc.len(), 1);
/// assert_eq!(doc.get("title").and_then(|n| n.as_str()), Some("Example"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document(IndexMap<String, Node>);

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Document(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Document(IndexMap::with_capacity(capacity))
    }

    /// Inserts a node, returning the one previously stored under `key`.
    ///
    /// This is the programmatic setter; unlike decoding it never rejects duplicates.
    pub fn insert(&mut self, key: String, node: Node) -> Option<Node> {
        self.0.insert(key, node)
    }

    /// Returns the node stored directly under `key`, without path resolution.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        self.0.get_mut(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key, keeping the relative order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Node> {
        self.0.keys()
    }

    /// Returns an iterator over the nodes, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Node> {
        self.0.values()
    }

    /// Returns an iterator over the entries, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Node> {
        self.0.iter()
    }

    pub(crate) fn entry(&mut self, key: &str) -> Entry<'_, String, Node> {
        self.0.entry(key.to_string())
    }

    /// Resolves a dotted path to the node it names.
    ///
    /// Fails with [`Error::PathNotFound`] when the path is empty, has an empty
    /// segment, crosses a missing or non-table node, or names a missing key.
    pub fn lookup(&self, path: &str) -> Result<&Node> {
        let not_found = || Error::PathNotFound(path.to_string());

        let mut doc = self;
        let mut segments = path.split('.');
        let mut segment = segments.next().ok_or_else(not_found)?;
        for next in segments {
            doc = match doc.get(segment) {
                Some(Node::Table(table)) if !segment.is_empty() => table,
                _ => return Err(not_found()),
            };
            segment = next;
        }

        if segment.is_empty() {
            return Err(not_found());
        }
        doc.get(segment).ok_or_else(not_found)
    }

    /// Looks up a path and converts the node to `T`.
    ///
    /// Fails with [`Error::PathNotFound`] or [`Error::TypeMismatch`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fiptoml::parse_str;
    ///
    /// let doc = parse_str("ports = [8001, 8002]\n").unwrap();
    /// let ports: &[i64] = doc.get_as("ports").unwrap();
    /// assert_eq!(ports, &[8001, 8002]);
    /// assert!(doc.get_as::<&[String]>("ports").is_err());
    /// ```
    pub fn get_as<'a, T>(&'a self, path: &str) -> Result<T>
    where
        T: TryFrom<&'a Node, Error = Error>,
    {
        T::try_from(self.lookup(path)?)
    }

    /// Looks up a path and converts the node to `T`, falling back to `default`.
    #[must_use]
    pub fn get_or<'a, T>(&'a self, path: &str, default: T) -> T
    where
        T: TryFrom<&'a Node, Error = Error>,
    {
        self.get_as(path).unwrap_or(default)
    }

    pub fn get_str(&self, path: &str) -> Result<&str> {
        self.get_as(path)
    }

    pub fn get_bool(&self, path: &str) -> Result<bool> {
        self.get_as(path)
    }

    pub fn get_integer(&self, path: &str) -> Result<i64> {
        self.get_as(path)
    }

    pub fn get_float(&self, path: &str) -> Result<f64> {
        self.get_as(path)
    }

    pub fn get_datetime(&self, path: &str) -> Result<DateTime<FixedOffset>> {
        self.get_as(path)
    }

    pub fn get_table(&self, path: &str) -> Result<&Document> {
        self.get_as(path)
    }

    pub fn get_array_of_tables(&self, path: &str) -> Result<&[Document]> {
        self.get_as(path)
    }
}

impl Serialize for Document {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

impl std::str::FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        crate::parse_str(s)
    }
}

impl IntoIterator for Document {
    type Item = (String, Node);
    type IntoIter = indexmap::map::IntoIter<String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Node);
    type IntoIter = indexmap::map::Iter<'a, String, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Node)> for Document {
    fn from_iter<T: IntoIterator<Item = (String, Node)>>(iter: T) -> Self {
        Document(IndexMap::from_iter(iter))
    }
}
