//! Typed node representation for decoded documents.
//!
//! This module provides the [`Node`] enum, which holds every value a document can
//! store, and [`Array`], the homogeneous array of one scalar kind.
//!
//! ## Core Types
//!
//! - [`Node`]: a string, bool, integer, float, datetime, array, table or array of tables
//! - [`Array`]: a typed vector of one scalar kind, or [`Array::Empty`] for `[]`
//! - [`Kind`]: the kind tag of a node or of an array's elements
//!
//! ## Extracting Values
//!
//! Every kind converts out of a `&Node` through `TryFrom`, which is also what the
//! typed accessors on [`Document`] use:
//!
//! ```rust
//! use fiptoml::Node;
//! use std::convert::TryFrom;
//!
//! let node = Node::from(42);
//! assert_eq!(i64::try_from(&node).unwrap(), 42);
//! assert!(bool::try_from(&node).is_err());
//! ```

use crate::{Document, Error, Result};
use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::{Serialize, Serializer};
use std::fmt;

/// A single value stored under a key.
///
/// There is no null variant: an absent key is simply not in the [`Document`].
///
/// # Examples
///
/// ```rust
/// use fiptoml::{Kind, Node};
///
/// let node = Node::from("hello");
/// assert_eq!(node.kind(), Kind::String);
/// assert_eq!(node.as_str(), Some("hello"));
/// assert_eq!(node.to_string(), "\"hello\"");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    String(String),
    Bool(bool),
    Integer(i64),
    Float(f64),
    Datetime(DateTime<FixedOffset>),
    Array(Array),
    Table(Document),
    ArrayOfTables(Vec<Document>),
}

/// A homogeneous array: every element has the kind of the first one.
#[derive(Clone, Debug, PartialEq)]
pub enum Array {
    /// The literal `[]`, which has no element kind.
    Empty,
    String(Vec<String>),
    Bool(Vec<bool>),
    Integer(Vec<i64>),
    Float(Vec<f64>),
    Datetime(Vec<DateTime<FixedOffset>>),
}

/// The kind of a [`Node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Bool,
    Integer,
    Float,
    Datetime,
    Array,
    Table,
    ArrayOfTables,
}

impl Kind {
    /// Lowercase name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Bool => "bool",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::Datetime => "datetime",
            Kind::Array => "array",
            Kind::Table => "table",
            Kind::ArrayOfTables => "array of tables",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Array {
    /// Starts an array from its first element.
    ///
    /// Returns `None` when the node is not a scalar, since arrays cannot nest.
    pub(crate) fn from_first(node: Node) -> Option<Array> {
        match node {
            Node::String(s) => Some(Array::String(vec![s])),
            Node::Bool(b) => Some(Array::Bool(vec![b])),
            Node::Integer(i) => Some(Array::Integer(vec![i])),
            Node::Float(f) => Some(Array::Float(vec![f])),
            Node::Datetime(dt) => Some(Array::Datetime(vec![dt])),
            Node::Array(_) | Node::Table(_) | Node::ArrayOfTables(_) => None,
        }
    }

    /// Appends an element, which must have the kind of the elements already present.
    pub(crate) fn push(&mut self, node: Node) -> Result<()> {
        match (self, node) {
            (Array::String(v), Node::String(s)) => v.push(s),
            (Array::Bool(v), Node::Bool(b)) => v.push(b),
            (Array::Integer(v), Node::Integer(i)) => v.push(i),
            (Array::Float(v), Node::Float(f)) => v.push(f),
            (Array::Datetime(v), Node::Datetime(dt)) => v.push(dt),
            _ => return Err(Error::MixedArrayTypes),
        }
        Ok(())
    }

    /// The kind shared by all elements, or `None` for an empty array.
    #[must_use]
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Array::Empty => None,
            Array::String(_) => Some(Kind::String),
            Array::Bool(_) => Some(Kind::Bool),
            Array::Integer(_) => Some(Kind::Integer),
            Array::Float(_) => Some(Kind::Float),
            Array::Datetime(_) => Some(Kind::Datetime),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Array::Empty => 0,
            Array::String(v) => v.len(),
            Array::Bool(v) => v.len(),
            Array::Integer(v) => v.len(),
            Array::Float(v) => v.len(),
            Array::Datetime(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Renders the array as a bracketed literal with `separator` between elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fiptoml::Array;
    ///
    /// let array = Array::from(vec![1i64, 2, 3]);
    /// assert_eq!(array.to_literal(","), "[1,2,3]");
    /// assert_eq!(array.to_literal(", "), "[1, 2, 3]");
    /// ```
    #[must_use]
    pub fn to_literal(&self, separator: &str) -> String {
        let items: Vec<String> = match self {
            Array::Empty => Vec::new(),
            Array::String(v) => v.iter().map(|s| quote(s)).collect(),
            Array::Bool(v) => v.iter().map(|b| b.to_string()).collect(),
            Array::Integer(v) => v.iter().map(|i| i.to_string()).collect(),
            Array::Float(v) => v.iter().map(|f| format_float(*f)).collect(),
            Array::Datetime(v) => v.iter().map(format_datetime).collect(),
        };
        format!("[{}]", items.join(separator))
    }

    fn type_name(&self) -> &'static str {
        match self {
            Array::Empty => "empty array",
            Array::String(_) => "string array",
            Array::Bool(_) => "bool array",
            Array::Integer(_) => "integer array",
            Array::Float(_) => "float array",
            Array::Datetime(_) => "datetime array",
        }
    }
}

impl Node {
    #[inline]
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Node::String(_) => Kind::String,
            Node::Bool(_) => Kind::Bool,
            Node::Integer(_) => Kind::Integer,
            Node::Float(_) => Kind::Float,
            Node::Datetime(_) => Kind::Datetime,
            Node::Array(_) => Kind::Array,
            Node::Table(_) => Kind::Table,
            Node::ArrayOfTables(_) => Kind::ArrayOfTables,
        }
    }

    /// Name of the node's type, distinguishing array element kinds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fiptoml::{Array, Node};
    ///
    /// assert_eq!(Node::from(1.5).type_name(), "float");
    /// assert_eq!(Node::from(Array::from(vec![true])).type_name(), "bool array");
    /// ```
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Node::Array(array) => array.type_name(),
            other => other.kind().as_str(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_table(&self) -> bool {
        matches!(self, Node::Table(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array_of_tables(&self) -> bool {
        matches!(self, Node::ArrayOfTables(_))
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Node::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Node::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
        match self {
            Node::Datetime(dt) => Some(dt),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Node::Array(array) => Some(array),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_table(&self) -> Option<&Document> {
        match self {
            Node::Table(doc) => Some(doc),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array_of_tables(&self) -> Option<&[Document]> {
        match self {
            Node::ArrayOfTables(docs) => Some(docs),
            _ => None,
        }
    }
}

/// Quotes a string so that decoding the result yields `s` again.
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{0008}' => out.push_str("\\b"),
            '\u{000C}' => out.push_str("\\f"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Formats a float so that it always reads back as a float.
pub(crate) fn format_float(value: f64) -> String {
    if value.is_nan() {
        "nan".to_string()
    } else if value.is_infinite() {
        let sign = if value > 0.0 { "" } else { "-" };
        format!("{}inf", sign)
    } else {
        let s = value.to_string();
        if s.contains('.') {
            s
        } else {
            format!("{}.0", s)
        }
    }
}

pub(crate) fn format_datetime(dt: &DateTime<FixedOffset>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl fmt::Display for Array {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal(","))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::String(s) => f.write_str(&quote(s)),
            Node::Bool(b) => write!(f, "{}", b),
            Node::Integer(i) => write!(f, "{}", i),
            Node::Float(fl) => f.write_str(&format_float(*fl)),
            Node::Datetime(dt) => f.write_str(&format_datetime(dt)),
            Node::Array(array) => write!(f, "{}", array),
            Node::Table(_) => f.write_str("{table}"),
            Node::ArrayOfTables(docs) => write!(f, "[[table; {}]]", docs.len()),
        }
    }
}

impl Serialize for Node {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Node::String(s) => serializer.serialize_str(s),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::Integer(i) => serializer.serialize_i64(*i),
            Node::Float(f) => serializer.serialize_f64(*f),
            Node::Datetime(dt) => serializer.serialize_str(&format_datetime(dt)),
            Node::Array(array) => array.serialize(serializer),
            Node::Table(doc) => doc.serialize(serializer),
            Node::ArrayOfTables(docs) => serializer.collect_seq(docs),
        }
    }
}

impl Serialize for Array {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Array::Empty => serializer.collect_seq(std::iter::empty::<bool>()),
            Array::String(v) => serializer.collect_seq(v),
            Array::Bool(v) => serializer.collect_seq(v),
            Array::Integer(v) => serializer.collect_seq(v),
            Array::Float(v) => serializer.collect_seq(v),
            Array::Datetime(v) => serializer.collect_seq(v.iter().map(format_datetime)),
        }
    }
}

// TryFrom implementations used by the typed accessors
impl<'a> TryFrom<&'a Node> for &'a str {
    type Error = Error;

    fn try_from(node: &'a Node) -> Result<Self> {
        match node {
            Node::String(s) => Ok(s),
            other => Err(Error::type_mismatch("string", other.type_name())),
        }
    }
}

impl<'a> TryFrom<&'a Node> for bool {
    type Error = Error;

    fn try_from(node: &'a Node) -> Result<Self> {
        match node {
            Node::Bool(b) => Ok(*b),
            other => Err(Error::type_mismatch("bool", other.type_name())),
        }
    }
}

impl<'a> TryFrom<&'a Node> for i64 {
    type Error = Error;

    fn try_from(node: &'a Node) -> Result<Self> {
        match node {
            Node::Integer(i) => Ok(*i),
            other => Err(Error::type_mismatch("integer", other.type_name())),
        }
    }
}

impl<'a> TryFrom<&'a Node> for f64 {
    type Error = Error;

    fn try_from(node: &'a Node) -> Result<Self> {
        match node {
            Node::Float(f) => Ok(*f),
            other => Err(Error::type_mismatch("float", other.type_name())),
        }
    }
}

impl<'a> TryFrom<&'a Node> for DateTime<FixedOffset> {
    type Error = Error;

    fn try_from(node: &'a Node) -> Result<Self> {
        match node {
            Node::Datetime(dt) => Ok(*dt),
            other => Err(Error::type_mismatch("datetime", other.type_name())),
        }
    }
}

impl<'a> TryFrom<&'a Node> for &'a Document {
    type Error = Error;

    fn try_from(node: &'a Node) -> Result<Self> {
        match node {
            Node::Table(doc) => Ok(doc),
            other => Err(Error::type_mismatch("table", other.type_name())),
        }
    }
}

impl<'a> TryFrom<&'a Node> for &'a [Document] {
    type Error = Error;

    fn try_from(node: &'a Node) -> Result<Self> {
        match node {
            Node::ArrayOfTables(docs) => Ok(docs),
            other => Err(Error::type_mismatch("array of tables", other.type_name())),
        }
    }
}

macro_rules! array_try_from {
    ($elem:ty, $variant:ident, $name:literal) => {
        impl<'a> TryFrom<&'a Node> for &'a [$elem] {
            type Error = Error;

            fn try_from(node: &'a Node) -> Result<Self> {
                match node {
                    Node::Array(Array::$variant(v)) => Ok(v),
                    Node::Array(Array::Empty) => Ok(&[]),
                    other => Err(Error::type_mismatch($name, other.type_name())),
                }
            }
        }

        impl From<Vec<$elem>> for Array {
            fn from(value: Vec<$elem>) -> Self {
                Array::$variant(value)
            }
        }
    };
}

array_try_from!(String, String, "string array");
array_try_from!(bool, Bool, "bool array");
array_try_from!(i64, Integer, "integer array");
array_try_from!(f64, Float, "float array");
array_try_from!(DateTime<FixedOffset>, Datetime, "datetime array");

// From implementations for building nodes programmatically
impl From<bool> for Node {
    fn from(value: bool) -> Self {
        Node::Bool(value)
    }
}

impl From<i8> for Node {
    fn from(value: i8) -> Self {
        Node::Integer(value as i64)
    }
}

impl From<i16> for Node {
    fn from(value: i16) -> Self {
        Node::Integer(value as i64)
    }
}

impl From<i32> for Node {
    fn from(value: i32) -> Self {
        Node::Integer(value as i64)
    }
}

impl From<i64> for Node {
    fn from(value: i64) -> Self {
        Node::Integer(value)
    }
}

impl From<u8> for Node {
    fn from(value: u8) -> Self {
        Node::Integer(value as i64)
    }
}

impl From<u16> for Node {
    fn from(value: u16) -> Self {
        Node::Integer(value as i64)
    }
}

impl From<u32> for Node {
    fn from(value: u32) -> Self {
        Node::Integer(value as i64)
    }
}

impl From<f32> for Node {
    fn from(value: f32) -> Self {
        Node::Float(value as f64)
    }
}

impl From<f64> for Node {
    fn from(value: f64) -> Self {
        Node::Float(value)
    }
}

impl From<String> for Node {
    fn from(value: String) -> Self {
        Node::String(value)
    }
}

impl From<&str> for Node {
    fn from(value: &str) -> Self {
        Node::String(value.to_string())
    }
}

impl From<DateTime<FixedOffset>> for Node {
    fn from(value: DateTime<FixedOffset>) -> Self {
        Node::Datetime(value)
    }
}

impl From<Array> for Node {
    fn from(value: Array) -> Self {
        Node::Array(value)
    }
}

impl From<Document> for Node {
    fn from(value: Document) -> Self {
        Node::Table(value)
    }
}

impl From<Vec<Document>> for Node {
    fn from(value: Vec<Document>) -> Self {
        Node::ArrayOfTables(value)
    }
}
