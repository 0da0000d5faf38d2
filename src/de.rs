//! Document decoding.
//!
//! This module holds the structural extractors that turn key-value lines,
//! `[table]` headers and `[[array]]` headers into a [`Document`] tree, the
//! top-level [`Decoder`] that drives them, and the serde bridge that lets a
//! decoded tree fill any `Deserialize` type.
//!
//! ## Overview
//!
//! - **Single pass**: one cursor walks the input once; every extractor returns
//!   the number of bytes it consumed and the driver advances by that amount
//! - **All or nothing**: the first error aborts the decode and no partial
//!   document is returned
//! - **Sections**: the key-value lines under a header end at the first blank or
//!   comment-only line, or at the next header
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use fiptoml::parse_str;
//!
//! let doc = parse_str("[server]\nport = 8080\n").unwrap();
//! assert_eq!(doc.get_integer("server.port").unwrap(), 8080);
//! ```
//!
//! ## Typed decoding
//!
//! ```rust
//! use fiptoml::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Server { host: String, port: u16 }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Config { server: Server }
//!
//! let config: Config = from_str("[server]\nhost = \"localhost\"\nport = 8080\n").unwrap();
//! assert_eq!(config.server.port, 8080);
//! ```

use crate::cursor::{
    is_blank, is_line_end, is_section_end, line_end_width, scan_until, skip_insignificant,
    skip_key_separator, skip_trailing,
};
use crate::literal::extract_value;
use crate::value::format_datetime;
use crate::{Array, Document, Error, Node, Result};
use serde::de::value::{BorrowedStrDeserializer, SeqDeserializer};
use serde::de::{self, IntoDeserializer, Unexpected};
use serde::forward_to_deserialize_any;
use tracing::{debug, trace};

/// Extracts a bare key, which runs up to a blank, `=` or line end.
pub fn extract_key(input: &str) -> Result<(&str, usize)> {
    let len = scan_until(input, |ch| is_blank(ch) || ch == '=' || is_line_end(ch));
    if len == 0 {
        return Err(Error::EmptyKey);
    }
    Ok((&input[..len], len))
}

/// Extracts one `key = value` line into `doc`, including its trailing comment and
/// line terminator.
pub fn extract_key_value(input: &str, doc: &mut Document) -> Result<usize> {
    let (key, mut i) = extract_key(input)?;
    if doc.contains_key(key) {
        return Err(Error::DuplicateKey(key.to_string()));
    }

    i += skip_key_separator(&input[i..]).ok_or(Error::InvalidKeyName)?;
    let unsupported = || Error::UnsupportedValue(key.to_string());
    let (node, len) = extract_value(&input[i..])?.ok_or_else(unsupported)?;
    i += len;
    i += skip_trailing(&input[i..]).ok_or_else(unsupported)?;

    doc.insert(key.to_string(), node);
    Ok(i)
}

/// Extracts key-value lines into `doc` until the section ends.
///
/// A section ends at a blank or comment-only line (which is consumed), at the
/// end of the input, or before a line that opens a header.
pub fn extract_key_value_section(input: &str, doc: &mut Document) -> Result<usize> {
    let mut i = 0;
    loop {
        let (ended, advance) = is_section_end(&input[i..]);
        i += advance;
        if ended {
            return Ok(i);
        }
        i += skip_insignificant(&input[i..]);
        if input[i..].starts_with('[') {
            return Ok(i);
        }
        i += extract_key_value(&input[i..], doc)?;
    }
}

/// Extracts a header name following its opening `[` or `[[`.
///
/// The consumed length covers the name, the closing `]` or `]]`, and the rest of
/// the header line.
pub fn extract_table_name(input: &str, is_array: bool) -> Result<(&str, usize)> {
    let len = scan_until(input, |ch| ch == ']' || ch.is_whitespace());
    let name = &input[..len];
    let invalid = || Error::InvalidTableName(name.to_string());

    let close = if is_array { "]]" } else { "]" };
    if len == 0 || !input[len..].starts_with(close) {
        return Err(invalid());
    }
    let i = len + close.len();
    let trailing = skip_trailing(&input[i..]).ok_or_else(invalid)?;
    Ok((name, i + trailing))
}

/// Splits a dotted header name into its parent segments and the final one.
fn split_table_name(name: &str) -> Result<(Vec<&str>, &str)> {
    let mut segments: Vec<&str> = name.split('.').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(Error::InvalidTableName(name.to_string()));
    }
    let last = segments.pop().unwrap_or(name);
    Ok((segments, last))
}

/// Walks down to the document a dotted header lives in, creating missing tables.
///
/// An array of tables on the way is entered through its latest element.
fn descend<'d>(mut doc: &'d mut Document, parents: &[&str]) -> Result<&'d mut Document> {
    for segment in parents {
        let node = doc
            .entry(segment)
            .or_insert_with(|| Node::Table(Document::new()));
        doc = match node {
            Node::Table(table) => table,
            Node::ArrayOfTables(docs) => match docs.last_mut() {
                Some(last) => last,
                None => return Err(Error::DuplicateKey(segment.to_string())),
            },
            _ => return Err(Error::DuplicateKey(segment.to_string())),
        };
    }
    Ok(doc)
}

/// Extracts a `[name]` header and the key-value section under it.
///
/// Re-opening a table merges into it; a name already bound to anything other
/// than a table is a duplicate.
pub fn extract_table(input: &str, doc: &mut Document) -> Result<usize> {
    let (name, len) = extract_table_name(&input[1..], false)?;
    trace!(table = name, "table header");
    let (parents, last) = split_table_name(name)?;

    let parent = descend(doc, &parents)?;
    let table = match parent
        .entry(last)
        .or_insert_with(|| Node::Table(Document::new()))
    {
        Node::Table(table) => table,
        _ => return Err(Error::DuplicateKey(name.to_string())),
    };

    let i = 1 + len;
    Ok(i + extract_key_value_section(&input[i..], table)?)
}

/// Extracts a `[[name]]` header and appends a new document holding the key-value
/// section under it.
pub fn extract_table_array(input: &str, doc: &mut Document) -> Result<usize> {
    let (name, len) = extract_table_name(&input[2..], true)?;
    trace!(table = name, "array of tables header");
    let (parents, last) = split_table_name(name)?;

    let parent = descend(doc, &parents)?;
    let docs = match parent
        .entry(last)
        .or_insert_with(|| Node::ArrayOfTables(Vec::new()))
    {
        Node::ArrayOfTables(docs) => docs,
        _ => return Err(Error::DuplicateKey(name.to_string())),
    };

    let i = 2 + len;
    let mut table = Document::new();
    let consumed = extract_key_value_section(&input[i..], &mut table)?;
    docs.push(table);
    Ok(i + consumed)
}

/// The top-level driver.
///
/// Skips insignificant text, then dispatches on the next significant chars:
/// `[[` opens an array of tables, `[` a table, and anything else a key-value
/// section of the top-level document.
///
/// # Examples
///
/// ```rust
/// use fiptoml::Decoder;
///
/// let doc = Decoder::new("[[item]]\nid = 1\n\n[[item]]\nid = 2\n").decode().unwrap();
/// assert_eq!(doc.get_array_of_tables("item").unwrap().len(), 2);
/// ```
pub struct Decoder<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Decoder<'a> {
    pub fn new(input: &'a str) -> Self {
        Decoder { input, position: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    /// Decodes the whole input into a document.
    pub fn decode(mut self) -> Result<Document> {
        debug!(len = self.input.len(), "decoding document");
        let mut doc = Document::new();

        loop {
            self.position += skip_insignificant(self.rest());
            let rest = self.rest();
            if rest.is_empty() {
                break;
            }

            let consumed = if rest.starts_with("[[") {
                extract_table_array(rest, &mut doc)?
            } else if rest.starts_with('[') {
                if line_end_width(&rest[1..]).is_some() {
                    return Err(Error::InvalidKeyName);
                }
                extract_table(rest, &mut doc)?
            } else {
                extract_key_value_section(rest, &mut doc)?
            };
            self.position += consumed;
        }

        debug!(keys = doc.len(), "decoded document");
        Ok(doc)
    }
}

// Serde bridge: a decoded tree is itself a Deserializer, borrowing from the tree.

fn visit_seq<'de, I, T, V>(iter: I, visitor: V) -> Result<V::Value>
where
    I: Iterator<Item = T>,
    T: IntoDeserializer<'de, Error>,
    V: de::Visitor<'de>,
{
    let mut seq = SeqDeserializer::new(iter);
    let value = visitor.visit_seq(&mut seq)?;
    seq.end()?;
    Ok(value)
}

fn visit_array<'de, V>(array: &'de Array, visitor: V) -> Result<V::Value>
where
    V: de::Visitor<'de>,
{
    visitor.visit_seq(ArrayAccess { array, index: 0 })
}

fn visit_document<'de, V>(doc: &'de Document, visitor: V) -> Result<V::Value>
where
    V: de::Visitor<'de>,
{
    visitor.visit_map(DocumentAccess {
        iter: doc.iter(),
        value: None,
    })
}

struct ArrayAccess<'de> {
    array: &'de Array,
    index: usize,
}

impl<'de> de::SeqAccess<'de> for ArrayAccess<'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        let i = self.index;
        if i >= self.array.len() {
            return Ok(None);
        }
        self.index += 1;

        let value: Result<T::Value> = match self.array {
            Array::Empty => return Ok(None),
            Array::String(v) => seed.deserialize(BorrowedStrDeserializer::new(v[i].as_str())),
            Array::Bool(v) => seed.deserialize(v[i].into_deserializer()),
            Array::Integer(v) => seed.deserialize(v[i].into_deserializer()),
            Array::Float(v) => seed.deserialize(v[i].into_deserializer()),
            Array::Datetime(v) => seed.deserialize(format_datetime(&v[i]).into_deserializer()),
        };
        value.map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.array.len() - self.index)
    }
}

struct DocumentAccess<'de> {
    iter: indexmap::map::Iter<'de, String, Node>,
    value: Option<&'de Node>,
}

impl<'de> de::MapAccess<'de> for DocumentAccess<'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, node)) => {
                self.value = Some(node);
                seed.deserialize(BorrowedStrDeserializer::new(key.as_str()))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(node) => seed.deserialize(node),
            None => Err(Error::custom("value is missing")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

impl<'de> de::Deserializer<'de> for &'de Node {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Node::String(s) => visitor.visit_borrowed_str(s),
            Node::Bool(b) => visitor.visit_bool(*b),
            Node::Integer(i) => visitor.visit_i64(*i),
            Node::Float(f) => visitor.visit_f64(*f),
            Node::Datetime(dt) => visitor.visit_string(format_datetime(dt)),
            Node::Array(array) => visit_array(array, visitor),
            Node::Table(doc) => visit_document(doc, visitor),
            Node::ArrayOfTables(docs) => visit_seq(docs.iter(), visitor),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self {
            Node::String(s) => visitor.visit_enum(EnumDeserializer::new(s, None)),
            Node::Table(doc) => {
                let mut entries = doc.iter();
                match (entries.next(), entries.next()) {
                    (Some((variant, node)), None) => {
                        visitor.visit_enum(EnumDeserializer::new(variant, Some(node)))
                    }
                    _ => Err(Error::custom("expected a table with a single variant key")),
                }
            }
            other => Err(de::Error::invalid_type(unexpected(other), &"enum")),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

impl<'de> de::Deserializer<'de> for &'de Document {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visit_document(self, visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

impl<'de> IntoDeserializer<'de, Error> for &'de Node {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self::Deserializer {
        self
    }
}

impl<'de> IntoDeserializer<'de, Error> for &'de Document {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self::Deserializer {
        self
    }
}

fn unexpected(node: &Node) -> Unexpected<'_> {
    match node {
        Node::String(s) => Unexpected::Str(s),
        Node::Bool(b) => Unexpected::Bool(*b),
        Node::Integer(i) => Unexpected::Signed(*i),
        Node::Float(f) => Unexpected::Float(*f),
        Node::Datetime(_) => Unexpected::Other("datetime"),
        Node::Array(_) | Node::ArrayOfTables(_) => Unexpected::Seq,
        Node::Table(_) => Unexpected::Map,
    }
}

struct EnumDeserializer<'de> {
    variant: &'de str,
    node: Option<&'de Node>,
}

impl<'de> EnumDeserializer<'de> {
    fn new(variant: &'de str, node: Option<&'de Node>) -> Self {
        EnumDeserializer { variant, node }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer<'de> {
    type Error = Error;
    type Variant = VariantDeserializer<'de>;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(BorrowedStrDeserializer::<Error>::new(self.variant))?;
        Ok((variant, VariantDeserializer { node: self.node }))
    }
}

struct VariantDeserializer<'de> {
    node: Option<&'de Node>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer<'de> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.node {
            None => Ok(()),
            Some(node) => Err(de::Error::invalid_type(unexpected(node), &"unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.node {
            Some(node) => seed.deserialize(node),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"newtype variant",
            )),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.node {
            Some(node) => de::Deserializer::deserialize_seq(node, visitor),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"tuple variant",
            )),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.node {
            Some(node) => de::Deserializer::deserialize_map(node, visitor),
            None => Err(de::Error::invalid_type(
                Unexpected::UnitVariant,
                &"struct variant",
            )),
        }
    }
}
