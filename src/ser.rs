//! Document serialization.
//!
//! This module provides the [`Serializer`] that renders a [`Document`] tree back
//! to text the decoder accepts.
//!
//! ## Layout
//!
//! - **Top level first**: every non-table entry of the root as a `key = value` line
//! - **Tables**: a blank line, then `[path]`, the table's own values, then its
//!   nested tables under their full dotted path
//! - **Arrays of tables**: per element, a blank line, `[[path]]`, the element's
//!   values, then its nested tables
//!
//! Tables are always separated by a blank line, which also ends the key-value
//! section above them when the text is decoded again.
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use fiptoml::{parse_str, Serializer, WriteOptions};
//!
//! let doc = parse_str("name = \"demo\"\n[server]\nport = 80\n").unwrap();
//!
//! let mut serializer = Serializer::new(WriteOptions::new());
//! serializer.serialize_document(&doc);
//! assert_eq!(serializer.into_inner(), "name = \"demo\"\n\n[server]\nport = 80\n");
//! ```

use crate::{Document, Node, WriteOptions};

/// The text serializer.
///
/// Created via [`Serializer::new`]; feed it documents with
/// [`serialize_document`](Serializer::serialize_document) and take the text with
/// [`into_inner`](Serializer::into_inner).
pub struct Serializer {
    output: String,
    options: WriteOptions,
}

impl Serializer {
    pub fn new(options: WriteOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Appends the text of a whole document.
    pub fn serialize_document(&mut self, doc: &Document) {
        self.write_body(doc, 0);
        let mut path = Vec::new();
        self.write_tables(doc, &mut path);
    }

    fn entries<'d>(&self, doc: &'d Document) -> Vec<(&'d String, &'d Node)> {
        let mut entries: Vec<_> = doc.iter().collect();
        if self.options.sort_keys {
            entries.sort_by(|a, b| a.0.cmp(b.0));
        }
        entries
    }

    /// Writes the non-table entries of `doc` as `key = value` lines.
    fn write_body(&mut self, doc: &Document, depth: usize) {
        for (key, node) in self.entries(doc) {
            if node.is_table() || node.is_array_of_tables() {
                continue;
            }
            if depth > 0 {
                self.output.extend(std::iter::repeat(' ').take(self.options.indent));
            }
            self.output.push_str(key);
            self.output.push_str(" = ");
            self.write_value(node);
            self.output.push('\n');
        }
    }

    fn write_value(&mut self, node: &Node) {
        match node {
            Node::Array(array) => {
                let literal = array.to_literal(self.options.array_separator());
                self.output.push_str(&literal);
            }
            other => self.output.push_str(&other.to_string()),
        }
    }

    /// Writes the tables and arrays of tables of `doc`, nested under `path`.
    fn write_tables<'d>(&mut self, doc: &'d Document, path: &mut Vec<&'d str>) {
        for (key, node) in self.entries(doc) {
            match node {
                Node::Table(table) => {
                    path.push(key);
                    self.write_header(path, false);
                    self.write_body(table, path.len());
                    self.write_tables(table, path);
                    path.pop();
                }
                Node::ArrayOfTables(docs) => {
                    path.push(key);
                    for element in docs {
                        self.write_header(path, true);
                        self.write_body(element, path.len());
                        self.write_tables(element, path);
                    }
                    path.pop();
                }
                _ => {}
            }
        }
    }

    fn write_header(&mut self, path: &[&str], is_array: bool) {
        if !self.output.is_empty() {
            self.output.push('\n');
        }
        let (open, close) = if is_array { ("[[", "]]") } else { ("[", "]") };
        self.output.push_str(open);
        self.output.push_str(&path.join("."));
        self.output.push_str(close);
        self.output.push('\n');
    }
}
