//! # fiptoml
//!
//! A small decoder for TOML-like configuration files, with typed dotted-path
//! accessors over the decoded tree.
//!
//! ## What does it read?
//!
//! A line-oriented subset of TOML: bare keys, strings in all four quoting
//! styles, booleans, 64-bit integers, floats, RFC 3339 datetimes, homogeneous
//! arrays, `[tables]` and `[[arrays of tables]]`. See [`format`] for the exact
//! text surface. It is meant as an embedded configuration reader, not as a
//! conformance-complete TOML implementation.
//!
//! ## Key Features
//!
//! - **Typed tree**: every value is a [`Node`] of a fixed set of kinds; arrays are
//!   typed vectors, so a mixed array is a decode error, not a runtime surprise
//! - **Dotted paths**: `doc.get_str("owner.name")` walks nested tables
//! - **Strict or defaulted lookups**: [`Document::get_as`] reports why a lookup
//!   failed, [`Document::get_or`] falls back to a default
//! - **Serde Compatible**: decode straight into `#[derive(Deserialize)]` types, or
//!   export a decoded tree through any serde format
//! - **Writes it back**: [`to_string`] renders a tree that decodes to the same values
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! fiptoml = "0.1"
//! ```
//!
//! ### Decoding and Lookups
//!
//! ```rust
//! use fiptoml::parse_str;
//!
//! let doc = parse_str(r#"
//! title = "TOML Example"
//!
//! [database]
//! ports = [ 8001, 8001, 8002 ]
//! enabled = true
//! "#).unwrap();
//!
//! assert_eq!(doc.get_str("title").unwrap(), "TOML Example");
//! assert_eq!(doc.get_as::<&[i64]>("database.ports").unwrap(), &[8001, 8001, 8002]);
//! assert!(doc.get_or("database.enabled", false));
//! assert_eq!(doc.get_or("database.timeout", 30i64), 30);
//! ```
//!
//! ### Typed Decoding
//!
//! ```rust
//! use fiptoml::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Product {
//!     name: String,
//!     sku: u64,
//! }
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Inventory {
//!     products: Vec<Product>,
//! }
//!
//! let inventory: Inventory = from_str(
//!     "[[products]]\nname = \"Hammer\"\nsku = 738594937\n\n[[products]]\nname = \"Nail\"\nsku = 284758393\n",
//! )
//! .unwrap();
//! assert_eq!(inventory.products[1].name, "Nail");
//! ```
//!
//! ## Error Handling
//!
//! Decoding is all-or-nothing and stops at the first problem, reported as one
//! [`Error`] variant. Lookup failures only affect the lookup that hit them.
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (decode start and finish, headers, file
//! access) and never installs a subscriber.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`load_config.rs`** - Load a file and read values by path
//! - **`dynamic_values.rs`** - Walk and build a [`Document`] by hand
//! - **`custom_options.rs`** - Shape the written text with [`WriteOptions`]
//! - **`typed_config.rs`** - Decode into your own structs
//!
//! Run any example with: `cargo run --example <name>`

pub mod cursor;
pub mod de;
pub mod error;
pub mod format;
pub mod literal;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use de::Decoder;
pub use error::{Error, Result};
pub use map::Document;
pub use options::WriteOptions;
pub use ser::Serializer;
pub use value::{Array, Kind, Node};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;

/// Decodes a document from bytes, which must be valid UTF-8.
///
/// # Examples
///
/// ```rust
/// use fiptoml::{parse, Error};
///
/// let doc = parse(b"answer = 42\n").unwrap();
/// assert_eq!(doc.get_integer("answer").unwrap(), 42);
///
/// assert_eq!(parse(b"name = \"\xff\"\n"), Err(Error::InvalidUtf8));
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidUtf8`] for invalid input encoding and the first
/// decode error otherwise.
pub fn parse(input: &[u8]) -> Result<Document> {
    let input = std::str::from_utf8(input).map_err(|_| Error::InvalidUtf8)?;
    parse_str(input)
}

/// Decodes a document from text.
///
/// # Examples
///
/// ```rust
/// use fiptoml::parse_str;
///
/// let doc = parse_str("").unwrap();
/// assert!(doc.is_empty());
/// ```
///
/// # Errors
///
/// Returns the first decode error found in the input.
pub fn parse_str(input: &str) -> Result<Document> {
    Decoder::new(input).decode()
}

/// Reads and decodes the file at `path`.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, and decode errors as
/// [`parse`] does.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    debug!(path = %path.display(), "loading document");
    let bytes = fs::read(path).map_err(|e| Error::io(&e.to_string()))?;
    parse(&bytes)
}

/// Renders a document as text.
///
/// # Examples
///
/// ```rust
/// use fiptoml::{parse_str, to_string};
///
/// let doc = parse_str("[owner]\nname = \"Tom\"\n").unwrap();
/// assert_eq!(to_string(&doc), "[owner]\nname = \"Tom\"\n");
/// ```
#[must_use]
pub fn to_string(doc: &Document) -> String {
    to_string_with_options(doc, WriteOptions::default())
}

/// Renders a document as text with custom options.
#[must_use]
pub fn to_string_with_options(doc: &Document, options: WriteOptions) -> String {
    let mut serializer = Serializer::new(options);
    serializer.serialize_document(doc);
    serializer.into_inner()
}

/// Writes a document's text to a writer.
///
/// # Examples
///
/// ```rust
/// use fiptoml::{parse_str, to_writer};
///
/// let doc = parse_str("a = 1\n").unwrap();
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &doc).unwrap();
/// assert_eq!(buffer, b"a = 1\n");
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, doc: &Document) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, doc, WriteOptions::default())
}

/// Writes a document's text to a writer with custom options.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(mut writer: W, doc: &Document, options: WriteOptions) -> Result<()>
where
    W: io::Write,
{
    let text = to_string_with_options(doc, options);
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Writes a document's text to the file at `path`, replacing it.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn write<P: AsRef<Path>>(doc: &Document, path: P) -> Result<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), keys = doc.len(), "writing document");
    fs::write(path, to_string(doc)).map_err(|e| Error::io(&e.to_string()))
}

/// Deserializes an instance of type `T` from a decoded document, borrowing
/// strings from it.
///
/// # Examples
///
/// ```rust
/// use fiptoml::{from_document, parse_str};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Owner<'a> { name: &'a str }
///
/// let doc = parse_str("name = \"Tom\"\n").unwrap();
/// let owner: Owner = from_document(&doc).unwrap();
/// assert_eq!(owner.name, "Tom");
/// ```
///
/// # Errors
///
/// Returns [`Error::Custom`] if the document does not match `T`.
pub fn from_document<'de, T>(doc: &'de Document) -> Result<T>
where
    T: Deserialize<'de>,
{
    T::deserialize(doc)
}

/// Deserializes an instance of type `T` from text.
///
/// # Examples
///
/// ```rust
/// use fiptoml::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str("x = 1\ny = 2\n").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns the first decode error, or [`Error::Custom`] if the document does
/// not match `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<T>(s: &str) -> Result<T>
where
    T: DeserializeOwned,
{
    let doc = parse_str(s)?;
    from_document(&doc)
}

/// Deserializes an instance of type `T` from bytes of text.
///
/// # Errors
///
/// Returns [`Error::InvalidUtf8`] for invalid encoding, then as [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<T>(v: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    let doc = parse(v)?;
    from_document(&doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    const EXAMPLE: &str = r#"#this is an TOML doc
	title = "TOML Example"
	files = [
		"chapter 1",
		"chapter 2"
	]

[owner]
name = "Lance Uppercut"
dob = 1979-05-27T07:32:00-08:00 # First class dates? Why not?
tags = [
		"tag 1",
		"tag 2"
	]

[database]
server = "192.168.1.1"
ports = [ 8001, 8001, 8002 ]
connection_max = 5000
enabled = true

	[[products]]
	name = "Hammer"
	sku = 738594937

	[[products]]

	[[products]]
	name = "Nail"
	sku = 284758393
	color = "gray"
	"#;

    #[test]
    fn test_parse_example() {
        let doc = parse_str(EXAMPLE).unwrap();
        assert_eq!(doc.get_str("title").unwrap(), "TOML Example");
        assert_eq!(
            doc.get_as::<&[String]>("files").unwrap(),
            &["chapter 1", "chapter 2"]
        );
        assert_eq!(doc.get_str("owner.name").unwrap(), "Lance Uppercut");
        assert_eq!(doc.get_datetime("owner.dob").unwrap().year(), 1979);
        assert_eq!(doc.get_as::<&[String]>("owner.tags").unwrap()[1], "tag 2");
        assert_eq!(
            doc.get_as::<&[i64]>("database.ports").unwrap(),
            &[8001, 8001, 8002]
        );
        assert_eq!(doc.get_or("database.connection_max", -1i64), 5000);
        assert!(doc.get_bool("database.enabled").unwrap());

        let products = doc.get_array_of_tables("products").unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].get_integer("sku").unwrap(), 738594937);
        assert!(products[1].is_empty());
        assert_eq!(products[2].get_str("color").unwrap(), "gray");
    }

    #[test]
    fn test_parse_bytes_matches_text() {
        assert_eq!(parse(EXAMPLE.as_bytes()).unwrap(), parse_str(EXAMPLE).unwrap());
        assert_eq!(parse(&[b'a', b'=', 0xC3]), Err(Error::InvalidUtf8));
    }

    #[test]
    fn test_writer_roundtrip() {
        let doc = parse_str(EXAMPLE).unwrap();
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &doc).unwrap();
        assert_eq!(parse(&buffer).unwrap(), doc);
    }

    #[test]
    fn test_typed_decoding() {
        #[derive(Deserialize, Debug, PartialEq)]
        struct Database {
            server: String,
            ports: Vec<u16>,
            connection_max: u32,
            enabled: bool,
        }

        #[derive(Deserialize, Debug)]
        struct Config {
            title: String,
            database: Database,
        }

        let config: Config = from_str(EXAMPLE).unwrap();
        assert_eq!(config.title, "TOML Example");
        assert_eq!(
            config.database,
            Database {
                server: "192.168.1.1".to_string(),
                ports: vec![8001, 8001, 8002],
                connection_max: 5000,
                enabled: true,
            }
        );

        let config: Config = from_slice(EXAMPLE.as_bytes()).unwrap();
        assert!(config.database.enabled);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load("/nonexistent/fiptoml/config.toml"),
            Err(Error::Io(_))
        ));
    }
}
