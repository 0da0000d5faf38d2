//! Text Format
//!
//! This module documents the configuration format accepted by the decoder and
//! produced by the serializer. It is a small, line-oriented subset of TOML.
//!
//! # Overview
//!
//! A document is a sequence of key-value lines, `[table]` headers and
//! `[[array]]` headers. Comments start with `#` and run to the end of the line.
//! Lines end with LF, CR, CRLF or form feed.
//!
//! # Key-Value Lines
//!
//! ```text
//! title = "TOML Example"   # comment after a value
//! port=8080
//! ```
//!
//! **Rules**:
//! - A key is bare: it runs up to the first space, tab, `=` or line end
//! - The key must be followed by `=` on the same line
//! - Only blanks or a comment may follow the value
//! - A key may appear once per table
//!
//! # Sections
//!
//! The key-value lines under a header form a section. A section ends at the
//! first blank or comment-only line, or at the next header. Keys after that
//! line belong to the top level again:
//!
//! ```rust
//! let doc = fiptoml::parse_str("[owner]\nname = \"Tom\"\n\nenabled = true\n").unwrap();
//! assert!(doc.get_bool("enabled").unwrap());
//! assert!(doc.get_bool("owner.enabled").is_err());
//! ```
//!
//! # Values
//!
//! | Kind | Syntax | Example |
//! |------|--------|---------|
//! | String | `"basic"`, `"""multi-line"""`, `'literal'`, `'''multi-line literal'''` | `name = "Tom"` |
//! | Bool | `true` or `false` | `enabled = true` |
//! | Integer | optional sign, no leading zero, fits in 64 bits | `port = -8001` |
//! | Float | digits, `.`, digits, optional exponent | `ratio = 0.5e-3` |
//! | Datetime | `YYYY-MM-DDThh:mm:ss[.fraction](Z\|±hh:mm)` | `dob = 1979-05-27T07:32:00-08:00` |
//! | Array | `[v, v, ...]`, all elements of one scalar kind | `ports = [8001, 8002]` |
//!
//! ## Strings
//!
//! Basic strings interpret escapes: `\b \t \n \f \r \" \\ \/ \uXXXX \UXXXXXXXX`.
//! Literal strings are taken verbatim. A multi-line string drops one line break
//! right after its opening delimiter, and in a multi-line basic string a
//! backslash at the end of a line joins it with the next non-blank text.
//!
//! ```rust
//! let doc = fiptoml::parse_str(concat!(
//!     "basic = \"tab\\there\"\n",
//!     "literal = 'C:\\Users'\n",
//!     "long = \"\"\"\nOne \\\n  line\"\"\"\n",
//! ))
//! .unwrap();
//! assert_eq!(doc.get_str("basic").unwrap(), "tab\there");
//! assert_eq!(doc.get_str("literal").unwrap(), "C:\\Users");
//! assert_eq!(doc.get_str("long").unwrap(), "One line");
//! ```
//!
//! ## Arrays
//!
//! The first element fixes the kind of the array. Elements may span lines, a
//! trailing comma is allowed, and commas inside strings are not separators.
//! Arrays do not nest.
//!
//! ```rust
//! use fiptoml::{parse_str, Error};
//!
//! let doc = parse_str("hosts = [\n  \"alpha\", # first\n  \"a,b\",\n]\n").unwrap();
//! assert_eq!(doc.get_as::<&[String]>("hosts").unwrap(), &["alpha", "a,b"]);
//!
//! assert_eq!(parse_str("mixed = [1, \"two\"]\n"), Err(Error::MixedArrayTypes));
//! ```
//!
//! # Tables
//!
//! ```text
//! [database]
//! server = "192.168.1.1"
//!
//! [servers.alpha]
//! ip = "10.0.0.1"
//! ```
//!
//! **Rules**:
//! - A header name has no whitespace; only blanks or a comment may follow it
//! - Dotted names nest, creating intermediate tables as needed
//! - Opening a table again adds keys to it
//!
//! # Arrays of Tables
//!
//! Each `[[name]]` header appends a new table to the array named `name`, even
//! when its section is empty. A dotted header below it attaches to the latest
//! element:
//!
//! ```rust
//! let doc = fiptoml::parse_str(concat!(
//!     "[[fruit]]\nname = \"apple\"\n",
//!     "[fruit.physical]\ncolor = \"red\"\n",
//!     "[[fruit]]\nname = \"banana\"\n",
//! ))
//! .unwrap();
//! let fruit = doc.get_array_of_tables("fruit").unwrap();
//! assert_eq!(fruit.len(), 2);
//! assert_eq!(fruit[0].get_str("physical.color").unwrap(), "red");
//! ```
//!
//! # Not Supported
//!
//! Inline tables, quoted or dotted keys, nested arrays, mixed-kind arrays,
//! local dates and times, integers in other bases, and `_` digit separators.
