//! Configuration options for writing documents.
//!
//! Decoding has no knobs; [`WriteOptions`] only shapes the text produced by
//! [`to_string_with_options`](crate::to_string_with_options). Every layout it can
//! produce decodes back to the same document.
//!
//! ## Examples
//!
//! ```rust
//! use fiptoml::{parse_str, to_string_with_options, WriteOptions};
//!
//! let doc = parse_str("b = [1, 2]\na = true\n").unwrap();
//!
//! let options = WriteOptions::new().with_sorted_keys(true);
//! assert_eq!(to_string_with_options(&doc, options), "a = true\nb = [1,2]\n");
//!
//! let options = WriteOptions::pretty();
//! assert_eq!(to_string_with_options(&doc, options), "b = [1, 2]\na = true\n");
//! ```

/// Configuration options for the text serializer.
///
/// # Examples
///
/// ```rust
/// use fiptoml::WriteOptions;
///
/// // Compact defaults
/// let options = WriteOptions::new();
/// assert_eq!(options.indent, 0);
///
/// // Indented table bodies, sorted keys
/// let options = WriteOptions::pretty().with_indent(4).with_sorted_keys(true);
/// assert!(options.pretty);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WriteOptions {
    /// Spaces before each key-value line inside a table body. The top level is
    /// never indented.
    pub indent: usize,
    /// Write keys in lexicographic order instead of insertion order.
    pub sort_keys: bool,
    /// Put a space after each comma in arrays.
    pub pretty: bool,
}

impl WriteOptions {
    /// Creates default options (compact arrays, no indentation, insertion order).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fiptoml::WriteOptions;
    ///
    /// let options = WriteOptions::new();
    /// assert!(!options.pretty);
    /// assert!(!options.sort_keys);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for readable output: spaced arrays and table bodies
    /// indented by 2.
    #[must_use]
    pub fn pretty() -> Self {
        WriteOptions {
            indent: 2,
            pretty: true,
            ..Default::default()
        }
    }

    /// Sets the indentation of table bodies.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fiptoml::WriteOptions;
    ///
    /// let options = WriteOptions::new().with_indent(4);
    /// assert_eq!(options.indent, 4);
    /// ```
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_sorted_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    /// Separator written between array elements.
    #[must_use]
    pub const fn array_separator(&self) -> &'static str {
        if self.pretty {
            ", "
        } else {
            ","
        }
    }
}
