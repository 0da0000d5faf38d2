//! Literal extractors.
//!
//! Each extractor takes the input positioned at the first byte of a value and
//! returns the decoded value together with the number of bytes it consumed.
//!
//! Numbers and datetimes share one entry point: the token is isolated first and
//! then classified, trying the datetime shape before the integer and float shapes
//! because a timestamp starts with digits and hyphens.

use crate::cursor::{find_delimiter, is_line_end, scan_until, skip_insignificant};
use crate::{Array, Error, Node, Result};
use chrono::DateTime;

/// Extracts any value, dispatching on its first char.
///
/// Returns `Ok(None)` when the first char does not start a supported value, so the
/// caller can report it against the key being assigned.
pub fn extract_value(input: &str) -> Result<Option<(Node, usize)>> {
    let node = match input.chars().next() {
        Some('"' | '\'') => {
            let (s, len) = extract_string(input)?;
            (Node::String(s), len)
        }
        Some('t' | 'f') => {
            let (b, len) = extract_bool(input)?;
            (Node::Bool(b), len)
        }
        Some('[') => match extract_array(input)? {
            Some((array, len)) => (Node::Array(array), len),
            None => return Ok(None),
        },
        Some('+' | '-' | '0'..='9') => extract_number(input)?,
        _ => return Ok(None),
    };
    Ok(Some(node))
}

/// Extracts a basic (`"`), multi-line basic (`"""`), literal (`'`) or multi-line
/// literal (`'''`) string.
///
/// # Examples
///
/// ```rust
/// use fiptoml::literal::extract_string;
///
/// assert_eq!(extract_string(r#""a\tb" # tail"#).unwrap(), ("a\tb".to_string(), 6));
/// assert_eq!(extract_string(r"'C:\dir'").unwrap(), (r"C:\dir".to_string(), 8));
/// ```
pub fn extract_string(input: &str) -> Result<(String, usize)> {
    let (quote, basic) = match input.chars().next() {
        Some('"') => ("\"", true),
        Some('\'') => ("'", false),
        _ => return Err(Error::StringSyntaxError),
    };

    let triple = quote.repeat(3);
    if let Some(rest) = input.strip_prefix(triple.as_str()) {
        let lead = if rest.starts_with("\r\n") {
            2
        } else if rest.starts_with('\n') {
            1
        } else {
            0
        };
        let body = &rest[lead..];
        let end = find_delimiter(body, &triple, basic).ok_or(Error::StringSyntaxError)?;
        let raw = &body[..end];
        let value = if basic {
            unescape(raw, true)?
        } else {
            raw.to_string()
        };
        return Ok((value, 3 + lead + end + 3));
    }

    let body = &input[1..];
    let end = find_delimiter(body, quote, basic).ok_or(Error::StringSyntaxError)?;
    let raw = &body[..end];
    if raw.contains(is_line_end) {
        return Err(Error::StringSyntaxError);
    }
    let value = if basic {
        unescape(raw, false)?
    } else {
        raw.to_string()
    };
    Ok((value, 1 + end + 1))
}

/// Interprets backslash escapes. In multi-line strings a backslash followed by
/// whitespace removes all whitespace and line breaks up to the next content.
fn unescape(raw: &str, multiline: bool) -> Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('b') => out.push('\u{0008}'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('f') => out.push('\u{000C}'),
            Some('r') => out.push('\r'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('/') => out.push('/'),
            Some('u') => out.push(unicode_escape(&mut chars, 4)?),
            Some('U') => out.push(unicode_escape(&mut chars, 8)?),
            Some(c) if multiline && c.is_whitespace() => {
                let mut line_end = is_line_end(c);
                while let Some(c) = chars.next_if(|c| c.is_whitespace()) {
                    line_end |= is_line_end(c);
                }
                if !line_end {
                    return Err(Error::StringSyntaxError);
                }
            }
            _ => return Err(Error::StringSyntaxError),
        }
    }
    Ok(out)
}

fn unicode_escape(chars: &mut impl Iterator<Item = char>, digits: usize) -> Result<char> {
    let hex: String = chars.take(digits).collect();
    if hex.len() != digits || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::StringSyntaxError);
    }
    u32::from_str_radix(&hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or(Error::StringSyntaxError)
}

/// Extracts `true` or `false`.
pub fn extract_bool(input: &str) -> Result<(bool, usize)> {
    let (value, len) = if input.starts_with("true") {
        (true, 4)
    } else if input.starts_with("false") {
        (false, 5)
    } else {
        return Err(Error::InvalidBool);
    };
    match input[len..].chars().next() {
        None => Ok((value, len)),
        Some(ch) if ch.is_whitespace() || matches!(ch, '#' | ',' | ']') => Ok((value, len)),
        Some(_) => Err(Error::InvalidBool),
    }
}

/// Extracts an integer, float or datetime from the token at the start of `input`.
///
/// The token runs up to whitespace, a comment, or an array `,`/`]`.
///
/// # Examples
///
/// ```rust
/// use fiptoml::literal::extract_number;
/// use fiptoml::Node;
///
/// assert_eq!(extract_number("-123 # x").unwrap(), (Node::Integer(-123), 4));
/// assert_eq!(extract_number("1.23").unwrap(), (Node::Float(1.23), 4));
/// assert!(extract_number("0123").is_err());
/// ```
pub fn extract_number(input: &str) -> Result<(Node, usize)> {
    let len = scan_until(input, |ch| ch.is_whitespace() || matches!(ch, '#' | ',' | ']'));
    let token = &input[..len];
    let invalid = || Error::InvalidNumber(token.to_string());

    let node = if is_datetime(token) {
        DateTime::parse_from_rfc3339(token)
            .map(Node::Datetime)
            .map_err(|_| invalid())?
    } else if is_integer(token) {
        token.parse::<i64>().map(Node::Integer).map_err(|_| invalid())?
    } else if is_float(token) {
        token
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Node::Float)
            .ok_or_else(invalid)?
    } else {
        return Err(invalid());
    };
    Ok((node, len))
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn strip_sign(token: &str) -> &str {
    token.strip_prefix(&['+', '-'][..]).unwrap_or(token)
}

/// `[+-]?(0|[1-9][0-9]*)`
pub fn is_integer(token: &str) -> bool {
    match strip_sign(token).as_bytes() {
        [b'0'] => true,
        [b'1'..=b'9', rest @ ..] => rest.iter().all(u8::is_ascii_digit),
        _ => false,
    }
}

/// `[+-]?[0-9]+\.[0-9]+([eE][+-]?[0-9]+)?`
pub fn is_float(token: &str) -> bool {
    let Some((int, rest)) = strip_sign(token).split_once('.') else {
        return false;
    };
    let (frac, exp) = match rest.split_once(&['e', 'E'][..]) {
        Some((frac, exp)) => (frac, Some(exp)),
        None => (rest, None),
    };
    all_digits(int) && all_digits(frac) && exp.map_or(true, |e| all_digits(strip_sign(e)))
}

/// `YYYY-MM-DDThh:mm:ss[.fraction](Z|+hh:mm|-hh:mm)`
pub fn is_datetime(token: &str) -> bool {
    let b = token.as_bytes();
    if b.len() < 20 {
        return false;
    }
    let digits = |range: std::ops::Range<usize>| b[range].iter().all(u8::is_ascii_digit);
    let shape = digits(0..4)
        && b[4] == b'-'
        && digits(5..7)
        && b[7] == b'-'
        && digits(8..10)
        && b[10] == b'T'
        && digits(11..13)
        && b[13] == b':'
        && digits(14..16)
        && b[16] == b':'
        && digits(17..19);
    if !shape {
        return false;
    }

    let mut rest = &b[19..];
    if let Some(fraction) = rest.strip_prefix(b".") {
        let n = fraction.iter().take_while(|c| c.is_ascii_digit()).count();
        if n == 0 {
            return false;
        }
        rest = &fraction[n..];
    }
    match rest {
        [b'Z'] => true,
        [b'+' | b'-', h1, h2, b':', m1, m2] => [h1, h2, m1, m2].iter().all(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// Extracts a bracketed array whose elements all share the first element's kind.
///
/// Elements are separated by commas outside string literals; comments and line
/// breaks may appear between elements and a trailing comma is allowed. Returns
/// `Ok(None)` when the array is malformed (unterminated, missing comma or element)
/// or its first element is not a scalar. Later elements of another kind fail with
/// [`Error::MixedArrayTypes`].
pub fn extract_array(input: &str) -> Result<Option<(Array, usize)>> {
    if !input.starts_with('[') {
        return Ok(None);
    }
    let mut i = 1;
    i += skip_insignificant(&input[i..]);
    if input[i..].starts_with(']') {
        return Ok(Some((Array::Empty, i + 1)));
    }

    // arrays do not nest
    if input[i..].starts_with('[') {
        return Ok(None);
    }
    let Some((first, len)) = extract_value(&input[i..])? else {
        return Ok(None);
    };
    let Some(mut array) = Array::from_first(first) else {
        return Ok(None);
    };
    i += len;

    loop {
        i += skip_insignificant(&input[i..]);
        let rest = &input[i..];
        if rest.starts_with(']') {
            return Ok(Some((array, i + 1)));
        }
        if !rest.starts_with(',') {
            return Ok(None);
        }
        i += 1;
        i += skip_insignificant(&input[i..]);
        if input[i..].starts_with(']') {
            return Ok(Some((array, i + 1)));
        }

        if input[i..].starts_with('[') {
            return Err(Error::MixedArrayTypes);
        }
        let (node, len) = match extract_value(&input[i..]) {
            Ok(Some(element)) => element,
            Ok(None) => return Ok(None),
            Err(_) => return Err(Error::MixedArrayTypes),
        };
        array.push(node)?;
        i += len;
    }
}
