//! Cursor primitives.
//!
//! Every function here takes the unread remainder of the input and returns the
//! number of bytes to advance past what it recognised. None of them keep state.
//! Input is already validated UTF-8, so scanning goes char by char and every
//! returned offset lands on a char boundary.

/// Line terminators: LF, CR and form feed.
#[inline]
pub fn is_line_end(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{000C}')
}

/// Space or tab.
#[inline]
pub fn is_blank(ch: char) -> bool {
    ch == ' ' || ch == '\t'
}

/// Offset of the first char for which `pred` holds, or `input.len()`.
pub fn scan_until(input: &str, pred: impl Fn(char) -> bool) -> usize {
    input
        .char_indices()
        .find(|&(_, ch)| pred(ch))
        .map_or(input.len(), |(i, _)| i)
}

/// Like [`scan_until`], but also consumes the matching char.
pub fn scan_until_inclusive(input: &str, pred: impl Fn(char) -> bool) -> usize {
    input
        .char_indices()
        .find(|&(_, ch)| pred(ch))
        .map_or(input.len(), |(i, ch)| i + ch.len_utf8())
}

/// Offset of the first char for which `pred` does not hold, or `input.len()`.
pub fn scan_while(input: &str, pred: impl Fn(char) -> bool) -> usize {
    scan_until(input, |ch| !pred(ch))
}

/// Width of the line terminator at the start of `input`; `\r\n` counts as one.
pub fn line_end_width(input: &str) -> Option<usize> {
    if input.starts_with("\r\n") {
        return Some(2);
    }
    match input.chars().next() {
        Some(ch) if is_line_end(ch) => Some(ch.len_utf8()),
        _ => None,
    }
}

/// Skips a `#` comment up to, but not including, its line terminator.
pub fn skip_comment(input: &str) -> usize {
    scan_until(input, is_line_end)
}

/// Skips any mixture of whitespace, line terminators and comments.
pub fn skip_insignificant(input: &str) -> usize {
    let mut i = 0;
    while let Some(ch) = input[i..].chars().next() {
        if ch == '#' {
            i += skip_comment(&input[i..]);
        } else if ch.is_whitespace() {
            i += ch.len_utf8();
        } else {
            break;
        }
    }
    i
}

/// Skips blanks and an optional comment after a value or header, then the line
/// terminator.
///
/// Returns `None` if anything else is left on the line. Stops at the end of the
/// input when the last line has no terminator.
pub fn skip_trailing(input: &str) -> Option<usize> {
    let mut i = scan_while(input, is_blank);
    if input[i..].starts_with('#') {
        i += skip_comment(&input[i..]);
    }
    if i == input.len() {
        return Some(i);
    }
    line_end_width(&input[i..]).map(|width| i + width)
}

/// Skips the blanks, `=` and blanks between a key and its value.
///
/// Returns `None` if the key is not followed by `=`.
pub fn skip_key_separator(input: &str) -> Option<usize> {
    let i = scan_while(input, is_blank);
    let rest = input[i..].strip_prefix('=')?;
    Some(i + 1 + scan_while(rest, is_blank))
}

/// Offset of the first `delimiter` in `input`.
///
/// With `escapes` set, a backslash hides the char after it, so `\"` never closes a
/// basic string.
pub fn find_delimiter(input: &str, delimiter: &str, escapes: bool) -> Option<usize> {
    let mut chars = input.char_indices();
    while let Some((i, ch)) = chars.next() {
        if escapes && ch == '\\' {
            chars.next();
        } else if input[i..].starts_with(delimiter) {
            return Some(i);
        }
    }
    None
}

/// Checks whether a key-value section ends on the current line.
///
/// A section ends at a line holding only whitespace and comments, or at the end
/// of the input. Returns whether it ended and how far to advance: past the empty
/// line when it did, up to the first significant char when it did not.
pub fn is_section_end(input: &str) -> (bool, usize) {
    let mut i = 0;
    while let Some(ch) = input[i..].chars().next() {
        if let Some(width) = line_end_width(&input[i..]) {
            return (true, i + width);
        }
        match ch {
            '#' => i += skip_comment(&input[i..]),
            ch if ch.is_whitespace() => i += ch.len_utf8(),
            _ => return (false, i),
        }
    }
    (true, i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_insignificant() {
        assert_eq!(skip_insignificant("  a"), 2);

        let input = "  #comment\n\t\t  a";
        assert_eq!(skip_insignificant(input), input.len() - 1);

        assert_eq!(skip_insignificant("# only a comment"), 16);
        assert_eq!(skip_insignificant(""), 0);
        assert_eq!(skip_insignificant("\u{3000}x"), 3);
    }

    #[test]
    fn test_skip_trailing() {
        assert_eq!(skip_trailing("\n\t\t"), Some(1));
        assert_eq!(skip_trailing(" #c\n\t\t  a"), Some(4));
        assert_eq!(skip_trailing("   "), Some(3));
        assert_eq!(skip_trailing("\r\nnext"), Some(2));
        assert_eq!(skip_trailing(" junk\n"), None);
    }

    #[test]
    fn test_scan_until() {
        let hash = |ch: char| ch == '#';
        assert_eq!(scan_until_inclusive("abc#di", hash), 4);
        assert_eq!(scan_until("abc#di", hash), 3);
        assert_eq!(scan_until("abcdi", hash), 5);
        assert_eq!(scan_until_inclusive("abcdi", hash), 5);
        // multi-byte chars are never split
        assert_eq!(scan_until("héllo#", hash), 6);
    }

    #[test]
    fn test_scan_while() {
        assert_eq!(scan_while("aac#di", |ch| ch == 'a'), 2);
        assert_eq!(scan_while("aaa", |ch| ch == 'a'), 3);
        assert_eq!(scan_while("bcd", |ch| ch == 'a'), 0);
    }

    #[test]
    fn test_skip_comment() {
        let input = "#this is a comment";
        assert_eq!(skip_comment(input), input.len());
        assert_eq!(skip_comment("#c\nx"), 2);
    }

    #[test]
    fn test_skip_key_separator() {
        assert_eq!(skip_key_separator(" = 1"), Some(3));
        assert_eq!(skip_key_separator("=1"), Some(1));
        assert_eq!(skip_key_separator("\t=\t\"a\""), Some(3));
        assert_eq!(skip_key_separator(" 1"), None);
        assert_eq!(skip_key_separator(""), None);
    }

    #[test]
    fn test_is_section_end() {
        assert_eq!(is_section_end("\n\t\t"), (true, 1));

        let input = " #comments here\n";
        assert_eq!(is_section_end(input), (true, input.len()));

        assert_eq!(is_section_end("  abc"), (false, 2));
        assert_eq!(is_section_end("   "), (true, 3));
        assert_eq!(is_section_end("\r\nx"), (true, 2));
        assert_eq!(is_section_end("\u{3000}\u{00A0}\nx"), (true, 6));
        assert_eq!(is_section_end("\u{3000}"), (true, 3));
        assert_eq!(is_section_end("\u{000B}x"), (false, 1));
    }

    #[test]
    fn test_find_delimiter() {
        assert_eq!(find_delimiter(r#"ab\"c"d"#, "\"", true), Some(5));
        assert_eq!(find_delimiter(r#"ab\"c"d"#, "\"", false), Some(3));
        assert_eq!(find_delimiter("a \"hi\" b\"\"\"", "\"\"\"", true), Some(8));
        assert_eq!(find_delimiter("none", "'", false), None);
    }

    #[test]
    fn test_line_end_width() {
        assert_eq!(line_end_width("\r\n"), Some(2));
        assert_eq!(line_end_width("\rx"), Some(1));
        assert_eq!(line_end_width("\u{000C}"), Some(1));
        assert_eq!(line_end_width("x\n"), None);
        assert_eq!(line_end_width(""), None);
    }
}
