//! Double-quoted string literals in the host template syntax.

use std::fmt::Write;

/// Quote `s` as a template string literal.
///
/// Escapes backslash, double quote and control characters; printable
/// characters, including non-ASCII ones, are copied as-is.
pub fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{07}' => out.push_str("\\a"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\u{0b}' => out.push_str("\\v"),
            c if (c as u32) < 0x20 || c == '\u{7f}' => {
                let _ = write!(out, "\\x{:02x}", c as u32);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_plain() {
        assert_eq!(quote("xyz uvw"), r#""xyz uvw""#);
        assert_eq!(quote(""), r#""""#);
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("a\"b\\c"), r#""a\"b\\c""#);
        assert_eq!(quote("line\nnext\ttab"), r#""line\nnext\ttab""#);
        assert_eq!(quote("\u{1}"), r#""\x01""#);
    }

    #[test]
    fn test_quote_keeps_unicode() {
        assert_eq!(quote("“{{.}}”"), "\"“{{.}}”\"");
    }
}
