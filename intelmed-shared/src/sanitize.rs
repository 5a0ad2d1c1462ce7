//! Form field sanitization.
//!
//! Values reach the database through bound parameters, so SQL quoting is not
//! this module's job. What remains is text PostgreSQL refuses or that corrupts
//! stored records: NUL bytes and the other ASCII control characters.
//! Tab, line feed and carriage return survive because a free-text address may
//! legitimately span lines.
//!
//! Sanitization never validates. Empty strings stay empty and no trimming or
//! case folding happens.

use std::borrow::Cow;

fn is_disallowed(c: char) -> bool {
    c.is_ascii_control() && !matches!(c, '\t' | '\n' | '\r')
}

/// Removes control characters from a submitted field value.
///
/// Borrows when the input is already clean.
#[must_use]
pub fn sanitize_field(input: &str) -> Cow<'_, str> {
    if !input.chars().any(is_disallowed) {
        return Cow::Borrowed(input);
    }

    Cow::Owned(input.chars().filter(|c| !is_disallowed(*c)).collect())
}

/// Sanitizes an owned value in place of the original.
#[must_use]
pub fn sanitize_owned(input: String) -> String {
    match sanitize_field(&input) {
        Cow::Borrowed(_) => input,
        Cow::Owned(cleaned) => cleaned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_input_is_borrowed() {
        let out = sanitize_field("1 Main St");
        assert!(matches!(out, Cow::Borrowed(_)));
        assert_eq!(out, "1 Main St");
    }

    #[test]
    fn test_strips_nul_and_control_characters() {
        assert_eq!(sanitize_field("Ja\0ne"), "Jane");
        assert_eq!(sanitize_field("\u{1b}[31mDoe"), "[31mDoe");
        assert_eq!(sanitize_field("a\u{7f}b\u{8}c"), "abc");
    }

    #[test]
    fn test_keeps_whitespace_and_quotes() {
        let address = "Flat 2\r\n1 O'Brien St\t\"rear\"";
        assert_eq!(sanitize_field(address), address);
    }

    #[test]
    fn test_keeps_sql_metacharacters() {
        let value = "x'; DROP TABLE patient; --";
        assert_eq!(sanitize_field(value), value);
    }

    #[test]
    fn test_does_not_trim_or_validate() {
        assert_eq!(sanitize_field(""), "");
        assert_eq!(sanitize_field("  padded  "), "  padded  ");
        assert_eq!(sanitize_field("not-an-email"), "not-an-email");
    }

    #[test]
    fn test_non_ascii_is_preserved() {
        assert_eq!(sanitize_field("Zoë Ñúñez 李"), "Zoë Ñúñez 李");
    }

    #[test]
    fn test_sanitize_owned() {
        assert_eq!(sanitize_owned("Doe\0".to_string()), "Doe");
        assert_eq!(sanitize_owned("Doe".to_string()), "Doe");
    }
}
