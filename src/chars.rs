//! Character classes of the KDL grammar.
//!
//! All predicates work on a single Unicode scalar value and are backed by
//! fixed tables. The identifier start classes are derived from them:
//!
//! | Class | First character may not be |
//! |-------|----------------------------|
//! | unambiguous | digit, sign, dot, or a non-identifier character |
//! | signed (after `+`/`-`) | digit, dot, or a non-identifier character |
//! | dotted (after `.`, `+.` or `-.`) | digit, or a non-identifier character |
//!
//! These exist so that a bare identifier can never be confused with a number.

/// The byte-order mark, accepted once at the very start of a document.
pub const BOM: char = '\u{FEFF}';

/// Non-newline white space.
const UNICODE_SPACES: [char; 18] = [
    '\u{0009}', '\u{0020}', '\u{00A0}', '\u{1680}', '\u{2000}', '\u{2001}', '\u{2002}', '\u{2003}',
    '\u{2004}', '\u{2005}', '\u{2006}', '\u{2007}', '\u{2008}', '\u{2009}', '\u{200A}', '\u{202F}',
    '\u{205F}', '\u{3000}',
];

/// CR, LF, NEL, FF, LS, PS. CRLF is folded into one newline by the scanner.
const NEWLINES: [char; 6] = ['\r', '\n', '\u{0085}', '\u{000C}', '\u{2028}', '\u{2029}'];

/// Punctuation reserved as structural syntax.
const DISALLOWED: [char; 12] = ['\\', '/', '(', ')', '{', '}', ';', '[', ']', '"', '=', '#'];

/// Returns `true` for non-newline white space.
///
/// # Examples
///
/// ```rust
/// use kdl_parse::chars::is_unicode_space;
///
/// assert!(is_unicode_space(' '));
/// assert!(is_unicode_space('\u{3000}'));
/// assert!(!is_unicode_space('\n'));
/// ```
#[inline]
#[must_use]
pub fn is_unicode_space(c: char) -> bool {
    UNICODE_SPACES.contains(&c)
}

/// Returns `true` for any newline code point.
#[inline]
#[must_use]
pub fn is_newline(c: char) -> bool {
    NEWLINES.contains(&c)
}

/// Returns `true` for characters that can never appear in a bare identifier.
#[inline]
#[must_use]
pub fn is_disallowed(c: char) -> bool {
    DISALLOWED.contains(&c)
}

/// Returns `true` for characters that may continue a bare identifier.
///
/// A BOM is never part of one; past offset 0 it lexes as whitespace.
#[inline]
#[must_use]
pub fn is_identifier_char(c: char) -> bool {
    !(is_unicode_space(c) || is_newline(c) || is_disallowed(c) || c == BOM)
}

#[inline]
#[must_use]
pub fn is_unambiguous_start(c: char) -> bool {
    is_identifier_char(c) && !c.is_ascii_digit() && !matches!(c, '+' | '-' | '.')
}

#[inline]
#[must_use]
pub fn is_signed_start(c: char) -> bool {
    is_identifier_char(c) && !c.is_ascii_digit() && c != '.'
}

#[inline]
#[must_use]
pub fn is_dotted_start(c: char) -> bool {
    is_identifier_char(c) && !c.is_ascii_digit()
}

/// Returns `true` when `text` would lex as a number rather than an
/// identifier: after an optional sign and an optional dot, it starts with a
/// digit.
#[must_use]
pub fn is_number_like(text: &str) -> bool {
    let text = text.strip_prefix(['+', '-']).unwrap_or(text);
    let text = text.strip_prefix('.').unwrap_or(text);
    text.as_bytes().first().is_some_and(u8::is_ascii_digit)
}

/// Returns `true` when `text` is, in its entirety, a bare identifier.
///
/// # Examples
///
/// ```rust
/// use kdl_parse::chars::is_bare_identifier;
///
/// assert!(is_bare_identifier("node"));
/// assert!(is_bare_identifier("-"));
/// assert!(is_bare_identifier("+.foo"));
/// assert!(!is_bare_identifier("1abc"));
/// assert!(!is_bare_identifier("-.5"));
/// assert!(!is_bare_identifier("a=b"));
/// ```
#[must_use]
pub fn is_bare_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let rest_ok = |rest: &str| rest.chars().all(is_identifier_char);
    match first {
        '+' | '-' => match chars.next() {
            None => true,
            Some('.') => match chars.next() {
                None => true,
                Some(c) => is_dotted_start(c) && rest_ok(chars.as_str()),
            },
            Some(c) => is_signed_start(c) && rest_ok(chars.as_str()),
        },
        '.' => match chars.next() {
            None => true,
            Some(c) => is_dotted_start(c) && rest_ok(chars.as_str()),
        },
        c => is_unambiguous_start(c) && rest_ok(chars.as_str()),
    }
}
