//! Scalar values of a KDL document.
//!
//! This module provides the leaf types of the document tree:
//!
//! - [`Identifier`]: a node name or property key, bare or string
//! - [`KdlString`]: quoted, raw and multiline strings, kept as written
//! - [`Number`]: decimal, hex, octal and binary literals with their source text
//! - [`Keyword`]: `#true`, `#false`, `#null`, `#inf`, `#-inf`, `#nan`
//! - [`Value`]: an optionally type-annotated identifier, number or keyword
//!
//! Strings and numbers keep enough of their source form (fragments, escapes,
//! `#` counts, digit separators) to be written back without loss.
//!
//! ## Examples
//!
//! ```rust
//! use kdl_parse::{parse, ValueKind};
//!
//! let doc = parse("node 0x1_F \"a\\tb\" #null\n").unwrap();
//! let args: Vec<_> = doc.nodes()[0].arguments().collect();
//!
//! assert_eq!(args[0].as_number().and_then(|n| n.as_i64()), Some(31));
//! assert_eq!(args[1].as_str().as_deref(), Some("a\tb"));
//! assert!(matches!(args[2].kind(), ValueKind::Keyword(_)));
//! ```

use crate::annotation::TypeAnnotation;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// A backslash escape inside a quoted or multiline string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Escape {
    Backslash,
    Slash,
    Backspace,
    FormFeed,
    Newline,
    CarriageReturn,
    Tab,
    Quote,
    /// `\u{...}`: the hex digits as written and the code point they denote
    Unicode { digits: String, ch: char },
}

impl Escape {
    /// Maps the letter following a backslash to its escape.
    #[must_use]
    pub fn from_letter(c: char) -> Option<Self> {
        Some(match c {
            '\\' => Escape::Backslash,
            '/' => Escape::Slash,
            'b' => Escape::Backspace,
            'f' => Escape::FormFeed,
            'n' => Escape::Newline,
            'r' => Escape::CarriageReturn,
            't' => Escape::Tab,
            '"' => Escape::Quote,
            _ => return None,
        })
    }

    /// The character this escape stands for.
    #[must_use]
    pub fn resolve(&self) -> char {
        match self {
            Escape::Backslash => '\\',
            Escape::Slash => '/',
            Escape::Backspace => '\u{0008}',
            Escape::FormFeed => '\u{000C}',
            Escape::Newline => '\n',
            Escape::CarriageReturn => '\r',
            Escape::Tab => '\t',
            Escape::Quote => '"',
            Escape::Unicode { ch, .. } => *ch,
        }
    }
}

impl fmt::Display for Escape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Escape::Backslash => f.write_str("\\\\"),
            Escape::Slash => f.write_str("\\/"),
            Escape::Backspace => f.write_str("\\b"),
            Escape::FormFeed => f.write_str("\\f"),
            Escape::Newline => f.write_str("\\n"),
            Escape::CarriageReturn => f.write_str("\\r"),
            Escape::Tab => f.write_str("\\t"),
            Escape::Quote => f.write_str("\\\""),
            Escape::Unicode { digits, .. } => write!(f, "\\u{{{}}}", digits),
        }
    }
}

/// One piece of string content: a maximal run of literal text, or an escape.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StringPart {
    Fragment(String),
    Escape(Escape),
}

/// A string literal in one of its three written forms.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KdlString {
    /// `"..."`
    Quoted { parts: Vec<StringPart> },
    /// `#"..."#`, `##"""..."""##`; `text` is everything between the quotes
    Raw {
        hashes: usize,
        multiline: bool,
        text: String,
    },
    /// `"""..."""`; the newline right after the opening quotes is not part of
    /// `parts`
    Multiline {
        opening_newline: bool,
        parts: Vec<StringPart>,
    },
}

impl KdlString {
    /// Creates a quoted string from plain text, escaping what needs it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kdl_parse::KdlString;
    ///
    /// let s = KdlString::quoted("say \"hi\"");
    /// assert_eq!(s.value(), "say \"hi\"");
    /// assert_eq!(s.to_string(), r#""say \"hi\"""#);
    /// ```
    #[must_use]
    pub fn quoted(text: &str) -> Self {
        let mut parts = Vec::new();
        let mut fragment = String::new();
        for ch in text.chars() {
            let escape = match ch {
                '"' => Some(Escape::Quote),
                '\\' => Some(Escape::Backslash),
                '\n' => Some(Escape::Newline),
                '\r' => Some(Escape::CarriageReturn),
                '\t' => Some(Escape::Tab),
                '\u{0008}' => Some(Escape::Backspace),
                '\u{000C}' => Some(Escape::FormFeed),
                c if crate::chars::is_newline(c) => Some(Escape::Unicode {
                    digits: format!("{:X}", c as u32),
                    ch: c,
                }),
                _ => None,
            };
            match escape {
                Some(escape) => {
                    if !fragment.is_empty() {
                        parts.push(StringPart::Fragment(std::mem::take(&mut fragment)));
                    }
                    parts.push(StringPart::Escape(escape));
                }
                None => fragment.push(ch),
            }
        }
        if !fragment.is_empty() {
            parts.push(StringPart::Fragment(fragment));
        }
        KdlString::Quoted { parts }
    }

    /// Returns `true` for raw strings, whose escapes are not processed.
    #[inline]
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        matches!(self, KdlString::Raw { .. })
    }

    /// Returns `true` for multiline strings, raw or not.
    #[inline]
    #[must_use]
    pub const fn is_multiline(&self) -> bool {
        matches!(
            self,
            KdlString::Multiline { .. } | KdlString::Raw { multiline: true, .. }
        )
    }

    /// The string contents with escapes resolved.
    ///
    /// Multiline strings are returned as written; see [`KdlString::dedented`]
    /// for the indentation-stripping form.
    #[must_use]
    pub fn value(&self) -> String {
        match self {
            KdlString::Quoted { parts } | KdlString::Multiline { parts, .. } => resolve(parts),
            KdlString::Raw { text, .. } => text.clone(),
        }
    }

    /// Applies multiline normalization: the last line, which must be
    /// whitespace only, gives an indent prefix that is removed from every
    /// other line; whitespace-only lines become empty and the final line
    /// break is dropped.
    ///
    /// Returns `None` when a line does not start with the indent prefix or
    /// the last line is not whitespace. Single-line strings are returned as
    /// their [`value`](KdlString::value).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kdl_parse::parse;
    ///
    /// let doc = parse("text \"\"\"\n    hello\n      world\n    \"\"\"\n").unwrap();
    /// let arg = doc.nodes()[0].arguments().next().unwrap();
    /// let s = arg.as_kdl_string().unwrap();
    /// assert_eq!(s.dedented().as_deref(), Some("hello\n  world"));
    /// ```
    #[must_use]
    pub fn dedented(&self) -> Option<String> {
        match self {
            KdlString::Multiline { parts, .. } => dedent(split_lines(parts)),
            KdlString::Raw {
                multiline: true,
                text,
                ..
            } => {
                let text = strip_leading_newline(text);
                dedent(split_lines(&[StringPart::Fragment(text.to_string())]))
            }
            _ => Some(self.value()),
        }
    }
}

fn resolve(parts: &[StringPart]) -> String {
    let mut out = String::new();
    for part in parts {
        match part {
            StringPart::Fragment(text) => out.push_str(text),
            StringPart::Escape(escape) => out.push(escape.resolve()),
        }
    }
    out
}

fn strip_leading_newline(text: &str) -> &str {
    if let Some(rest) = text.strip_prefix("\r\n") {
        return rest;
    }
    match text.chars().next() {
        Some(c) if crate::chars::is_newline(c) => &text[c.len_utf8()..],
        _ => text,
    }
}

/// A line of multiline content: literal text interleaved with resolved escapes.
#[derive(Default)]
struct Line {
    pieces: Vec<(bool, String)>,
}

impl Line {
    fn push(&mut self, literal: bool, text: &str) {
        match self.pieces.last_mut() {
            Some((was_literal, last)) if *was_literal == literal => last.push_str(text),
            _ => self.pieces.push((literal, text.to_string())),
        }
    }

    fn is_blank(&self) -> bool {
        self.pieces
            .iter()
            .all(|(literal, text)| *literal && text.chars().all(crate::chars::is_unicode_space))
    }
}

fn split_lines(parts: &[StringPart]) -> Vec<Line> {
    let mut lines = vec![Line::default()];
    for part in parts {
        match part {
            StringPart::Escape(escape) => {
                let mut buf = [0u8; 4];
                if let Some(line) = lines.last_mut() {
                    line.push(false, escape.resolve().encode_utf8(&mut buf));
                }
            }
            StringPart::Fragment(text) => {
                let mut chars = text.char_indices().peekable();
                let mut start = 0;
                while let Some((idx, ch)) = chars.next() {
                    if !crate::chars::is_newline(ch) {
                        continue;
                    }
                    if let Some(line) = lines.last_mut() {
                        line.push(true, &text[start..idx]);
                    }
                    start = idx + ch.len_utf8();
                    if ch == '\r' {
                        if let Some(&(next, '\n')) = chars.peek() {
                            chars.next();
                            start = next + 1;
                        }
                    }
                    lines.push(Line::default());
                }
                if let Some(line) = lines.last_mut() {
                    line.push(true, &text[start..]);
                }
            }
        }
    }
    lines
}

fn dedent(mut lines: Vec<Line>) -> Option<String> {
    let last = lines.pop()?;
    if !last.is_blank() {
        return None;
    }
    let prefix: String = last.pieces.into_iter().map(|(_, text)| text).collect();
    let mut out = Vec::with_capacity(lines.len());
    for line in lines {
        if line.is_blank() {
            out.push(String::new());
            continue;
        }
        let mut text = String::new();
        let mut pieces = line.pieces.into_iter();
        match pieces.next() {
            Some((true, first)) => text.push_str(first.strip_prefix(prefix.as_str())?),
            Some((false, first)) if prefix.is_empty() => text.push_str(&first),
            _ => return None,
        }
        for (_, piece) in pieces {
            text.push_str(&piece);
        }
        out.push(text);
    }
    Some(out.join("\n"))
}

/// A node name, property key, or identifier-valued argument.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Identifier {
    Bare(String),
    String(KdlString),
}

impl Identifier {
    /// The identifier's text: the bare name, or the string's resolved value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kdl_parse::{Identifier, KdlString};
    ///
    /// assert_eq!(Identifier::Bare("node".into()).value(), "node");
    /// assert_eq!(Identifier::String(KdlString::quoted("a b")).value(), "a b");
    /// ```
    #[must_use]
    pub fn value(&self) -> Cow<'_, str> {
        match self {
            Identifier::Bare(name) => Cow::Borrowed(name),
            Identifier::String(KdlString::Raw { text, .. }) => Cow::Borrowed(text),
            Identifier::String(s) => Cow::Owned(s.value()),
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_bare(&self) -> bool {
        matches!(self, Identifier::Bare(_))
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        if crate::chars::is_bare_identifier(name) {
            Identifier::Bare(name.to_string())
        } else {
            Identifier::String(KdlString::quoted(name))
        }
    }
}

/// The base of a number literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Radix {
    Binary,
    Octal,
    Decimal,
    Hexadecimal,
}

impl Radix {
    #[must_use]
    pub const fn base(self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Octal => 8,
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
        }
    }

    fn accepts(self, c: char) -> bool {
        c.is_digit(self.base())
    }
}

/// The numeric value denoted by a number literal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum NumberValue {
    /// Any integer literal, of any magnitude
    Integer(BigInt),
    /// A decimal literal with a fraction or an exponent
    Float(f64),
}

/// A number literal: its source text, its radix and its value.
///
/// Digit-group underscores are kept in the source text but never change the
/// value.
///
/// # Examples
///
/// ```rust
/// use kdl_parse::Number;
///
/// let a = Number::parse("0x1_F").unwrap();
/// let b = Number::parse("0x1F").unwrap();
/// assert_eq!(a.value(), b.value());
/// assert_eq!(a.raw(), "0x1_F");
///
/// assert!(Number::parse("0x").is_none());
/// assert_eq!(Number::parse("-1.5e3").unwrap().as_f64(), -1500.0);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Number {
    raw: String,
    radix: Radix,
    value: NumberValue,
}

impl Number {
    /// Parses a complete number literal, returning `None` when `text` is not
    /// exactly one decimal, hex, octal or binary number.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let (negative, body) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        let (radix, digits) = if let Some(rest) = body.strip_prefix("0x") {
            (Radix::Hexadecimal, rest)
        } else if let Some(rest) = body.strip_prefix("0o") {
            (Radix::Octal, rest)
        } else if let Some(rest) = body.strip_prefix("0b") {
            (Radix::Binary, rest)
        } else {
            (Radix::Decimal, body)
        };

        let value = if radix == Radix::Decimal {
            parse_decimal(digits, negative)?
        } else {
            let cleaned = digit_run(digits, radix)?;
            if cleaned.1 != digits.len() {
                return None;
            }
            let magnitude = BigInt::parse_bytes(cleaned.0.as_bytes(), radix.base())?;
            NumberValue::Integer(if negative { -magnitude } else { magnitude })
        };

        Some(Number {
            raw: text.to_string(),
            radix,
            value,
        })
    }

    /// The literal exactly as written.
    #[must_use]
    pub fn raw(&self) -> &str {
        &self.raw
    }

    #[must_use]
    pub const fn radix(&self) -> Radix {
        self.radix
    }

    #[must_use]
    pub const fn value(&self) -> &NumberValue {
        &self.value
    }

    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self.value, NumberValue::Integer(_))
    }

    /// Converts to `i64` when the literal is an integer that fits.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match &self.value {
            NumberValue::Integer(i) => i64::try_from(i).ok(),
            NumberValue::Float(_) => None,
        }
    }

    /// Converts to `f64`, rounding integers too large to be exact.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match &self.value {
            NumberValue::Integer(i) => match i64::try_from(i) {
                Ok(small) => small as f64,
                Err(_) => i.to_string().parse().unwrap_or(f64::NAN),
            },
            NumberValue::Float(f) => *f,
        }
    }
}

/// Consumes `[digit][digit_]*` from the start of `text`, returning the digits
/// without separators and the number of bytes consumed.
fn digit_run(text: &str, radix: Radix) -> Option<(String, usize)> {
    let mut chars = text.char_indices();
    match chars.next() {
        Some((_, c)) if radix.accepts(c) => {}
        _ => return None,
    }
    let mut end = text.len();
    for (idx, c) in chars {
        if !(radix.accepts(c) || c == '_') {
            end = idx;
            break;
        }
    }
    let cleaned = text[..end].chars().filter(|&c| c != '_').collect();
    Some((cleaned, end))
}

fn parse_decimal(text: &str, negative: bool) -> Option<NumberValue> {
    let (integer, mut at) = digit_run(text, Radix::Decimal)?;
    let mut float = false;
    let mut cleaned = String::with_capacity(text.len() + 1);
    if negative {
        cleaned.push('-');
    }
    cleaned.push_str(&integer);

    if let Some(rest) = text[at..].strip_prefix('.') {
        let (fraction, len) = digit_run(rest, Radix::Decimal)?;
        cleaned.push('.');
        cleaned.push_str(&fraction);
        at += 1 + len;
        float = true;
    }
    if let Some(rest) = text[at..].strip_prefix(['e', 'E']) {
        cleaned.push('e');
        at += 1;
        let rest = match rest.as_bytes().first() {
            Some(&sign @ (b'+' | b'-')) => {
                cleaned.push(sign as char);
                at += 1;
                &rest[1..]
            }
            _ => rest,
        };
        let (exponent, len) = digit_run(rest, Radix::Decimal)?;
        cleaned.push_str(&exponent);
        at += len;
        float = true;
    }
    if at != text.len() {
        return None;
    }

    if float {
        cleaned.parse().ok().map(NumberValue::Float)
    } else {
        BigInt::parse_bytes(cleaned.as_bytes(), 10).map(NumberValue::Integer)
    }
}

/// A `#`-introduced keyword literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    True,
    False,
    Null,
    Inf,
    NegInf,
    Nan,
}

impl Keyword {
    /// Looks up a keyword by the text after its `#`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "true" => Keyword::True,
            "false" => Keyword::False,
            "null" => Keyword::Null,
            "inf" => Keyword::Inf,
            "-inf" => Keyword::NegInf,
            "nan" => Keyword::Nan,
            _ => return None,
        })
    }

    /// The keyword as written, including the `#`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Keyword::True => "#true",
            Keyword::False => "#false",
            Keyword::Null => "#null",
            Keyword::Inf => "#inf",
            Keyword::NegInf => "#-inf",
            Keyword::Nan => "#nan",
        }
    }

    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Keyword::True => Some(true),
            Keyword::False => Some(false),
            _ => None,
        }
    }

    /// The float for the special numeric keywords.
    #[must_use]
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Keyword::Inf => Some(f64::INFINITY),
            Keyword::NegInf => Some(f64::NEG_INFINITY),
            Keyword::Nan => Some(f64::NAN),
            _ => None,
        }
    }
}

/// The payload of a [`Value`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ValueKind {
    Identifier(Identifier),
    Number(Number),
    Keyword(Keyword),
}

/// An argument or property value: an optional type annotation and exactly
/// one payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Value {
    annotation: Option<TypeAnnotation>,
    kind: ValueKind,
}

impl Value {
    #[must_use]
    pub fn new(annotation: Option<TypeAnnotation>, kind: ValueKind) -> Self {
        Value { annotation, kind }
    }

    #[must_use]
    pub fn annotation(&self) -> Option<&TypeAnnotation> {
        self.annotation.as_ref()
    }

    #[must_use]
    pub fn kind(&self) -> &ValueKind {
        &self.kind
    }

    /// The text of an identifier or string value.
    #[must_use]
    pub fn as_str(&self) -> Option<Cow<'_, str>> {
        match &self.kind {
            ValueKind::Identifier(ident) => Some(ident.value()),
            _ => None,
        }
    }

    /// The underlying string literal, if the value was written as one.
    #[must_use]
    pub fn as_kdl_string(&self) -> Option<&KdlString> {
        match &self.kind {
            ValueKind::Identifier(Identifier::String(s)) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match &self.kind {
            ValueKind::Number(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            ValueKind::Keyword(k) => Some(*k),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        self.as_keyword().and_then(Keyword::as_bool)
    }

    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.as_keyword() == Some(Keyword::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(text: &str) -> BigInt {
        match Number::parse(text).map(|n| n.value) {
            Some(NumberValue::Integer(i)) => i,
            other => panic!("{text} parsed as {:?}", other),
        }
    }

    #[test]
    fn test_number_radixes() {
        assert_eq!(int("0x1F"), BigInt::from(31));
        assert_eq!(int("0o17"), BigInt::from(15));
        assert_eq!(int("0b1010"), BigInt::from(10));
        assert_eq!(int("-0x10"), BigInt::from(-16));
        assert_eq!(int("+42"), BigInt::from(42));
    }

    #[test]
    fn test_number_underscores() {
        assert_eq!(int("1_000_000"), BigInt::from(1_000_000));
        assert_eq!(int("0x1_F"), int("0x1F"));
        assert_eq!(int("0b1__0"), BigInt::from(2));
        assert_eq!(Number::parse("1_0.0_1").unwrap().as_f64(), 10.01);
    }

    #[test]
    fn test_number_floats() {
        assert_eq!(Number::parse("1.5").unwrap().as_f64(), 1.5);
        assert_eq!(Number::parse("1e3").unwrap().as_f64(), 1000.0);
        assert_eq!(Number::parse("2.5E-1").unwrap().as_f64(), 0.25);
        assert_eq!(Number::parse("-1.0e+2").unwrap().as_f64(), -100.0);
        assert!(!Number::parse("1e3").unwrap().is_integer());
    }

    #[test]
    fn test_number_rejects_malformed() {
        for bad in [
            "0x", "0x_1", "0b2", "0o8", "1.", ".5", "1.e3", "1e", "1e+", "_1", "1abc", "0x1.5",
            "--1", "1.5.5", "+",
        ] {
            assert!(Number::parse(bad).is_none(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_big_integer_is_kept_exact() {
        let n = Number::parse("123456789012345678901234567890").unwrap();
        assert_eq!(n.as_i64(), None);
        assert_eq!(
            n.value(),
            &NumberValue::Integer("123456789012345678901234567890".parse().unwrap())
        );
    }

    #[test]
    fn test_escape_roundtrips_source_form() {
        let e = Escape::Unicode {
            digits: "1F600".into(),
            ch: '\u{1F600}',
        };
        assert_eq!(e.to_string(), "\\u{1F600}");
        assert_eq!(e.resolve(), '😀');
        assert_eq!(Escape::from_letter('n'), Some(Escape::Newline));
        assert_eq!(Escape::from_letter('s'), None);
    }

    #[test]
    fn test_quoted_constructor_escapes() {
        let s = KdlString::quoted("a\"b\\c\nd");
        assert_eq!(s.value(), "a\"b\\c\nd");
        match s {
            KdlString::Quoted { parts } => assert_eq!(parts.len(), 7),
            _ => panic!("Expected quoted string"),
        }
    }

    #[test]
    fn test_dedent_multiline() {
        let s = KdlString::Multiline {
            opening_newline: true,
            parts: vec![StringPart::Fragment("  a\n\n    b\n  ".into())],
        };
        assert_eq!(s.dedented().as_deref(), Some("a\n\n  b"));
    }

    #[test]
    fn test_dedent_rejects_missing_prefix() {
        let s = KdlString::Multiline {
            opening_newline: true,
            parts: vec![StringPart::Fragment("  a\n b\n  ".into())],
        };
        assert_eq!(s.dedented(), None);
    }

    #[test]
    fn test_dedent_raw_multiline() {
        let s = KdlString::Raw {
            hashes: 1,
            multiline: true,
            text: "\n  x\\n\n  ".into(),
        };
        assert_eq!(s.dedented().as_deref(), Some("x\\n"));
    }

    #[test]
    fn test_identifier_from_str_quotes_when_needed() {
        assert!(Identifier::from("plain").is_bare());
        assert!(!Identifier::from("two words").is_bare());
        assert!(!Identifier::from("10").is_bare());
    }

    #[test]
    fn test_keywords() {
        assert_eq!(Keyword::from_name("-inf"), Some(Keyword::NegInf));
        assert_eq!(Keyword::from_name("True"), None);
        assert_eq!(Keyword::True.as_bool(), Some(true));
        assert!(Keyword::Nan.as_f64().unwrap().is_nan());
        assert_eq!(Keyword::Null.as_str(), "#null");
    }
}
