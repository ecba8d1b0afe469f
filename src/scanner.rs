//! Position tracking and the spans that simple lookahead cannot delimit.
//!
//! [`Cursor`] walks the input one Unicode scalar at a time while keeping the
//! byte offset, line and column current. The scanner functions recognize the
//! three spans whose length is unbounded and context-sensitive:
//!
//! - the end-of-input sentinel ([`at_end`])
//! - nested block comments ([`scan_multi_line_comment`]), tracked with a depth
//!   counter
//! - raw strings ([`scan_raw_string`]), tracked with a `#` delimiter count
//!
//! Failures here are fatal and reported before the grammar sees any token.

use crate::chars::is_newline;
use crate::error::{Error, Position, Result};

/// A read position inside the input buffer.
#[derive(Clone, Debug)]
pub struct Cursor<'a> {
    input: &'a str,
    offset: usize,
    line: usize,
    column: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Cursor {
            input,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    #[inline]
    pub fn position(&self) -> Position {
        Position {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    /// The unread remainder of the input.
    #[inline]
    pub fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// The character `n` scalars ahead of the cursor (`peek_nth(0) == peek()`).
    #[inline]
    pub fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    #[inline]
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.rest().starts_with(prefix)
    }

    /// Text between a byte offset previously taken from this cursor and the
    /// current position.
    #[inline]
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.input[start..self.offset]
    }

    /// Consumes one character. A CR directly followed by LF does not end the
    /// line on its own; the LF does.
    pub fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.offset += ch.len_utf8();
        if is_newline(ch) && !(ch == '\r' && self.peek() == Some('\n')) {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    /// Consumes a newline if one is next, folding CRLF into one.
    pub fn eat_newline(&mut self) -> bool {
        match self.peek() {
            Some('\r') => {
                self.bump();
                if self.peek() == Some('\n') {
                    self.bump();
                }
                true
            }
            Some(ch) if is_newline(ch) => {
                self.bump();
                true
            }
            _ => false,
        }
    }

    /// Consumes characters while `pred` holds.
    pub fn bump_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.bump();
        }
    }

    /// Consumes `text`, which must be next in the input.
    pub fn bump_str(&mut self, text: &str) {
        debug_assert!(self.starts_with(text));
        for _ in text.chars() {
            self.bump();
        }
    }
}

/// The end-of-input sentinel: true exactly when nothing is left to read.
#[inline]
pub fn at_end(cursor: &Cursor<'_>) -> bool {
    cursor.rest().is_empty()
}

/// Scans a block comment starting at `/*`, honoring nesting.
///
/// Returns the full comment text, delimiters included.
pub fn scan_multi_line_comment<'a>(cursor: &mut Cursor<'a>) -> Result<&'a str> {
    let start = cursor.position();
    cursor.bump_str("/*");
    let mut depth = 1_usize;
    while depth > 0 {
        if cursor.starts_with("*/") {
            cursor.bump_str("*/");
            depth -= 1;
        } else if cursor.starts_with("/*") {
            cursor.bump_str("/*");
            depth += 1;
        } else if cursor.bump().is_none() {
            return Err(Error::UnterminatedComment {
                position: start,
                depth,
            });
        }
    }
    Ok(cursor.slice_from(start.offset))
}

/// A raw string as found by [`scan_raw_string`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawString<'a> {
    pub hashes: usize,
    pub multiline: bool,
    pub text: &'a str,
}

/// Scans a raw string starting at its first `#`.
///
/// The opening `#` run is counted; the string closes at a quote (or `"""`
/// for the multiline form) followed by exactly that many `#`. Quote and `#`
/// runs of any other length are content.
///
/// Three quotes after the `#` run always open the multiline form, so
/// `#"""#` is an unterminated multiline string, not a one-line string
/// holding a single `"`.
pub fn scan_raw_string<'a>(cursor: &mut Cursor<'a>) -> Result<RawString<'a>> {
    let start = cursor.position();
    let mut hashes = 0;
    while cursor.peek() == Some('#') {
        cursor.bump();
        hashes += 1;
    }
    if cursor.peek() != Some('"') {
        let found = cursor.peek().map_or_else(|| "end of input".to_string(), |c| format!("'{}'", c));
        return Err(Error::unexpected(cursor.position(), "'\"' after '#'", &found));
    }

    let multiline = cursor.starts_with("\"\"\"");
    let quote = if multiline { "\"\"\"" } else { "\"" };
    cursor.bump_str(quote);

    let content_start = cursor.position().offset;
    loop {
        if cursor.starts_with(quote) {
            let content_end = cursor.position().offset;
            let closing = closing_hashes(&cursor.rest()[quote.len()..]);
            if closing == hashes {
                cursor.bump_str(quote);
                for _ in 0..hashes {
                    cursor.bump();
                }
                return Ok(RawString {
                    hashes,
                    multiline,
                    text: &cursor.input[content_start..content_end],
                });
            }
        }
        if cursor.bump().is_none() {
            return Err(Error::UnterminatedRawString {
                position: start,
                hashes,
            });
        }
    }
}

fn closing_hashes(text: &str) -> usize {
    text.bytes().take_while(|&b| b == b'#').count()
}
