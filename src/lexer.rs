//! Tokenizer for KDL source text.
//!
//! Converts the input buffer into a flat [`Token`] stream consumed by the
//! parser. Whitespace, newlines, comments and line continuations are kept as
//! tokens because the grammar uses them as node separators and terminators.
//!
//! Dispatch is on the first character of each token:
//!
//! | First character | Token |
//! |-----------------|-------|
//! | BOM (offset 0 only) | [`TokenKind::Bom`] |
//! | unicode space | [`TokenKind::Whitespace`] |
//! | newline | [`TokenKind::Newline`] |
//! | `\` | [`TokenKind::Escline`] |
//! | `/` | comment or [`TokenKind::Slashdash`] |
//! | `"` | quoted or multiline [`TokenKind::String`] |
//! | `#` | raw string or [`TokenKind::Keyword`] |
//! | `( ) { } ; =` | punctuation |
//! | identifier character | [`TokenKind::Number`] or [`TokenKind::BareIdentifier`] |
//!
//! A bare word is munched maximally and then classified: if it looks like a
//! number (optional sign, optional dot, then a digit) it must parse as one,
//! otherwise it is an identifier. This is what keeps `1abc` from ever being
//! read as an identifier.

use crate::chars::{is_identifier_char, is_newline, is_number_like, is_unicode_space, BOM};
use crate::error::{Error, Position, Result};
use crate::scanner::{at_end, scan_multi_line_comment, scan_raw_string, Cursor};
use crate::value::{Escape, KdlString, Keyword, Number, StringPart};
use std::fmt;
use tracing::trace;

/// A token and where it starts.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

/// All token classes produced by the lexer.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Bom,
    /// A run of unicode spaces
    Whitespace,
    Newline,
    /// `\` continuing a logical line onto the next physical line
    Escline,
    /// `// ...` without its terminating newline
    SingleLineComment(String),
    /// `/* ... */`, possibly nested, delimiters included
    MultiLineComment(String),
    Slashdash,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
    Equals,
    BareIdentifier(String),
    Number(Number),
    Keyword(Keyword),
    String(KdlString),
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Bom => f.write_str("byte-order mark"),
            TokenKind::Whitespace => f.write_str("whitespace"),
            TokenKind::Newline => f.write_str("newline"),
            TokenKind::Escline => f.write_str("line continuation"),
            TokenKind::SingleLineComment(_) | TokenKind::MultiLineComment(_) => {
                f.write_str("comment")
            }
            TokenKind::Slashdash => f.write_str("'/-'"),
            TokenKind::LParen => f.write_str("'('"),
            TokenKind::RParen => f.write_str("')'"),
            TokenKind::LBrace => f.write_str("'{'"),
            TokenKind::RBrace => f.write_str("'}'"),
            TokenKind::Semicolon => f.write_str("';'"),
            TokenKind::Equals => f.write_str("'='"),
            TokenKind::BareIdentifier(name) => write!(f, "identifier '{}'", name),
            TokenKind::Number(n) => write!(f, "number '{}'", n.raw()),
            TokenKind::Keyword(k) => write!(f, "keyword '{}'", k.as_str()),
            TokenKind::String(_) => f.write_str("string"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}

fn describe(ch: Option<char>) -> String {
    match ch {
        Some(c) if is_newline(c) => "newline".to_string(),
        Some(c) => format!("'{}'", c.escape_debug()),
        None => "end of input".to_string(),
    }
}

/// Single-pass tokenizer over one input buffer.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            cursor: Cursor::new(input),
        }
    }

    /// Tokenizes the whole input. The last token is always [`TokenKind::Eof`],
    /// emitted exactly once.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while !at_end(&self.cursor) {
            tokens.push(self.next_token()?);
        }
        tokens.push(Token {
            kind: TokenKind::Eof,
            position: self.cursor.position(),
        });
        trace!(tokens = tokens.len(), "tokenized input");
        Ok(tokens)
    }

    fn next_token(&mut self) -> Result<Token> {
        let position = self.cursor.position();
        let Some(ch) = self.cursor.peek() else {
            return Err(Error::unexpected(position, "a token", "end of input"));
        };

        let kind = match ch {
            BOM if position.offset == 0 => {
                self.cursor.bump();
                TokenKind::Bom
            }
            c if is_unicode_space(c) || c == BOM => {
                self.cursor.bump_while(|c| is_unicode_space(c) || c == BOM);
                TokenKind::Whitespace
            }
            c if is_newline(c) => {
                self.cursor.eat_newline();
                TokenKind::Newline
            }
            '\\' => self.lex_escline()?,
            '/' => self.lex_slash()?,
            '"' => TokenKind::String(self.lex_string()?),
            '#' => self.lex_hash()?,
            '(' | ')' | '{' | '}' | ';' | '=' => {
                self.cursor.bump();
                match ch {
                    '(' => TokenKind::LParen,
                    ')' => TokenKind::RParen,
                    '{' => TokenKind::LBrace,
                    '}' => TokenKind::RBrace,
                    ';' => TokenKind::Semicolon,
                    _ => TokenKind::Equals,
                }
            }
            c if is_identifier_char(c) => self.lex_word()?,
            c => return Err(Error::unexpected(position, "a token", &describe(Some(c)))),
        };
        Ok(Token { kind, position })
    }

    fn lex_single_line_comment(&mut self) -> String {
        let start = self.cursor.position().offset;
        self.cursor.bump_str("//");
        self.cursor.bump_while(|c| !is_newline(c));
        self.cursor.slice_from(start).to_string()
    }

    fn lex_slash(&mut self) -> Result<TokenKind> {
        match self.cursor.peek_nth(1) {
            Some('/') => Ok(TokenKind::SingleLineComment(self.lex_single_line_comment())),
            Some('*') => {
                let text = scan_multi_line_comment(&mut self.cursor)?;
                Ok(TokenKind::MultiLineComment(text.to_string()))
            }
            Some('-') => {
                self.cursor.bump_str("/-");
                Ok(TokenKind::Slashdash)
            }
            _ => Err(Error::unexpected(
                self.cursor.position(),
                "'//', '/*' or '/-'",
                "'/'",
            )),
        }
    }

    /// `\` ws* single-line-comment? newline
    fn lex_escline(&mut self) -> Result<TokenKind> {
        self.cursor.bump();
        loop {
            match self.cursor.peek() {
                Some(c) if is_unicode_space(c) || c == BOM => {
                    self.cursor.bump();
                }
                Some('/') if self.cursor.starts_with("/*") => {
                    scan_multi_line_comment(&mut self.cursor)?;
                }
                _ => break,
            }
        }
        if self.cursor.starts_with("//") {
            self.lex_single_line_comment();
        }
        if self.cursor.eat_newline() {
            Ok(TokenKind::Escline)
        } else {
            Err(Error::unexpected(
                self.cursor.position(),
                "newline after '\\'",
                &describe(self.cursor.peek()),
            ))
        }
    }

    fn lex_hash(&mut self) -> Result<TokenKind> {
        if matches!(self.cursor.peek_nth(1), Some('#' | '"')) {
            let raw = scan_raw_string(&mut self.cursor)?;
            return Ok(TokenKind::String(KdlString::Raw {
                hashes: raw.hashes,
                multiline: raw.multiline,
                text: raw.text.to_string(),
            }));
        }

        let position = self.cursor.position();
        self.cursor.bump();
        let start = self.cursor.position().offset;
        self.cursor.bump_while(is_identifier_char);
        let name = self.cursor.slice_from(start);
        Keyword::from_name(name).map(TokenKind::Keyword).ok_or_else(|| {
            let found = if name.is_empty() {
                describe(self.cursor.peek())
            } else {
                format!("'#{}'", name)
            };
            Error::unexpected(position, "a keyword or raw string after '#'", &found)
        })
    }

    fn lex_word(&mut self) -> Result<TokenKind> {
        let position = self.cursor.position();
        self.cursor.bump_while(is_identifier_char);
        let text = self.cursor.slice_from(position.offset);
        if is_number_like(text) {
            Number::parse(text)
                .map(TokenKind::Number)
                .ok_or_else(|| Error::invalid_number(position, text))
        } else {
            Ok(TokenKind::BareIdentifier(text.to_string()))
        }
    }

    fn lex_string(&mut self) -> Result<KdlString> {
        if self.cursor.starts_with("\"\"\"") {
            self.lex_multiline_string()
        } else {
            self.lex_quoted_string()
        }
    }

    fn lex_quoted_string(&mut self) -> Result<KdlString> {
        let start = self.cursor.position();
        self.cursor.bump();
        let mut parts = Vec::new();
        let mut fragment = String::new();
        loop {
            match self.cursor.peek() {
                Some('"') => {
                    self.cursor.bump();
                    break;
                }
                Some('\\') => {
                    flush(&mut parts, &mut fragment);
                    parts.push(StringPart::Escape(self.lex_escape(start)?));
                }
                Some(c) if !is_newline(c) => {
                    self.cursor.bump();
                    fragment.push(c);
                }
                _ => return Err(Error::UnterminatedString { position: start }),
            }
        }
        flush(&mut parts, &mut fragment);
        Ok(KdlString::Quoted { parts })
    }

    fn lex_multiline_string(&mut self) -> Result<KdlString> {
        let start = self.cursor.position();
        self.cursor.bump_str("\"\"\"");
        let opening_newline = self.cursor.eat_newline();
        let mut parts = Vec::new();
        let mut fragment = String::new();
        loop {
            if self.cursor.starts_with("\"\"\"") {
                self.cursor.bump_str("\"\"\"");
                break;
            }
            match self.cursor.peek() {
                // A lone quote is literal content, kept as its own fragment.
                Some('"') => {
                    self.cursor.bump();
                    flush(&mut parts, &mut fragment);
                    parts.push(StringPart::Fragment("\"".to_string()));
                }
                Some('\\') => {
                    flush(&mut parts, &mut fragment);
                    parts.push(StringPart::Escape(self.lex_escape(start)?));
                }
                Some(c) => {
                    self.cursor.bump();
                    fragment.push(c);
                }
                None => return Err(Error::UnterminatedString { position: start }),
            }
        }
        flush(&mut parts, &mut fragment);
        Ok(KdlString::Multiline {
            opening_newline,
            parts,
        })
    }

    fn lex_escape(&mut self, string_start: Position) -> Result<Escape> {
        let position = self.cursor.position();
        self.cursor.bump();
        let Some(letter) = self.cursor.peek() else {
            return Err(Error::UnterminatedString {
                position: string_start,
            });
        };
        if letter != 'u' {
            return match Escape::from_letter(letter) {
                Some(escape) => {
                    self.cursor.bump();
                    Ok(escape)
                }
                None => Err(Error::invalid_escape(
                    position,
                    &format!("\\{}", letter.escape_debug()),
                )),
            };
        }

        self.cursor.bump();
        let invalid = |lexer: &Self| {
            Error::invalid_escape(position, lexer.cursor.slice_from(position.offset))
        };
        if self.cursor.peek() != Some('{') {
            return Err(invalid(self));
        }
        self.cursor.bump();
        let digits_start = self.cursor.position().offset;
        self.cursor.bump_while(|c| c.is_ascii_hexdigit());
        let digits = self.cursor.slice_from(digits_start);
        if digits.is_empty() || digits.len() > 6 || self.cursor.peek() != Some('}') {
            return Err(invalid(self));
        }
        self.cursor.bump();
        u32::from_str_radix(digits, 16)
            .ok()
            .and_then(char::from_u32)
            .map(|ch| Escape::Unicode {
                digits: digits.to_string(),
                ch,
            })
            .ok_or_else(|| invalid(self))
    }
}

fn flush(parts: &mut Vec<StringPart>, fragment: &mut String) {
    if !fragment.is_empty() {
        parts.push(StringPart::Fragment(std::mem::take(fragment)));
    }
}
