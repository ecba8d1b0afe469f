//! Error types for KDL tokenizing and parsing.
//!
//! Every failure is terminal for the parse call that raised it: there is no
//! recovery and no partial document. Each syntax error carries a [`Position`]
//! (byte offset, line, column) so callers can point into the source text.
//!
//! ## Error Categories
//!
//! - **Scanner errors**: unterminated strings, raw strings and block comments
//! - **Lexical errors**: invalid escapes, malformed numbers
//! - **Grammar errors**: unexpected tokens, missing node terminators
//! - **Dialect errors**: bad or misplaced `kdl-version` markers
//! - **Input errors**: invalid UTF-8, I/O failures while reading
//!
//! ## Examples
//!
//! ```rust
//! use kdl_parse::{parse, ErrorKind};
//!
//! let err = parse("node 0x\n").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InvalidNumber);
//!
//! let pos = err.position().unwrap();
//! assert_eq!((pos.line, pos.column), (1, 6));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A location in the source text.
///
/// `offset` is a byte offset; `line` and `column` are 1-based, with columns
/// counted in characters. A CRLF pair counts as a single line break.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    /// The position of the first character of a buffer.
    #[must_use]
    pub const fn start() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "line {}, column {} (byte {})",
            self.line, self.column, self.offset
        )
    }
}

/// Represents all possible errors raised while parsing a KDL document.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A quoted or multiline string ran into a newline or the end of input
    #[error("Unterminated string starting at {position}")]
    UnterminatedString { position: Position },

    /// No closing quote followed by the matching number of `#` before EOF
    #[error("Unterminated raw string starting at {position}: expected a closing quote followed by {hashes} '#'")]
    UnterminatedRawString { position: Position, hashes: usize },

    /// Block comment still open at EOF
    #[error("Unterminated comment starting at {position}: {depth} level(s) still open at end of input")]
    UnterminatedComment { position: Position, depth: usize },

    /// Backslash followed by an unknown character or a malformed `\u{...}`
    #[error("Invalid escape '{found}' at {position}")]
    InvalidEscape { position: Position, found: String },

    /// Number-shaped text that does not match any number form
    #[error("Invalid number '{found}' at {position}")]
    InvalidNumber { position: Position, found: String },

    /// A grammar rule expected one token class and found another
    #[error("Unexpected {found} at {position}: expected {expected}")]
    UnexpectedToken {
        position: Position,
        expected: String,
        found: String,
    },

    /// A node was not closed by a comment, newline, `;`, EOF or `}`
    #[error("Missing node terminator at {position}: found {found}")]
    MissingTerminator { position: Position, found: String },

    /// `kdl-version` marker with a value other than 1 or 2
    #[error("Invalid KDL version {found} at {position}: expected 1 or 2")]
    InvalidVersion { position: Position, found: String },

    /// `kdl-version` marker after the document start
    #[error("Version marker at {position} must appear before any node")]
    MisplacedVersionMarker { position: Position },

    /// Children blocks nested deeper than the configured limit
    #[error("Children nested deeper than {limit} levels at {position}")]
    NestingTooDeep { position: Position, limit: usize },

    /// Input bytes are not valid UTF-8
    #[error("Input is not valid UTF-8 after byte {valid_up_to}")]
    InvalidUtf8 { valid_up_to: usize },

    /// IO error while reading the input
    #[error("IO error: {0}")]
    Io(String),
}

/// The discriminant of an [`Error`], convenient for matching and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnterminatedString,
    UnterminatedRawString,
    UnterminatedComment,
    InvalidEscape,
    InvalidNumber,
    UnexpectedToken,
    MissingTerminator,
    InvalidVersion,
    MisplacedVersionMarker,
    NestingTooDeep,
    InvalidUtf8,
    Io,
}

impl Error {
    /// Creates an unexpected-token error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kdl_parse::{Error, Position};
    ///
    /// let err = Error::unexpected(Position::start(), "node name", "'{'");
    /// assert!(err.to_string().contains("expected node name"));
    /// ```
    pub fn unexpected(position: Position, expected: &str, found: &str) -> Self {
        Error::UnexpectedToken {
            position,
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates a missing-terminator error.
    pub fn missing_terminator(position: Position, found: &str) -> Self {
        Error::MissingTerminator {
            position,
            found: found.to_string(),
        }
    }

    /// Creates an invalid-number error for the offending source text.
    pub fn invalid_number(position: Position, found: &str) -> Self {
        Error::InvalidNumber {
            position,
            found: found.to_string(),
        }
    }

    /// Creates an invalid-escape error for the offending source text.
    pub fn invalid_escape(position: Position, found: &str) -> Self {
        Error::InvalidEscape {
            position,
            found: found.to_string(),
        }
    }

    /// Creates an I/O error for reading failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnterminatedString { .. } => ErrorKind::UnterminatedString,
            Error::UnterminatedRawString { .. } => ErrorKind::UnterminatedRawString,
            Error::UnterminatedComment { .. } => ErrorKind::UnterminatedComment,
            Error::InvalidEscape { .. } => ErrorKind::InvalidEscape,
            Error::InvalidNumber { .. } => ErrorKind::InvalidNumber,
            Error::UnexpectedToken { .. } => ErrorKind::UnexpectedToken,
            Error::MissingTerminator { .. } => ErrorKind::MissingTerminator,
            Error::InvalidVersion { .. } => ErrorKind::InvalidVersion,
            Error::MisplacedVersionMarker { .. } => ErrorKind::MisplacedVersionMarker,
            Error::NestingTooDeep { .. } => ErrorKind::NestingTooDeep,
            Error::InvalidUtf8 { .. } => ErrorKind::InvalidUtf8,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// Returns where in the source the error was detected, if it has a
    /// source location.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::UnterminatedString { position }
            | Error::UnterminatedRawString { position, .. }
            | Error::UnterminatedComment { position, .. }
            | Error::InvalidEscape { position, .. }
            | Error::InvalidNumber { position, .. }
            | Error::UnexpectedToken { position, .. }
            | Error::MissingTerminator { position, .. }
            | Error::InvalidVersion { position, .. }
            | Error::MisplacedVersionMarker { position }
            | Error::NestingTooDeep { position, .. } => Some(*position),
            Error::InvalidUtf8 { .. } | Error::Io(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
