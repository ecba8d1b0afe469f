//! # kdl_parse
//!
//! A recursive-descent lexer and parser for the [KDL](https://kdl.dev)
//! document language, versions 1 and 2.
//!
//! ## What is KDL?
//!
//! KDL is a node-based document language, similar in spirit to XML but with
//! a terse, line-oriented syntax. A document is a list of nodes; each node
//! has a name, positional arguments, `key=value` properties and an optional
//! `{ ... }` block of child nodes.
//!
//! ```text
//! package {
//!     name my-pkg
//!     version "1.0.0"
//!     dependencies platform=windows {
//!         winapi "0.3" path=#null
//!     }
//! }
//! ```
//!
//! ## Key Features
//!
//! - **Lossless tree**: strings keep their quoting style and escapes, numbers
//!   keep their radix and digit separators, slashdashed (`/-`) nodes, fields
//!   and children stay in the tree, flagged inert
//! - **Both dialects**: a leading `/- kdl-version 1` switches the builtin
//!   type-annotation table; v2 is the default
//! - **Positioned errors**: every syntax error carries byte offset, line and
//!   column
//! - **Round-trip**: [`to_string`] writes a tree that parses back to itself
//!
//! ## Quick Start
//!
//! ```rust
//! use kdl_parse::parse;
//!
//! let doc = parse("node 1 key=\"value\" {\n    child\n}\n").unwrap();
//! let node = doc.get("node").unwrap();
//!
//! assert_eq!(node.arguments().count(), 1);
//! assert_eq!(node.get("key").and_then(|v| v.as_str()).as_deref(), Some("value"));
//! assert!(node.children().and_then(|c| c.get("child")).is_some());
//! ```
//!
//! ### Dialects and options
//!
//! ```rust
//! use kdl_parse::{parse, parse_with_options, KdlVersion, ParseOptions};
//!
//! let doc = parse("/- kdl-version 1\nnode\n").unwrap();
//! assert_eq!(doc.version(), Some(KdlVersion::V1));
//!
//! let options = ParseOptions::new().with_max_depth(16);
//! assert!(parse_with_options("a { b }\n", options).is_ok());
//! ```
//!
//! ### Errors
//!
//! ```rust
//! use kdl_parse::{parse, ErrorKind};
//!
//! let err = parse("node \"unterminated\n").unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::UnterminatedString);
//! println!("{}", err); // Unterminated string starting at line 1, column 6 (byte 5)
//! ```
//!
//! ## Logging
//!
//! Parse calls emit [`tracing`] events at `debug` and `trace` level. The
//! library installs no subscriber.
//!
//! ## Safety Guarantees
//!
//! - No `unsafe` code blocks
//! - Children nesting is bounded by [`ParseOptions::max_depth`]
//! - No panics in the public API; every failure is an [`Error`]

pub mod annotation;
pub mod chars;
pub mod document;
pub mod error;
pub mod lexer;
pub mod map;
pub mod options;
pub mod parser;
pub mod scanner;
pub mod ser;
pub mod value;

pub use annotation::{BuiltinAnnotation, KdlVersion, TypeAnnotation};
pub use document::{Children, Document, Field, FieldKind, Node, VersionMarker};
pub use error::{Error, ErrorKind, Position, Result};
pub use map::PropertyMap;
pub use options::ParseOptions;
pub use parser::Parser;
pub use ser::{to_string, Serializer};
pub use value::{
    Escape, Identifier, KdlString, Keyword, Number, NumberValue, Radix, StringPart, Value,
    ValueKind,
};

use std::io;
use std::str::FromStr;
use tracing::debug;

/// Parse a KDL document.
///
/// Documents without a version marker are parsed as KDL v2.
///
/// # Examples
///
/// ```rust
/// use kdl_parse::parse;
///
/// let doc = parse("node 1 2 3\n").unwrap();
/// assert_eq!(doc.nodes()[0].arguments().count(), 3);
/// ```
///
/// # Errors
///
/// Returns the first syntax error found. There is no recovery and no
/// partial document.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse(input: &str) -> Result<Document> {
    parse_with_options(input, ParseOptions::default())
}

/// Parse a KDL document with custom options.
///
/// # Examples
///
/// ```rust
/// use kdl_parse::{parse_with_options, ErrorKind, ParseOptions};
///
/// let options = ParseOptions::new().with_max_depth(1);
/// let err = parse_with_options("a { b { c } }\n", options).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::NestingTooDeep);
/// ```
///
/// # Errors
///
/// Returns the first syntax error found, or [`Error::NestingTooDeep`] when
/// children are nested beyond `options.max_depth`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn parse_with_options(input: &str, options: ParseOptions) -> Result<Document> {
    debug!(
        len = input.len(),
        default_version = %options.default_version,
        "parsing document"
    );
    let result = Parser::new(input, options).and_then(|mut parser| {
        let document = parser.parse_document()?;
        Ok((document, parser.version()))
    });
    match result {
        Ok((document, version)) => {
            debug!(nodes = document.len(), version = %version, "parsed document");
            Ok(document)
        }
        Err(err) => {
            debug!(error = %err, "parse failed");
            Err(err)
        }
    }
}

/// Parse a KDL document from an I/O stream.
///
/// The whole stream is read before parsing starts.
///
/// # Examples
///
/// ```rust
/// use kdl_parse::from_reader;
/// use std::io::Cursor;
///
/// let doc = from_reader(Cursor::new(b"a\nb\n")).unwrap();
/// assert_eq!(doc.nodes().len(), 2);
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, [`Error::InvalidUtf8`] if the
/// stream is not UTF-8, or any syntax error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Document>
where
    R: io::Read,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_slice(&bytes)
}

/// Parse a KDL document from UTF-8 bytes.
///
/// # Examples
///
/// ```rust
/// use kdl_parse::{from_slice, ErrorKind};
///
/// let doc = from_slice(b"node #true\n").unwrap();
/// assert_eq!(doc.nodes().len(), 1);
///
/// let err = from_slice(b"node \xff\n").unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::InvalidUtf8);
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidUtf8`] if the bytes are not valid UTF-8, or any
/// syntax error.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Document> {
    let s = std::str::from_utf8(v).map_err(|e| Error::InvalidUtf8 {
        valid_up_to: e.valid_up_to(),
    })?;
    parse(s)
}

impl FromStr for Document {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}
