//! KDL serialization.
//!
//! This module provides the [`Serializer`] that writes a document tree back
//! out as KDL v2 text, and the `Display` impls of every tree type.
//!
//! ## Overview
//!
//! The output is canonical rather than faithful:
//!
//! - **One node per line**: children blocks are indented four spaces per level
//! - **Flags kept**: slashdashes and type annotations are written back
//! - **Literals kept**: strings keep their style, escapes and `#` count;
//!   numbers keep their digits, radix prefix and underscores
//! - **Trivia dropped**: comments and original whitespace are not written
//!
//! Parsing the output yields a tree equal to the one that was written.
//!
//! ## Examples
//!
//! ```rust
//! use kdl_parse::{parse, to_string};
//!
//! let doc = parse("a   1_000 /-x=#nan {b;c}").unwrap();
//! assert_eq!(to_string(&doc), "a 1_000 /-x=#nan {\n    b\n    c\n}\n");
//! ```

use crate::annotation::{KdlVersion, TypeAnnotation};
use crate::chars::{is_bare_identifier, BOM};
use crate::document::{Document, Field, FieldKind, Node};
use crate::value::{Identifier, KdlString, Keyword, Number, StringPart, Value, ValueKind};
use std::fmt;

const INDENT: &str = "    ";

/// Writes document trees as KDL text.
pub struct Serializer {
    output: String,
    indent_level: usize,
}

impl Default for Serializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer {
    pub fn new() -> Self {
        Serializer {
            output: String::with_capacity(256),
            indent_level: 0,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(INDENT);
        }
    }

    /// Writes a top-level document: BOM, version marker, then its nodes.
    pub fn serialize_document(&mut self, document: &Document) {
        if document.has_bom() {
            self.output.push(BOM);
        }
        if let Some(version) = document.version() {
            self.write_version_marker(version);
        }
        self.write_nodes(document);
    }

    fn write_version_marker(&mut self, version: KdlVersion) {
        self.output.push_str("/- kdl-version ");
        self.output.push_str(version.as_str());
        self.output.push('\n');
    }

    fn write_nodes(&mut self, document: &Document) {
        for node in document.nodes() {
            self.write_indent();
            self.serialize_node(node);
            self.output.push('\n');
        }
    }

    /// Writes one node without a trailing newline.
    pub fn serialize_node(&mut self, node: &Node) {
        if node.is_slashdashed() {
            self.output.push_str("/-");
        }
        if let Some(annotation) = node.annotation() {
            self.write_annotation(annotation);
        }
        self.write_identifier(node.name());

        for field in node.fields() {
            self.output.push(' ');
            self.serialize_field(field);
        }

        for block in node.children_blocks() {
            self.output.push(' ');
            if block.is_slashdashed() {
                self.output.push_str("/-");
            }
            let children = block.document();
            if children.is_empty() {
                self.output.push_str("{}");
                continue;
            }
            self.output.push_str("{\n");
            self.indent_level += 1;
            self.write_nodes(children);
            self.indent_level -= 1;
            self.write_indent();
            self.output.push('}');
        }
    }

    pub fn serialize_field(&mut self, field: &Field) {
        if field.is_slashdashed() {
            self.output.push_str("/-");
        }
        match field.kind() {
            FieldKind::Property { key, value } => {
                self.write_identifier(key);
                self.output.push('=');
                self.serialize_value(value);
            }
            FieldKind::Argument(value) => self.serialize_value(value),
        }
    }

    pub fn serialize_value(&mut self, value: &Value) {
        if let Some(annotation) = value.annotation() {
            self.write_annotation(annotation);
        }
        match value.kind() {
            ValueKind::Identifier(ident) => self.write_identifier(ident),
            ValueKind::Number(number) => self.write_number(number),
            ValueKind::Keyword(keyword) => self.write_keyword(*keyword),
        }
    }

    fn write_annotation(&mut self, annotation: &TypeAnnotation) {
        self.output.push('(');
        match annotation {
            TypeAnnotation::Builtin(builtin) => self.output.push_str(builtin.as_str()),
            TypeAnnotation::Identifier(ident) => self.write_identifier(ident),
        }
        self.output.push(')');
    }

    #[inline]
    fn write_identifier(&mut self, ident: &Identifier) {
        match ident {
            Identifier::Bare(name) if is_bare_identifier(name) => self.output.push_str(name),
            Identifier::Bare(name) => self.write_string(&KdlString::quoted(name)),
            Identifier::String(string) => self.write_string(string),
        }
    }

    fn write_string(&mut self, string: &KdlString) {
        match string {
            KdlString::Quoted { parts } => {
                self.output.push('"');
                self.write_parts(parts);
                self.output.push('"');
            }
            KdlString::Multiline {
                opening_newline,
                parts,
            } => {
                self.output.push_str("\"\"\"");
                if *opening_newline {
                    self.output.push('\n');
                }
                self.write_parts(parts);
                self.output.push_str("\"\"\"");
            }
            KdlString::Raw {
                hashes,
                multiline,
                text,
            } => {
                let delimiter = "#".repeat(*hashes);
                let quote = if *multiline { "\"\"\"" } else { "\"" };
                self.output.push_str(&delimiter);
                self.output.push_str(quote);
                self.output.push_str(text);
                self.output.push_str(quote);
                self.output.push_str(&delimiter);
            }
        }
    }

    fn write_parts(&mut self, parts: &[StringPart]) {
        for part in parts {
            match part {
                StringPart::Fragment(text) => self.output.push_str(text),
                StringPart::Escape(escape) => self.output.push_str(&escape.to_string()),
            }
        }
    }

    #[inline]
    fn write_number(&mut self, number: &Number) {
        self.output.push_str(number.raw());
    }

    #[inline]
    fn write_keyword(&mut self, keyword: Keyword) {
        self.output.push_str(keyword.as_str());
    }
}

/// Serializes a document to KDL text.
pub fn to_string(document: &Document) -> String {
    let mut serializer = Serializer::new();
    serializer.serialize_document(document);
    serializer.into_inner()
}

fn display_with(f: &mut fmt::Formatter<'_>, write: impl FnOnce(&mut Serializer)) -> fmt::Result {
    let mut serializer = Serializer::new();
    write(&mut serializer);
    f.write_str(&serializer.into_inner())
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_with(f, |s| s.serialize_document(self))
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_with(f, |s| s.serialize_node(self))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_with(f, |s| s.serialize_field(self))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_with(f, |s| s.serialize_value(self))
    }
}

impl fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_with(f, |s| s.write_annotation(self))
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_with(f, |s| s.write_identifier(self))
    }
}

impl fmt::Display for KdlString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        display_with(f, |s| s.write_string(self))
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw())
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
