//! Recursive-descent parser over the token stream.
//!
//! ```text
//! document := BOM? line-space* version? nodes
//! nodes    := (line-space* node)* line-space*
//! node     := slashdash? type? identifier (node-space+ field)* children* terminator
//! children := slashdash? '{' nodes '}'
//! field    := slashdash? (identifier node-space* '=' node-space* value | value)
//! value    := type? (identifier | number | keyword)
//! type     := '(' node-space* identifier node-space* ')'
//! version  := '/-' line-space* 'kdl-version' node-space+ ('1' | '2') node-space* comment? (newline | EOF)
//! ```
//!
//! The parser looks ahead over insignificant tokens to make its choices but
//! never backtracks. An identifier followed by `=` is a property, a `/-`
//! followed by `{` applies to a children block, and a `/- kdl-version`
//! anywhere but the start of the document is an error.

use crate::annotation::{BuiltinAnnotation, KdlVersion, TypeAnnotation};
use crate::document::{Children, Document, Field, Node, VersionMarker};
use crate::error::{Error, Position, Result};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::options::ParseOptions;
use crate::value::{Identifier, Value, ValueKind};
use tracing::debug;

const VERSION_KEYWORD: &str = "kdl-version";

/// Parser state for one input buffer.
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    eof: Token,
    options: ParseOptions,
    version: KdlVersion,
    depth: usize,
}

impl Parser {
    /// Tokenizes `input` and prepares to parse it.
    pub fn new(input: &str, options: ParseOptions) -> Result<Self> {
        let tokens = Lexer::new(input).tokenize()?;
        let eof = Token {
            kind: TokenKind::Eof,
            position: tokens
                .last()
                .map_or_else(Position::start, |token| token.position),
        };
        Ok(Parser {
            tokens,
            position: 0,
            eof,
            options,
            version: options.default_version,
            depth: 0,
        })
    }

    /// The dialect in effect: the declared one once a version marker has
    /// been parsed, the configured default before that.
    #[must_use]
    pub fn version(&self) -> KdlVersion {
        self.version
    }

    /// Parses the whole token stream into a document.
    pub fn parse_document(&mut self) -> Result<Document> {
        let bom = self.check(&TokenKind::Bom);
        if bom {
            self.advance();
        }
        self.skip_line_space();

        let version = if self.at_version_marker() {
            Some(self.parse_version_marker()?)
        } else {
            None
        };

        let nodes = self.parse_nodes(false)?;
        Ok(Document::top_level(bom, version, nodes))
    }

    fn parse_version_marker(&mut self) -> Result<VersionMarker> {
        self.advance(); // '/-'
        self.skip_line_space();
        self.advance(); // 'kdl-version'
        if !self.skip_node_space() {
            return Err(self.unexpected("space before the version number"));
        }

        let token = self.current();
        let text = match &token.kind {
            TokenKind::Number(number) => number.raw().to_string(),
            TokenKind::String(string) => string.value(),
            TokenKind::BareIdentifier(name) => name.clone(),
            _ => return Err(self.unexpected("version number")),
        };
        let version = KdlVersion::from_marker(&text).ok_or_else(|| Error::InvalidVersion {
            position: token.position,
            found: text,
        })?;
        self.advance();

        self.skip_node_space();
        if matches!(self.current().kind, TokenKind::SingleLineComment(_)) {
            self.advance();
        }
        match self.current().kind {
            TokenKind::Newline => self.advance(),
            TokenKind::Eof => {}
            _ => return Err(self.missing_terminator()),
        }

        debug!(version = %version, "version marker selects dialect");
        self.version = version;
        Ok(VersionMarker { version })
    }

    fn parse_nodes(&mut self, in_children: bool) -> Result<Vec<Node>> {
        let mut nodes = Vec::new();
        loop {
            self.skip_line_space();
            match self.current().kind {
                TokenKind::Eof if in_children => return Err(self.unexpected("'}'")),
                TokenKind::Eof => break,
                TokenKind::RBrace if in_children => break,
                TokenKind::RBrace => return Err(self.unexpected("node")),
                _ => nodes.push(self.parse_node()?),
            }
        }
        Ok(nodes)
    }

    fn parse_node(&mut self) -> Result<Node> {
        let slashdashed = self.check(&TokenKind::Slashdash);
        if slashdashed {
            if self.at_version_marker() {
                return Err(Error::MisplacedVersionMarker {
                    position: self.current().position,
                });
            }
            self.advance();
            self.skip_line_space();
        }

        let annotation = if self.check(&TokenKind::LParen) {
            let annotation = self.parse_type()?;
            self.skip_node_space();
            Some(annotation)
        } else {
            None
        };
        let name = self.parse_identifier("node name")?;

        let mut fields = Vec::new();
        let mut children: Vec<Children> = Vec::new();
        loop {
            let spaced = self.skip_node_space();
            match self.current().kind {
                TokenKind::Newline
                | TokenKind::Semicolon
                | TokenKind::SingleLineComment(_)
                | TokenKind::Eof
                | TokenKind::RBrace => break,
                TokenKind::LBrace => {
                    let block = self.parse_children_block(&children)?;
                    children.push(block);
                }
                TokenKind::Slashdash if self.slashdash_target() == &TokenKind::LBrace => {
                    let block = self.parse_children_block(&children)?;
                    children.push(block);
                }
                _ if !children.is_empty() => {
                    return Err(self.unexpected("node terminator after children"));
                }
                _ if !spaced => return Err(self.missing_terminator()),
                _ => fields.push(self.parse_field()?),
            }
        }

        // A closing brace ends the node but belongs to the enclosing block.
        if matches!(
            self.current().kind,
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::SingleLineComment(_)
        ) {
            self.advance();
        }

        Ok(Node::from_parts(
            slashdashed,
            annotation,
            name,
            fields,
            children,
        ))
    }

    fn parse_children_block(&mut self, existing: &[Children]) -> Result<Children> {
        let slashdashed = self.check(&TokenKind::Slashdash);
        if slashdashed {
            self.advance();
            self.skip_line_space();
        }
        if !slashdashed && existing.iter().any(|block| !block.is_slashdashed()) {
            return Err(self.unexpected("node terminator instead of a second children block"));
        }

        let open = self.current().position;
        self.advance(); // '{'
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(Error::NestingTooDeep {
                position: open,
                limit: self.options.max_depth,
            });
        }
        let nodes = self.parse_nodes(true)?;
        self.advance(); // '}'
        self.depth -= 1;

        Ok(Children::new(slashdashed, Document::new(nodes)))
    }

    fn parse_field(&mut self) -> Result<Field> {
        let slashdashed = self.check(&TokenKind::Slashdash);
        if slashdashed {
            self.advance();
            self.skip_line_space();
        }

        let is_property = matches!(
            self.current().kind,
            TokenKind::BareIdentifier(_) | TokenKind::String(_)
        ) && self.kind_after(self.position + 1, false) == &TokenKind::Equals;

        let field = if is_property {
            let key = self.parse_identifier("property key")?;
            self.skip_node_space();
            self.advance(); // '='
            self.skip_node_space();
            Field::property(key, self.parse_value()?)
        } else {
            Field::argument(self.parse_value()?)
        };
        Ok(field.slashdashed(slashdashed))
    }

    fn parse_value(&mut self) -> Result<Value> {
        let annotation = if self.check(&TokenKind::LParen) {
            let annotation = self.parse_type()?;
            self.skip_node_space();
            Some(annotation)
        } else {
            None
        };

        let kind = match &self.current().kind {
            TokenKind::BareIdentifier(name) => ValueKind::Identifier(Identifier::Bare(name.clone())),
            TokenKind::String(string) => ValueKind::Identifier(Identifier::String(string.clone())),
            TokenKind::Number(number) => ValueKind::Number(number.clone()),
            TokenKind::Keyword(keyword) => ValueKind::Keyword(*keyword),
            _ => return Err(self.unexpected("argument or property")),
        };
        self.advance();
        Ok(Value::new(annotation, kind))
    }

    fn parse_type(&mut self) -> Result<TypeAnnotation> {
        self.advance(); // '('
        self.skip_node_space();
        let ident = self.parse_identifier("type name")?;
        self.skip_node_space();
        if !self.check(&TokenKind::RParen) {
            return Err(self.unexpected("')'"));
        }
        self.advance();

        let builtin = match &ident {
            Identifier::Bare(name) => BuiltinAnnotation::lookup(name, self.version),
            Identifier::String(_) => None,
        };
        Ok(builtin.map_or(TypeAnnotation::Identifier(ident), TypeAnnotation::Builtin))
    }

    fn parse_identifier(&mut self, expected: &str) -> Result<Identifier> {
        let ident = match &self.current().kind {
            TokenKind::BareIdentifier(name) => Identifier::Bare(name.clone()),
            TokenKind::String(string) => Identifier::String(string.clone()),
            _ => return Err(self.unexpected(expected)),
        };
        self.advance();
        Ok(ident)
    }

    // Helper methods

    fn current(&self) -> &Token {
        self.tokens.get(self.position).unwrap_or(&self.eof)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.current().kind == kind
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() {
            self.position += 1;
        }
    }

    /// Skips whitespace, block comments and line continuations. Returns
    /// whether anything was skipped.
    fn skip_node_space(&mut self) -> bool {
        let start = self.position;
        while matches!(
            self.current().kind,
            TokenKind::Whitespace | TokenKind::MultiLineComment(_) | TokenKind::Escline
        ) {
            self.advance();
        }
        self.position > start
    }

    /// Skips node-space plus newlines and line comments.
    fn skip_line_space(&mut self) {
        loop {
            self.skip_node_space();
            match self.current().kind {
                TokenKind::Newline | TokenKind::SingleLineComment(_) => self.advance(),
                _ => break,
            }
        }
    }

    /// The first token at or after `index` that is not node-space (nor
    /// line-space, if `line_space` is set).
    fn kind_after(&self, mut index: usize, line_space: bool) -> &TokenKind {
        while let Some(token) = self.tokens.get(index) {
            match token.kind {
                TokenKind::Whitespace | TokenKind::MultiLineComment(_) | TokenKind::Escline => {}
                TokenKind::Newline | TokenKind::SingleLineComment(_) if line_space => {}
                _ => return &token.kind,
            }
            index += 1;
        }
        &self.eof.kind
    }

    /// What the slashdash under the cursor applies to.
    fn slashdash_target(&self) -> &TokenKind {
        self.kind_after(self.position + 1, true)
    }

    /// A slashdash whose target is the bare word `kdl-version`, however
    /// much line-space sits between them.
    fn at_version_marker(&self) -> bool {
        self.check(&TokenKind::Slashdash)
            && matches!(
                self.slashdash_target(),
                TokenKind::BareIdentifier(name) if name == VERSION_KEYWORD
            )
    }

    fn unexpected(&self, expected: &str) -> Error {
        let token = self.current();
        Error::unexpected(token.position, expected, &token.kind.to_string())
    }

    fn missing_terminator(&self) -> Error {
        let token = self.current();
        Error::missing_terminator(token.position, &token.kind.to_string())
    }
}
