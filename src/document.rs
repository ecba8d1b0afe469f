//! The document tree produced by the parser.
//!
//! The tree is read-only after construction and records enough of the source
//! to be written back: field order, slashdash flags, type annotations and the
//! written form of every string and number. Slashdashed nodes, fields and
//! children blocks stay in the tree; the navigation helpers skip them.
//!
//! ## Examples
//!
//! ```rust
//! use kdl_parse::parse;
//!
//! let doc = parse("server host=\"a\" /-port=1 8080 {\n    tls #true\n}\n").unwrap();
//! let server = doc.get("server").unwrap();
//!
//! assert_eq!(server.get("host").and_then(|v| v.as_str()).as_deref(), Some("a"));
//! assert!(server.get("port").is_none());
//! assert_eq!(server.fields().len(), 3);
//!
//! let tls = server.children().and_then(|c| c.get("tls")).unwrap();
//! assert_eq!(tls.arguments().next().and_then(|v| v.as_bool()), Some(true));
//! ```

use crate::annotation::{KdlVersion, TypeAnnotation};
use crate::map::PropertyMap;
use crate::value::{Identifier, Value};
use serde::{Deserialize, Serialize};

/// A sequence of nodes: the whole input, or the body of a children block.
///
/// Only the top-level document can carry a BOM or a version marker.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    bom: bool,
    version: Option<VersionMarker>,
    nodes: Vec<Node>,
}

impl Document {
    /// Creates a document from nodes, without BOM or version marker.
    #[must_use]
    pub fn new(nodes: Vec<Node>) -> Self {
        Document {
            bom: false,
            version: None,
            nodes,
        }
    }

    pub(crate) fn top_level(bom: bool, version: Option<VersionMarker>, nodes: Vec<Node>) -> Self {
        Document {
            bom,
            version,
            nodes,
        }
    }

    /// All nodes in source order, slashdashed ones included.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Nodes that are not slashdashed.
    pub fn active_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(|node| !node.slashdashed)
    }

    /// The first active node with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.active_nodes().find(|node| node.name.value() == name)
    }

    #[must_use]
    pub fn version_marker(&self) -> Option<&VersionMarker> {
        self.version.as_ref()
    }

    /// The dialect declared by the version marker, if there is one.
    #[must_use]
    pub fn version(&self) -> Option<KdlVersion> {
        self.version.map(|marker| marker.version)
    }

    #[must_use]
    pub fn has_bom(&self) -> bool {
        self.bom
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// `/- kdl-version N` at the start of a document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionMarker {
    pub version: KdlVersion,
}

/// A named node with its fields and children.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    slashdashed: bool,
    annotation: Option<TypeAnnotation>,
    name: Identifier,
    fields: Vec<Field>,
    children: Vec<Children>,
}

impl Node {
    /// Creates an active node with no annotation, fields or children.
    #[must_use]
    pub fn new(name: impl Into<Identifier>) -> Self {
        Node {
            slashdashed: false,
            annotation: None,
            name: name.into(),
            fields: Vec::new(),
            children: Vec::new(),
        }
    }

    pub(crate) fn from_parts(
        slashdashed: bool,
        annotation: Option<TypeAnnotation>,
        name: Identifier,
        fields: Vec<Field>,
        children: Vec<Children>,
    ) -> Self {
        Node {
            slashdashed,
            annotation,
            name,
            fields,
            children,
        }
    }

    #[must_use]
    pub fn name(&self) -> &Identifier {
        &self.name
    }

    #[must_use]
    pub fn annotation(&self) -> Option<&TypeAnnotation> {
        self.annotation.as_ref()
    }

    /// Whether the node was commented out with `/-`.
    #[must_use]
    pub fn is_slashdashed(&self) -> bool {
        self.slashdashed
    }

    /// Arguments and properties in source order, slashdashed ones included.
    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Active positional arguments.
    pub fn arguments(&self) -> impl Iterator<Item = &Value> {
        self.active_fields().filter_map(|field| match &field.kind {
            FieldKind::Argument(value) => Some(value),
            FieldKind::Property { .. } => None,
        })
    }

    /// Active properties in source order. Duplicate keys are all returned.
    pub fn properties(&self) -> impl Iterator<Item = (&Identifier, &Value)> {
        self.active_fields().filter_map(|field| match &field.kind {
            FieldKind::Property { key, value } => Some((key, value)),
            FieldKind::Argument(_) => None,
        })
    }

    /// Active properties with duplicate keys resolved, last one winning.
    #[must_use]
    pub fn property_map(&self) -> PropertyMap<'_> {
        self.properties()
            .map(|(key, value)| (key.value(), value))
            .collect()
    }

    /// The effective value of a property: its last active occurrence.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties()
            .filter(|(k, _)| k.value() == key)
            .last()
            .map(|(_, value)| value)
    }

    /// The active children block.
    #[must_use]
    pub fn children(&self) -> Option<&Document> {
        self.children
            .iter()
            .find(|block| !block.slashdashed)
            .map(|block| &block.document)
    }

    /// Every children block in source order, slashdashed ones included.
    #[must_use]
    pub fn children_blocks(&self) -> &[Children] {
        &self.children
    }

    fn active_fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| !field.slashdashed)
    }
}

/// A `{ ... }` block of child nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Children {
    slashdashed: bool,
    document: Document,
}

impl Children {
    pub(crate) fn new(slashdashed: bool, document: Document) -> Self {
        Children {
            slashdashed,
            document,
        }
    }

    #[must_use]
    pub fn is_slashdashed(&self) -> bool {
        self.slashdashed
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }
}

/// An argument or property of a node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Field {
    slashdashed: bool,
    kind: FieldKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FieldKind {
    Property { key: Identifier, value: Value },
    Argument(Value),
}

impl Field {
    #[must_use]
    pub fn argument(value: Value) -> Self {
        Field {
            slashdashed: false,
            kind: FieldKind::Argument(value),
        }
    }

    #[must_use]
    pub fn property(key: impl Into<Identifier>, value: Value) -> Self {
        Field {
            slashdashed: false,
            kind: FieldKind::Property {
                key: key.into(),
                value,
            },
        }
    }

    pub(crate) fn slashdashed(mut self, slashdashed: bool) -> Self {
        self.slashdashed = slashdashed;
        self
    }

    #[must_use]
    pub fn is_slashdashed(&self) -> bool {
        self.slashdashed
    }

    #[must_use]
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// The property key, or `None` for an argument.
    #[must_use]
    pub fn key(&self) -> Option<&Identifier> {
        match &self.kind {
            FieldKind::Property { key, .. } => Some(key),
            FieldKind::Argument(_) => None,
        }
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        match &self.kind {
            FieldKind::Property { value, .. } | FieldKind::Argument(value) => value,
        }
    }
}
