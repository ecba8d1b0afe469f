//! Configuration options for parsing.
//!
//! - [`ParseOptions`]: the dialect used when a document declares none, and a
//!   limit on children nesting
//!
//! ## Examples
//!
//! ```rust
//! use kdl_parse::{parse_with_options, KdlVersion, ParseOptions};
//!
//! // Treat undeclared documents as KDL v1
//! let options = ParseOptions::new().with_default_version(KdlVersion::V1);
//! let doc = parse_with_options("(iri)node\n", options).unwrap();
//! assert!(doc.nodes()[0].annotation().unwrap().builtin().is_some());
//!
//! // Reject documents nested more than two levels deep
//! let options = ParseOptions::new().with_max_depth(2);
//! assert!(parse_with_options("a { b { c { d } } }\n", options).is_err());
//! ```

use crate::annotation::KdlVersion;

/// Default limit on nested children blocks.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Configuration options for a parse call.
///
/// # Examples
///
/// ```rust
/// use kdl_parse::{KdlVersion, ParseOptions};
///
/// let options = ParseOptions::new();
/// assert_eq!(options.default_version, KdlVersion::V2);
/// assert_eq!(options.max_depth, 256);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Dialect applied when the document has no `kdl-version` marker.
    pub default_version: KdlVersion,
    /// Maximum nesting of children blocks.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            default_version: KdlVersion::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ParseOptions {
    /// Creates default options (KDL v2, nesting limit of 256).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the dialect for documents without a version marker.
    ///
    /// A marker in the document always wins over this setting.
    #[must_use]
    pub fn with_default_version(mut self, version: KdlVersion) -> Self {
        self.default_version = version;
        self
    }

    /// Sets the maximum nesting of children blocks.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kdl_parse::ParseOptions;
    ///
    /// let options = ParseOptions::new().with_max_depth(8);
    /// assert_eq!(options.max_depth, 8);
    /// ```
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
