//! Type annotations and the per-dialect tables of builtin annotation names.
//!
//! A type annotation is a parenthesized tag in front of a node or value,
//! e.g. `(u8)10` or `(date-time)"2024-01-01T00:00:00Z"`. KDL reserves a fixed
//! vocabulary of builtin names; which names are reserved depends on the
//! dialect ([`KdlVersion`]) the document declares. The tables are advisory:
//! the parser classifies a name as builtin or free-form but never checks the
//! annotated value against it.

use crate::value::Identifier;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// The KDL dialect a document is parsed under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KdlVersion {
    V1,
    #[default]
    V2,
}

impl KdlVersion {
    /// The version number as written in a `kdl-version` marker.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            KdlVersion::V1 => "1",
            KdlVersion::V2 => "2",
        }
    }

    /// Parses the value of a `kdl-version` marker.
    #[must_use]
    pub fn from_marker(value: &str) -> Option<Self> {
        match value {
            "1" => Some(KdlVersion::V1),
            "2" => Some(KdlVersion::V2),
            _ => None,
        }
    }

    /// The builtin annotation names reserved by this dialect.
    #[must_use]
    pub const fn builtin_annotations(self) -> &'static [BuiltinAnnotation] {
        match self {
            KdlVersion::V1 => V1_BUILTINS,
            KdlVersion::V2 => V2_BUILTINS,
        }
    }
}

impl fmt::Display for KdlVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reserved annotation name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuiltinAnnotation {
    I8,
    I16,
    I32,
    I64,
    I128,
    U8,
    U16,
    U32,
    U64,
    U128,
    Isize,
    Usize,
    F32,
    F64,
    Decimal64,
    Decimal128,
    DateTime,
    Time,
    Date,
    Duration,
    Decimal,
    Currency,
    Country2,
    Country3,
    CountrySubdivision,
    Email,
    IdnEmail,
    Hostname,
    IdnHostname,
    Ipv4,
    Ipv6,
    Url,
    UrlReference,
    Iri,
    IriReference,
    Irl,
    IrlReference,
    UrlTemplate,
    Uuid,
    Regex,
    Base64,
}

use BuiltinAnnotation as B;

#[rustfmt::skip]
const V2_BUILTINS: &[BuiltinAnnotation] = &[
    B::I8, B::I16, B::I32, B::I64, B::I128,
    B::U8, B::U16, B::U32, B::U64, B::U128,
    B::Isize, B::Usize,
    B::F32, B::F64, B::Decimal64, B::Decimal128,
    B::DateTime, B::Time, B::Date, B::Duration,
    B::Decimal, B::Currency,
    B::Country2, B::Country3, B::CountrySubdivision,
    B::Email, B::IdnEmail,
    B::Hostname, B::IdnHostname,
    B::Ipv4, B::Ipv6,
    B::Url, B::UrlReference,
    B::Irl, B::IrlReference,
    B::UrlTemplate,
    B::Uuid, B::Regex, B::Base64,
];

#[rustfmt::skip]
const V1_BUILTINS: &[BuiltinAnnotation] = &[
    B::I8, B::I16, B::I32, B::I64,
    B::U8, B::U16, B::U32, B::U64,
    B::Isize, B::Usize,
    B::F32, B::F64, B::Decimal64, B::Decimal128,
    B::DateTime, B::Time, B::Date, B::Duration,
    B::Decimal, B::Currency,
    B::Country2, B::Country3, B::CountrySubdivision,
    B::Email, B::IdnEmail,
    B::Hostname, B::IdnHostname,
    B::Ipv4, B::Ipv6,
    B::Url, B::UrlReference,
    B::Iri, B::IriReference,
    B::UrlTemplate,
    B::Uuid, B::Regex, B::Base64,
];

impl BuiltinAnnotation {
    /// The reserved name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            B::I8 => "i8",
            B::I16 => "i16",
            B::I32 => "i32",
            B::I64 => "i64",
            B::I128 => "i128",
            B::U8 => "u8",
            B::U16 => "u16",
            B::U32 => "u32",
            B::U64 => "u64",
            B::U128 => "u128",
            B::Isize => "isize",
            B::Usize => "usize",
            B::F32 => "f32",
            B::F64 => "f64",
            B::Decimal64 => "decimal64",
            B::Decimal128 => "decimal128",
            B::DateTime => "date-time",
            B::Time => "time",
            B::Date => "date",
            B::Duration => "duration",
            B::Decimal => "decimal",
            B::Currency => "currency",
            B::Country2 => "country-2",
            B::Country3 => "country-3",
            B::CountrySubdivision => "country-subdivision",
            B::Email => "email",
            B::IdnEmail => "idn-email",
            B::Hostname => "hostname",
            B::IdnHostname => "idn-hostname",
            B::Ipv4 => "ipv4",
            B::Ipv6 => "ipv6",
            B::Url => "url",
            B::UrlReference => "url-reference",
            B::Iri => "iri",
            B::IriReference => "iri-reference",
            B::Irl => "irl",
            B::IrlReference => "irl-reference",
            B::UrlTemplate => "url-template",
            B::Uuid => "uuid",
            B::Regex => "regex",
            B::Base64 => "base64",
        }
    }

    /// Looks `name` up in the table of the given dialect.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use kdl_parse::{BuiltinAnnotation, KdlVersion};
    ///
    /// assert_eq!(
    ///     BuiltinAnnotation::lookup("irl", KdlVersion::V2),
    ///     Some(BuiltinAnnotation::Irl)
    /// );
    /// assert_eq!(BuiltinAnnotation::lookup("irl", KdlVersion::V1), None);
    /// assert_eq!(
    ///     BuiltinAnnotation::lookup("iri-reference", KdlVersion::V1),
    ///     Some(BuiltinAnnotation::IriReference)
    /// );
    /// ```
    #[must_use]
    pub fn lookup(name: &str, version: KdlVersion) -> Option<Self> {
        version
            .builtin_annotations()
            .iter()
            .copied()
            .find(|builtin| builtin.as_str() == name)
    }
}

impl fmt::Display for BuiltinAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parenthesized type tag on a node or value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeAnnotation {
    /// A name reserved by the active dialect
    Builtin(BuiltinAnnotation),
    /// Any other identifier
    Identifier(Identifier),
}

impl TypeAnnotation {
    /// The annotation's name.
    #[must_use]
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            TypeAnnotation::Builtin(builtin) => Cow::Borrowed(builtin.as_str()),
            TypeAnnotation::Identifier(ident) => ident.value(),
        }
    }

    #[must_use]
    pub const fn builtin(&self) -> Option<BuiltinAnnotation> {
        match self {
            TypeAnnotation::Builtin(builtin) => Some(*builtin),
            TypeAnnotation::Identifier(_) => None,
        }
    }
}
