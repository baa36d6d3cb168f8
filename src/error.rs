//! Unified error type.

use std::fmt;

/// The error type returned by conneg's fallible operations.
///
/// A request that cannot be satisfied is not an error: it is a
/// [`NegotiationResult::NotAcceptable`](crate::NegotiationResult) value.
/// This type surfaces malformed media-type text, either a single `Accept`
/// segment parsed directly or a server priority rejected at configuration time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// No `/` between type and subtype.
    MissingSlash,
    /// The type half is empty.
    EmptyType,
    /// The subtype half is empty.
    EmptySubtype,
    /// `*` as the type with a concrete subtype, e.g. `*/json`.
    WildcardType,
    /// A `;` parameter that is not `key=value`.
    MalformedParameter(String),
    /// A server priority entry that cannot be offered.
    InvalidPriority { entry: String, reason: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSlash           => f.write_str("media type is missing '/'"),
            Self::EmptyType              => f.write_str("media type has an empty type"),
            Self::EmptySubtype           => f.write_str("media type has an empty subtype"),
            Self::WildcardType           => f.write_str("wildcard type requires a wildcard subtype"),
            Self::MalformedParameter(p)  => write!(f, "malformed parameter `{p}`"),
            Self::InvalidPriority { entry, reason } => {
                write!(f, "invalid priority `{entry}`: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {}
