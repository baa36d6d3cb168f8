//! `Accept` header parsing.

use std::slice;

use tracing::trace;

use crate::media_type::MediaTypeExpression;

/// The parsed expressions of one `Accept` header value, in header order.
///
/// Parsing never fails. Segments that do not parse are dropped and the rest
/// are kept, so `"text/html, garbage, application/json"` yields two
/// expressions. Duplicates are kept as written; order is not re-sorted by
/// quality, the matcher does its own ranking.
///
/// An empty header value yields an empty `AcceptHeader`, which matches
/// nothing. That is not the same as a request without an `Accept` header at
/// all; see [`negotiate`](crate::negotiate).
///
/// ```rust
/// use conneg::AcceptHeader;
///
/// let accept = AcceptHeader::parse("text/html, application/json;q=0.9, nope");
/// assert_eq!(accept.len(), 2);
/// assert_eq!(accept.expressions()[1].quality(), 0.9);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AcceptHeader {
    expressions: Vec<MediaTypeExpression>,
}

impl AcceptHeader {
    pub fn parse(header: &str) -> Self {
        // Quoted parameter values could in principle hold a comma; the media
        // range grammar this crate accepts has no such values.
        header.split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .filter_map(|segment| match segment.parse() {
                Ok(expr) => Some(expr),
                Err(e) => {
                    trace!(segment, error = %e, "skipping malformed accept segment");
                    None
                }
            })
            .collect()
    }

    pub fn expressions(&self) -> &[MediaTypeExpression] { &self.expressions }
    pub fn len(&self) -> usize { self.expressions.len() }
    pub fn is_empty(&self) -> bool { self.expressions.is_empty() }

    pub fn iter(&self) -> slice::Iter<'_, MediaTypeExpression> {
        self.expressions.iter()
    }
}

impl FromIterator<MediaTypeExpression> for AcceptHeader {
    fn from_iter<I: IntoIterator<Item = MediaTypeExpression>>(iter: I) -> Self {
        Self { expressions: iter.into_iter().collect() }
    }
}

impl<'a> IntoIterator for &'a AcceptHeader {
    type Item = &'a MediaTypeExpression;
    type IntoIter = slice::Iter<'a, MediaTypeExpression>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
