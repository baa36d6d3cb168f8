//! The server's ordered list of media types it can produce.

use std::sync::Arc;

use crate::error::Error;
use crate::media_type::MediaTypeExpression;

/// One configured media type: the text handed back on a match, and its
/// parsed form used for matching.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Priority {
    pub(crate) value: String,
    pub(crate) media: MediaTypeExpression,
}

/// Concrete media types in server preference order, most preferred first.
///
/// Built once, then shared read-only across every request; cloning only
/// bumps a reference count. Entries must be concrete `type/subtype` values.
/// Wildcards and `q` weights are configuration errors. Extension parameters
/// are allowed and come back verbatim in the negotiated value, but play no
/// part in matching.
///
/// An empty list is valid; it simply never matches.
///
/// ```rust
/// use conneg::PriorityList;
///
/// let list = PriorityList::new(["application/json", "text/html"]).unwrap();
/// assert_eq!(list.first(), Some("application/json"));
///
/// assert!(PriorityList::new(["text/*"]).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PriorityList {
    entries: Arc<[Priority]>,
}

impl PriorityList {
    pub fn new<I, S>(entries: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|entry| parse_priority(entry.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { entries: entries.into() })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// The most preferred entry; the default offered when a request carries
    /// no `Accept` header.
    pub fn first(&self) -> Option<&str> {
        self.entries.first().map(|p| p.value.as_str())
    }

    pub fn get(&self, rank: usize) -> Option<&str> {
        self.entries.get(rank).map(|p| p.value.as_str())
    }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|p| p.value.as_str())
    }

    pub(crate) fn entries(&self) -> &[Priority] {
        &self.entries
    }
}

fn parse_priority(entry: &str) -> Result<Priority, Error> {
    let value = entry.trim();
    let invalid = |reason: String| Error::InvalidPriority {
        entry: entry.to_owned(),
        reason,
    };

    let media: MediaTypeExpression = value.parse().map_err(|e: Error| invalid(e.to_string()))?;
    if media.type_() == "*" || media.is_wildcard() {
        return Err(invalid("wildcards cannot be offered".to_owned()));
    }
    if MediaTypeExpression::has_explicit_quality(value) {
        return Err(invalid("priorities do not carry a quality".to_owned()));
    }

    Ok(Priority { value: value.to_owned(), media })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_order_is_kept() {
        let list = PriorityList::new(["text/html", "application/json", "text/plain"]).unwrap();
        assert_eq!(list.iter().collect::<Vec<_>>(), ["text/html", "application/json", "text/plain"]);
        assert_eq!(list.get(1), Some("application/json"));
        assert_eq!(list.get(3), None);
    }

    #[rstest]
    fn test_value_is_trimmed_but_keeps_spelling_and_params() {
        let list = PriorityList::new(["  Text/HTML; charset=utf-8 "]).unwrap();
        assert_eq!(list.first(), Some("Text/HTML; charset=utf-8"));
        assert_eq!(list.entries()[0].media.essence(), "text/html");
    }

    #[rstest]
    fn test_empty_list_is_valid() {
        let list = PriorityList::new(Vec::<String>::new()).unwrap();
        assert!(list.is_empty());
        assert_eq!(list.first(), None);
        assert_eq!(list, PriorityList::empty());
    }

    #[rstest]
    #[case("*/*")]
    #[case("text/*")]
    #[case("text/html;q=0.5")]
    #[case("html")]
    #[case("")]
    fn test_invalid_entries_are_rejected(#[case] entry: &str) {
        let err = PriorityList::new(["application/json", entry]).unwrap_err();
        assert!(matches!(err, Error::InvalidPriority { entry: ref e, .. } if e == entry));
    }

    #[rstest]
    fn test_duplicates_are_kept_in_place() {
        let list = PriorityList::new(["text/html", "text/html"]).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[rstest]
    fn test_clones_share_storage() {
        let list = PriorityList::new(["text/html"]).unwrap();
        let clone = list.clone();
        assert!(Arc::ptr_eq(&list.entries, &clone.entries));
    }
}
