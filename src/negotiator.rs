//! Parse, match, and the absent-header default.

use std::borrow::Cow;

use http::header::ACCEPT;
use tracing::debug;

use crate::accept::AcceptHeader;
use crate::error::Error;
use crate::matcher;
use crate::priority::PriorityList;
use crate::request::Request;

/// Outcome of negotiating one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NegotiationResult {
    /// The server media type to respond with, as configured.
    Matched(String),
    /// Nothing the server offers is acceptable to the client.
    NotAcceptable,
}

impl NegotiationResult {
    pub fn is_acceptable(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    pub fn media_type(&self) -> Option<&str> {
        match self {
            Self::Matched(media_type) => Some(media_type.as_str()),
            Self::NotAcceptable => None,
        }
    }

    pub fn into_media_type(self) -> Option<String> {
        match self {
            Self::Matched(media_type) => Some(media_type),
            Self::NotAcceptable => None,
        }
    }
}

impl From<NegotiationResult> for Option<String> {
    fn from(result: NegotiationResult) -> Self {
        result.into_media_type()
    }
}

/// Negotiates `header` against `priorities`.
///
/// `header` is `None` when the request has no `Accept` header at all. Only
/// then, and only with `supply_default`, is the first priority handed out
/// unasked. A header that is present but empty names no acceptable type and
/// is always [`NotAcceptable`](NegotiationResult::NotAcceptable).
///
/// ```rust
/// use conneg::{negotiate, NegotiationResult, PriorityList};
///
/// let priorities = PriorityList::new(["text/html", "application/json"]).unwrap();
///
/// assert_eq!(
///     negotiate(Some("application/json;q=0.9, */*;q=0.1"), &priorities, false),
///     NegotiationResult::Matched("text/html".into()),
/// );
/// assert_eq!(
///     negotiate(None, &priorities, true),
///     NegotiationResult::Matched("text/html".into()),
/// );
/// assert_eq!(negotiate(Some(""), &priorities, true), NegotiationResult::NotAcceptable);
/// ```
pub fn negotiate(
    header: Option<&str>,
    priorities: &PriorityList,
    supply_default: bool,
) -> NegotiationResult {
    let Some(header) = header else {
        return match priorities.first() {
            Some(first) if supply_default => NegotiationResult::Matched(first.to_owned()),
            _ => NegotiationResult::NotAcceptable,
        };
    };

    let accept = AcceptHeader::parse(header);
    match matcher::best(accept.expressions(), priorities) {
        Some(media_type) => NegotiationResult::Matched(media_type.to_owned()),
        None => NegotiationResult::NotAcceptable,
    }
}

/// A configured negotiation policy: what the server offers, in what order,
/// and whether a request with no `Accept` header gets the first offer.
///
/// Immutable once built. Clones share the priority list, so one negotiator
/// can serve any number of concurrent requests.
///
/// ```rust
/// use conneg::{Negotiator, NegotiationResult};
///
/// let negotiator = Negotiator::builder()
///     .priority("application/json")
///     .priority("application/xml")
///     .supply_default(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(negotiator.negotiate(Some("application/*")).media_type(), Some("application/json"));
/// assert_eq!(negotiator.negotiate(Some("text/html")), NegotiationResult::NotAcceptable);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Negotiator {
    priorities: PriorityList,
    supply_default: bool,
}

impl Negotiator {
    pub fn new<I, S>(priorities: I, supply_default: bool) -> Result<Self, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self { priorities: PriorityList::new(priorities)?, supply_default })
    }

    pub fn builder() -> NegotiatorBuilder {
        NegotiatorBuilder::default()
    }

    pub fn priorities(&self) -> &PriorityList { &self.priorities }
    pub fn supplies_default(&self) -> bool { self.supply_default }

    pub fn negotiate(&self, header: Option<&str>) -> NegotiationResult {
        let result = negotiate(header, &self.priorities, self.supply_default);
        debug!(accept = ?header, media_type = ?result.media_type(), "negotiated");
        result
    }

    /// Negotiates on the request's `Accept` header.
    ///
    /// Several `Accept` lines are read as one comma-joined list. Bytes that
    /// are not valid UTF-8 are replaced rather than treated as a missing
    /// header.
    pub fn negotiate_request(&self, req: &Request) -> NegotiationResult {
        let header = accept_header(req);
        self.negotiate(header.as_deref())
    }
}

fn accept_header(req: &Request) -> Option<Cow<'_, str>> {
    let mut values = req.headers().get_all(ACCEPT).iter();
    let first = String::from_utf8_lossy(values.next()?.as_bytes());

    let mut joined: Option<String> = None;
    for value in values {
        let buf = joined.get_or_insert_with(|| first.to_string());
        buf.push_str(", ");
        buf.push_str(&String::from_utf8_lossy(value.as_bytes()));
    }

    Some(joined.map_or(first, Cow::Owned))
}

/// Fluent builder for [`Negotiator`].
///
/// Priorities are validated in [`build`](Self::build), so the first bad
/// entry is reported there.
#[derive(Debug, Default)]
pub struct NegotiatorBuilder {
    priorities: Vec<String>,
    supply_default: bool,
}

impl NegotiatorBuilder {
    /// Appends one media type, less preferred than those already added.
    pub fn priority(mut self, media_type: &str) -> Self {
        self.priorities.push(media_type.to_owned());
        self
    }

    pub fn priorities<I, S>(mut self, media_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.priorities.extend(media_types.into_iter().map(|m| m.as_ref().to_owned()));
        self
    }

    pub fn supply_default(mut self, supply_default: bool) -> Self {
        self.supply_default = supply_default;
        self
    }

    pub fn build(self) -> Result<Negotiator, Error> {
        Negotiator::new(self.priorities, self.supply_default)
    }
}
