//! Matching client expressions against the server priority list.
//!
//! # Ranking
//!
//! Each server entry is scored on its own, in priority order:
//!
//! 1. Collect every client expression that covers it — `text/html` is
//!    covered by `text/html`, `text/*` and `*/*`.
//! 2. Keep the most specific of those (exact > `type/*` > `*/*`), and among
//!    equally specific ones the highest quality.
//! 3. If that winning quality is `0` the client has vetoed the entry, even
//!    when a broader wildcard would have accepted it.
//!
//! The answer is the most preferred *server* entry that survives. Client
//! quality only decides whether an entry is acceptable, not which acceptable
//! entry wins:
//!
//! ```text
//! priorities: text/html, application/json
//! Accept:     application/json, text/html;q=0.5
//!                                   ↓
//!             text/html (rank 0, q 0.5) ← chosen
//!             application/json (rank 1, q 1.0)
//! ```

use crate::media_type::MediaTypeExpression;
use crate::priority::{Priority, PriorityList};

/// How precisely a client expression names a server media type.
///
/// Variants are declared least to most specific so `Ord` ranks them.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Specificity {
    /// `*/*`
    Any,
    /// `type/*`
    Type,
    /// `type/subtype`
    Exact,
}

impl Specificity {
    /// How `expr` covers the concrete `type_/subtype`, or `None` if it does not.
    pub fn of(expr: &MediaTypeExpression, type_: &str, subtype: &str) -> Option<Self> {
        match (expr.type_(), expr.subtype()) {
            ("*", "*") => Some(Self::Any),
            (t, "*") if t.eq_ignore_ascii_case(type_) => Some(Self::Type),
            (t, s) if t.eq_ignore_ascii_case(type_) && s.eq_ignore_ascii_case(subtype) => {
                Some(Self::Exact)
            }
            _ => None,
        }
    }
}

/// An acceptable server entry.
#[derive(Clone, Debug, PartialEq)]
pub struct Candidate<'p> {
    /// The server media type as configured.
    pub media_type: &'p str,
    /// Position in the priority list; `0` is most preferred.
    pub rank: usize,
    /// Quality of the client expression that decided this entry.
    pub quality: f32,
    /// How that client expression matched.
    pub specificity: Specificity,
}

/// Every acceptable server entry, most preferred first.
///
/// Vetoed and unmatched entries are left out. An empty `clients` slice
/// accepts nothing.
pub fn candidates<'p>(
    clients: &[MediaTypeExpression],
    priorities: &'p PriorityList,
) -> Vec<Candidate<'p>> {
    acceptable(clients, priorities).collect()
}

/// The single best server entry for `clients`, or `None` when nothing is
/// acceptable.
pub fn best<'p>(clients: &[MediaTypeExpression], priorities: &'p PriorityList) -> Option<&'p str> {
    // Ranks ascend, so the first acceptable entry is the most preferred one.
    // A duplicated entry can only repeat a lower-ranked earlier one.
    acceptable(clients, priorities).next().map(|c| c.media_type)
}

fn acceptable<'a, 'p: 'a>(
    clients: &'a [MediaTypeExpression],
    priorities: &'p PriorityList,
) -> impl Iterator<Item = Candidate<'p>> + 'a {
    priorities.entries()
        .iter()
        .enumerate()
        .filter_map(move |(rank, priority)| {
            let (specificity, quality) = decide(clients, priority)?;
            (quality > 0.0).then_some(Candidate {
                media_type: priority.value.as_str(),
                rank,
                quality,
                specificity,
            })
        })
}

/// The deciding client expression for one server entry: most specific first,
/// then highest quality.
fn decide(clients: &[MediaTypeExpression], priority: &Priority) -> Option<(Specificity, f32)> {
    let (type_, subtype) = (priority.media.type_(), priority.media.subtype());
    clients.iter()
        .filter_map(|c| Specificity::of(c, type_, subtype).map(|s| (s, c.quality())))
        .max_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accept::AcceptHeader;
    use rstest::rstest;

    fn priorities(entries: &[&str]) -> PriorityList {
        PriorityList::new(entries).unwrap()
    }

    fn best_for(header: &str, entries: &[&str]) -> Option<String> {
        let accept = AcceptHeader::parse(header);
        best(accept.expressions(), &priorities(entries)).map(str::to_owned)
    }

    #[rstest]
    #[case("text/html", Some(Specificity::Exact))]
    #[case("TEXT/HTML", Some(Specificity::Exact))]
    #[case("text/*", Some(Specificity::Type))]
    #[case("*/*", Some(Specificity::Any))]
    #[case("text/plain", None)]
    #[case("image/*", None)]
    fn test_specificity(#[case] expr: &str, #[case] expected: Option<Specificity>) {
        let expr: MediaTypeExpression = expr.parse().unwrap();
        assert_eq!(Specificity::of(&expr, "text", "html"), expected);
    }

    #[rstest]
    fn test_specificity_ordering() {
        assert!(Specificity::Exact > Specificity::Type);
        assert!(Specificity::Type > Specificity::Any);
    }

    #[rstest]
    fn test_server_order_beats_client_quality() {
        let got = best_for("application/json, text/html;q=0.5", &["text/html", "application/json"]);
        assert_eq!(got.as_deref(), Some("text/html"));
    }

    #[rstest]
    fn test_full_wildcard_picks_most_preferred() {
        assert_eq!(best_for("*/*", &["application/xml", "text/html"]).as_deref(), Some("application/xml"));
    }

    #[rstest]
    fn test_type_wildcard_skips_other_types() {
        let got = best_for("text/*", &["application/json", "text/csv", "text/html"]);
        assert_eq!(got.as_deref(), Some("text/csv"));
    }

    #[rstest]
    fn test_zero_quality_is_a_veto() {
        assert_eq!(best_for("application/json;q=0", &["application/json"]), None);
    }

    #[rstest]
    fn test_specific_veto_overrides_wildcard() {
        let got = best_for("text/html;q=0, */*", &["text/html", "application/json"]);
        assert_eq!(got.as_deref(), Some("application/json"));
    }

    #[rstest]
    fn test_specific_accept_overrides_wildcard_veto() {
        let got = best_for("*/*;q=0, application/json;q=0.1", &["text/html", "application/json"]);
        assert_eq!(got.as_deref(), Some("application/json"));
    }

    #[rstest]
    fn test_highest_quality_wins_within_same_specificity() {
        let accept = AcceptHeader::parse("text/html;q=0, text/html;q=0.4");
        let list = priorities(&["text/html"]);
        let found = candidates(accept.expressions(), &list);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].quality, 0.4);
    }

    #[rstest]
    fn test_no_clients_match_nothing() {
        assert_eq!(best(&[], &priorities(&["text/html"])), None);
    }

    #[rstest]
    fn test_empty_priorities_match_nothing() {
        assert_eq!(best_for("*/*", &[]), None);
    }

    #[rstest]
    fn test_case_insensitive_match_returns_configured_spelling() {
        let got = best_for("application/JSON", &["Application/Json"]);
        assert_eq!(got.as_deref(), Some("Application/Json"));
    }

    #[rstest]
    fn test_parameters_do_not_affect_matching() {
        let got = best_for("text/html;level=2", &["text/html; charset=utf-8"]);
        assert_eq!(got.as_deref(), Some("text/html; charset=utf-8"));
    }

    #[rstest]
    fn test_candidates_lists_every_acceptable_entry_in_priority_order() {
        let accept = AcceptHeader::parse("text/*;q=0.3, application/json, image/png;q=0");
        let list = priorities(&["image/png", "application/json", "text/html", "text/csv"]);
        let found = candidates(accept.expressions(), &list);

        let summary: Vec<_> = found.iter()
            .map(|c| (c.media_type, c.rank, c.quality, c.specificity))
            .collect();
        assert_eq!(
            summary,
            [
                ("application/json", 1, 1.0, Specificity::Exact),
                ("text/html", 2, 0.3, Specificity::Type),
                ("text/csv", 3, 0.3, Specificity::Type),
            ]
        );
    }

    #[rstest]
    fn test_duplicate_priorities_first_occurrence_wins() {
        let accept = AcceptHeader::parse("text/html");
        let list = priorities(&["text/html", "text/html"]);
        let found = candidates(accept.expressions(), &list);
        assert_eq!(found[0].rank, 0);
        assert_eq!(best(accept.expressions(), &list), Some("text/html"));
    }
}
