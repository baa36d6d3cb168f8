//! A single media-type expression, as found between the commas of an
//! `Accept` header.
//!
//! ```text
//! text/html;level=1;q=0.8
//! ────┬──── ───┬─── ──┬──
//!  essence   param  quality
//! ```
//!
//! Parsing is strict about shape and lenient about weight: a segment that is
//! not `type/subtype[;key=value]*` is rejected, but a `q` value that is not a
//! number in `[0, 1]` quietly becomes `1.0`.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A parsed `type/subtype` with its quality weight and extension parameters.
///
/// Type and subtype are lowercased. Either may be `*`, but `*/subtype` is
/// rejected. The `q` parameter is lifted out into [`quality`](Self::quality);
/// every other parameter is kept, in order, under [`params`](Self::params).
///
/// ```rust
/// use conneg::MediaTypeExpression;
///
/// let expr: MediaTypeExpression = "Text/HTML; Level=1; q=0.5".parse().unwrap();
/// assert_eq!(expr.type_(), "text");
/// assert_eq!(expr.subtype(), "html");
/// assert_eq!(expr.quality(), 0.5);
/// assert_eq!(expr.param("level"), Some("1"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct MediaTypeExpression {
    type_: String,
    subtype: String,
    quality: f32,
    params: Vec<(String, String)>,
}

impl MediaTypeExpression {
    pub fn type_(&self) -> &str { &self.type_ }
    pub fn subtype(&self) -> &str { &self.subtype }
    pub fn quality(&self) -> f32 { self.quality }
    pub fn params(&self) -> &[(String, String)] { &self.params }

    /// Extension parameter lookup. Keys are stored lowercased.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    /// `type/subtype` without parameters.
    pub fn essence(&self) -> String {
        format!("{}/{}", self.type_, self.subtype)
    }

    /// `true` for `type/*` and `*/*`.
    pub fn is_wildcard(&self) -> bool {
        self.subtype == "*"
    }

    /// A `q=0` expression never matches anything. It only vetoes.
    pub fn is_rejection(&self) -> bool {
        self.quality == 0.0
    }

    /// `true` when an explicit `q` parameter was present in the source text.
    /// Only meaningful for validating server priorities.
    pub(crate) fn has_explicit_quality(source: &str) -> bool {
        source.split(';')
            .skip(1)
            .filter_map(|p| p.split_once('='))
            .any(|(k, _)| k.trim().eq_ignore_ascii_case("q"))
    }
}

impl FromStr for MediaTypeExpression {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(';');
        let essence = parts.next().map(str::trim).unwrap_or_default();

        let (type_, subtype) = essence.split_once('/').ok_or(Error::MissingSlash)?;
        let type_ = type_.trim().to_ascii_lowercase();
        let subtype = subtype.trim().to_ascii_lowercase();

        if type_.is_empty() {
            return Err(Error::EmptyType);
        }
        if subtype.is_empty() {
            return Err(Error::EmptySubtype);
        }
        if type_ == "*" && subtype != "*" {
            return Err(Error::WildcardType);
        }

        let mut quality = 1.0;
        let mut params = Vec::new();

        for raw in parts.map(str::trim) {
            // tolerate a trailing `;`
            if raw.is_empty() {
                continue;
            }
            let (key, value) = raw
                .split_once('=')
                .ok_or_else(|| Error::MalformedParameter(raw.to_owned()))?;
            let key = key.trim().to_ascii_lowercase();
            if key.is_empty() {
                return Err(Error::MalformedParameter(raw.to_owned()));
            }
            let value = unquote(value.trim());

            if key == "q" {
                quality = parse_quality(value);
            } else {
                params.push((key, value.to_owned()));
            }
        }

        Ok(Self { type_, subtype, quality, params })
    }
}

impl fmt::Display for MediaTypeExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.type_, self.subtype)?;
        for (k, v) in &self.params {
            write!(f, ";{k}={v}")?;
        }
        if self.quality < 1.0 {
            write!(f, ";q={}", self.quality)?;
        }
        Ok(())
    }
}

/// Out-of-range and non-numeric weights fall back to full preference.
fn parse_quality(value: &str) -> f32 {
    match value.parse::<f32>() {
        Ok(q) if (0.0..=1.0).contains(&q) => q,
        _ => 1.0,
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(s: &str) -> MediaTypeExpression {
        s.parse().unwrap()
    }

    #[rstest]
    fn test_plain_type_defaults_to_full_quality() {
        let expr = parse("application/json");
        assert_eq!(expr.type_(), "application");
        assert_eq!(expr.subtype(), "json");
        assert_eq!(expr.quality(), 1.0);
        assert!(expr.params().is_empty());
    }

    #[rstest]
    fn test_type_and_subtype_are_lowercased() {
        let expr = parse("  TEXT/Html ");
        assert_eq!(expr.essence(), "text/html");
    }

    #[rstest]
    #[case("text/html;q=0.8", 0.8)]
    #[case("text/html; Q=0.25", 0.25)]
    #[case("text/html;q=0", 0.0)]
    #[case("text/html;q=1", 1.0)]
    #[case("text/html;q=1.5", 1.0)]
    #[case("text/html;q=-0.5", 1.0)]
    #[case("text/html;q=abc", 1.0)]
    #[case("text/html;q=NaN", 1.0)]
    #[case("text/html;q=", 1.0)]
    fn test_quality_parsing(#[case] input: &str, #[case] expected: f32) {
        assert_eq!(parse(input).quality(), expected);
    }

    #[rstest]
    fn test_extension_params_are_kept_in_order() {
        let expr = parse(r#"text/html; Level=1; charset="utf-8"; q=0.7"#);
        assert_eq!(
            expr.params(),
            &[
                ("level".to_owned(), "1".to_owned()),
                ("charset".to_owned(), "utf-8".to_owned()),
            ]
        );
        assert_eq!(expr.param("LEVEL"), Some("1"));
        assert_eq!(expr.quality(), 0.7);
    }

    #[rstest]
    fn test_trailing_semicolon_is_tolerated() {
        assert_eq!(parse("text/plain;").essence(), "text/plain");
    }

    #[rstest]
    #[case("text/*", true)]
    #[case("*/*", true)]
    #[case("text/plain", false)]
    fn test_wildcards(#[case] input: &str, #[case] wildcard: bool) {
        assert_eq!(parse(input).is_wildcard(), wildcard);
    }

    #[rstest]
    #[case("", Error::MissingSlash)]
    #[case("texthtml", Error::MissingSlash)]
    #[case("/html", Error::EmptyType)]
    #[case("text/", Error::EmptySubtype)]
    #[case(" / ", Error::EmptyType)]
    #[case("*/html", Error::WildcardType)]
    #[case("text/html;level", Error::MalformedParameter("level".to_owned()))]
    #[case("text/html;=1", Error::MalformedParameter("=1".to_owned()))]
    fn test_malformed_segments_are_rejected(#[case] input: &str, #[case] expected: Error) {
        assert_eq!(input.parse::<MediaTypeExpression>(), Err(expected));
    }

    #[rstest]
    fn test_display_renders_canonical_form() {
        assert_eq!(parse("Text/HTML;Level=1;q=0.5").to_string(), "text/html;level=1;q=0.5");
        assert_eq!(parse("text/html;q=1").to_string(), "text/html");
    }

    #[rstest]
    fn test_rejection() {
        assert!(parse("text/html;q=0").is_rejection());
        assert!(!parse("text/html;q=0.001").is_rejection());
    }

    #[rstest]
    fn test_explicit_quality_detection() {
        assert!(MediaTypeExpression::has_explicit_quality("text/html; Q=0.5"));
        assert!(!MediaTypeExpression::has_explicit_quality("text/html;level=1"));
    }
}
