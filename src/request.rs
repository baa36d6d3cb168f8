//! Incoming HTTP request type.

use bytes::Bytes;
use http::{Extensions, HeaderMap, Method, Uri};
use http::request::Parts;

use crate::middleware::NegotiatedMediaType;

/// An incoming HTTP request as it travels down a [`Pipeline`](crate::Pipeline).
///
/// Wraps the `http` crate's request head and a fully buffered body. Request
/// scoped state set by middleware lives in [`extensions`](Self::extensions).
///
/// ```rust
/// use conneg::Request;
///
/// let req = Request::from(
///     http::Request::get("/users/7")
///         .header("accept", "application/json")
///         .body("")
///         .unwrap(),
/// );
/// assert_eq!(req.path(), "/users/7");
/// assert_eq!(req.header("Accept"), Some("application/json"));
/// ```
#[derive(Debug)]
pub struct Request {
    head: Parts,
    body: Bytes,
}

impl Request {
    pub fn method(&self) -> &Method { &self.head.method }
    pub fn uri(&self) -> &Uri { &self.head.uri }
    pub fn path(&self) -> &str { self.head.uri.path() }
    pub fn headers(&self) -> &HeaderMap { &self.head.headers }
    pub fn body(&self) -> &Bytes { &self.body }
    pub fn extensions(&self) -> &Extensions { &self.head.extensions }
    pub fn extensions_mut(&mut self) -> &mut Extensions { &mut self.head.extensions }

    /// Case-insensitive header lookup. Returns the first value.
    ///
    /// `None` when the header is missing *or* its value is not visible ASCII;
    /// use [`headers`](Self::headers) to tell those apart.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The media type chosen by [`ContentNegotiation`](crate::ContentNegotiation),
    /// if it ran on this request.
    pub fn media_type(&self) -> Option<&str> {
        self.head.extensions
            .get::<NegotiatedMediaType>()
            .map(NegotiatedMediaType::as_str)
    }

    pub fn into_inner(self) -> http::Request<Bytes> {
        http::Request::from_parts(self.head, self.body)
    }
}

impl<B: Into<Bytes>> From<http::Request<B>> for Request {
    fn from(req: http::Request<B>) -> Self {
        let (head, body) = req.into_parts();
        Self { head, body: body.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn request(accept: Option<&str>) -> Request {
        let mut builder = http::Request::post("/orders?page=2");
        if let Some(accept) = accept {
            builder = builder.header(http::header::ACCEPT, accept);
        }
        Request::from(builder.body("payload").unwrap())
    }

    #[rstest]
    fn test_accessors() {
        let req = request(Some("text/html"));
        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.path(), "/orders");
        assert_eq!(req.uri().query(), Some("page=2"));
        assert_eq!(req.body().as_ref(), b"payload");
        assert_eq!(req.header("ACCEPT"), Some("text/html"));
    }

    #[rstest]
    fn test_absent_and_empty_headers_differ() {
        assert_eq!(request(None).header("accept"), None);
        assert_eq!(request(Some("")).header("accept"), Some(""));
    }

    #[rstest]
    fn test_media_type_reads_extension() {
        let mut req = request(None);
        assert_eq!(req.media_type(), None);
        req.extensions_mut().insert(NegotiatedMediaType::new("application/json"));
        assert_eq!(req.media_type(), Some("application/json"));
    }

    #[rstest]
    fn test_into_inner_round_trips_head_and_body() {
        let inner = request(Some("*/*")).into_inner();
        assert_eq!(inner.uri().path(), "/orders");
        assert_eq!(inner.body().as_ref(), b"payload");
    }
}
