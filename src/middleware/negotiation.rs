//! `Accept`-driven content negotiation as a pipeline step.

use http::StatusCode;
use tracing::debug;

use crate::handler::BoxFuture;
use crate::middleware::{Middleware, Next};
use crate::negotiator::{NegotiationResult, Negotiator};
use crate::request::Request;
use crate::response::Response;

/// The negotiated media type, stored in request extensions.
///
/// Handlers usually read it through [`Request::media_type`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NegotiatedMediaType(String);

impl NegotiatedMediaType {
    pub fn new(media_type: impl Into<String>) -> Self {
        Self(media_type.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Middleware that negotiates the response media type for every request.
///
/// On a match the chosen type is attached as [`NegotiatedMediaType`] and the
/// request continues down the pipeline. Otherwise the pipeline stops here
/// with an empty `406 Not Acceptable`.
///
/// ```rust
/// # async fn run() {
/// use conneg::{ContentNegotiation, Negotiator, Pipeline, Request, Response};
/// use http::StatusCode;
///
/// async fn render(req: Request) -> Response {
///     Response::text(req.media_type().unwrap_or_default().to_owned())
/// }
///
/// let negotiator = Negotiator::new(["application/json"], false).unwrap();
/// let app = Pipeline::new(render).layer(ContentNegotiation::new(negotiator));
///
/// let req = http::Request::get("/").header("accept", "text/html").body("").unwrap();
/// assert_eq!(app.call(req.into()).await.status_code(), StatusCode::NOT_ACCEPTABLE);
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ContentNegotiation {
    negotiator: Negotiator,
}

impl ContentNegotiation {
    pub fn new(negotiator: Negotiator) -> Self {
        Self { negotiator }
    }

    pub fn negotiator(&self) -> &Negotiator {
        &self.negotiator
    }
}

impl From<Negotiator> for ContentNegotiation {
    fn from(negotiator: Negotiator) -> Self {
        Self::new(negotiator)
    }
}

impl Middleware for ContentNegotiation {
    fn handle(&self, mut req: Request, next: Next) -> BoxFuture {
        match self.negotiator.negotiate_request(&req) {
            NegotiationResult::Matched(media_type) => {
                req.extensions_mut().insert(NegotiatedMediaType(media_type));
                Box::pin(next.run(req))
            }
            NegotiationResult::NotAcceptable => {
                debug!(path = req.path(), "no acceptable media type, responding 406");
                Box::pin(async { Response::status(StatusCode::NOT_ACCEPTABLE) })
            }
        }
    }
}
