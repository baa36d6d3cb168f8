//! Middleware layer.
//!
//! Middleware intercepts a request before it reaches the handler and is the
//! right place for cross-cutting concerns. Each middleware receives the
//! request and a [`Next`] for the rest of the pipeline; it either calls
//! `next.run(req)` or returns a response of its own to stop early.
//!
//! ```text
//!         ┌──────────── Pipeline::call ────────────┐
//! req ──► │ layer N ──► … ──► layer 1 ──► handler  │ ──► Response
//!         └────────────────────────────────────────┘
//! ```
//!
//! The last layer added runs first.
//!
//! Built-in middleware:
//! - [`ContentNegotiation`] — picks a response media type from `Accept` or
//!   answers `406 Not Acceptable`

mod negotiation;

use std::future::Future;
use std::sync::Arc;

use crate::handler::{BoxFuture, BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Response;

pub use negotiation::{ContentNegotiation, NegotiatedMediaType};

/// A step in a [`Pipeline`].
///
/// Implemented for any `Fn(Request, Next) -> impl Future<Output = Response>`,
/// so most middleware is a plain `async` closure:
///
/// ```rust
/// use conneg::{Next, Pipeline, Request, Response};
///
/// async fn handler(_req: Request) -> Response { Response::text("ok") }
///
/// let pipeline = Pipeline::new(handler).layer(|req: Request, next: Next| async move {
///     tracing::info!(path = req.path(), "request");
///     next.run(req).await
/// });
/// ```
pub trait Middleware: Send + Sync + 'static {
    fn handle(&self, req: Request, next: Next) -> BoxFuture;
}

impl<F, Fut> Middleware for F
where
    F: Fn(Request, Next) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Response> + Send + 'static,
{
    fn handle(&self, req: Request, next: Next) -> BoxFuture {
        Box::pin(self(req, next))
    }
}

type BoxedMiddleware = Arc<dyn Middleware>;

/// The remainder of a pipeline, handed to each middleware.
///
/// Consumed by [`run`](Self::run): the rest of the pipeline runs at most once
/// per request.
pub struct Next {
    layers: Arc<[BoxedMiddleware]>,
    endpoint: BoxedHandler,
    // layers[..remaining] have not run yet; the highest index runs next
    remaining: usize,
}

impl Next {
    pub async fn run(self, req: Request) -> Response {
        match self.remaining.checked_sub(1) {
            Some(index) => {
                let layer = Arc::clone(&self.layers[index]);
                let next = Next { remaining: index, ..self };
                layer.handle(req, next).await
            }
            None => self.endpoint.call(req).await,
        }
    }
}

/// A handler wrapped in zero or more middleware layers.
///
/// Build once; share across requests. Cloning is a pair of reference-count
/// bumps.
///
/// ```rust
/// use conneg::{ContentNegotiation, Negotiator, Pipeline, Request, Response};
///
/// async fn render(req: Request) -> Response {
///     Response::builder()
///         .content_type(req.media_type().unwrap_or("text/plain"))
///         .body("hello")
/// }
///
/// let negotiator = Negotiator::new(["text/html", "application/json"], true).unwrap();
/// let app = Pipeline::new(render).layer(ContentNegotiation::new(negotiator));
/// ```
#[derive(Clone)]
pub struct Pipeline {
    layers: Arc<[BoxedMiddleware]>,
    endpoint: BoxedHandler,
}

impl Pipeline {
    pub fn new(handler: impl Handler) -> Self {
        Self {
            layers: Arc::new([]),
            endpoint: handler.into_boxed_handler(),
        }
    }

    /// Wraps the pipeline in `middleware`, which becomes the outermost layer.
    pub fn layer(self, middleware: impl Middleware) -> Self {
        let mut layers = self.layers.to_vec();
        layers.push(Arc::new(middleware));
        Self { layers: layers.into(), endpoint: self.endpoint }
    }

    /// Runs `req` through every layer and the handler.
    pub async fn call(&self, req: Request) -> Response {
        self.next().run(req).await
    }

    fn next(&self) -> Next {
        Next {
            layers: Arc::clone(&self.layers),
            endpoint: Arc::clone(&self.endpoint),
            remaining: self.layers.len(),
        }
    }
}
