//! # conneg
//!
//! `Accept`-header content negotiation for HTTP request pipelines.
//! Nothing more. Nothing less.
//!
//! ## The contract
//!
//! The server lists the media types it can produce, most preferred first.
//! The client sends an `Accept` header. conneg picks one, or says
//! `406 Not Acceptable`.
//!
//! - **Server order wins.** Among the types the client accepts, the one the
//!   server listed first is chosen, whatever the client's `q` values say.
//! - **`q=0` is a veto.** A type the client refuses is never chosen, not
//!   even through a wildcard.
//! - **No header is not an empty header.** A request without `Accept` may be
//!   given the first priority as a default; `Accept:` with nothing in it
//!   never matches.
//!
//! Transport, routing, and server setup are someone else's job. conneg
//! speaks the `http` crate's types so it slots into whatever stack you run.
//!
//! ## Quick start
//!
//! ```rust
//! use conneg::{ContentNegotiation, Negotiator, Pipeline, Request, Response};
//!
//! # async fn run() {
//! let negotiator = Negotiator::builder()
//!     .priority("text/html")
//!     .priority("application/json")
//!     .supply_default(true)
//!     .build()
//!     .unwrap();
//!
//! let app = Pipeline::new(render).layer(ContentNegotiation::new(negotiator));
//!
//! let req = http::Request::get("/")
//!     .header("accept", "application/json, text/html;q=0.5")
//!     .body("")
//!     .unwrap();
//! let res = app.call(req.into()).await;
//! assert_eq!(res.header("content-type"), Some("text/html"));
//! # }
//!
//! async fn render(req: Request) -> Response {
//!     // ContentNegotiation only lets a request through with a media type set
//!     let media_type = req.media_type().unwrap_or("text/plain");
//!     Response::builder().content_type(media_type).body("hello")
//! }
//! ```
//!
//! The negotiation itself is a pure function and can be used on its own:
//!
//! ```rust
//! use conneg::{negotiate, PriorityList};
//!
//! let priorities = PriorityList::new(["application/json"]).unwrap();
//! let result = negotiate(Some("application/*;q=0.3"), &priorities, false);
//! assert_eq!(result.media_type(), Some("application/json"));
//! ```

mod accept;
mod error;
mod handler;
mod media_type;
mod negotiator;
mod priority;
mod request;
mod response;

pub mod matcher;
pub mod middleware;

pub use accept::AcceptHeader;
pub use error::Error;
pub use handler::{BoxFuture, Handler};
pub use matcher::{Candidate, Specificity};
pub use media_type::MediaTypeExpression;
pub use middleware::{ContentNegotiation, Middleware, NegotiatedMediaType, Next, Pipeline};
pub use negotiator::{negotiate, NegotiationResult, Negotiator, NegotiatorBuilder};
pub use priority::PriorityList;
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
