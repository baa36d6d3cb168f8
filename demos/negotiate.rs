//! Content negotiation in front of a handler that renders three formats.
//!
//! Run with:
//!   cargo run --example negotiate
//!
//! Each request below is pushed through the pipeline in-process; the log
//! shows which media type was negotiated, or the 406.

use conneg::{ContentNegotiation, Negotiator, Pipeline, Request, Response};
use http::header::ACCEPT;
use tracing::info;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let negotiator = Negotiator::builder()
        .priorities(["text/html", "application/json", "text/plain"])
        .supply_default(true)
        .build()
        .expect("static priorities are valid");

    let app = Pipeline::new(render).layer(ContentNegotiation::new(negotiator));

    let accepts = [
        None,
        Some(""),
        Some("*/*"),
        Some("application/json"),
        Some("application/json, text/html;q=0.5"),
        Some("text/html;q=0, text/*"),
        Some("image/webp, image/*;q=0.8"),
    ];

    for accept in accepts {
        let mut req = http::Request::get("/greeting");
        if let Some(accept) = accept {
            req = req.header(ACCEPT, accept);
        }
        let req = req.body("").expect("valid request");

        let res = app.call(Request::from(req)).await;
        info!(
            ?accept,
            status = %res.status_code(),
            body = %String::from_utf8_lossy(res.body()),
            "served",
        );
    }
}

// GET /greeting in whatever format negotiation settled on.
async fn render(req: Request) -> Response {
    let media_type = req.media_type().unwrap_or("text/plain");
    let body = match media_type {
        "text/html"        => "<p>hello</p>".to_owned(),
        "application/json" => r#"{"greeting":"hello"}"#.to_owned(),
        _                  => "hello".to_owned(),
    };
    Response::builder().content_type(media_type).body(body)
}
