//! Minimal tsu-request-id example: a handler chain driven by hand.
//!
//! Run with:
//!   cargo run --example basic
//!
//! Every log line emitted inside `get_user` is recorded in the
//! `request{request_id=…}` span, so the first request shows the caller's ID
//! and the second a freshly generated one.

use bytes::Bytes;
use tsu_request_id::middleware::RequestId;
use tsu_request_id::{Endpoint, Request, RequestIdConfig, Response};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_max_level(tracing::Level::TRACE).init();

    // What a host would usually load from its own config file.
    let cfg: RequestIdConfig =
        serde_json::from_str(r#"{"header": "X-Request-Id", "limit": 32, "echo_header": true}"#)
            .expect("invalid request id config");

    let layer = RequestId::try_from_config(&cfg).expect("invalid request id header");
    let endpoint = Endpoint::new(layer.wrap(get_user));

    for inbound in [Some("upstream-7f3a9c"), None] {
        let mut req = http::Request::builder().uri("/users/42");
        if let Some(id) = inbound {
            req = req.header("x-request-id", id);
        }
        let req = req.body(Bytes::new()).expect("invalid request");

        let res = endpoint.call(Request::new(req)).await;
        println!(
            "x-request-id: {}  body: {}",
            res.header("x-request-id").unwrap_or("-"),
            String::from_utf8_lossy(res.body()),
        );
    }
}

// GET /users/:id
async fn get_user(req: Request) -> Response {
    tracing::info!(path = req.path(), "loading user");
    Response::json(format!(r#"{{"id":"42","request_id":"{}"}}"#, req.request_id().unwrap_or("-")))
}
