//! Middleware layer.
//!
//! Middleware intercepts requests and responses and is the right place for
//! cross-cutting concerns. A middleware takes a [`Handler`](crate::Handler)
//! and returns a new one, so layers nest:
//!
//! ```rust
//! use tsu_request_id::middleware::RequestId;
//! use tsu_request_id::{Endpoint, Request, RequestIdOptions, Response, use_request_id};
//!
//! async fn hello(req: Request) -> Response {
//!     Response::text(format!("hello from {}", req.request_id().unwrap_or("-")))
//! }
//!
//! let endpoint = Endpoint::new(
//!     RequestId::new(RequestIdOptions::new([use_request_id(true)]))
//!         .echo_header(true)
//!         .wrap(hello),
//! );
//! ```
//!
//! Built-in middleware:
//! - [`RequestId`]: per-request correlation identifier, bound in the request
//!   context and attached to a `request` tracing span

mod request_id;

pub use request_id::RequestId;
