//! # tsu-request-id
//!
//! Per-request correlation identifiers for tsu services.
//!
//! Every request that passes through [`middleware::RequestId`] leaves with
//! exactly one identifier bound in its [`Context`]. Handlers, log lines and
//! traces read it from there to tell which work belongs to which request.
//!
//! ## The contract
//!
//! - **Generate by default.** Each request gets a fresh 8-character,
//!   URL-safe token: 48 random bits, good enough to correlate logs, never
//!   meant as a unique key.
//! - **Trust upstream on request.** With inbound IDs enabled, an ID supplied
//!   by the caller in a header (default `X-Request-Id`) is reused,
//!   optionally truncated to a length limit.
//! - **Never mutate.** The context is an immutable chain; assigning the ID
//!   extends it and returns a new one.
//!
//! What this crate leaves to the transport:
//!
//! - **Routing and serving**: build an [`Endpoint`] and drive it from your
//!   server loop
//! - **Body decoding and error marshaling**: handlers own their bytes
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use bytes::Bytes;
//! use tsu_request_id::middleware::RequestId;
//! use tsu_request_id::{Endpoint, Request, RequestIdOptions, Response, request_id_limit, use_request_id};
//!
//! # async fn run() {
//! let endpoint = Endpoint::new(
//!     RequestId::new(RequestIdOptions::new([use_request_id(true), request_id_limit(64)]))
//!         .echo_header(true)
//!         .wrap(get_user),
//! );
//!
//! let req = http::Request::builder()
//!     .uri("/users/42")
//!     .header("x-request-id", "upstream-7f3a")
//!     .body(Bytes::new())
//!     .unwrap();
//! let res = endpoint.call(Request::new(req)).await;
//! assert_eq!(res.header("x-request-id"), Some("upstream-7f3a"));
//! # }
//!
//! async fn get_user(req: Request) -> Response {
//!     tracing::info!("loading user"); // recorded inside the `request` span
//!     Response::text(format!("served {}", req.request_id().unwrap_or("-")))
//! }
//! ```
//!
//! ## Without the middleware
//!
//! The assignment step is usable on its own by any transport that threads a
//! [`Context`]: bind the inbound value under [`REQUEST_ID_KEY`], then call
//! [`generate_request_id`].

mod config;
mod context;
mod error;
mod handler;
mod options;
mod request;
mod request_id;
mod response;
mod short_id;

pub mod middleware;

pub use config::RequestIdConfig;
pub use context::{Context, Key, REQUEST_ID_KEY};
pub use error::Error;
pub use handler::{Endpoint, Handler};
pub use options::{
    DEFAULT_REQUEST_ID_HEADER, RequestIdOption, RequestIdOptions, request_id_header,
    request_id_limit, use_request_id,
};
pub use request::Request;
pub use request_id::{generate_request_id, request_id};
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use short_id::{SHORT_ID_BYTES, SHORT_ID_LEN, short_id, try_short_id};
