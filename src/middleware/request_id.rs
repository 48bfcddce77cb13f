//! Request-ID middleware.
//!
//! Per request, the wrapped handler:
//!
//! 1. reads the configured header, when inbound IDs are enabled, and binds
//!    a non-blank value under [`REQUEST_ID_KEY`];
//! 2. runs [`generate_request_id`] over that context;
//! 3. calls the inner handler inside a `request` span carrying the ID;
//! 4. optionally stamps the ID onto the response.

use std::sync::Arc;

use http::header::{HeaderName, HeaderValue, InvalidHeaderName};
use tracing::{Instrument, info_span};

use crate::config::RequestIdConfig;
use crate::context::REQUEST_ID_KEY;
use crate::handler::{BoxedHandler, ErasedHandler, Handler};
use crate::options::{DEFAULT_REQUEST_ID_HEADER, RequestIdOptions};
use crate::request::Request;
use crate::request_id::generate_request_id;
use crate::response::Response;

/// Assigns every request a correlation identifier.
///
/// Build it once at startup and [`wrap`](RequestId::wrap) the handler chain.
#[derive(Clone, Debug)]
pub struct RequestId {
    options: RequestIdOptions,
    echo: Option<HeaderName>,
}

impl RequestId {
    pub fn new(options: RequestIdOptions) -> Self {
        Self { options, echo: None }
    }

    /// Builds the middleware from a deserialized [`RequestIdConfig`],
    /// including its `echo_header` setting.
    ///
    /// Fails when `echo_header` is set and the configured header is not a
    /// valid HTTP header name.
    pub fn try_from_config(cfg: &RequestIdConfig) -> Result<Self, InvalidHeaderName> {
        Self::new(RequestIdOptions::from(cfg)).try_echo_header(cfg.echo_header)
    }

    /// Panicking form of [`try_from_config`](RequestId::try_from_config).
    ///
    /// # Panics
    ///
    /// Panics if `echo_header` is set and the configured header is not a
    /// valid HTTP header name.
    pub fn from_config(cfg: &RequestIdConfig) -> Self {
        Self::new(RequestIdOptions::from(cfg)).echo_header(cfg.echo_header)
    }

    /// Stamp the identifier onto every response.
    ///
    /// The response header is the configured request-ID header, or
    /// [`DEFAULT_REQUEST_ID_HEADER`] when none is configured.
    ///
    /// # Panics
    ///
    /// Panics if the configured header name is not a valid HTTP header name.
    pub fn echo_header(self, enabled: bool) -> Self {
        let name = self.echo_name().to_owned();
        self.try_echo_header(enabled)
            .unwrap_or_else(|e| panic!("invalid request id header `{name}`: {e}"))
    }

    /// Fallible form of [`echo_header`](RequestId::echo_header).
    pub fn try_echo_header(mut self, enabled: bool) -> Result<Self, InvalidHeaderName> {
        self.echo = if enabled { Some(HeaderName::try_from(self.echo_name())?) } else { None };
        Ok(self)
    }

    fn echo_name(&self) -> &str {
        match self.options.request_id_header() {
            "" => DEFAULT_REQUEST_ID_HEADER,
            name => name,
        }
    }

    pub fn options(&self) -> &RequestIdOptions {
        &self.options
    }

    /// Wraps `handler`, returning a handler that assigns the ID first.
    pub fn wrap(self, handler: impl Handler) -> impl Handler {
        let inner = handler.into_boxed_handler();
        let layer = Arc::new(self);
        move |req: Request| {
            let inner = Arc::clone(&inner);
            let layer = Arc::clone(&layer);
            async move { layer.handle(&inner, req).await }
        }
    }

    async fn handle(&self, inner: &BoxedHandler, req: Request) -> Response {
        let req = self.assign(req);
        let id = req.request_id().unwrap_or_default().to_owned();

        let span = info_span!(
            "request",
            request_id = %id,
            method = %req.method(),
            path = req.path(),
        );
        let mut res = inner.call(req).instrument(span).await;

        if let Some(name) = &self.echo
            && let Ok(value) = HeaderValue::from_str(&id)
        {
            res.set_header(name.clone(), value);
        }
        res
    }

    /// Seeds the context from the inbound header, then binds the final ID.
    fn assign(&self, mut req: Request) -> Request {
        let mut ctx = req.ctx.clone();
        if self.options.is_use_request_id() {
            let inbound = req
                .header(self.options.request_id_header())
                .map(str::trim)
                .filter(|v| !v.is_empty());
            if let Some(id) = inbound {
                ctx = ctx.with_value(REQUEST_ID_KEY, id.to_owned());
            }
        }
        req.ctx = generate_request_id(&ctx, &self.options);
        req
    }
}
