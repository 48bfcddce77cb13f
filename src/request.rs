//! Incoming HTTP request type.

use bytes::Bytes;
use http::{HeaderMap, Method};

use crate::context::Context;

/// An incoming HTTP request, plus the [`Context`] accumulated for it so far.
///
/// The transport builds one from the decoded `http::Request` and hands it to
/// the handler chain. Middleware extends the context; handlers read from it.
pub struct Request {
    pub(crate) inner: http::Request<Bytes>,
    pub(crate) ctx: Context,
}

impl Request {
    /// Wraps a decoded request with an empty context.
    pub fn new(inner: http::Request<Bytes>) -> Self {
        Self { inner, ctx: Context::new() }
    }

    /// Wraps a decoded request with a context the transport already started.
    pub fn with_context(inner: http::Request<Bytes>, ctx: Context) -> Self {
        Self { inner, ctx }
    }

    pub fn method(&self) -> &Method { self.inner.method() }
    pub fn path(&self) -> &str { self.inner.uri().path() }
    pub fn headers(&self) -> &HeaderMap { self.inner.headers() }
    pub fn body(&self) -> &[u8] { self.inner.body() }
    pub fn context(&self) -> &Context { &self.ctx }

    /// Case-insensitive header lookup. Values that are not visible ASCII read
    /// as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// The identifier assigned by [`RequestId`](crate::middleware::RequestId),
    /// or `None` if the middleware did not run.
    pub fn request_id(&self) -> Option<&str> {
        crate::request_id::request_id(&self.ctx)
    }

    /// Unwraps back into the decoded request and its context.
    pub fn into_parts(self) -> (http::Request<Bytes>, Context) {
        (self.inner, self.ctx)
    }
}
