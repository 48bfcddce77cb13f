//! Request-ID assignment.
//!
//! [`generate_request_id`] is the one step every request goes through before
//! it reaches application code. It decides which identifier the request
//! carries and binds it under [`REQUEST_ID_KEY`]:
//!
//! ```text
//! use_request_id? ──no──────────────────────────────┐
//!      │ yes                                        │
//! ctx[REQUEST_ID_KEY] present? ──no─────────────────┤
//!      │ yes                                        ▼
//! truncate to limit (if > 0)          short_id()  (fresh, 8 chars)
//!      │ empty? ──yes──▶ ──────────────────────────▶│
//!      ▼                                            ▼
//!            ctx.with_value(REQUEST_ID_KEY, id)
//! ```
//!
//! The step never reads headers. Whoever owns the transport puts the inbound
//! value into the context first; [`middleware::RequestId`](crate::middleware::RequestId)
//! does exactly that for tsu handlers.

use tracing::{debug, trace};

use crate::context::{Context, REQUEST_ID_KEY};
use crate::options::RequestIdOptions;
use crate::short_id::short_id;

/// Returns `ctx` extended with this request's identifier.
///
/// With inbound IDs enabled, a `String` already bound under
/// [`REQUEST_ID_KEY`] is reused, cut down to the configured limit. Otherwise,
/// or when that value is empty, a fresh [`short_id`] is generated. The
/// returned context always carries a non-empty identifier; `ctx` itself is
/// not modified.
///
/// # Panics
///
/// Panics if an identifier has to be generated and the OS entropy source
/// fails. See [`short_id`].
///
/// ```rust
/// use tsu_request_id::{
///     Context, REQUEST_ID_KEY, RequestIdOptions, generate_request_id, request_id,
///     request_id_limit, use_request_id,
/// };
///
/// let opts = RequestIdOptions::new([use_request_id(true), request_id_limit(4)]);
/// let inbound = Context::new().with_value(REQUEST_ID_KEY, "abcdef".to_owned());
///
/// let ctx = generate_request_id(&inbound, &opts);
/// assert_eq!(request_id(&ctx), Some("abcd"));
/// ```
pub fn generate_request_id(ctx: &Context, opts: &RequestIdOptions) -> Context {
    let id = inbound_id(ctx, opts)
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| {
            let id = short_id();
            trace!(request_id = %id, "generated request id");
            id
        });

    ctx.with_value(REQUEST_ID_KEY, id)
}

/// The identifier bound in `ctx`, if any.
pub fn request_id(ctx: &Context) -> Option<&str> {
    ctx.value::<String>(REQUEST_ID_KEY).map(String::as_str)
}

fn inbound_id<'a>(ctx: &'a Context, opts: &RequestIdOptions) -> Option<&'a str> {
    if !opts.is_use_request_id() {
        return None;
    }
    let id = request_id(ctx)?;

    let Some(limit) = opts.limit() else {
        trace!(request_id = %id, "using inbound request id");
        return Some(id);
    };

    let truncated = truncate_chars(id, limit);
    if truncated.len() < id.len() {
        debug!(limit, original_len = id.len(), "truncated inbound request id");
    }
    trace!(request_id = %truncated, "using inbound request id");
    Some(truncated)
}

/// The first `limit` characters of `s`; never splits a UTF-8 sequence.
fn truncate_chars(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((end, _)) => &s[..end],
        None => s,
    }
}
