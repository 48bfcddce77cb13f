//! Request-ID configuration.
//!
//! [`RequestIdOptions`] is built once at startup from an ordered list of
//! [`RequestIdOption`]s and never changes afterwards. Options are applied
//! left to right over the default (always generate, no header, no limit);
//! when two options touch the same field, the later one wins.
//!
//! ```rust
//! use tsu_request_id::{RequestIdOptions, request_id_header, request_id_limit};
//!
//! let opts = RequestIdOptions::new([
//!     request_id_header("X-Trace-Id"),
//!     request_id_limit(64),
//! ]);
//!
//! assert!(opts.is_use_request_id());
//! assert_eq!(opts.request_id_header(), "X-Trace-Id");
//! ```
//!
//! # Coupled fields
//!
//! Two options write more than the field they are named after:
//!
//! | Option | Writes |
//! |---|---|
//! | [`use_request_id`] | `use_request_id`, **and** resets the header to [`DEFAULT_REQUEST_ID_HEADER`] |
//! | [`request_id_header`] | the header, **and** `use_request_id = true` |
//!
//! Order therefore matters: `use_request_id(false)` after a custom header
//! turns inbound IDs off *and* discards the custom header name.

/// Header consulted when inbound IDs are enabled without naming a header.
pub const DEFAULT_REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Immutable request-ID configuration.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RequestIdOptions {
    use_request_id: bool,
    request_id_header: String,
    request_id_limit: i64,
}

/// One configuration step. Obtain via [`use_request_id`],
/// [`request_id_header`] or [`request_id_limit`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RequestIdOption {
    UseRequestId(bool),
    Header(String),
    Limit(i64),
}

/// Trust (or stop trusting) an inbound identifier.
///
/// Always resets the header name to [`DEFAULT_REQUEST_ID_HEADER`], even when
/// `enabled` is `false`.
pub fn use_request_id(enabled: bool) -> RequestIdOption {
    RequestIdOption::UseRequestId(enabled)
}

/// Read the inbound identifier from `name`.
///
/// Naming a header implies using it: this also sets `use_request_id = true`.
pub fn request_id_header(name: impl Into<String>) -> RequestIdOption {
    RequestIdOption::Header(name.into())
}

/// Truncate accepted inbound identifiers to `limit` characters.
///
/// Zero or negative means no limit. The value is not validated.
pub fn request_id_limit(limit: i64) -> RequestIdOption {
    RequestIdOption::Limit(limit)
}

impl RequestIdOption {
    /// Applies this step to `o` and returns the result.
    pub fn apply(self, mut o: RequestIdOptions) -> RequestIdOptions {
        match self {
            Self::UseRequestId(enabled) => {
                o.request_id_header = DEFAULT_REQUEST_ID_HEADER.to_owned();
                o.use_request_id = enabled;
            }
            Self::Header(name) => {
                o.request_id_header = name;
                o.use_request_id = true;
            }
            Self::Limit(limit) => o.request_id_limit = limit,
        }
        o
    }
}

impl RequestIdOptions {
    /// Folds `options` over the default configuration, in order.
    pub fn new(options: impl IntoIterator<Item = RequestIdOption>) -> Self {
        options.into_iter().fold(Self::default(), |o, opt| opt.apply(o))
    }

    /// Chainable form of [`use_request_id`]; same coupling applies.
    pub fn with_use_request_id(self, enabled: bool) -> Self {
        use_request_id(enabled).apply(self)
    }

    /// Chainable form of [`request_id_header`]; same coupling applies.
    pub fn with_request_id_header(self, name: impl Into<String>) -> Self {
        request_id_header(name).apply(self)
    }

    /// Chainable form of [`request_id_limit`].
    pub fn with_request_id_limit(self, limit: i64) -> Self {
        request_id_limit(limit).apply(self)
    }

    /// Whether an inbound identifier is trusted instead of always generating.
    pub fn is_use_request_id(&self) -> bool {
        self.use_request_id
    }

    /// The header the transport layer should read the inbound identifier from.
    ///
    /// Empty until an option sets it.
    pub fn request_id_header(&self) -> &str {
        &self.request_id_header
    }

    /// Truncation limit for accepted inbound identifiers; zero or negative
    /// means unlimited.
    pub fn request_id_limit(&self) -> i64 {
        self.request_id_limit
    }

    /// The limit as a character count, or `None` when unlimited.
    pub(crate) fn limit(&self) -> Option<usize> {
        usize::try_from(self.request_id_limit).ok().filter(|&n| n > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_always_generates() {
        let opts = RequestIdOptions::new([]);
        assert!(!opts.is_use_request_id());
        assert_eq!(opts.request_id_header(), "");
        assert_eq!(opts.request_id_limit(), 0);
        assert_eq!(opts.limit(), None);
    }

    #[test]
    fn enabling_sets_default_header() {
        let opts = RequestIdOptions::new([use_request_id(true)]);
        assert!(opts.is_use_request_id());
        assert_eq!(opts.request_id_header(), DEFAULT_REQUEST_ID_HEADER);
    }

    #[test]
    fn header_name_implies_enabled() {
        let opts = RequestIdOptions::new([request_id_header("X-Trace-Id")]);
        assert!(opts.is_use_request_id());
        assert_eq!(opts.request_id_header(), "X-Trace-Id");
    }

    #[test]
    fn disabling_after_header_resets_header() {
        let opts = RequestIdOptions::new([request_id_header("X-Trace-Id"), use_request_id(false)]);
        assert!(!opts.is_use_request_id());
        assert_eq!(opts.request_id_header(), DEFAULT_REQUEST_ID_HEADER);
    }

    #[test]
    fn header_after_enable_keeps_custom_name() {
        let opts = RequestIdOptions::new([use_request_id(true), request_id_header("X-Trace-Id")]);
        assert_eq!(opts.request_id_header(), "X-Trace-Id");
    }

    #[test]
    fn later_limit_overrides_earlier() {
        let opts = RequestIdOptions::new([request_id_limit(4), request_id_limit(16)]);
        assert_eq!(opts.request_id_limit(), 16);
        assert_eq!(opts.limit(), Some(16));
        assert!(!opts.is_use_request_id());
    }

    #[test]
    fn non_positive_limit_means_unlimited() {
        assert_eq!(RequestIdOptions::new([request_id_limit(-3)]).limit(), None);
        assert_eq!(RequestIdOptions::new([request_id_limit(0)]).limit(), None);
    }

    #[test]
    fn chained_form_matches_option_list() {
        let chained = RequestIdOptions::default()
            .with_request_id_header("X-Trace-Id")
            .with_request_id_limit(8);
        let listed = RequestIdOptions::new([request_id_header("X-Trace-Id"), request_id_limit(8)]);
        assert_eq!(chained, listed);
    }

    #[test]
    fn chained_disable_resets_custom_header() {
        let opts = RequestIdOptions::default()
            .with_request_id_header("X-Trace-Id")
            .with_use_request_id(false);
        assert!(!opts.is_use_request_id());
        assert_eq!(opts.request_id_header(), DEFAULT_REQUEST_ID_HEADER);
        assert_eq!(
            opts,
            RequestIdOptions::new([request_id_header("X-Trace-Id"), use_request_id(false)]),
        );
    }
}
