//! Declarative request-ID configuration.
//!
//! Hosts that keep their settings in a file can embed [`RequestIdConfig`] in
//! their own config struct and convert it at startup:
//!
//! ```rust
//! use tsu_request_id::{RequestIdConfig, RequestIdOptions};
//!
//! let cfg = RequestIdConfig {
//!     header: Some("X-Trace-Id".into()),
//!     limit: 64,
//!     ..Default::default()
//! };
//! let opts = RequestIdOptions::from(&cfg);
//! assert!(opts.is_use_request_id());
//! ```

use serde::Deserialize;

use crate::options::{
    RequestIdOption, RequestIdOptions, request_id_header, request_id_limit, use_request_id,
};

/// Serde-friendly mirror of [`RequestIdOptions`] plus middleware settings.
///
/// Every field is optional in the source document. `header` implies
/// `use_request_id`, exactly like [`request_id_header`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct RequestIdConfig {
    /// Trust an inbound identifier.
    pub use_request_id: bool,

    /// Header carrying the inbound identifier (e.g. "X-Trace-Id").
    pub header: Option<String>,

    /// Truncate accepted identifiers to this many characters; 0 = no limit.
    pub limit: i64,

    /// Stamp the identifier onto the response.
    pub echo_header: bool,
}

impl RequestIdConfig {
    /// The equivalent option list, in application order.
    pub fn options(&self) -> Vec<RequestIdOption> {
        let mut options = Vec::with_capacity(3);
        if self.use_request_id {
            options.push(use_request_id(true));
        }
        if let Some(name) = &self.header {
            options.push(request_id_header(name.clone()));
        }
        options.push(request_id_limit(self.limit));
        options
    }
}

impl From<&RequestIdConfig> for RequestIdOptions {
    fn from(cfg: &RequestIdConfig) -> Self {
        RequestIdOptions::new(cfg.options())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DEFAULT_REQUEST_ID_HEADER;

    #[test]
    fn empty_document_yields_defaults() {
        let cfg: RequestIdConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, RequestIdConfig::default());
        assert_eq!(RequestIdOptions::from(&cfg), RequestIdOptions::default());
    }

    #[test]
    fn enabled_without_header_uses_default_header() {
        let cfg: RequestIdConfig = serde_json::from_str(r#"{"use_request_id": true}"#).unwrap();
        let opts = RequestIdOptions::from(&cfg);
        assert!(opts.is_use_request_id());
        assert_eq!(opts.request_id_header(), DEFAULT_REQUEST_ID_HEADER);
    }

    #[test]
    fn header_implies_enabled() {
        let cfg: RequestIdConfig = serde_json::from_str(
            r#"{"use_request_id": false, "header": "X-Trace-Id", "limit": 16, "echo_header": true}"#,
        )
        .unwrap();
        let opts = RequestIdOptions::from(&cfg);

        assert!(cfg.echo_header);
        assert!(opts.is_use_request_id());
        assert_eq!(opts.request_id_header(), "X-Trace-Id");
        assert_eq!(opts.request_id_limit(), 16);
    }
}
