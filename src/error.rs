//! Unified error type.

use std::fmt;

/// The error type returned by the fallible identifier generator.
///
/// Request-ID assignment itself never fails: inbound values are truncated and
/// header names defaulted silently. The only fault this type surfaces is the
/// operating system's entropy source refusing to hand out bytes, which
/// [`try_short_id`](crate::try_short_id) reports instead of emitting a
/// degenerate identifier.
#[derive(Debug)]
pub struct Error(rand::Error);

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entropy: {}", self.0)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

impl From<rand::Error> for Error {
    fn from(e: rand::Error) -> Self {
        Self(e)
    }
}
