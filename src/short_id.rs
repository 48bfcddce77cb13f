//! Short correlation identifiers.
//!
//! Six bytes from the OS CSPRNG, encoded as unpadded URL-safe base64:
//!
//! ```text
//! [u8; 6]  ──URL_SAFE_NO_PAD──▶  "Zm9vYmFy"   (8 chars, [A-Za-z0-9_-])
//! ```
//!
//! 48 bits is plenty to tell concurrent requests apart in a log stream, but
//! it is **not** a unique identifier: birthday collisions become likely
//! after a few million IDs. Use a UUID where uniqueness matters.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::Error;

/// Number of random bytes per identifier.
pub const SHORT_ID_BYTES: usize = 6;

/// Length of an encoded identifier: `ceil(6 * 8 / 6)`.
pub const SHORT_ID_LEN: usize = 8;

/// Generates a short identifier, surfacing entropy-source failures.
pub fn try_short_id() -> Result<String, Error> {
    fill_short_id(&mut OsRng)
}

/// Generates a short identifier.
///
/// # Panics
///
/// Panics if the operating system cannot supply random bytes. An all-zero
/// buffer would yield the same identifier for every request, so there is no
/// degraded fallback.
pub fn short_id() -> String {
    id_or_panic(try_short_id())
}

fn fill_short_id(rng: &mut impl RngCore) -> Result<String, Error> {
    let mut buf = [0u8; SHORT_ID_BYTES];
    rng.try_fill_bytes(&mut buf)?;
    Ok(encode(&buf))
}

fn id_or_panic(id: Result<String, Error>) -> String {
    id.unwrap_or_else(|e| panic!("cannot generate request id: {e}"))
}

fn encode(bytes: &[u8; SHORT_ID_BYTES]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn encoding_is_fixed_length_and_url_safe() {
        assert_eq!(encode(&[0; 6]), "AAAAAAAA");
        assert_eq!(encode(&[0xff; 6]), "________");
        assert_eq!(encode(&[0xfb, 0xef, 0xbe, 0xfb, 0xef, 0xbe]), "--------");
    }

    #[test]
    fn generated_ids_have_expected_shape() {
        for _ in 0..1_000 {
            let id = short_id();
            assert_eq!(id.len(), SHORT_ID_LEN);
            assert!(
                id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'),
                "unexpected character in {id:?}",
            );
        }
    }

    #[test]
    fn no_collisions_across_ten_thousand_ids() {
        let ids: HashSet<String> = (0..10_000).map(|_| short_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    /// An entropy source that never yields bytes.
    struct Exhausted;

    impl RngCore for Exhausted {
        fn next_u32(&mut self) -> u32 { unreachable!() }
        fn next_u64(&mut self) -> u64 { unreachable!() }
        fn fill_bytes(&mut self, _: &mut [u8]) { unreachable!() }

        fn try_fill_bytes(&mut self, _: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("entropy pool exhausted"))
        }
    }

    #[test]
    fn exhausted_entropy_is_an_error() {
        let err = fill_short_id(&mut Exhausted).unwrap_err();
        assert!(err.to_string().starts_with("entropy:"), "got {err}");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    #[should_panic(expected = "cannot generate request id")]
    fn exhausted_entropy_panics_instead_of_degrading() {
        id_or_panic(fill_short_id(&mut Exhausted));
    }

    #[test]
    fn fallible_form_succeeds_on_a_healthy_system() {
        assert_eq!(try_short_id().unwrap().len(), SHORT_ID_LEN);
    }
}
