//! Helpers for base64 urlsafe encoded stuff

use alloc::{string::String, vec::Vec};

use base64ct::{Base64UrlUnpadded, Encoding};
use thiserror::Error;

/// Error type indicating that a string is not a valid, unpadded Base64Url
/// representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("the string is not a valid Base64Url representation")]
pub struct NoBase64UrlString;

/// Encodes the given bytes using the URL-safe base64 alphabet without any
/// `=` padding.
///
/// ```
/// assert_eq!(jose_es256k::encode_base64url([0xfb_u8, 0xff]), "-_8");
/// ```
#[inline]
pub fn encode_base64url(bytes: impl AsRef<[u8]>) -> String {
    Base64UrlUnpadded::encode_string(bytes.as_ref())
}

/// Decodes a URL-safe base64 string.
///
/// Padding is optional, but if present it must be complete: the padded
/// string is a multiple of 4 long and ends in at most two `=`. An empty
/// string decodes to an empty byte vector, which is a valid result and not a
/// failure.
///
/// # Errors
///
/// Returns [`NoBase64UrlString`] if the string contains characters outside
/// of the URL-safe alphabet, if the padding is wrong, or if its length can
/// not be produced by any encoding.
pub fn decode_base64url(s: &str) -> Result<Vec<u8>, NoBase64UrlString> {
    let unpadded = s.trim_end_matches('=');
    let padding = s.len() - unpadded.len();

    if padding > 2 || (padding > 0 && s.len() % 4 != 0) {
        return Err(NoBase64UrlString);
    }

    decode_base64url_unpadded(unpadded)
}

/// Decodes a URL-safe base64 string that must not carry any `=` padding, as
/// required for the segments of the compact serialization.
pub(crate) fn decode_base64url_unpadded(s: &str) -> Result<Vec<u8>, NoBase64UrlString> {
    Base64UrlUnpadded::decode_vec(s).map_err(|_| NoBase64UrlString)
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn encode_uses_url_alphabet_without_padding() {
        assert_eq!(encode_base64url(b"abc"), "YWJj");
        assert_eq!(encode_base64url(b"ab"), "YWI");
        assert_eq!(encode_base64url([0xfb_u8, 0xef, 0xff]), "--__");
        assert_eq!(encode_base64url(b""), "");
    }

    #[test]
    fn decode_accepts_unpadded_and_padded() {
        assert_eq!(decode_base64url("YWI").unwrap(), b"ab");
        assert_eq!(decode_base64url("YWI=").unwrap(), b"ab");
        assert_eq!(decode_base64url("YQ==").unwrap(), b"a");
        assert_eq!(decode_base64url("--__").unwrap(), vec![0xfb, 0xef, 0xff]);
    }

    #[test]
    fn decode_empty_is_valid() {
        assert_eq!(decode_base64url("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn decode_rejects_invalid_input() {
        // standard alphabet is not accepted
        assert_eq!(decode_base64url("++//"), Err(NoBase64UrlString));
        // a single trailing character can never be produced
        assert_eq!(decode_base64url("YWJjZ"), Err(NoBase64UrlString));
        assert_eq!(decode_base64url("Y==="), Err(NoBase64UrlString));
        assert_eq!(decode_base64url("a b"), Err(NoBase64UrlString));
    }

    #[test]
    fn decode_rejects_incomplete_or_excess_padding() {
        assert_eq!(decode_base64url("YWJj=="), Err(NoBase64UrlString));
        assert_eq!(decode_base64url("YWI=="), Err(NoBase64UrlString));
        assert_eq!(decode_base64url("YQ="), Err(NoBase64UrlString));
        assert_eq!(decode_base64url("YWJj===="), Err(NoBase64UrlString));
        assert_eq!(decode_base64url("===="), Err(NoBase64UrlString));
    }

    #[test]
    fn unpadded_decode_rejects_padding() {
        assert_eq!(decode_base64url_unpadded("YWI").unwrap(), b"ab");
        assert_eq!(decode_base64url_unpadded("YWI="), Err(NoBase64UrlString));
    }
}
