//! Cryptographic primitives.
//!
//! Everything `ES256K` needs is implemented on top of the [RustCrypto]
//! ecosystem: the [`secp256k1`] module contains the ECDSA engine, this module
//! contains the common error type, SHA-256 and access to the secure random
//! source of the operating system.
//!
//! None of the primitives keep state between calls, so all of them can be
//! used from any number of threads at the same time.
//!
//! [RustCrypto]: https://github.com/RustCrypto

pub mod secp256k1;

use rand_core::{OsRng, RngCore as _};
use sha2::{Digest as _, Sha256};
use thiserror::Error;

/// The result type used for cryptographic operations.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The errors that can be produced by the cryptographic primitives.
// TODO: remove the `cfg_attr` once the RustCrypto crates implement
// the core::error::Error trait.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The message digest to sign was not exactly 32 bytes long.
    #[error("expected a 32 byte message digest, got {0} bytes")]
    InvalidDigestLength(usize),

    /// The private key is not 32 bytes long, zero, or not smaller than the
    /// curve order.
    #[error("invalid secp256k1 private key")]
    InvalidPrivateKey,

    /// The public key is not a valid SEC1 encoded point on the curve.
    #[error("invalid secp256k1 public key")]
    InvalidPublicKey,

    /// The signature is not 64 bytes long or one of its scalars is out of
    /// range.
    #[error("invalid secp256k1 signature")]
    InvalidSignature,

    /// The underlying ECDSA signing operation failed.
    #[cfg_attr(feature = "std", error("an ECDSA signing operation failed"))]
    #[cfg_attr(not(feature = "std"), error("an ECDSA signing operation failed: {0}"))]
    Signing(#[cfg_attr(feature = "std", source)] signature::Error),

    /// The secure random source of the operating system did not deliver
    /// usable randomness.
    #[error("the secure random source is unavailable")]
    RandomUnavailable,
}

/// Fills the given buffer with random data from the operating system.
#[inline]
pub(crate) fn fill_random(buf: &mut [u8]) -> Result<()> {
    OsRng.try_fill_bytes(buf).map_err(|err| {
        tracing::warn!(%err, "secure random source failed");
        Error::RandomUnavailable
    })
}

/// Performs a quick Sha256 of the given data.
#[inline]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_of_abc() {
        let digest = sha256(b"abc");
        assert_eq!(
            digest[..4],
            [0xba, 0x78, 0x16, 0xbf],
            "well known SHA-256 test vector"
        );
        assert_eq!(digest[28..], [0xf2, 0x00, 0x15, 0xad]);
    }

    #[test]
    fn random_fills_buffer() {
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        fill_random(&mut a).unwrap();
        fill_random(&mut b).unwrap();
        assert_ne!(a, b);
    }
}
