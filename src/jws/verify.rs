use alloc::vec::Vec;

use thiserror::Error;

use crate::{
    crypto::{secp256k1, sha256},
    header::JwsHeader,
    jwa::{JsonWebSigningAlgorithm, UnsupportedAlgorithm},
};

/// Errors that may occur while verifying a
/// [`JsonWebSignature`](super::JsonWebSignature).
///
/// A signature that simply does not match is not an error, it makes the
/// verification return `false`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VerifyError {
    /// The `alg` header parameter names an algorithm this verifier does not
    /// know.
    #[error(transparent)]
    UnsupportedAlgorithm(#[from] UnsupportedAlgorithm),
}

/// This trait represents anything that can be used to verify a JWS.
pub trait Verifier {
    /// Checks `signature` against the given signing input.
    ///
    /// # Errors
    ///
    /// Returns an error if the algorithm of the header is not supported by
    /// this verifier.
    fn verify(
        &self,
        header: &JwsHeader,
        signing_input: &[u8],
        signature: &[u8],
    ) -> Result<bool, VerifyError>;
}

/// A [`Verifier`] for `ES256K` using a SEC1 encoded secp256k1 public key.
///
/// The key is not parsed until a signature is checked; a malformed key makes
/// every verification return `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Es256kVerifier {
    public_key: Vec<u8>,
}

impl Es256kVerifier {
    /// Creates a verifier from a compressed (33 bytes) or uncompressed (65
    /// bytes) public key.
    pub fn new(public_key: impl Into<Vec<u8>>) -> Self {
        Self {
            public_key: public_key.into(),
        }
    }

    /// The raw public key of this verifier.
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }
}

impl Verifier for Es256kVerifier {
    fn verify(
        &self,
        header: &JwsHeader,
        signing_input: &[u8],
        signature: &[u8],
    ) -> Result<bool, VerifyError> {
        match header.algorithm()? {
            JsonWebSigningAlgorithm::Es256K => {
                let hash = sha256(signing_input);
                Ok(secp256k1::verify(&hash, signature, &self.public_key))
            }
        }
    }
}
