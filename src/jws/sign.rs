use alloc::vec::Vec;

use secrecy::{ExposeSecret as _, SecretSlice};
use thiserror::Error;

use crate::{
    crypto::{self, secp256k1, sha256},
    header::JwsHeader,
    jwa::{JsonWebSigningAlgorithm, UnsupportedAlgorithm},
};

/// Errors that may occur while signing a
/// [`JsonWebSignature`](super::JsonWebSignature).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SignError {
    /// The `alg` header parameter names an algorithm this signer can not
    /// produce.
    #[error(transparent)]
    UnsupportedAlgorithm(#[from] UnsupportedAlgorithm),
    /// The cryptographic operation itself failed.
    #[error(transparent)]
    Crypto(#[from] crypto::Error),
}

/// This trait represents anything that can be used to sign a JWS.
///
/// The signer receives the header so it can pick the algorithm named by
/// `alg`, and the exact bytes of the JWS signing input.
pub trait Signer {
    /// Signs the given signing input and returns the raw signature bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the algorithm of the header is not supported by
    /// this signer, or if the signing operation fails.
    fn sign(&self, header: &JwsHeader, signing_input: &[u8]) -> Result<Vec<u8>, SignError>;
}

/// A [`Signer`] for `ES256K` using a secp256k1 private key.
///
/// By default the nonce is derived deterministically as described in
/// [RFC 6979], so signing the same input twice yields the same signature.
/// Additional randomness can be mixed into the nonce using
/// [`with_extra_entropy`](Self::with_extra_entropy).
///
/// [RFC 6979]: <https://datatracker.ietf.org/doc/html/rfc6979>
#[derive(Debug)]
pub struct Es256kSigner {
    private_key: SecretSlice<u8>,
    extra_entropy: bool,
}

impl Es256kSigner {
    /// Creates a signer from a raw 32 byte private key.
    ///
    /// # Errors
    ///
    /// Returns [`crypto::Error::InvalidPrivateKey`] if the key is not a valid
    /// secp256k1 scalar.
    pub fn new(private_key: &[u8]) -> crypto::Result<Self> {
        if !secp256k1::validate_private_key(private_key) {
            return Err(crypto::Error::InvalidPrivateKey);
        }

        Ok(Self {
            private_key: SecretSlice::from(private_key.to_vec()),
            extra_entropy: false,
        })
    }

    /// Enables or disables mixing fresh randomness into every nonce.
    #[must_use]
    pub fn with_extra_entropy(mut self, enabled: bool) -> Self {
        self.extra_entropy = enabled;
        self
    }

    /// The compressed public key belonging to this signer.
    ///
    /// # Errors
    ///
    /// Never fails for a signer created by [`new`](Self::new), as the key
    /// was validated there.
    pub fn public_key(&self) -> crypto::Result<[u8; secp256k1::COMPRESSED_PUBLIC_KEY_LENGTH]> {
        secp256k1::derive_public_key(self.private_key.expose_secret())
    }
}

impl Signer for Es256kSigner {
    fn sign(&self, header: &JwsHeader, signing_input: &[u8]) -> Result<Vec<u8>, SignError> {
        match header.algorithm()? {
            JsonWebSigningAlgorithm::Es256K => {
                let hash = sha256(signing_input);
                let (signature, _) = secp256k1::sign(
                    &hash,
                    self.private_key.expose_secret(),
                    self.extra_entropy,
                )?;
                Ok(signature.to_vec())
            }
        }
    }
}
