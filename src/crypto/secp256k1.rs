//! ECDSA over the secp256k1 curve.
//!
//! Keys and signatures cross this API as plain bytes:
//!
//! - private keys are 32 byte big endian scalars in the range `1..n`
//! - public keys are SEC1 encoded points, either compressed (33 bytes) or
//!   uncompressed (65 bytes)
//! - signatures are the 64 byte compact `R || S` encoding, without DER
//!
//! Signatures created by [`sign`] are always in low-S form. Signatures that
//! are [parsed](parse_signature) are normalized to low-S as well, so
//! [`verify`] accepts both encodings of the same signature.

use core::fmt;

use elliptic_curve::sec1::ToEncodedPoint as _;
use k256::{
    ecdsa::{Signature, SigningKey, VerifyingKey},
    SecretKey,
};
use rand_core::OsRng;
use signature::hazmat::{PrehashSigner, PrehashVerifier, RandomizedPrehashSigner};
use zeroize::Zeroizing;

use super::{fill_random, Error, Result};

/// Length of a private key in bytes.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Length of the message digest that is signed.
pub const DIGEST_LENGTH: usize = 32;

/// Length of a serialized compact signature.
pub const SIGNATURE_LENGTH: usize = 64;

/// Length of a SEC1 compressed public key.
pub const COMPRESSED_PUBLIC_KEY_LENGTH: usize = 33;

/// Length of a SEC1 uncompressed public key.
pub const UNCOMPRESSED_PUBLIC_KEY_LENGTH: usize = 65;

const MAX_KEY_GENERATION_ATTEMPTS: usize = 1024;

/// A parsed ECDSA signature.
///
/// A [`RawSignature`] is always in low-S form.
#[derive(Clone, PartialEq, Eq)]
pub struct RawSignature(Signature);

impl RawSignature {
    /// Returns the 64 byte compact encoding of this signature.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        serialize_signature(self)
    }
}

impl fmt::Debug for RawSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawSignature").field(&self.0).finish()
    }
}

/// A public key that was parsed and is known to be a valid curve point.
#[derive(Clone, PartialEq, Eq)]
pub struct RawPublicKey(VerifyingKey);

impl RawPublicKey {
    /// Returns the SEC1 compressed encoding of this key.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_PUBLIC_KEY_LENGTH] {
        let mut out = [0u8; COMPRESSED_PUBLIC_KEY_LENGTH];
        out.copy_from_slice(self.0.to_encoded_point(true).as_bytes());
        out
    }

    /// Returns the SEC1 uncompressed encoding of this key.
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH] {
        let mut out = [0u8; UNCOMPRESSED_PUBLIC_KEY_LENGTH];
        out.copy_from_slice(self.0.to_encoded_point(false).as_bytes());
        out
    }
}

impl fmt::Debug for RawPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPublicKey")
            .field(&crate::encode_base64url(self.to_compressed()))
            .finish()
    }
}

fn secret_key(bytes: &[u8]) -> Result<SecretKey> {
    if bytes.len() != PRIVATE_KEY_LENGTH {
        return Err(Error::InvalidPrivateKey);
    }

    SecretKey::from_slice(bytes).map_err(|_| Error::InvalidPrivateKey)
}

fn normalize(signature: Signature) -> Signature {
    signature.normalize_s().unwrap_or(signature)
}

/// Generates a new private key from the secure random source of the
/// operating system.
///
/// Random bytes are drawn until they form a valid scalar. The returned buffer
/// is wiped when it is dropped.
///
/// # Errors
///
/// Returns [`Error::RandomUnavailable`] if no valid key could be drawn from
/// the random source within 1024 attempts.
pub fn generate_private_key() -> Result<Zeroizing<[u8; PRIVATE_KEY_LENGTH]>> {
    let mut candidate = Zeroizing::new([0u8; PRIVATE_KEY_LENGTH]);

    for _ in 0..MAX_KEY_GENERATION_ATTEMPTS {
        if fill_random(&mut candidate[..]).is_err() {
            continue;
        }

        if validate_private_key(&candidate[..]) {
            return Ok(candidate);
        }
    }

    Err(Error::RandomUnavailable)
}

/// Checks that `private_key` is exactly 32 bytes long and a valid, non-zero
/// scalar smaller than the curve order.
pub fn validate_private_key(private_key: &[u8]) -> bool {
    secret_key(private_key).is_ok()
}

/// Derives the SEC1 compressed public key of the given private key.
///
/// # Errors
///
/// Returns [`Error::InvalidPrivateKey`] if the private key is not valid.
pub fn derive_public_key(private_key: &[u8]) -> Result<[u8; COMPRESSED_PUBLIC_KEY_LENGTH]> {
    let key = secret_key(private_key)?;
    let point = key.public_key().to_encoded_point(true);

    point
        .as_bytes()
        .try_into()
        .map_err(|_| Error::InvalidPrivateKey)
}

/// Signs a 32 byte message digest.
///
/// The nonce is derived deterministically as described in [RFC 6979]. If
/// `use_extra_entropy` is set, 32 bytes of fresh randomness are mixed into
/// the nonce derivation, so signing the same digest twice yields different
/// signatures.
///
/// Returns the 64 byte compact signature together with its parsed form. The
/// signature is always in low-S form.
///
/// # Errors
///
/// Fails if `hash` is not 32 bytes long, if the private key is invalid, or if
/// the signing operation itself fails. A failed signing operation is not
/// retried.
///
/// [RFC 6979]: <https://www.rfc-editor.org/rfc/rfc6979>
pub fn sign(
    hash: &[u8],
    private_key: &[u8],
    use_extra_entropy: bool,
) -> Result<([u8; SIGNATURE_LENGTH], RawSignature)> {
    if hash.len() != DIGEST_LENGTH {
        return Err(Error::InvalidDigestLength(hash.len()));
    }

    let key = SigningKey::from(secret_key(private_key)?);

    let signature = if use_extra_entropy {
        RandomizedPrehashSigner::<Signature>::sign_prehash_with_rng(&key, &mut OsRng, hash)
    } else {
        PrehashSigner::<Signature>::sign_prehash(&key, hash)
    }
    .map_err(|err| {
        tracing::debug!(%err, "ECDSA signing failed");
        Error::Signing(err)
    })?;

    let raw = RawSignature(normalize(signature));
    Ok((serialize_signature(&raw), raw))
}

/// Serializes the signature into the 64 byte compact `R || S` form.
pub fn serialize_signature(signature: &RawSignature) -> [u8; SIGNATURE_LENGTH] {
    let mut out = [0u8; SIGNATURE_LENGTH];
    out.copy_from_slice(&signature.0.to_bytes());
    out
}

/// Parses a 64 byte compact signature and normalizes it into low-S form.
///
/// # Errors
///
/// Returns [`Error::InvalidSignature`] if the input is not 64 bytes long, or
/// if `R` or `S` is zero or not smaller than the curve order.
pub fn parse_signature(signature: &[u8]) -> Result<RawSignature> {
    if signature.len() != SIGNATURE_LENGTH {
        return Err(Error::InvalidSignature);
    }

    Signature::from_slice(signature)
        .map(|sig| RawSignature(normalize(sig)))
        .map_err(|_| Error::InvalidSignature)
}

/// Parses a SEC1 encoded public key, either compressed or uncompressed.
///
/// # Errors
///
/// Returns [`Error::InvalidPublicKey`] if the input has neither length, if
/// the tag byte does not match the length (`0x02`/`0x03` for 33 bytes, `0x04`
/// for 65 bytes), or if it does not encode a point on the curve.
pub fn parse_public_key(public_key: &[u8]) -> Result<RawPublicKey> {
    let valid_tag = match (public_key.len(), public_key.first()) {
        (COMPRESSED_PUBLIC_KEY_LENGTH, Some(0x02 | 0x03)) => true,
        (UNCOMPRESSED_PUBLIC_KEY_LENGTH, Some(0x04)) => true,
        _ => false,
    };

    if !valid_tag {
        return Err(Error::InvalidPublicKey);
    }

    VerifyingKey::from_sec1_bytes(public_key)
        .map(RawPublicKey)
        .map_err(|_| Error::InvalidPublicKey)
}

/// Verifies a compact signature over a 32 byte message digest.
///
/// This never fails: a digest or signature of the wrong length, an
/// unparsable signature or public key, and a signature that does not match
/// all result in `false`.
pub fn verify(hash: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
    if hash.len() != DIGEST_LENGTH || signature.len() != SIGNATURE_LENGTH {
        tracing::trace!(
            hash_len = hash.len(),
            signature_len = signature.len(),
            "rejecting signature with invalid length"
        );
        return false;
    }

    let signature = match parse_signature(signature) {
        Ok(signature) => signature,
        Err(err) => {
            tracing::trace!(%err, "rejecting signature");
            return false;
        }
    };

    let key = match parse_public_key(public_key) {
        Ok(key) => key,
        Err(err) => {
            tracing::trace!(%err, "rejecting signature");
            return false;
        }
    };

    PrehashVerifier::<Signature>::verify_prehash(&key.0, hash, &signature.0).is_ok()
}
