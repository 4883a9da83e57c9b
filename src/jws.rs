//! Implementation of JSON Web Signature (JWS) as defined in [RFC 7515]
//!
//! Only the compact serialization is supported. Detached content as
//! described in [Appendix F] can be produced with
//! [`serialize_detached`](JsonWebSignature::serialize_detached) and checked
//! with [`verify_detached`](JsonWebSignature::verify_detached).
//!
//! [RFC 7515]: <https://datatracker.ietf.org/doc/html/rfc7515>
//! [Appendix F]: <https://datatracker.ietf.org/doc/html/rfc7515#appendix-F>

use alloc::{
    string::{String, ToString as _},
    vec::Vec,
};
use core::{fmt, str::FromStr};

use thiserror::Error;

use crate::{
    base64_url::{encode_base64url, NoBase64UrlString},
    format::Compact,
    header::{self, JwsHeader},
};

mod sign;
mod verify;

#[doc(inline)]
pub use self::{
    sign::{Es256kSigner, SignError, Signer},
    verify::{Es256kVerifier, VerifyError, Verifier},
};

/// Errors that may occur while creating, parsing, signing, serializing or
/// verifying a [`JsonWebSignature`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The compact serialization did not consist of exactly three segments.
    #[error("expected 3 dot separated segments, found {found}")]
    SerializedComponents {
        /// The number of segments that were found.
        found: usize,
    },
    /// The header segment is not valid Base64Url.
    #[error("the header segment is not valid Base64Url")]
    InvalidHeaderEncoding(#[source] NoBase64UrlString),
    /// The header is not valid JSON, or misses the `alg` parameter.
    #[error(transparent)]
    Header(#[from] header::Error),
    /// The header could not be serialized into JSON.
    #[error("the header could not be serialized")]
    HeaderSerialization,
    /// The payload segment is not valid Base64Url.
    #[error("the payload segment is not valid Base64Url")]
    InvalidPayload(#[source] NoBase64UrlString),
    /// The signature segment is not valid Base64Url, or there is no
    /// signature to verify.
    #[error("the signature is missing or not valid Base64Url")]
    InvalidSignature,
    /// The JWS has to be signed before it can be serialized.
    #[error("the JWS is not signed yet")]
    NotSigned,
    /// Signing failed.
    #[error(transparent)]
    Sign(#[from] SignError),
    /// Verification failed.
    #[error(transparent)]
    Verify(#[from] VerifyError),
}

/// Representation of a JSON Web Signature (JWS).
///
/// A JWS consists of a [`JwsHeader`], an arbitrary payload and, once signed
/// or parsed, a signature. The signing input, `BASE64URL(header) || '.' ||
/// BASE64URL(payload)`, is fixed when the JWS is created, so the bytes that
/// are signed and the bytes that are serialized are always the same.
///
/// # Example
///
/// ```
/// # use jose_es256k::{crypto::secp256k1, jwa::JsonWebSigningAlgorithm, Es256kSigner, JsonWebSignature, JwsHeader};
/// # fn main() -> Result<(), Box<dyn core::error::Error>> {
/// let key = secp256k1::generate_private_key()?;
///
/// let header = JwsHeader::new(JsonWebSigningAlgorithm::Es256K);
/// let mut jws = JsonWebSignature::new(header, b"abc".to_vec())?;
/// assert!(jws.serialize().is_err());
///
/// jws.sign(&Es256kSigner::new(&*key)?)?;
/// let token = jws.serialize()?;
/// assert!(token.starts_with("eyJhbGciOiJFUzI1NksifQ.YWJj."));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonWebSignature {
    header: JwsHeader,
    payload: Vec<u8>,
    signature: Option<Vec<u8>>,
    signing_input: String,
}

impl JsonWebSignature {
    /// Creates a new, unsigned JWS.
    ///
    /// # Errors
    ///
    /// Returns [`Error::HeaderSerialization`] if the header can not be
    /// serialized.
    pub fn new(header: JwsHeader, payload: impl Into<Vec<u8>>) -> Result<Self, Error> {
        let payload = payload.into();
        let encoded_header = header.to_base64url().ok_or(Error::HeaderSerialization)?;
        let signing_input = signing_input(&encoded_header, &encode_base64url(&payload));

        Ok(Self {
            header,
            payload,
            signature: None,
            signing_input,
        })
    }

    /// Parses a JWS from its compact serialization.
    ///
    /// The signing input is taken verbatim from the first two segments, so
    /// a token produced by another implementation verifies even if its header
    /// is not serialized the way this crate would serialize it.
    ///
    /// # Errors
    ///
    /// Fails if there are not exactly three segments, if any segment is not
    /// valid Base64Url, or if the header is not a JSON object containing
    /// `alg`.
    #[tracing::instrument(level = "debug", skip_all, err(level = "debug"))]
    pub fn parse(compact: &str) -> Result<Self, Error> {
        let compact: Compact = match compact.parse() {
            Ok(compact) => compact,
            Err(never) => match never {},
        };

        if compact.len() != 3 {
            return Err(Error::SerializedComponents {
                found: compact.len(),
            });
        }

        let segment = |idx| compact.part(idx).unwrap_or_default();
        let decode = |idx| compact.decode_part(idx).unwrap_or(Ok(Vec::new()));

        let header = decode(0).map_err(Error::InvalidHeaderEncoding)?;
        let header = JwsHeader::from_bytes(&header)?;
        let payload = decode(1).map_err(Error::InvalidPayload)?;
        let signature = decode(2).map_err(|_| Error::InvalidSignature)?;

        Ok(Self {
            header,
            payload,
            signature: Some(signature),
            signing_input: signing_input(segment(0), segment(1)),
        })
    }

    /// The header of this JWS.
    pub const fn header(&self) -> &JwsHeader {
        &self.header
    }

    /// The payload of this JWS.
    ///
    /// For a parsed JWS with detached content this is empty.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Turns this JWS into its payload.
    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }

    /// The raw signature, if this JWS was signed or parsed.
    pub fn signature(&self) -> Option<&[u8]> {
        self.signature.as_deref()
    }

    /// Whether this JWS carries a signature.
    pub const fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// The exact bytes that are signed: `BASE64URL(header) || '.' ||
    /// BASE64URL(payload)`.
    pub fn signing_input(&self) -> &[u8] {
        self.signing_input.as_bytes()
    }

    /// Signs this JWS, replacing any previous signature.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Sign`] if the signer fails. The previous signature,
    /// if any, is kept in that case.
    pub fn sign(&mut self, signer: &dyn Signer) -> Result<(), Error> {
        let signature = signer.sign(&self.header, self.signing_input())?;

        tracing::debug!(
            alg = self.header.alg(),
            signature_len = signature.len(),
            "signed JWS"
        );

        self.signature = Some(signature);
        Ok(())
    }

    /// Serializes this JWS into the compact format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSigned`] if this JWS has no signature.
    pub fn serialize(&self) -> Result<String, Error> {
        self.serialize_inner(false)
    }

    /// Serializes this JWS into the compact format, leaving the payload
    /// segment empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotSigned`] if this JWS has no signature.
    pub fn serialize_detached(&self) -> Result<String, Error> {
        self.serialize_inner(true)
    }

    fn serialize_inner(&self, detached: bool) -> Result<String, Error> {
        let signature = self.signature.as_ref().ok_or(Error::NotSigned)?;
        let (header, payload) = self.segments();

        let mut compact = Compact::with_capacity(3);
        compact.push_raw(header);
        compact.push_raw(if detached { "" } else { payload });
        compact.push(signature);

        Ok(compact.to_string())
    }

    /// Verifies the signature of this JWS.
    ///
    /// Returns `Ok(false)` if the signature does not match.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSignature`] if there is no signature, and
    /// [`Error::Verify`] if the verifier does not support the algorithm.
    pub fn verify(&self, verifier: &dyn Verifier) -> Result<bool, Error> {
        self.verify_input(self.signing_input(), verifier)
    }

    /// Verifies the signature of this JWS against a detached payload.
    ///
    /// The signing input is rebuilt from the header segment of this JWS and
    /// the given payload; the payload stored inside this JWS is ignored.
    ///
    /// # Errors
    ///
    /// Same as [`verify`](Self::verify).
    pub fn verify_detached(&self, payload: &[u8], verifier: &dyn Verifier) -> Result<bool, Error> {
        let (header, _) = self.segments();
        let input = signing_input(header, &encode_base64url(payload));
        self.verify_input(input.as_bytes(), verifier)
    }

    fn verify_input(&self, input: &[u8], verifier: &dyn Verifier) -> Result<bool, Error> {
        let signature = self.signature.as_deref().ok_or(Error::InvalidSignature)?;
        let valid = verifier.verify(&self.header, input, signature)?;

        if !valid {
            tracing::trace!(alg = self.header.alg(), "JWS signature does not match");
        }

        Ok(valid)
    }

    fn segments(&self) -> (&str, &str) {
        self.signing_input
            .split_once('.')
            .unwrap_or((self.signing_input.as_str(), ""))
    }
}

fn signing_input(header: &str, payload: &str) -> String {
    let mut input = String::with_capacity(header.len() + payload.len() + 1);
    input.push_str(header);
    input.push('.');
    input.push_str(payload);
    input
}

impl FromStr for JsonWebSignature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for JsonWebSignature {
    /// Writes the compact serialization, or the signing input followed by a
    /// `.` if this JWS is not signed yet.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.signing_input)?;
        f.write_str(".")?;

        match &self.signature {
            Some(signature) => f.write_str(&encode_base64url(signature)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString as _, vec};

    use super::*;
    use crate::{crypto::secp256k1, jwa::JsonWebSigningAlgorithm};

    struct FixedSigner(Vec<u8>);

    impl Signer for FixedSigner {
        fn sign(&self, _: &JwsHeader, _: &[u8]) -> Result<Vec<u8>, SignError> {
            Ok(self.0.clone())
        }
    }

    fn header() -> JwsHeader {
        JwsHeader::new(JsonWebSigningAlgorithm::Es256K)
    }

    #[test]
    fn signing_input_is_fixed_at_creation() {
        let jws = JsonWebSignature::new(header(), b"abc".to_vec()).unwrap();
        assert_eq!(jws.signing_input(), b"eyJhbGciOiJFUzI1NksifQ.YWJj");
        assert!(!jws.is_signed());
        assert!(matches!(jws.serialize(), Err(Error::NotSigned)));
        assert!(matches!(jws.serialize_detached(), Err(Error::NotSigned)));
    }

    #[test]
    fn serialize_with_fixed_signature() {
        let mut jws = JsonWebSignature::new(header(), b"abc".to_vec()).unwrap();
        jws.sign(&FixedSigner(vec![0xfb_u8, 0xff])).unwrap();

        assert_eq!(jws.serialize().unwrap(), "eyJhbGciOiJFUzI1NksifQ.YWJj.-_8");
        assert_eq!(
            jws.serialize_detached().unwrap(),
            "eyJhbGciOiJFUzI1NksifQ..-_8"
        );
        assert_eq!(jws.to_string(), "eyJhbGciOiJFUzI1NksifQ.YWJj.-_8");
    }

    #[test]
    fn parse_splits_segments() {
        let jws = JsonWebSignature::parse("eyJhbGciOiJFUzI1NksifQ.YWJj.-_8").unwrap();

        assert_eq!(jws.header().alg(), "ES256K");
        assert_eq!(jws.payload(), b"abc");
        assert_eq!(jws.signature(), Some(&[0xfb_u8, 0xff][..]));
        assert_eq!(jws.signing_input(), b"eyJhbGciOiJFUzI1NksifQ.YWJj");
    }

    #[test]
    fn parse_checks_segment_count_first() {
        for (input, found) in [("a.b", 2), ("a.b.c.d", 4), ("", 1), ("*", 1)] {
            assert!(matches!(
                JsonWebSignature::parse(input),
                Err(Error::SerializedComponents { found: f }) if f == found
            ));
        }
    }

    #[test]
    fn parse_reports_failing_segment() {
        assert!(matches!(
            JsonWebSignature::parse("*.YWJj.YWJj"),
            Err(Error::InvalidHeaderEncoding(_))
        ));
        assert!(matches!(
            JsonWebSignature::parse("YWJj.YWJj.YWJj"),
            Err(Error::Header(header::Error::InvalidJson(_)))
        ));
        assert!(matches!(
            JsonWebSignature::parse("eyJhbGciOiJFUzI1NksifQ.*.YWJj"),
            Err(Error::InvalidPayload(_))
        ));
        assert!(matches!(
            JsonWebSignature::parse("eyJhbGciOiJFUzI1NksifQ.YWJj.*"),
            Err(Error::InvalidSignature)
        ));
    }

    #[test]
    fn verify_without_signature() {
        let jws = JsonWebSignature::new(header(), b"abc".to_vec()).unwrap();
        let verifier = Es256kVerifier::new([0x02_u8; 33]);

        assert!(matches!(
            jws.verify(&verifier),
            Err(Error::InvalidSignature)
        ));
    }

    #[test]
    fn sign_verify_detached() {
        let key = secp256k1::generate_private_key().unwrap();
        let signer = Es256kSigner::new(&*key).unwrap();
        let verifier = Es256kVerifier::new(signer.public_key().unwrap());

        let mut jws = JsonWebSignature::new(header(), b"detached".to_vec()).unwrap();
        jws.sign(&signer).unwrap();
        assert!(jws.verify(&verifier).unwrap());

        let parsed = JsonWebSignature::parse(&jws.serialize_detached().unwrap()).unwrap();
        assert!(parsed.payload().is_empty());
        assert!(!parsed.verify(&verifier).unwrap());
        assert!(parsed.verify_detached(b"detached", &verifier).unwrap());
        assert!(!parsed.verify_detached(b"other", &verifier).unwrap());
    }
}
