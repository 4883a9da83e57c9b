//! JSON Web Signatures (JWS) and JSON Web Tokens (JWT) signed with the
//! `ES256K` algorithm, ECDSA over the secp256k1 curve using SHA-256 as
//! described in [RFC 8812].
//!
//! A [`JsonWebSignature`] is created from a [`JwsHeader`] and an arbitrary
//! payload, signed using a [`Signer`], and serialized into the compact
//! format. Parsing the compact format again yields a signed
//! [`JsonWebSignature`] that can be checked using a [`Verifier`].
//!
//! ```
//! # fn main() -> Result<(), Box<dyn core::error::Error>> {
//! use jose_es256k::{
//!     crypto::secp256k1, jwa::JsonWebSigningAlgorithm, Es256kSigner, Es256kVerifier,
//!     JsonWebSignature, JwsHeader,
//! };
//!
//! let private_key = secp256k1::generate_private_key()?;
//! let public_key = secp256k1::derive_public_key(&*private_key)?;
//!
//! let mut header = JwsHeader::new(JsonWebSigningAlgorithm::Es256K);
//! header.set_key_id("did:example:123#key-1");
//!
//! let mut jws = JsonWebSignature::new(header, b"abc".to_vec())?;
//! jws.sign(&Es256kSigner::new(&*private_key)?)?;
//! let token = jws.serialize()?;
//!
//! let parsed = JsonWebSignature::parse(&token)?;
//! assert!(parsed.verify(&Es256kVerifier::new(public_key))?);
//! # Ok(())
//! # }
//! ```
//!
//! [RFC 8812]: <https://datatracker.ietf.org/doc/html/rfc8812#section-3>
#![warn(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    explicit_outlives_requirements,
    clippy::missing_const_for_fn,
    clippy::missing_errors_doc
)]
#![deny(
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    macro_use_extern_crate,
    non_ascii_idents,
    elided_lifetimes_in_paths
)]
#![forbid(unsafe_code)]
#![no_std]

extern crate alloc;
#[cfg(any(feature = "std", test))]
extern crate std;

pub(crate) mod base64_url;

pub mod crypto;
pub mod format;
pub mod header;
pub mod jwa;
pub mod jws;
pub mod jwt;
mod uri;

#[doc(inline)]
pub use self::{
    base64_url::{decode_base64url, encode_base64url, NoBase64UrlString},
    header::JwsHeader,
    jws::{Es256kSigner, Es256kVerifier, JsonWebSignature, Signer, Verifier},
    jwt::Claims,
    uri::{InvalidUri, Uri},
};

/// Type alias to make `JsonWebSignature` easier to access.
pub type JWS = JsonWebSignature;

/// Type alias to make the JWT [`Claims`] easier to access.
pub type JWT = Claims;
