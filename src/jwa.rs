//! JSON Web Algorithms (JWA) as defined in [RFC 7518] and [RFC 8812].
//!
//! Only `ES256K` is implemented. Adding an algorithm means adding a variant
//! to [`JsonWebSigningAlgorithm`] and handling it inside the
//! [`Es256kSigner`](crate::Es256kSigner) and
//! [`Es256kVerifier`](crate::Es256kVerifier) dispatch.
//!
//! [RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518>
//! [RFC 8812]: <https://datatracker.ietf.org/doc/html/rfc8812>

use alloc::string::{String, ToString as _};
use core::{fmt, str::FromStr};

use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// An `alg` value that is not implemented by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported signing algorithm `{0}`")]
pub struct UnsupportedAlgorithm(pub String);

/// A JSON Web Algorithm used to sign a JWS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum JsonWebSigningAlgorithm {
    /// ECDSA using secp256k1 curve and SHA-256
    ///
    /// ECDSA with secp256k1 is defined in [RFC 8812 section 3]
    ///
    /// [RFC 8812 section 3]: <https://datatracker.ietf.org/doc/html/rfc8812#section-3>
    Es256K,
}

impl JsonWebSigningAlgorithm {
    /// The value used for this algorithm in the `alg` header parameter.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Es256K => "ES256K",
        }
    }
}

impl fmt::Display for JsonWebSigningAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JsonWebSigningAlgorithm {
    type Err = UnsupportedAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // algorithm names are case sensitive (RFC 7515 section 4.1.1)
        match s {
            "ES256K" => Ok(Self::Es256K),
            other => Err(UnsupportedAlgorithm(other.to_string())),
        }
    }
}

impl Serialize for JsonWebSigningAlgorithm {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for JsonWebSigningAlgorithm {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let alg = String::deserialize(deserializer)?;
        alg.parse().map_err(D::Error::custom)
    }
}
