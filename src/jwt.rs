//! The claims set of a JSON Web Token (JWT) as defined in [RFC 7519]
//!
//! A JWT signed with `ES256K` is a [`JsonWebSignature`](crate::JsonWebSignature)
//! whose payload is the JSON serialization of [`Claims`].
//!
//! ```
//! # use jose_es256k::{jwt::{Claims, NumericDate}, Uri};
//! # fn main() -> Result<(), Box<dyn core::error::Error>> {
//! let mut claims = Claims::new();
//! claims.set_issuer(Uri::parse("did:meta:00000054")?);
//! claims.set_audience("did:meta:11111111");
//! claims.set_expiration_time(NumericDate::from_secs(1568533504));
//!
//! let parsed = Claims::from_base64url(&claims.to_base64url()?)?;
//! assert_eq!(parsed.issuer()?.unwrap().as_str(), "did:meta:00000054");
//! assert_eq!(parsed.audience()?, Some(vec!["did:meta:11111111".to_string()]));
//! # Ok(())
//! # }
//! ```
//!
//! [RFC 7519]: <https://datatracker.ietf.org/doc/html/rfc7519>

use alloc::{
    string::{String, ToString as _},
    vec,
    vec::Vec,
};
use core::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::{
    base64_url::{decode_base64url, encode_base64url, NoBase64UrlString},
    Uri,
};

mod numeric_date;

#[doc(inline)]
pub use self::numeric_date::NumericDate;

const ISS: &str = "iss";
const SUB: &str = "sub";
const AUD: &str = "aud";
const EXP: &str = "exp";
const NBF: &str = "nbf";
const IAT: &str = "iat";
const JTI: &str = "jti";

/// Errors that may occur while working with [`Claims`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The claims are not valid JSON.
    #[error("the claims are not valid JSON")]
    InvalidJson(#[source] serde_json::Error),
    /// The claims are valid JSON but not a JSON object.
    #[error("the claims are not a JSON object")]
    NotAnObject,
    /// The claims are not valid Base64Url.
    #[error(transparent)]
    InvalidEncoding(#[from] NoBase64UrlString),
    /// A claim is present, but its value has the wrong type.
    #[error("claim `{name}` has an invalid value")]
    InvalidClaim {
        /// The name of the claim.
        name: String,
        /// The reason why the value could not be read.
        #[source]
        source: serde_json::Error,
    },
    /// The claims could not be serialized.
    #[error("the claims could not be serialized")]
    Serialize(#[source] serde_json::Error),
}

/// The claims set of a JWT.
///
/// Any JSON value can be stored under any name. The registered claims of
/// [section 4.1 of RFC 7519] have typed accessors; reading one of them
/// returns `Ok(None)` if it is absent and [`Error::InvalidClaim`] if it is
/// present with the wrong type.
///
/// [section 4.1 of RFC 7519]: <https://datatracker.ietf.org/doc/html/rfc7519#section-4.1>
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Claims {
    claims: Map<String, Value>,
}

impl Claims {
    /// Creates an empty claims set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a claims set from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidJson`] if the bytes are not valid JSON, and
    /// [`Error::NotAnObject`] if they are not a JSON object.
    pub fn from_json_bytes(json: &[u8]) -> Result<Self, Error> {
        let value: Value = serde_json::from_slice(json).map_err(Error::InvalidJson)?;

        match value {
            Value::Object(claims) => Ok(Self { claims }),
            _ => Err(Error::NotAnObject),
        }
    }

    /// Parses a claims set from a JSON string.
    ///
    /// # Errors
    ///
    /// Same as [`from_json_bytes`](Self::from_json_bytes).
    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        Self::from_json_bytes(json.as_bytes())
    }

    /// Decodes a Base64Url string and parses the result as JSON claims set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEncoding`] if the input is not valid
    /// Base64Url, otherwise same as [`from_json_bytes`](Self::from_json_bytes).
    pub fn from_base64url(encoded: &str) -> Result<Self, Error> {
        Self::from_json_bytes(&decode_base64url(encoded)?)
    }

    /// All claims.
    pub const fn claims(&self) -> &Map<String, Value> {
        &self.claims
    }

    /// Turns this set into its claims.
    pub fn into_claims(self) -> Map<String, Value> {
        self.claims
    }

    /// Returns the raw value of a claim.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.claims.get(name)
    }

    /// Reads a claim as `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidClaim`] if the claim is present but can not be
    /// read as `T`.
    pub fn claim<'a, T: Deserialize<'a>>(&'a self, name: &str) -> Result<Option<T>, Error> {
        self.claims
            .get(name)
            .map(|value| {
                T::deserialize(value).map_err(|source| Error::InvalidClaim {
                    name: name.to_string(),
                    source,
                })
            })
            .transpose()
    }

    /// Sets a claim and returns its previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.claims.insert(name.into(), value.into())
    }

    /// Removes a claim and returns its value.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.claims.remove(name)
    }

    /// Serializes the claims into JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialize`] if serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        serde_json::to_vec(&self.claims).map_err(Error::Serialize)
    }

    /// Serializes the claims into JSON and encodes the result using
    /// Base64Url.
    ///
    /// # Errors
    ///
    /// Same as [`to_bytes`](Self::to_bytes).
    pub fn to_base64url(&self) -> Result<String, Error> {
        self.to_bytes().map(encode_base64url)
    }

    /// The principal that issued the JWT, serialized as `iss`.
    ///
    /// # Errors
    ///
    /// Fails if the claim is not a string containing a valid URI.
    pub fn issuer(&self) -> Result<Option<Uri>, Error> {
        self.claim(ISS)
    }

    /// Sets the `iss` claim.
    pub fn set_issuer(&mut self, issuer: Uri) {
        self.set(ISS, issuer.into_inner());
    }

    /// The principal that is the subject of the JWT, serialized as `sub`.
    ///
    /// # Errors
    ///
    /// Fails if the claim is not a string.
    pub fn subject(&self) -> Result<Option<&str>, Error> {
        self.claim(SUB)
    }

    /// Sets the `sub` claim.
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.set(SUB, subject.into());
    }

    /// The recipients the JWT is intended for, serialized as `aud`.
    ///
    /// A single string is read as a list with one element.
    ///
    /// # Errors
    ///
    /// Fails if the claim is neither a string nor an array of strings.
    pub fn audience(&self) -> Result<Option<Vec<String>>, Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Audience {
            Single(String),
            Multiple(Vec<String>),
        }

        Ok(self.claim(AUD)?.map(|aud| match aud {
            Audience::Single(aud) => vec![aud],
            Audience::Multiple(aud) => aud,
        }))
    }

    /// Sets the `aud` claim to a list containing only the given recipient.
    pub fn set_audience(&mut self, audience: impl Into<String>) {
        self.set(AUD, vec![audience.into()]);
    }

    /// Sets the `aud` claim to the given recipients.
    pub fn set_audiences(&mut self, audiences: Vec<String>) {
        self.set(AUD, audiences);
    }

    /// The time on or after which the JWT must not be accepted, serialized as
    /// `exp`.
    ///
    /// # Errors
    ///
    /// Fails if the claim is not a non-negative integer.
    pub fn expiration_time(&self) -> Result<Option<NumericDate>, Error> {
        self.claim(EXP)
    }

    /// Sets the `exp` claim.
    pub fn set_expiration_time(&mut self, exp: NumericDate) {
        self.set(EXP, exp.as_secs());
    }

    /// The time before which the JWT must not be accepted, serialized as
    /// `nbf`.
    ///
    /// # Errors
    ///
    /// Fails if the claim is not a non-negative integer.
    pub fn not_before(&self) -> Result<Option<NumericDate>, Error> {
        self.claim(NBF)
    }

    /// Sets the `nbf` claim.
    pub fn set_not_before(&mut self, nbf: NumericDate) {
        self.set(NBF, nbf.as_secs());
    }

    /// The time at which the JWT was issued, serialized as `iat`.
    ///
    /// # Errors
    ///
    /// Fails if the claim is not a non-negative integer.
    pub fn issued_at(&self) -> Result<Option<NumericDate>, Error> {
        self.claim(IAT)
    }

    /// Sets the `iat` claim.
    pub fn set_issued_at(&mut self, iat: NumericDate) {
        self.set(IAT, iat.as_secs());
    }

    /// A unique identifier of the JWT, serialized as `jti`.
    ///
    /// # Errors
    ///
    /// Fails if the claim is not a string.
    pub fn jwt_id(&self) -> Result<Option<&str>, Error> {
        self.claim(JTI)
    }

    /// Sets the `jti` claim.
    pub fn set_jwt_id(&mut self, jti: impl Into<String>) {
        self.set(JTI, jti.into());
    }
}

impl From<Map<String, Value>> for Claims {
    fn from(claims: Map<String, Value>) -> Self {
        Self { claims }
    }
}

impl FromStr for Claims {
    type Err = Error;

    /// Parses JSON claims.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_json_str(s)
    }
}

impl fmt::Display for Claims {
    /// Writes the JSON serialization of the claims.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.claims).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl Serialize for Claims {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.claims.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Claims {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Map::deserialize(deserializer).map(|claims| Self { claims })
    }
}
