//! [`JwsHeader`] as defined in [section 4 of RFC 7515].
//!
//! The header is a bag of parameters backed by a JSON object. The only
//! parameter that must always be present is `alg`; all registered parameters
//! have typed accessors in addition to the untyped [`get`](JwsHeader::get)
//! and [`set`](JwsHeader::set).
//!
//! [section 4 of RFC 7515]: <https://datatracker.ietf.org/doc/html/rfc7515#section-4>

use alloc::{
    collections::BTreeMap,
    string::{String, ToString as _},
    vec::Vec,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

mod error;
mod parameters;

#[doc(inline)]
pub use self::error::Error;
use crate::jwa::{JsonWebSigningAlgorithm, UnsupportedAlgorithm};

const ALG: &str = "alg";

/// The JOSE header of a JSON Web Signature.
///
/// Parameters are serialized with their keys in lexicographic order, so two
/// headers with the same parameters always produce byte identical JSON, no
/// matter in which order the parameters were inserted.
///
/// # Example
///
/// ```
/// # use jose_es256k::{JwsHeader, jwa::JsonWebSigningAlgorithm};
/// # fn main() -> Result<(), jose_es256k::header::Error> {
/// let mut header = JwsHeader::new(JsonWebSigningAlgorithm::Es256K);
/// header.set_key_id("did:meta:00000054#ManagementKey#848594325849485");
///
/// let parsed = JwsHeader::from_bytes(&header.to_bytes().unwrap())?;
/// assert_eq!(parsed.alg(), "ES256K");
/// assert_eq!(
///     parsed.key_id()?,
///     Some("did:meta:00000054#ManagementKey#848594325849485")
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwsHeader {
    parameters: Map<String, Value>,
}

impl JwsHeader {
    /// Creates a header that only contains the `alg` parameter.
    pub fn new(alg: JsonWebSigningAlgorithm) -> Self {
        let mut parameters = Map::new();
        parameters.insert(ALG.to_string(), Value::String(alg.as_str().to_string()));
        Self { parameters }
    }

    /// Creates a header from the given parameters.
    ///
    /// The value of `alg` is not checked against the implemented algorithms
    /// here; an unknown algorithm is reported when signing or verifying.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingParameter`] if there is no `alg` parameter, or
    /// if it is not a string.
    pub fn from_parameters(parameters: Map<String, Value>) -> Result<Self, Error> {
        match parameters.get(ALG) {
            Some(Value::String(_)) => Ok(Self { parameters }),
            _ => Err(Error::MissingParameter(ALG.to_string())),
        }
    }

    /// Parses a header from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidJson`] if the bytes are not valid JSON,
    /// [`Error::NotAnObject`] if the top level value is not an object, and
    /// [`Error::MissingParameter`] if `alg` is absent.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let value: Value = serde_json::from_slice(bytes).map_err(Error::InvalidJson)?;

        match value {
            Value::Object(parameters) => Self::from_parameters(parameters),
            _ => Err(Error::NotAnObject),
        }
    }

    /// The value of the `alg` parameter.
    pub fn alg(&self) -> &str {
        self.parameters
            .get(ALG)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// The algorithm named by `alg`, if it is implemented by this crate.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedAlgorithm`] if `alg` names an unknown algorithm.
    pub fn algorithm(&self) -> Result<JsonWebSigningAlgorithm, UnsupportedAlgorithm> {
        self.alg().parse()
    }

    /// Replaces the `alg` parameter.
    pub fn set_algorithm(&mut self, alg: JsonWebSigningAlgorithm) {
        self.insert(ALG, alg.as_str());
    }

    /// All parameters of this header.
    pub const fn parameters(&self) -> &Map<String, Value> {
        &self.parameters
    }

    /// Turns this header into its parameters.
    pub fn into_parameters(self) -> Map<String, Value> {
        self.parameters
    }

    /// Returns the raw value of a parameter.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.parameters.get(name)
    }

    /// Reads a parameter as `T`.
    ///
    /// Returns `Ok(None)` if the parameter is absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the parameter is present but can
    /// not be read as `T`.
    pub fn parameter<'a, T: Deserialize<'a>>(&'a self, name: &str) -> Result<Option<T>, Error> {
        self.parameters
            .get(name)
            .map(|value| {
                T::deserialize(value).map_err(|source| Error::InvalidParameter {
                    name: name.to_string(),
                    source,
                })
            })
            .transpose()
    }

    /// Sets a parameter and returns its previous value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingParameter`] if `alg` would be set to something
    /// other than a string.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Option<Value>, Error> {
        let name = name.into();
        let value = value.into();

        if name == ALG && !value.is_string() {
            return Err(Error::MissingParameter(name));
        }

        Ok(self.parameters.insert(name, value))
    }

    /// Removes a parameter and returns its value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingParameter`] when trying to remove `alg`.
    pub fn remove(&mut self, name: &str) -> Result<Option<Value>, Error> {
        if name == ALG {
            return Err(Error::MissingParameter(name.to_string()));
        }

        Ok(self.parameters.remove(name))
    }

    pub(crate) fn insert(&mut self, name: &str, value: impl Into<Value>) {
        self.parameters.insert(name.to_string(), value.into());
    }

    /// Serializes this header into JSON with sorted keys.
    ///
    /// Returns `None` if serialization fails, which can not happen for a
    /// header made of JSON values.
    pub fn to_bytes(&self) -> Option<Vec<u8>> {
        serde_json::to_vec(self).ok()
    }

    /// Serializes this header into JSON with sorted keys, and encodes it
    /// using Base64Url.
    pub fn to_base64url(&self) -> Option<String> {
        self.to_bytes().map(crate::encode_base64url)
    }
}

/// Serializes a JSON value with the keys of every object sorted, no matter
/// how the underlying map orders them.
struct Canonical<'a>(&'a Value);

impl Serialize for Canonical<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Value::Object(map) => sorted(map).serialize(serializer),
            Value::Array(items) => serializer.collect_seq(items.iter().map(Canonical)),
            other => other.serialize(serializer),
        }
    }
}

fn sorted(map: &Map<String, Value>) -> BTreeMap<&str, Canonical<'_>> {
    map.iter()
        .map(|(k, v)| (k.as_str(), Canonical(v)))
        .collect()
}

impl Serialize for JwsHeader {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        sorted(&self.parameters).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for JwsHeader {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let parameters = Map::deserialize(deserializer)?;
        Self::from_parameters(parameters).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn new_contains_only_alg() {
        let header = JwsHeader::new(JsonWebSigningAlgorithm::Es256K);
        assert_eq!(header.to_bytes().unwrap(), br#"{"alg":"ES256K"}"#);
        assert_eq!(header.to_base64url().unwrap(), "eyJhbGciOiJFUzI1NksifQ");
    }

    #[test]
    fn keys_are_sorted() {
        let header = JwsHeader::from_parameters(object(json!({
            "typ": "JWT",
            "kid": "X",
            "alg": "ES256K",
            "b": { "z": 1, "a": [{ "y": 2, "x": 1 }] },
        })))
        .unwrap();

        assert_eq!(
            header.to_bytes().unwrap(),
            br#"{"alg":"ES256K","b":{"a":[{"x":1,"y":2}],"z":1},"kid":"X","typ":"JWT"}"#
        );
    }

    #[test]
    fn alg_is_required() {
        let err = JwsHeader::from_parameters(object(json!({ "kid": "X" }))).unwrap_err();
        assert!(matches!(err, Error::MissingParameter(ref p) if p == "alg"));

        let err = JwsHeader::from_parameters(object(json!({ "alg": 1 }))).unwrap_err();
        assert!(matches!(err, Error::MissingParameter(_)));

        let err = JwsHeader::from_bytes(br#"{"typ":"JWT"}"#).unwrap_err();
        assert!(matches!(err, Error::MissingParameter(_)));
    }

    #[test]
    fn from_bytes_errors() {
        assert!(matches!(
            JwsHeader::from_bytes(b"{\"alg\":").unwrap_err(),
            Error::InvalidJson(_)
        ));
        assert!(matches!(
            JwsHeader::from_bytes(br#"["alg","ES256K"]"#).unwrap_err(),
            Error::NotAnObject
        ));
    }

    #[test]
    fn unknown_alg_is_kept() {
        let header = JwsHeader::from_bytes(br#"{"alg":"HS256"}"#).unwrap();
        assert_eq!(header.alg(), "HS256");
        assert_eq!(
            header.algorithm(),
            Err(UnsupportedAlgorithm("HS256".into()))
        );
    }

    #[test]
    fn alg_can_not_be_removed() {
        let mut header = JwsHeader::new(JsonWebSigningAlgorithm::Es256K);

        assert!(header.remove("alg").is_err());
        assert!(header.set("alg", 5).is_err());
        assert_eq!(header.alg(), "ES256K");

        header.set("foo", vec![1, 2]).unwrap();
        assert_eq!(header.remove("foo").unwrap(), Some(json!([1, 2])));
    }

    #[test]
    fn typed_parameter_mismatch() {
        let header =
            JwsHeader::from_parameters(object(json!({ "alg": "ES256K", "kid": 7 }))).unwrap();

        assert!(matches!(
            header.key_id(),
            Err(Error::InvalidParameter { ref name, .. }) if name == "kid"
        ));
        assert_eq!(header.media_type().unwrap(), None);
    }

    #[test]
    fn serde_round_trip() {
        let mut header = JwsHeader::new(JsonWebSigningAlgorithm::Es256K);
        header.set_media_type("JWT");

        let json = serde_json::to_string(&header).unwrap();
        assert_eq!(json, r#"{"alg":"ES256K","typ":"JWT"}"#);
        assert_eq!(serde_json::from_str::<JwsHeader>(&json).unwrap(), header);
        assert!(serde_json::from_str::<JwsHeader>(r#"{"typ":"JWT"}"#).is_err());
    }
}
