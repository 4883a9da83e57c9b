use alloc::string::String;
use core::{fmt, ops::Deref, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The error returned if a string is not a valid URI reference according to
/// [RFC 3986].
///
/// [RFC 3986]: <https://datatracker.ietf.org/doc/html/rfc3986>
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{0}` is not a valid URI")]
pub struct InvalidUri(pub String);

/// A URI as used by the `jku` and `x5u` header parameters and the `iss`
/// claim.
///
/// The inner string is validated using [`fluent_uri`], so `did:` URIs and
/// `https:` URLs are both accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Uri(String);

impl Uri {
    /// Validates the given string and wraps it.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidUri`] if the string is not a valid URI.
    pub fn parse(s: impl Into<String>) -> Result<Self, InvalidUri> {
        let s = s.into();

        match fluent_uri::Uri::parse(s.as_str()) {
            Ok(_) => Ok(Self(s)),
            Err(_) => Err(InvalidUri(s)),
        }
    }

    /// Returns the URI as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Turns this URI into the underlying string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl FromStr for Uri {
    type Err = InvalidUri;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Deref for Uri {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Uri> for String {
    fn from(uri: Uri) -> Self {
        uri.0
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for Uri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Uri {
    fn deserialize<D>(deserializer: D) -> Result<Uri, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let uri = String::deserialize(deserializer)?;
        Uri::parse(uri).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_did_and_url() {
        assert_eq!(
            Uri::parse("did:meta:00000054").unwrap().as_str(),
            "did:meta:00000054"
        );
        assert!("https://example.com/keys.json".parse::<Uri>().is_ok());
    }

    #[test]
    fn rejects_invalid() {
        assert!(Uri::parse("http://exa mple.com").is_err());
        assert!(Uri::parse("%zz").is_err());
    }
}
