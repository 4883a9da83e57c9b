//! Typed accessors for the registered header parameters of [section 4.1 of
//! RFC 7515].
//!
//! Getters return `Ok(None)` if a parameter is absent, and an
//! [`Error::InvalidParameter`] if it is present with the wrong type.
//!
//! [section 4.1 of RFC 7515]: <https://datatracker.ietf.org/doc/html/rfc7515#section-4.1>

use alloc::{string::String, vec::Vec};

use serde_json::{Map, Value};

use super::{Error, JwsHeader};
use crate::Uri;

const JKU: &str = "jku";
const JWK: &str = "jwk";
const KID: &str = "kid";
const X5U: &str = "x5u";
const X5C: &str = "x5c";
const X5T: &str = "x5t";
const X5T_S256: &str = "x5t#S256";
const X5T_S256_LEGACY: &str = "x5tS256";
const TYP: &str = "typ";
const CTY: &str = "cty";
const CRIT: &str = "crit";

impl JwsHeader {
    /// Refers to a resource for a set of JSON-encoded public keys, one of
    /// which corresponds to the key used to digitally sign the JWS.
    ///
    /// This is serialized as `jku`.
    ///
    /// # Errors
    ///
    /// Fails if the parameter is not a string containing a valid URI.
    pub fn jwk_set_url(&self) -> Result<Option<Uri>, Error> {
        self.parameter(JKU)
    }

    /// Sets the `jku` parameter.
    pub fn set_jwk_set_url(&mut self, url: Uri) {
        self.insert(JKU, url.into_inner());
    }

    /// The public key that corresponds to the key used to digitally sign the
    /// JWS, as a JSON Web Key object.
    ///
    /// This is serialized as `jwk`.
    ///
    /// # Errors
    ///
    /// Fails if the parameter is not a JSON object.
    pub fn json_web_key(&self) -> Result<Option<Map<String, Value>>, Error> {
        self.parameter(JWK)
    }

    /// Sets the `jwk` parameter.
    pub fn set_json_web_key(&mut self, jwk: Map<String, Value>) {
        self.insert(JWK, jwk);
    }

    /// Hint indicating which key was used to secure the JWS.
    ///
    /// This is serialized as `kid`.
    ///
    /// # Errors
    ///
    /// Fails if the parameter is not a string.
    pub fn key_id(&self) -> Result<Option<&str>, Error> {
        self.parameter(KID)
    }

    /// Sets the `kid` parameter.
    pub fn set_key_id(&mut self, kid: impl Into<String>) {
        self.insert(KID, kid.into());
    }

    /// A URI referring to a X.509 public key certificate or certificate chain
    /// corresponding to the used key.
    ///
    /// This is serialized as `x5u`.
    ///
    /// # Errors
    ///
    /// Fails if the parameter is not a string containing a valid URI.
    pub fn x509_url(&self) -> Result<Option<Uri>, Error> {
        self.parameter(X5U)
    }

    /// Sets the `x5u` parameter.
    pub fn set_x509_url(&mut self, url: Uri) {
        self.insert(X5U, url.into_inner());
    }

    /// The public key certificate or certificate chain corresponding to the
    /// key used to sign the JWS.
    ///
    /// This is serialized as `x5c`.
    ///
    /// # Errors
    ///
    /// Fails if the parameter is not an array of strings.
    pub fn x509_chain(&self) -> Result<Option<Vec<String>>, Error> {
        self.parameter(X5C)
    }

    /// Sets the `x5c` parameter.
    pub fn set_x509_chain(&mut self, chain: Vec<String>) {
        self.insert(X5C, chain);
    }

    /// Base64url-encoded SHA-1 digest of the DER encoding of the X.509
    /// certificate.
    ///
    /// This is serialized as `x5t`.
    ///
    /// # Errors
    ///
    /// Fails if the parameter is not a string.
    pub fn x509_fingerprint(&self) -> Result<Option<&str>, Error> {
        self.parameter(X5T)
    }

    /// Sets the `x5t` parameter.
    pub fn set_x509_fingerprint(&mut self, fingerprint: impl Into<String>) {
        self.insert(X5T, fingerprint.into());
    }

    /// Base64url-encoded SHA-256 digest of the DER encoding of the X.509
    /// certificate.
    ///
    /// This is serialized as `x5t#S256`. Headers that only carry the older
    /// `x5tS256` name are read as well.
    ///
    /// # Errors
    ///
    /// Fails if the parameter is not a string.
    pub fn x509_fingerprint_sha256(&self) -> Result<Option<&str>, Error> {
        match self.parameter(X5T_S256)? {
            Some(fingerprint) => Ok(Some(fingerprint)),
            None => self.parameter(X5T_S256_LEGACY),
        }
    }

    /// Sets the `x5t#S256` parameter, replacing an `x5tS256` one.
    pub fn set_x509_fingerprint_sha256(&mut self, fingerprint: impl Into<String>) {
        self.parameters.remove(X5T_S256_LEGACY);
        self.insert(X5T_S256, fingerprint.into());
    }

    /// Used by the application to determine the type of the JWS.
    ///
    /// This is serialized as `typ`.
    ///
    /// # Errors
    ///
    /// Fails if the parameter is not a string.
    pub fn media_type(&self) -> Result<Option<&str>, Error> {
        self.parameter(TYP)
    }

    /// Sets the `typ` parameter.
    pub fn set_media_type(&mut self, typ: impl Into<String>) {
        self.insert(TYP, typ.into());
    }

    /// Used by the application to determine the type of content in the
    /// payload of this JWS.
    ///
    /// This is serialized as `cty`.
    ///
    /// # Errors
    ///
    /// Fails if the parameter is not a string.
    pub fn content_type(&self) -> Result<Option<&str>, Error> {
        self.parameter(CTY)
    }

    /// Sets the `cty` parameter.
    pub fn set_content_type(&mut self, cty: impl Into<String>) {
        self.insert(CTY, cty.into());
    }

    /// List of critical extended headers.
    ///
    /// This is serialized as `crit`.
    ///
    /// # Errors
    ///
    /// Fails if the parameter is not an array of strings.
    pub fn critical(&self) -> Result<Option<Vec<String>>, Error> {
        self.parameter(CRIT)
    }

    /// Sets the `crit` parameter.
    pub fn set_critical(&mut self, critical: Vec<String>) {
        self.insert(CRIT, critical);
    }
}
