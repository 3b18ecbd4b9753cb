//! A JSON Web Key (JWK), as defined in [RFC 7517]
//!
//! A [`JsonWebKey`] couples the key material ([`JsonWebKeyType`]) with the
//! optional `use`, `alg` and `kid` metadata. Only the key types usable for JWE
//! key management are supported: RSA public and private keys and symmetric
//! `oct` keys.
//!
//! [RFC 7517]: <https://datatracker.ietf.org/doc/html/rfc7517>

mod key_use;
mod symmetric;

use alloc::{boxed::Box, format, string::String};
use core::{fmt, str::FromStr};

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[doc(inline)]
pub use self::{key_use::KeyUsage, symmetric::OctetSequence};
use crate::{
    crypto::rsa::{PrivateKey, PublicKey},
    jwa::JsonWebEncryptionAlgorithm,
};

/// Errors that may occur while parsing a [`JsonWebKey`] from a string.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The input is not a valid JSON Web Key.
    #[cfg_attr(feature = "std", error("the JSON Web Key is malformed"))]
    #[cfg_attr(not(feature = "std"), error("the JSON Web Key is malformed: {0}"))]
    Malformed(#[cfg_attr(feature = "std", source)] serde_json::Error),
}

/// <https://datatracker.ietf.org/doc/html/rfc7517>
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JsonWebKey {
    /// `kty` parameter section 4.1 and the key material
    #[serde(flatten)]
    key_type: JsonWebKeyType,
    /// `use` parameter section 4.2
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    key_use: Option<KeyUsage>,
    /// `alg` parameter section 4.4
    #[serde(rename = "alg", skip_serializing_if = "Option::is_none")]
    algorithm: Option<JsonWebEncryptionAlgorithm>,
    /// `kid` parameter section 4.5
    #[serde(rename = "kid", skip_serializing_if = "Option::is_none")]
    kid: Option<String>,
}

impl JsonWebKey {
    /// Create a key without any metadata.
    pub fn new(key_type: impl Into<JsonWebKeyType>) -> Self {
        Self {
            key_type: key_type.into(),
            key_use: None,
            algorithm: None,
            kid: None,
        }
    }

    /// Set the key id (`kid`). An encoded JWE carries it in its header.
    pub fn with_kid(self, kid: impl Into<String>) -> Self {
        Self {
            kid: Some(kid.into()),
            ..self
        }
    }

    /// Set the intended usage (`use`).
    pub fn with_key_use(self, key_use: KeyUsage) -> Self {
        Self {
            key_use: Some(key_use),
            ..self
        }
    }

    /// Restrict this key to a single key management algorithm (`alg`).
    pub fn with_algorithm(self, algorithm: JsonWebEncryptionAlgorithm) -> Self {
        Self {
            algorithm: Some(algorithm),
            ..self
        }
    }

    /// The key material.
    pub const fn key_type(&self) -> &JsonWebKeyType {
        &self.key_type
    }

    /// The intended usage of this key, if stated.
    pub const fn key_use(&self) -> Option<&KeyUsage> {
        self.key_use.as_ref()
    }

    /// The only algorithm this key may be used with, if stated.
    pub const fn algorithm(&self) -> Option<&JsonWebEncryptionAlgorithm> {
        self.algorithm.as_ref()
    }

    /// The key id, if any.
    pub fn key_id(&self) -> Option<&str> {
        self.kid.as_deref()
    }

    /// The kind of key material.
    pub const fn kind(&self) -> KeyKind {
        self.key_type.kind()
    }
}

impl FromStr for JsonWebKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map_err(Error::Malformed)
    }
}

impl<'de> Deserialize<'de> for JsonWebKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut members = Map::deserialize(deserializer)?;

        let key_use = take_member(&mut members, "use").map_err(D::Error::custom)?;
        let algorithm = take_member(&mut members, "alg").map_err(D::Error::custom)?;
        let kid = take_member(&mut members, "kid").map_err(D::Error::custom)?;
        let key_type = JsonWebKeyType::from_members(members).map_err(D::Error::custom)?;

        Ok(Self {
            key_type,
            key_use,
            algorithm,
            kid,
        })
    }
}

fn take_member<T: serde::de::DeserializeOwned>(
    members: &mut Map<String, Value>,
    name: &str,
) -> Result<Option<T>, serde_json::Error> {
    members
        .remove(name)
        .map(serde_json::from_value)
        .transpose()
}

/// The key material of a [`JsonWebKey`], distinguished by the `kty` parameter
/// and, for RSA, by the presence of the private exponent `d`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum JsonWebKeyType {
    /// An RSA public key
    RsaPublic(PublicKey),
    /// An RSA private key
    RsaPrivate(Box<PrivateKey>),
    /// A symmetric `oct` key
    Symmetric(OctetSequence),
}

impl JsonWebKeyType {
    /// The kind of this key material.
    pub const fn kind(&self) -> KeyKind {
        match self {
            Self::RsaPublic(_) => KeyKind::RsaPublic,
            Self::RsaPrivate(_) => KeyKind::RsaPrivate,
            Self::Symmetric(_) => KeyKind::Symmetric,
        }
    }

    fn from_members(members: Map<String, Value>) -> Result<Self, serde_json::Error> {
        let kty = match members.get("kty") {
            Some(Value::String(kty)) => kty.clone(),
            Some(_) => return Err(serde_json::Error::custom("`kty` must be a string")),
            None => return Err(serde_json::Error::missing_field("kty")),
        };

        match kty.as_str() {
            "RSA" if members.contains_key("d") => {
                let key: PrivateKey = serde_json::from_value(Value::Object(members))?;
                Ok(Self::RsaPrivate(Box::new(key)))
            }
            "RSA" => serde_json::from_value(Value::Object(members)).map(Self::RsaPublic),
            "oct" => serde_json::from_value(Value::Object(members)).map(Self::Symmetric),
            other => Err(serde_json::Error::custom(format!(
                "unsupported key type `{other}`"
            ))),
        }
    }
}

impl Serialize for JsonWebKeyType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::RsaPublic(key) => key.serialize(serializer),
            Self::RsaPrivate(key) => key.serialize(serializer),
            Self::Symmetric(key) => key.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for JsonWebKeyType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let members = Map::deserialize(deserializer)?;
        Self::from_members(members).map_err(D::Error::custom)
    }
}

/// A short classification of [`JsonWebKeyType`], used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// See [`JsonWebKeyType::RsaPublic`]
    RsaPublic,
    /// See [`JsonWebKeyType::RsaPrivate`]
    RsaPrivate,
    /// See [`JsonWebKeyType::Symmetric`]
    Symmetric,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RsaPublic => "RSA public key",
            Self::RsaPrivate => "RSA private key",
            Self::Symmetric => "symmetric key",
        })
    }
}
