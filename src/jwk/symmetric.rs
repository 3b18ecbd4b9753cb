//! Symmetric keys for AES key wrapping

use alloc::{string::String, vec::Vec};

use secrecy::SecretSlice;
use serde::{de::Error, Deserialize, Deserializer, Serialize};
use subtle::ConstantTimeEq;

use crate::base64_url::SecretBase64UrlBytes;

/// A symmetric key of kind `oct`, defined in [section 6.4 of RFC 7518].
///
/// The key bytes are zeroized on drop and redacted in the [`Debug`] output.
/// Comparison runs in constant time.
///
/// [section 6.4 of RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518#section-6.4.1>
#[derive(Debug, Clone)]
pub struct OctetSequence(SecretBase64UrlBytes);

impl OctetSequence {
    /// Wrap the given key bytes.
    pub fn new(x: impl Into<Vec<u8>>) -> Self {
        Self(SecretBase64UrlBytes(SecretSlice::from(x.into())))
    }

    /// Returns the number of bytes that are in this octet sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes().len()
    }

    /// Returns `true` if this octet sequence has a length of zero.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn bytes(&self) -> &[u8] {
        self.0.expose()
    }
}

impl Eq for OctetSequence {}
impl PartialEq for OctetSequence {
    fn eq(&self, other: &Self) -> bool {
        self.bytes().ct_eq(other.bytes()).into()
    }
}

impl From<OctetSequence> for super::JsonWebKeyType {
    fn from(x: OctetSequence) -> Self {
        super::JsonWebKeyType::Symmetric(x)
    }
}

impl<'de> Deserialize<'de> for OctetSequence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Repr {
            kty: String,
            k: SecretBase64UrlBytes,
        }

        let repr = Repr::deserialize(deserializer)?;
        if repr.kty != "oct" {
            return Err(D::Error::custom("`kty` field is required to be `oct`"));
        }

        Ok(Self(repr.k))
    }
}

impl Serialize for OctetSequence {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        struct Repr<'a> {
            kty: &'static str,
            k: &'a SecretBase64UrlBytes,
        }
        Repr {
            kty: "oct",
            k: &self.0,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn serde_and_redaction() {
        let key: OctetSequence =
            serde_json::from_str(r#"{"kty":"oct","k":"GawgguFyGrWKav7AX4VKUg"}"#).unwrap();
        assert_eq!(key.len(), 16);
        assert_eq!(
            serde_json::to_string(&key).unwrap(),
            r#"{"kty":"oct","k":"GawgguFyGrWKav7AX4VKUg"}"#
        );
        assert!(!format!("{key:?}").contains("GawgguFyGrWKav7AX4VKUg"));

        assert!(serde_json::from_str::<OctetSequence>(r#"{"kty":"RSA","k":"AA"}"#).is_err());
    }

    #[test]
    fn equality() {
        assert_eq!(OctetSequence::new([1u8; 16]), OctetSequence::new([1u8; 16]));
        assert_ne!(OctetSequence::new([1u8; 16]), OctetSequence::new([2u8; 16]));
        assert_ne!(OctetSequence::new([1u8; 16]), OctetSequence::new([1u8; 24]));
    }
}
