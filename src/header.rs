//! The protected header of a JSON Web Encryption, as defined in [section 4 of
//! RFC 7516]
//!
//! The encoded header doubles as additional authenticated data for the content
//! encryption, so [`JweHeader::encode`] is deterministic: members are always
//! written in the order `alg`, `enc`, `kid`, `typ`, `cty` without any
//! insignificant whitespace.
//!
//! [section 4 of RFC 7516]: <https://www.rfc-editor.org/rfc/rfc7516.html#section-4>

mod builder;
mod error;

use alloc::{string::String, vec::Vec};

use serde::Serialize;
use serde_json::{Map, Value};

pub use self::{builder::JweHeaderBuilder, error::Error};
use crate::jwa::{JsonWebContentEncryptionAlgorithm, JsonWebEncryptionAlgorithm};

/// The `cty` value that marks the payload as a nested JWT, as recommended by
/// [section 5.2 of RFC 7519].
///
/// [section 5.2 of RFC 7519]: <https://www.rfc-editor.org/rfc/rfc7519.html#section-5.2>
pub const NESTED_CONTENT_TYPE: &str = "JWT";

/// The JWE protected header.
///
/// Only the parameters needed to process a JWE are represented. Unknown
/// parameters in a decoded header are ignored, except for `zip` and `crit`
/// which are rejected because ignoring them would change the meaning of the
/// token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JweHeader {
    pub(crate) algorithm: JsonWebEncryptionAlgorithm,
    pub(crate) content_encryption: JsonWebContentEncryptionAlgorithm,
    pub(crate) key_id: Option<String>,
    pub(crate) typ: Option<String>,
    pub(crate) content_type: Option<String>,
}

#[derive(Serialize)]
struct Repr<'a> {
    alg: &'a JsonWebEncryptionAlgorithm,
    enc: &'a JsonWebContentEncryptionAlgorithm,
    #[serde(skip_serializing_if = "Option::is_none")]
    kid: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    typ: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cty: Option<&'a str>,
}

impl JweHeader {
    /// Start building a header for the given key management and content
    /// encryption algorithm.
    pub const fn builder(
        algorithm: JsonWebEncryptionAlgorithm,
        content_encryption: JsonWebContentEncryptionAlgorithm,
    ) -> JweHeaderBuilder {
        JweHeaderBuilder::new(algorithm, content_encryption)
    }

    /// The key management algorithm (`alg`).
    pub const fn algorithm(&self) -> &JsonWebEncryptionAlgorithm {
        &self.algorithm
    }

    /// The content encryption algorithm (`enc`).
    pub const fn content_encryption(&self) -> &JsonWebContentEncryptionAlgorithm {
        &self.content_encryption
    }

    /// The key id (`kid`), if any.
    pub fn key_id(&self) -> Option<&str> {
        self.key_id.as_deref()
    }

    /// The media type of the complete JWE (`typ`), if any.
    pub fn typ(&self) -> Option<&str> {
        self.typ.as_deref()
    }

    /// The content type of the payload (`cty`), if any.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Whether the payload is a nested JWT.
    ///
    /// Media type names are case-insensitive, so `jwt` is accepted as well.
    pub fn is_nested(&self) -> bool {
        self.content_type
            .as_deref()
            .is_some_and(|cty| cty.eq_ignore_ascii_case(NESTED_CONTENT_TYPE))
    }

    fn repr(&self) -> Repr<'_> {
        Repr {
            alg: &self.algorithm,
            enc: &self.content_encryption,
            kid: self.key_id.as_deref(),
            typ: self.typ.as_deref(),
            cty: self.content_type.as_deref(),
        }
    }

    /// Encode this header into its canonical JSON form.
    ///
    /// The same header always produces the same bytes.
    ///
    /// # Errors
    ///
    /// Returns the error of [`serde_json`], which cannot occur for the string
    /// members of a header.
    pub fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(&self.repr())
    }

    /// Decode a header from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedAlgorithm`] if `alg` or `enc` name an
    /// algorithm this crate does not implement, and one of the structural
    /// variants of [`Error`] for anything that is not a well formed JWE
    /// header.
    pub fn decode(raw: &[u8]) -> Result<Self, Error> {
        let value: Value = serde_json::from_slice(raw).map_err(Error::Malformed)?;
        let Value::Object(mut members) = value else {
            return Err(Error::NotAnObject);
        };

        for name in ["zip", "crit"] {
            if members.contains_key(name) {
                return Err(Error::UnsupportedParameter(name));
            }
        }

        let alg = take_string(&mut members, "alg")?.ok_or(Error::MissingParameter("alg"))?;
        let enc = take_string(&mut members, "enc")?.ok_or(Error::MissingParameter("enc"))?;

        let algorithm = JsonWebEncryptionAlgorithm::from_str_without_other(&alg).ok_or(
            Error::UnsupportedAlgorithm {
                parameter: "alg",
                value: alg,
            },
        )?;
        let content_encryption = JsonWebContentEncryptionAlgorithm::from_str_without_other(&enc)
            .ok_or(Error::UnsupportedAlgorithm {
                parameter: "enc",
                value: enc,
            })?;

        Ok(Self {
            algorithm,
            content_encryption,
            key_id: take_string(&mut members, "kid")?,
            typ: take_string(&mut members, "typ")?,
            content_type: take_string(&mut members, "cty")?,
        })
    }
}

impl Serialize for JweHeader {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.repr().serialize(serializer)
    }
}

fn take_string(
    members: &mut Map<String, Value>,
    name: &'static str,
) -> Result<Option<String>, Error> {
    match members.remove(name) {
        None => Ok(None),
        Some(Value::String(value)) => Ok(Some(value)),
        Some(_) => Err(Error::InvalidParameter(name)),
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;
    use crate::jwa::{AesCbcHs, AesGcm, AesKw, RsaesOaep};

    fn rsa_oaep_header() -> JweHeader {
        JweHeader::builder(
            JsonWebEncryptionAlgorithm::RsaesOaep(RsaesOaep::RsaesOaep),
            JsonWebContentEncryptionAlgorithm::AesGcm(AesGcm::Aes256),
        )
        .build()
    }

    #[test]
    fn canonical_encoding() {
        let header = rsa_oaep_header();
        assert_eq!(
            header.encode().unwrap(),
            br#"{"alg":"RSA-OAEP","enc":"A256GCM"}"#
        );

        // setter order does not influence member order
        let header = JweHeader::builder(
            JsonWebEncryptionAlgorithm::AesKw(AesKw::Aes128),
            JsonWebContentEncryptionAlgorithm::AesCbcHs(AesCbcHs::Aes128CbcHs256),
        )
        .content_type(NESTED_CONTENT_TYPE)
        .typ("JWE")
        .key_id("2024-01")
        .build();
        assert_eq!(
            header.encode().unwrap(),
            br#"{"alg":"A128KW","enc":"A128CBC-HS256","kid":"2024-01","typ":"JWE","cty":"JWT"}"#
        );
    }

    #[test]
    fn decode_roundtrip_preserves_fields() {
        let header = JweHeader::builder(
            JsonWebEncryptionAlgorithm::Rsa1_5,
            JsonWebContentEncryptionAlgorithm::AesGcm(AesGcm::Aes128),
        )
        .key_id("k1")
        .content_type("jwt")
        .build();

        let decoded = JweHeader::decode(&header.encode().unwrap()).unwrap();
        assert_eq!(decoded, header);
        assert!(decoded.is_nested());
    }

    #[test]
    fn decode_ignores_whitespace_order_and_unknown_members() {
        let raw = br#" { "enc" : "A128GCM", "x-custom": [1, 2], "alg": "RSA1_5" } "#;
        let header = JweHeader::decode(raw).unwrap();
        assert_eq!(header.algorithm(), &JsonWebEncryptionAlgorithm::Rsa1_5);
        assert_eq!(header.key_id(), None);
    }

    #[test]
    fn unsupported_algorithm_is_distinct_from_malformed() {
        let err = JweHeader::decode(br#"{"alg":"dir","enc":"A128GCM"}"#).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedAlgorithm { parameter: "alg", ref value } if value == "dir"
        ));

        let err = JweHeader::decode(br#"{"alg":"RSA1_5","enc":"A128CTR"}"#).unwrap_err();
        assert!(matches!(
            err,
            Error::UnsupportedAlgorithm { parameter: "enc", .. }
        ));

        let err = JweHeader::decode(br#"{"alg":"RSA1_5","enc":"#).unwrap_err();
        assert!(matches!(err, Error::Malformed(_)));
    }

    #[test]
    fn structural_errors() {
        assert!(matches!(
            JweHeader::decode(b"[]").unwrap_err(),
            Error::NotAnObject
        ));
        assert!(matches!(
            JweHeader::decode(br#"{"alg":"RSA1_5"}"#).unwrap_err(),
            Error::MissingParameter("enc")
        ));
        assert!(matches!(
            JweHeader::decode(br#"{"alg":"RSA1_5","enc":"A128GCM","kid":7}"#).unwrap_err(),
            Error::InvalidParameter("kid")
        ));
        assert!(matches!(
            JweHeader::decode(br#"{"alg":1,"enc":"A128GCM"}"#).unwrap_err(),
            Error::InvalidParameter("alg")
        ));
    }

    #[test]
    fn compression_and_critical_are_rejected() {
        assert!(matches!(
            JweHeader::decode(br#"{"alg":"RSA1_5","enc":"A128GCM","zip":"DEF"}"#).unwrap_err(),
            Error::UnsupportedParameter("zip")
        ));
        assert!(matches!(
            JweHeader::decode(br#"{"alg":"RSA1_5","enc":"A128GCM","crit":["exp"]}"#)
                .unwrap_err(),
            Error::UnsupportedParameter("crit")
        ));
    }

    #[test]
    fn serialize_matches_encode() {
        let header = rsa_oaep_header();
        assert_eq!(
            serde_json::to_string(&header).unwrap().as_bytes(),
            header.encode().unwrap().as_slice()
        );
        assert_eq!(header.algorithm().to_string(), "RSA-OAEP");
    }
}
