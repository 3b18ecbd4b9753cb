use alloc::string::String;

use super::JweHeader;
use crate::jwa::{JsonWebContentEncryptionAlgorithm, JsonWebEncryptionAlgorithm};

/// A builder to create a [`JweHeader`]
///
/// `alg` and `enc` are required and therefore taken by
/// [`JweHeader::builder`], every other parameter is optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JweHeaderBuilder {
    /// `alg` parameter defined in section 4.1.1 of JWE
    algorithm: JsonWebEncryptionAlgorithm,
    /// `enc` parameter defined in section 4.1.2 of JWE
    content_encryption: JsonWebContentEncryptionAlgorithm,
    /// `kid` parameter defined in section 4.1.6 of JWE
    key_id: Option<String>,
    /// `typ` parameter defined in section 4.1.11 of JWE
    typ: Option<String>,
    /// `cty` parameter defined in section 4.1.12 of JWE
    content_type: Option<String>,
}

impl JweHeaderBuilder {
    pub(super) const fn new(
        algorithm: JsonWebEncryptionAlgorithm,
        content_encryption: JsonWebContentEncryptionAlgorithm,
    ) -> Self {
        Self {
            algorithm,
            content_encryption,
            key_id: None,
            typ: None,
            content_type: None,
        }
    }

    /// Set the key id (`kid`) of the key the content encryption key is wrapped
    /// for.
    pub fn key_id(self, key_id: impl Into<String>) -> Self {
        Self {
            key_id: Some(key_id.into()),
            ..self
        }
    }

    /// Set the media type (`typ`) of the complete JWE.
    pub fn typ(self, typ: impl Into<String>) -> Self {
        Self {
            typ: Some(typ.into()),
            ..self
        }
    }

    /// Set the content type (`cty`) of the encrypted payload.
    ///
    /// Use [`NESTED_CONTENT_TYPE`](super::NESTED_CONTENT_TYPE) when the payload
    /// is itself a JWS or JWE.
    pub fn content_type(self, content_type: impl Into<String>) -> Self {
        Self {
            content_type: Some(content_type.into()),
            ..self
        }
    }

    /// Finish the header.
    pub fn build(self) -> JweHeader {
        JweHeader {
            algorithm: self.algorithm,
            content_encryption: self.content_encryption,
            key_id: self.key_id,
            typ: self.typ,
            content_type: self.content_type,
        }
    }
}
