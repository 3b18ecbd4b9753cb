use alloc::string::String;

use rand_core::CryptoRngCore;
use tracing::debug;

use super::{cek, content::ContentEncryption, key_management::KeyWrapper, Error, KeyError, Payload};
use crate::{
    format::{self, Compact, ParseError},
    header::{self, NESTED_CONTENT_TYPE},
    jwa::{JsonWebContentEncryptionAlgorithm, JsonWebEncryptionAlgorithm},
    Base64UrlString, JsonWebKey, JweHeader,
};

/// Encrypts payloads into JWEs in compact serialization.
///
/// Use [`encode`] if the defaults are fine. An [`Encoder`] additionally lets
/// you set the `typ` header parameter.
///
/// ```
/// # use jose_jwe::{jwa::*, jwe::Encoder, jwk::OctetSequence, JsonWebKey};
/// # use rand_core::OsRng;
/// let key = JsonWebKey::new(OctetSequence::new([0x42; 16]));
/// let token = Encoder::new(
///     JsonWebEncryptionAlgorithm::AesKw(AesKw::Aes128),
///     JsonWebContentEncryptionAlgorithm::AesGcm(AesGcm::Aes128),
/// )
/// .typ("JWE")
/// .encode(&mut OsRng, &key, "hello")?;
///
/// assert_eq!(token.len(), 5);
/// # Ok::<(), jose_jwe::jwe::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoder {
    algorithm: JsonWebEncryptionAlgorithm,
    content_encryption: JsonWebContentEncryptionAlgorithm,
    typ: Option<String>,
}

impl Encoder {
    /// Create an encoder for the key management algorithm `alg` and the
    /// content encryption algorithm `enc`.
    pub const fn new(
        alg: JsonWebEncryptionAlgorithm,
        enc: JsonWebContentEncryptionAlgorithm,
    ) -> Self {
        Self {
            algorithm: alg,
            content_encryption: enc,
            typ: None,
        }
    }

    /// Set the `typ` header parameter.
    pub fn typ(self, typ: impl Into<String>) -> Self {
        Self {
            typ: Some(typ.into()),
            ..self
        }
    }

    /// Encrypt `payload` for `key`.
    ///
    /// The key is checked before any randomness is drawn from `rng`. The
    /// content encryption key is drawn first, the initialization vector
    /// second.
    ///
    /// # Errors
    ///
    /// - [`Error::Key`] if `key` can not be used with the algorithm, or is too
    ///   small for it.
    /// - [`Error::HeaderFormat`] if `enc` is not implemented.
    /// - [`Error::Cryptographic`] if the backend fails to encrypt the content.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(alg = %self.algorithm, enc = %self.content_encryption)
    )]
    pub fn encode<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        key: &JsonWebKey,
        payload: impl Into<Payload>,
    ) -> Result<Compact, Error> {
        let payload = payload.into();

        let content = ContentEncryption::from_jwa(&self.content_encryption).ok_or_else(|| {
            ParseError::Header(header::Error::UnsupportedAlgorithm {
                parameter: "enc",
                value: String::from(self.content_encryption.name()),
            })
        })?;
        let wrapper = KeyWrapper::select(&self.algorithm, content, key)?;
        debug!(kind = %key.kind(), "key accepted");

        let mut builder =
            JweHeader::builder(self.algorithm.clone(), self.content_encryption.clone());
        if let Some(kid) = key.key_id() {
            builder = builder.key_id(kid);
        }
        if let Some(typ) = &self.typ {
            builder = builder.typ(typ.as_str());
        }
        if payload.is_nested() {
            builder = builder.content_type(NESTED_CONTENT_TYPE);
        }
        let header = builder
            .build()
            .encode()
            .map_err(|e| ParseError::Header(header::Error::Malformed(e)))?;
        let header = Base64UrlString::encode(header);

        let (cek, iv) = cek::generate(rng, content);

        let (ciphertext, tag) = content
            .encrypt(&cek, &iv, header.as_bytes(), &payload.into_bytes())
            .map_err(|_| {
                debug!("content encryption failed");
                Error::Cryptographic
            })?;
        let encrypted_key = wrapper.wrap(rng, &cek).map_err(KeyError::Crypto)?;

        Ok(format::serialize(
            header,
            &encrypted_key,
            &iv,
            &ciphertext,
            &tag,
        ))
    }
}

/// Encrypt `payload` for `key` into a JWE in compact serialization.
///
/// Shorthand for [`Encoder::new(alg, enc).encode(rng, key, payload)`](Encoder::encode).
///
/// # Errors
///
/// See [`Encoder::encode`].
pub fn encode<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    alg: JsonWebEncryptionAlgorithm,
    enc: JsonWebContentEncryptionAlgorithm,
    key: &JsonWebKey,
    payload: impl Into<Payload>,
) -> Result<Compact, Error> {
    Encoder::new(alg, enc).encode(rng, key, payload)
}
