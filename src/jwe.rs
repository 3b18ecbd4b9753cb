//! Implementation of JSON Web Encryption (JWE) as defined in [RFC 7516]
//!
//! Only the compact serialization with a single recipient is supported. Use
//! [`encode`] to encrypt a payload for a [`JsonWebKey`](crate::JsonWebKey)
//! and [`decode`] to decrypt it again.
//!
//! # Decryption failures
//!
//! [`decode`] reports a wrong key, a corrupted encrypted key, a tampered
//! ciphertext and a bad tag all as [`Error::Cryptographic`]. A failed key
//! unwrap is replaced by a random key of the right size and decryption carries
//! on, so an attacker can not tell an unwrap failure from a tag mismatch (the
//! countermeasure against the Bleichenbacher attack on RSA1_5 from [section
//! 11.5 of RFC 7516]).
//!
//! The RSA primitive's own padding check is not guaranteed to run in constant
//! time by every backend.
//!
//! [RFC 7516]: <https://www.rfc-editor.org/rfc/rfc7516.html>
//! [section 11.5 of RFC 7516]: <https://www.rfc-editor.org/rfc/rfc7516.html#section-11.5>

pub(crate) mod cek;
pub(crate) mod content;
mod decrypt;
mod encrypt;
pub(crate) mod key_management;

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use thiserror::Error;

#[doc(inline)]
pub use self::{
    decrypt::{decode, Decrypted},
    encrypt::{encode, Encoder},
};
use crate::{
    crypto,
    format::{Compact, ParseError},
    jwa::JsonWebEncryptionAlgorithm,
    jwk::{KeyKind, KeyUsage},
};

/// Errors that may occur while encoding or decoding a JWE.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The key can not be used with the requested algorithm.
    #[error(transparent)]
    Key(#[from] KeyError),
    /// The input is not a JWE in compact serialization, or its header is
    /// invalid or names an unsupported algorithm.
    #[error(transparent)]
    HeaderFormat(#[from] ParseError),
    /// Decryption failed.
    ///
    /// This single variant covers every failure after the key was accepted
    /// and carries no detail.
    #[error("decryption failed")]
    Cryptographic,
}

/// The key is not usable for the requested operation.
///
/// These errors only depend on the caller's key and on public header values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KeyError {
    /// The kind of key does not match the algorithm, e.g. a symmetric key for
    /// `RSA-OAEP`.
    #[error("a {kind} can not be used with `{alg}`")]
    IncompatibleKey {
        /// The requested key management algorithm.
        alg: JsonWebEncryptionAlgorithm,
        /// The kind of key that was supplied.
        kind: KeyKind,
    },
    /// The algorithm is not implemented.
    #[error("the algorithm `{0}` is not supported")]
    UnsupportedAlgorithm(String),
    /// An AES key wrap key has the wrong size.
    #[error("expected a key of {expected} bytes, got {got} bytes")]
    InvalidKeyLength {
        /// Required key length in bytes.
        expected: usize,
        /// Length of the supplied key in bytes.
        got: usize,
    },
    /// The RSA modulus is too small to hold the padded content encryption
    /// key.
    #[error("a {bits} bit RSA key is too small to wrap a {cek_len} byte key with `{alg}`")]
    KeyTooSmall {
        /// The requested key management algorithm.
        alg: JsonWebEncryptionAlgorithm,
        /// The modulus size in bits.
        bits: usize,
        /// The size of the content encryption key in bytes.
        cek_len: usize,
    },
    /// Decryption with `alg` requires an RSA private key, but only the public
    /// key was supplied.
    #[error("`{0}` requires an RSA private key for decryption")]
    MissingPrivateKey(JsonWebEncryptionAlgorithm),
    /// The key's `use` parameter forbids encryption.
    #[error("the key is meant for `{}`, not for encryption", .0.name())]
    InvalidKeyUsage(KeyUsage),
    /// The key's `alg` parameter names a different algorithm.
    #[error("the key is restricted to `{allowed}`, but `{requested}` was requested")]
    AlgorithmMismatch {
        /// The algorithm from the key.
        allowed: JsonWebEncryptionAlgorithm,
        /// The requested algorithm.
        requested: JsonWebEncryptionAlgorithm,
    },
    /// The backend failed while wrapping the content encryption key.
    #[error("failed to wrap the content encryption key")]
    Crypto(#[source] crypto::Error),
}

/// The plaintext of a JWE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Arbitrary bytes, usually the JSON claims of a JWT.
    Claims(Vec<u8>),
    /// Another JWS or JWE. Encoding marks the header with `cty: "JWT"`.
    Nested(Compact),
}

impl Payload {
    /// Whether this is a nested token.
    pub const fn is_nested(&self) -> bool {
        matches!(self, Self::Nested(_))
    }

    pub(crate) fn into_bytes(self) -> Vec<u8> {
        match self {
            Self::Claims(bytes) => bytes,
            Self::Nested(token) => token.to_string().into_bytes(),
        }
    }
}

impl From<Vec<u8>> for Payload {
    fn from(x: Vec<u8>) -> Self {
        Self::Claims(x)
    }
}

impl From<&[u8]> for Payload {
    fn from(x: &[u8]) -> Self {
        Self::Claims(x.to_vec())
    }
}

impl From<&str> for Payload {
    fn from(x: &str) -> Self {
        Self::Claims(x.as_bytes().to_vec())
    }
}

impl From<Compact> for Payload {
    fn from(x: Compact) -> Self {
        Self::Nested(x)
    }
}
