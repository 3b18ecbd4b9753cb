//! This backend implements the primitives using the [OpenSSL](openssl) library.
//!
//! OpenSSL blinds RSA private key operations with its own random number
//! generator, so the RNG handed to this backend is not consulted.

use thiserror::Error;

use super::interface;

pub(crate) mod aes;
pub(crate) mod hmac;
pub(crate) mod rsa;

#[derive(Debug, Error)]
pub(crate) enum BackendError {
    /// An error from the OpenSSL library.
    #[error(transparent)]
    OpenSsl(#[from] openssl::error::ErrorStack),

    /// No prime data was found in private key
    #[error("No prime data was found in private key")]
    NoPrimeData,

    /// A key, IV, tag or wrapped key had the wrong length.
    #[error("invalid length")]
    InvalidLength,

    /// AES key wrap failed, or the integrity check of an unwrap did not match.
    #[error("an AES key wrap operation failed")]
    KeyWrap,
}

impl From<openssl::aes::KeyError> for BackendError {
    fn from(_: openssl::aes::KeyError) -> Self {
        Self::KeyWrap
    }
}

/// The [OpenSSL](openssl) based backend.
#[derive(Debug)]
pub(crate) enum Backend {}

impl interface::Backend for Backend {
    type AesCbcKey = aes::CbcKey;
    type AesGcmKey = aes::GcmKey;
    type AesKwKey = aes::KwKey;
    type Error = BackendError;
    type HmacKey = hmac::Key;
    type RsaPrivateKey = rsa::PrivateKey;
    type RsaPublicKey = rsa::PublicKey;
}
