//! This backend implements the primitives using the [RustCrypto] ecosystem.
//!
//! [RustCrypto]: https://github.com/RustCrypto

use thiserror::Error;

use super::interface;

pub(crate) mod aes;
pub(crate) mod hmac;
pub(crate) mod rsa;

// TODO: remove the `cfg_attr` once the RustCrypto crates implement
// the core::error::Error trait.

/// The errors that can be produced by the rust crypto backend.
#[derive(Debug, Error)]
pub(crate) enum BackendError {
    /// A key, IV or tag had the wrong length.
    #[error("invalid length")]
    InvalidLength,

    /// RSA operation failed.
    #[cfg_attr(feature = "std", error("an RSA operation failed"))]
    #[cfg_attr(not(feature = "std"), error("an RSA operation failed: {0}"))]
    Rsa(#[cfg_attr(feature = "std", source)] ::rsa::errors::Error),

    /// AES-GCM encryption failed, or the tag did not match.
    #[error("an AEAD operation failed")]
    Aead,

    /// AES key wrap failed, or the integrity check of an unwrap did not match.
    #[error("an AES key wrap operation failed")]
    KeyWrap,

    /// The PKCS#7 padding of a CBC plaintext was invalid.
    #[error("invalid padding")]
    Unpad,

    /// The RSA key lacks the precomputed CRT values.
    #[error("the RSA key is not precomputed")]
    MissingPrecomputed,

    /// Only RSA keys with exactly two primes are supported.
    #[error("expected exactly two primes for the RSA key")]
    RsaTwoPrimes,
}

impl From<digest::InvalidLength> for BackendError {
    fn from(_: digest::InvalidLength) -> Self {
        Self::InvalidLength
    }
}

impl From<::rsa::errors::Error> for BackendError {
    fn from(x: ::rsa::errors::Error) -> Self {
        Self::Rsa(x)
    }
}

impl From<::aes_gcm::Error> for BackendError {
    fn from(_: ::aes_gcm::Error) -> Self {
        Self::Aead
    }
}

impl From<::aes_kw::Error> for BackendError {
    fn from(_: ::aes_kw::Error) -> Self {
        Self::KeyWrap
    }
}

impl From<::cbc::cipher::block_padding::UnpadError> for BackendError {
    fn from(_: ::cbc::cipher::block_padding::UnpadError) -> Self {
        Self::Unpad
    }
}

/// The [RustCrypto] based backend.
///
/// [RustCrypto]: https://github.com/RustCrypto
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
