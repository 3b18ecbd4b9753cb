//! Common traits that define the API each backend must implement.

use core::{error, fmt};

pub(crate) mod aes;
pub(crate) mod hmac;
pub(crate) mod rsa;

/// The backend trait that all backends must implement.
///
/// A backend only provides primitives. It never draws randomness on its own
/// behalf, every operation that needs randomness takes the caller's RNG.
pub(crate) trait Backend {
    /// The error type that is used by this backend.
    type Error: fmt::Debug + fmt::Display + error::Error + Send + Sync + 'static;

    /// The HMAC key type.
    type HmacKey: hmac::Key;

    /// The RSA private key type.
    type RsaPrivateKey: rsa::PrivateKey<PublicKey = Self::RsaPublicKey>;

    /// The RSA public key type.
    type RsaPublicKey: rsa::PublicKey;

    /// The AES-GCM key type.
    type AesGcmKey: aes::GcmKey;

    /// The AES-CBC key type.
    type AesCbcKey: aes::CbcKey;

    /// The AES key wrap key type.
    type AesKwKey: aes::KwKey;
}
