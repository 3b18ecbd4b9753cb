//! Implementation of the JSON Web Algorithms (JWA) used by JWE, as defined in
//! [RFC 7518]
//!
//! Only the algorithms for key management (`alg`) and content encryption
//! (`enc`) live here. Both enums keep unknown names in an `Other` variant so a
//! header with an unknown algorithm can still be represented and reported.
//!
//! [RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518>

mod aes_cbc_hs;
mod aes_gcm;
mod aes_kw;
mod hmac;
mod rsa;

use alloc::string::String;

#[doc(inline)]
pub use self::{
    aes_cbc_hs::AesCbcHs,
    aes_gcm::AesGcm,
    aes_kw::AesKw,
    hmac::Hmac,
    rsa::{RsaEncryption, RsaesOaep},
};

/// A JSON Web Algorithm (JWA) for encryption and decryption of the Content
/// Encryption Key (CEK) as defined in [RFC 7518 section 4]
///
/// This enum covers the `alg` Header Parameter Values for JWE that this crate
/// implements, a subset of the table from [section 4.1].
///
/// [RFC 7518 section 4]: <https://datatracker.ietf.org/doc/html/rfc7518#section-4>
/// [section 4.1]: <https://datatracker.ietf.org/doc/html/rfc7518#section-4.1>
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum JsonWebEncryptionAlgorithm {
    /// Key Encryption with RSAES-PKCS1-v1_5 as defined in [section 4.2]
    ///
    /// [section 4.2]: <https://datatracker.ietf.org/doc/html/rfc7518#section-4.2>
    Rsa1_5,
    /// Key Encryption with RSAES OAEP
    RsaesOaep(RsaesOaep),
    /// AES Key Wrap
    AesKw(AesKw),
    /// JSON Web Algorithms that are not recognised by this implementation.
    ///
    /// A header carrying such a value is rejected on decode, and encoding
    /// with it fails with an unsupported algorithm error.
    Other(String),
}

impl JsonWebEncryptionAlgorithm {
    /// The RSA padding used by this algorithm, if it is an RSA based one.
    pub(crate) const fn rsa_encryption(&self) -> Option<RsaEncryption> {
        match self {
            Self::Rsa1_5 => Some(RsaEncryption::Pkcs1V1_5),
            Self::RsaesOaep(oaep) => Some(RsaEncryption::Oaep(*oaep)),
            _ => None,
        }
    }
}

impl_serde_jwa!(
    JsonWebEncryptionAlgorithm,
    [
        "RSA1_5" => Self::Rsa1_5; Self::Rsa1_5,
        "RSA-OAEP" => Self::RsaesOaep(RsaesOaep::RsaesOaep); Self::RsaesOaep(RsaesOaep::RsaesOaep),
        "RSA-OAEP-256" => Self::RsaesOaep(RsaesOaep::RsaesOaep256); Self::RsaesOaep(RsaesOaep::RsaesOaep256),
        "A128KW" => Self::AesKw(AesKw::Aes128); Self::AesKw(AesKw::Aes128),
        "A192KW" => Self::AesKw(AesKw::Aes192); Self::AesKw(AesKw::Aes192),
        "A256KW" => Self::AesKw(AesKw::Aes256); Self::AesKw(AesKw::Aes256),
    ]
);

/// A JSON Web Algorithm (JWA) for content encryption and decryption of a JWE as
/// defined in [RFC 7518 section 5]
///
/// This enum covers the `enc` Header Parameter Values for JWE. It represents
/// the table from [section 5.1].
///
/// [RFC 7518 section 5]: <https://datatracker.ietf.org/doc/html/rfc7518#section-5>
/// [section 5.1]: <https://datatracker.ietf.org/doc/html/rfc7518#section-5.1>
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum JsonWebContentEncryptionAlgorithm {
    /// Content Encryption using AES in CBC mode with HMAC
    AesCbcHs(AesCbcHs),
    /// Content Encryption using AES GCM
    AesGcm(AesGcm),
    /// JSON Web Algorithms that are not recognised by this implementation.
    Other(String),
}

impl JsonWebContentEncryptionAlgorithm {
    /// The number of bytes of the Content Encryption Key.
    ///
    /// Returns `None` for [`Other`](Self::Other).
    pub const fn key_len(&self) -> Option<usize> {
        match self {
            Self::AesCbcHs(cbc) => Some(cbc.key_len()),
            Self::AesGcm(gcm) => Some(gcm.key_len()),
            Self::Other(_) => None,
        }
    }

    /// The number of bytes of the Initialization Vector.
    ///
    /// Returns `None` for [`Other`](Self::Other).
    pub const fn iv_len(&self) -> Option<usize> {
        match self {
            Self::AesCbcHs(_) => Some(AesCbcHs::IV_LEN),
            Self::AesGcm(_) => Some(AesGcm::IV_LEN),
            Self::Other(_) => None,
        }
    }

    /// The number of bytes of the Authentication Tag.
    ///
    /// Returns `None` for [`Other`](Self::Other).
    pub const fn tag_len(&self) -> Option<usize> {
        match self {
            Self::AesCbcHs(cbc) => Some(cbc.tag_len()),
            Self::AesGcm(_) => Some(AesGcm::TAG_LEN),
            Self::Other(_) => None,
        }
    }
}

impl_serde_jwa!(
    JsonWebContentEncryptionAlgorithm,
    [
        "A128CBC-HS256" => Self::AesCbcHs(AesCbcHs::Aes128CbcHs256); Self::AesCbcHs(AesCbcHs::Aes128CbcHs256),
        "A192CBC-HS384" => Self::AesCbcHs(AesCbcHs::Aes192CbcHs384); Self::AesCbcHs(AesCbcHs::Aes192CbcHs384),
        "A256CBC-HS512" => Self::AesCbcHs(AesCbcHs::Aes256CbcHs512); Self::AesCbcHs(AesCbcHs::Aes256CbcHs512),

        "A128GCM" => Self::AesGcm(AesGcm::Aes128); Self::AesGcm(AesGcm::Aes128),
        "A192GCM" => Self::AesGcm(AesGcm::Aes192); Self::AesGcm(AesGcm::Aes192),
        "A256GCM" => Self::AesGcm(AesGcm::Aes256); Self::AesGcm(AesGcm::Aes256),
    ]
);
