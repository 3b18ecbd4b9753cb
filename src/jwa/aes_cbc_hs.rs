use super::Hmac;

/// Authenticated encryption algorithms built using a composition of AES in
/// Cipher Block Chaining (CBC) mode and HMAC as defined in [section 5.2 of RFC
/// 7518]
///
/// The content encryption key is split in half: the first half is the HMAC
/// key, the second half is the AES key.
///
/// [section 5.2 of RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518#section-5.2>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AesCbcHs {
    /// AES_128_CBC_HMAC_SHA_256 authenticated encryption as defined in [section
    /// 5.2.3]
    ///
    /// [section 5.2.3]: <https://datatracker.ietf.org/doc/html/rfc7518#section-5.2.3>
    Aes128CbcHs256,
    /// AES_192_CBC_HMAC_SHA_384 authenticated encryption algorithm as defined
    /// in [section 5.2.4]
    ///
    /// [section 5.2.4]: <https://datatracker.ietf.org/doc/html/rfc7518#section-5.2.4>
    Aes192CbcHs384,
    /// AES_256_CBC_HMAC_SHA_512 authenticated encryption algorithm as defined
    /// in [section 5.2.5]
    ///
    /// [section 5.2.5]: <https://datatracker.ietf.org/doc/html/rfc7518#section-5.2.5>
    Aes256CbcHs512,
}

impl AesCbcHs {
    /// AES block size, used as the IV length.
    pub const IV_LEN: usize = 16;

    /// The number of bytes of the combined MAC and encryption key.
    pub const fn key_len(self) -> usize {
        match self {
            Self::Aes128CbcHs256 => 32,
            Self::Aes192CbcHs384 => 48,
            Self::Aes256CbcHs512 => 64,
        }
    }

    /// The tag is the HMAC output truncated to half its size, which is also
    /// the length of each key half.
    pub const fn tag_len(self) -> usize {
        self.key_len() / 2
    }

    /// The HMAC variant used for the authentication tag.
    pub const fn hmac(self) -> Hmac {
        match self {
            Self::Aes128CbcHs256 => Hmac::Hs256,
            Self::Aes192CbcHs384 => Hmac::Hs384,
            Self::Aes256CbcHs512 => Hmac::Hs512,
        }
    }
}

impl From<AesCbcHs> for super::JsonWebContentEncryptionAlgorithm {
    fn from(x: AesCbcHs) -> Self {
        Self::AesCbcHs(x)
    }
}
