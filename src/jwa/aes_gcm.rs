/// Content Encryption with AES GCM as defined in [section 5.3 of RFC 7518]
///
/// [section 5.3 of RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518#section-5.3>
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AesGcm {
    /// AES GCM using 128-bit key
    Aes128,
    /// AES GCM using 192-bit key
    Aes192,
    /// AES GCM using 256-bit key
    Aes256,
}

impl AesGcm {
    /// The 96 bit IV mandated by RFC 7518.
    pub const IV_LEN: usize = 12;
    /// The 128 bit authentication tag mandated by RFC 7518.
    pub const TAG_LEN: usize = 16;

    /// The number of bytes of the content encryption key.
    pub const fn key_len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }
}

impl From<AesGcm> for super::JsonWebContentEncryptionAlgorithm {
    fn from(x: AesGcm) -> Self {
        Self::AesGcm(x)
    }
}
