/// Key Wrapping with AES Key Wrap as defined in [section 4.4 of RFC 7518]
///
/// [section 4.4 of RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518#section-4.4>
#[derive(Debug, Clone, PartialEq, Eq, Copy, Hash)]
pub enum AesKw {
    /// AES Key Wrap with default initial value using 128-bit key
    Aes128,
    /// AES Key Wrap with default initial value using 192-bit key
    Aes192,
    /// AES Key Wrap with default initial value using 256-bit key
    Aes256,
}

impl AesKw {
    /// The number of bytes of the key encryption key.
    pub const fn key_len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }
}

impl From<AesKw> for super::JsonWebEncryptionAlgorithm {
    fn from(x: AesKw) -> Self {
        Self::AesKw(x)
    }
}
