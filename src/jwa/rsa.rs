mod rsaes_oaep;

pub use self::rsaes_oaep::RsaesOaep;

/// The padding scheme used to encrypt a content encryption key with RSA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RsaEncryption {
    /// RSAES-PKCS1-v1_5, the `RSA1_5` algorithm
    Pkcs1V1_5,
    /// RSAES OAEP, either with SHA-1 or SHA-256
    Oaep(RsaesOaep),
}

impl RsaEncryption {
    /// The number of bytes the padding occupies in a block of the modulus
    /// size, so a message can be at most `k - overhead` bytes long.
    pub(crate) const fn overhead(self) -> usize {
        match self {
            // 0x00 || 0x02 || PS (at least 8 bytes) || 0x00
            Self::Pkcs1V1_5 => 11,
            // 2 * hLen + 2
            Self::Oaep(RsaesOaep::RsaesOaep) => 2 * 20 + 2,
            Self::Oaep(RsaesOaep::RsaesOaep256) => 2 * 32 + 2,
        }
    }
}
