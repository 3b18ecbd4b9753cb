//! Fresh content encryption keys and initialization vectors

use alloc::{vec, vec::Vec};
use core::fmt;

use rand_core::CryptoRngCore;
use zeroize::Zeroizing;

use super::content::ContentEncryption;

/// The symmetric key a single JWE payload is encrypted with.
///
/// Wiped from memory on drop.
#[doc(alias = "CEK")]
pub(crate) struct ContentEncryptionKey {
    bytes: Zeroizing<Vec<u8>>,
}

impl ContentEncryptionKey {
    pub(crate) fn len(&self) -> usize {
        self.bytes.len()
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<Zeroizing<Vec<u8>>> for ContentEncryptionKey {
    fn from(bytes: Zeroizing<Vec<u8>>) -> Self {
        Self { bytes }
    }
}

impl fmt::Debug for ContentEncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentEncryptionKey")
            .field("len", &self.len())
            .finish_non_exhaustive()
    }
}

/// Draw a CEK and an IV sized for `content`.
///
/// The CEK is always drawn before the IV, so a replaying RNG can reproduce
/// known vectors.
pub(crate) fn generate<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    content: ContentEncryption,
) -> (ContentEncryptionKey, Vec<u8>) {
    let mut cek = Zeroizing::new(vec![0u8; content.key_len()]);
    rng.fill_bytes(&mut cek);

    let mut iv = vec![0u8; content.iv_len()];
    rng.fill_bytes(&mut iv);

    (ContentEncryptionKey::from(cek), iv)
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use rand_core::{impls, CryptoRng, RngCore};

    use super::*;
    use crate::jwa::{AesCbcHs, AesGcm};

    /// Yields 0, 1, 2, ... so the draw order is visible in the output.
    struct Counter(u8);

    impl RngCore for Counter {
        fn next_u32(&mut self) -> u32 {
            impls::next_u32_via_fill(self)
        }

        fn next_u64(&mut self) -> u64 {
            impls::next_u64_via_fill(self)
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for byte in dest {
                *byte = self.0;
                self.0 = self.0.wrapping_add(1);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for Counter {}

    #[test]
    fn cek_is_drawn_before_iv() {
        let mut rng = Counter(0);
        let (cek, iv) = generate(&mut rng, ContentEncryption::AesGcm(AesGcm::Aes128));

        assert_eq!(cek.as_bytes(), (0..16).collect::<Vec<u8>>());
        assert_eq!(iv, (16..28).collect::<Vec<u8>>());
    }

    #[test]
    fn sizes_follow_the_algorithm() {
        let mut rng = Counter(0);
        let (cek, iv) = generate(
            &mut rng,
            ContentEncryption::AesCbcHs(AesCbcHs::Aes256CbcHs512),
        );

        assert_eq!(cek.len(), 64);
        assert_eq!(iv.len(), 16);
        assert!(!format!("{cek:?}").contains("0, 1, 2"));
    }
}
