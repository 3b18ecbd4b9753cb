//! Authenticated encryption of the JWE payload
//!
//! AES-GCM is delegated to the backend as is. AES-CBC-HMAC-SHA2 is composed
//! here from AES-CBC and HMAC as described in [section 5.2 of RFC 7518].
//!
//! [section 5.2 of RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518#section-5.2>

use alloc::vec::Vec;

use subtle::ConstantTimeEq;
use thiserror::Error;

use super::cek::ContentEncryptionKey;
use crate::{
    crypto::{
        self,
        aes::{CbcKey, GcmKey},
        hmac,
    },
    jwa::{AesCbcHs, AesGcm, JsonWebContentEncryptionAlgorithm},
};

/// The only error content decryption reports, whatever went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("content authentication failed")]
pub(crate) struct AuthenticationFailed;

/// The content encryption algorithms this crate implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContentEncryption {
    AesGcm(AesGcm),
    AesCbcHs(AesCbcHs),
}

impl ContentEncryption {
    pub(crate) const fn from_jwa(enc: &JsonWebContentEncryptionAlgorithm) -> Option<Self> {
        match enc {
            JsonWebContentEncryptionAlgorithm::AesGcm(gcm) => Some(Self::AesGcm(*gcm)),
            JsonWebContentEncryptionAlgorithm::AesCbcHs(cbc) => Some(Self::AesCbcHs(*cbc)),
            JsonWebContentEncryptionAlgorithm::Other(_) => None,
        }
    }

    pub(crate) const fn key_len(self) -> usize {
        match self {
            Self::AesGcm(gcm) => gcm.key_len(),
            Self::AesCbcHs(cbc) => cbc.key_len(),
        }
    }

    pub(crate) const fn iv_len(self) -> usize {
        match self {
            Self::AesGcm(_) => AesGcm::IV_LEN,
            Self::AesCbcHs(_) => AesCbcHs::IV_LEN,
        }
    }

    pub(crate) const fn tag_len(self) -> usize {
        match self {
            Self::AesGcm(_) => AesGcm::TAG_LEN,
            Self::AesCbcHs(cbc) => cbc.tag_len(),
        }
    }

    /// Encrypt `plaintext`, returning the ciphertext and the authentication
    /// tag.
    pub(crate) fn encrypt(
        self,
        cek: &ContentEncryptionKey,
        iv: &[u8],
        aad: &[u8],
        plaintext: &[u8],
    ) -> crypto::Result<(Vec<u8>, Vec<u8>)> {
        match self {
            Self::AesGcm(gcm) => GcmKey::new(gcm, cek.as_bytes())?.encrypt(iv, aad, plaintext),
            Self::AesCbcHs(cbc) => {
                let (mac_key, enc_key) = split_key(cbc, cek);
                let ciphertext = CbcKey::new(enc_key)?.encrypt(iv, plaintext)?;
                let tag = cbc_tag(cbc, mac_key, aad, iv, &ciphertext)?;
                Ok((ciphertext, tag))
            }
        }
    }

    /// Authenticate and decrypt.
    ///
    /// Lengths are validated here so no malformed input reaches a primitive.
    pub(crate) fn decrypt(
        self,
        cek: &ContentEncryptionKey,
        iv: &[u8],
        aad: &[u8],
        ciphertext: &[u8],
        tag: &[u8],
    ) -> Result<Vec<u8>, AuthenticationFailed> {
        if cek.len() != self.key_len() || iv.len() != self.iv_len() || tag.len() != self.tag_len()
        {
            return Err(AuthenticationFailed);
        }

        match self {
            Self::AesGcm(gcm) => GcmKey::new(gcm, cek.as_bytes())
                .and_then(|key| key.decrypt(iv, aad, ciphertext, tag))
                .map_err(|_| AuthenticationFailed),
            Self::AesCbcHs(cbc) => {
                let (mac_key, enc_key) = split_key(cbc, cek);
                let expected =
                    cbc_tag(cbc, mac_key, aad, iv, ciphertext).map_err(|_| AuthenticationFailed)?;

                // the MAC is checked before the ciphertext is touched
                if !bool::from(expected.ct_eq(tag)) {
                    return Err(AuthenticationFailed);
                }

                CbcKey::new(enc_key)
                    .and_then(|key| key.decrypt(iv, ciphertext))
                    .map_err(|_| AuthenticationFailed)
            }
        }
    }
}

/// `MAC_KEY` is the first half of the CEK, `ENC_KEY` the second.
fn split_key(cbc: AesCbcHs, cek: &ContentEncryptionKey) -> (&[u8], &[u8]) {
    cek.as_bytes().split_at(cbc.key_len() / 2)
}

fn cbc_tag(
    cbc: AesCbcHs,
    mac_key: &[u8],
    aad: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
) -> crypto::Result<Vec<u8>> {
    // AL: the number of bits in the AAD as a 64-bit big-endian integer
    let al = (aad.len() as u64).wrapping_mul(8).to_be_bytes();

    let mut key = hmac::Key::new(cbc.hmac(), mac_key)?;
    let full = key.tag(&[aad, iv, ciphertext, &al])?;

    let mut tag = full.as_ref().to_vec();
    tag.truncate(cbc.tag_len());
    Ok(tag)
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use zeroize::Zeroizing;

    use super::*;

    fn cek(bytes: &[u8]) -> ContentEncryptionKey {
        ContentEncryptionKey::from(Zeroizing::new(bytes.to_vec()))
    }

    // RFC 7518 appendix B.1, AES_128_CBC_HMAC_SHA_256
    #[test]
    fn aes_128_cbc_hmac_sha_256_known_answer() {
        let key = cek(&(0u8..32).collect::<Vec<_>>());
        let plaintext = b"A cipher system must not be required to be secret, and it must be able \
            to fall into the hands of the enemy without inconvenience";
        let iv = [
            0x1a, 0xf3, 0x8c, 0x2d, 0xc2, 0xb9, 0x6f, 0xfd, 0xd8, 0x66, 0x94, 0x09, 0x23, 0x41,
            0xbc, 0x04,
        ];
        let aad = b"The second principle of Auguste Kerckhoffs";

        let enc = ContentEncryption::AesCbcHs(AesCbcHs::Aes128CbcHs256);
        let (ciphertext, tag) = enc.encrypt(&key, &iv, aad, plaintext).unwrap();

        assert_eq!(
            tag,
            [
                0x65, 0x2c, 0x3f, 0xa3, 0x6b, 0x0a, 0x7c, 0x5b, 0x32, 0x19, 0xfa, 0xb3, 0xa3, 0x0b,
                0xc1, 0xc4,
            ]
        );
        assert_eq!(&ciphertext[..4], [0xc8, 0x0e, 0xdf, 0xa3]);
        assert_eq!(ciphertext.len(), 144);

        let decrypted = enc.decrypt(&key, &iv, aad, &ciphertext, &tag).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn every_failure_is_the_same_error() {
        let enc = ContentEncryption::AesCbcHs(AesCbcHs::Aes128CbcHs256);
        let key = cek(&[7; 32]);
        let iv = [1; 16];
        let (ciphertext, tag) = enc.encrypt(&key, &iv, b"aad", b"payload").unwrap();

        let mut bad_tag = tag.clone();
        bad_tag[0] ^= 1;
        let mut bad_ct = ciphertext.clone();
        bad_ct[0] ^= 1;

        let cases: [(&[u8], &[u8], &[u8], &[u8]); 5] = [
            (&iv, b"aad", &ciphertext, &bad_tag),
            (&iv, b"aad", &bad_ct, &tag),
            (&iv, b"AAD", &ciphertext, &tag),
            (&iv[..12], b"aad", &ciphertext, &tag),
            (&iv, b"aad", &ciphertext, &tag[..8]),
        ];
        for (iv, aad, ciphertext, tag) in cases {
            assert_eq!(
                enc.decrypt(&key, iv, aad, ciphertext, tag),
                Err(AuthenticationFailed)
            );
        }

        assert_eq!(
            enc.decrypt(&cek(&[7; 16]), &iv, b"aad", &ciphertext, &tag),
            Err(AuthenticationFailed)
        );
    }

    #[test]
    fn gcm_roundtrip_and_tamper() {
        for gcm in [AesGcm::Aes128, AesGcm::Aes192, AesGcm::Aes256] {
            let enc = ContentEncryption::AesGcm(gcm);
            let key = cek(&vec![3; gcm.key_len()]);
            let iv = [9; 12];

            let (ciphertext, tag) = enc.encrypt(&key, &iv, b"header", b"hello").unwrap();
            assert_eq!(tag.len(), 16);
            assert_eq!(
                enc.decrypt(&key, &iv, b"header", &ciphertext, &tag).unwrap(),
                b"hello"
            );
            assert_eq!(
                enc.decrypt(&key, &iv, b"headeR", &ciphertext, &tag),
                Err(AuthenticationFailed)
            );
        }
    }

    #[test]
    fn empty_plaintext() {
        let enc = ContentEncryption::AesCbcHs(AesCbcHs::Aes256CbcHs512);
        let key = cek(&[5; 64]);
        let (ciphertext, tag) = enc.encrypt(&key, &[0; 16], b"", b"").unwrap();

        // a full block of padding
        assert_eq!(ciphertext.len(), 16);
        assert_eq!(tag.len(), 32);
        assert!(enc
            .decrypt(&key, &[0; 16], b"", &ciphertext, &tag)
            .unwrap()
            .is_empty());
    }
}
