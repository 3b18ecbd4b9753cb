use alloc::vec::Vec;

use openssl::{
    aes::{unwrap_key, wrap_key, AesKey},
    symm::{self, Cipher},
};
use zeroize::Zeroizing;

use super::BackendError;
use crate::{
    crypto::{backend::interface::aes, Result},
    jwa,
};

/// A low level AES-GCM key.
pub(crate) struct GcmKey {
    key: Zeroizing<Vec<u8>>,
    cipher: Cipher,
}

impl aes::GcmKey for GcmKey {
    fn new(variant: jwa::AesGcm, key: &[u8]) -> Result<Self> {
        if key.len() != variant.key_len() {
            return Err(BackendError::InvalidLength.into());
        }

        let cipher = match variant {
            jwa::AesGcm::Aes128 => Cipher::aes_128_gcm(),
            jwa::AesGcm::Aes192 => Cipher::aes_192_gcm(),
            jwa::AesGcm::Aes256 => Cipher::aes_256_gcm(),
        };

        Ok(Self {
            key: Zeroizing::new(key.to_vec()),
            cipher,
        })
    }

    fn encrypt(&self, iv: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<(Vec<u8>, Vec<u8>)> {
        if iv.len() != jwa::AesGcm::IV_LEN {
            return Err(BackendError::InvalidLength.into());
        }

        let mut tag = alloc::vec![0u8; jwa::AesGcm::TAG_LEN];
        let ciphertext =
            symm::encrypt_aead(self.cipher, &self.key, Some(iv), aad, plaintext, &mut tag)?;
        Ok((ciphertext, tag))
    }

    fn decrypt(&self, iv: &[u8], aad: &[u8], ciphertext: &[u8], tag: &[u8]) -> Result<Vec<u8>> {
        if iv.len() != jwa::AesGcm::IV_LEN || tag.len() != jwa::AesGcm::TAG_LEN {
            return Err(BackendError::InvalidLength.into());
        }

        let plaintext = symm::decrypt_aead(self.cipher, &self.key, Some(iv), aad, ciphertext, tag)?;
        Ok(plaintext)
    }
}

/// A low level AES-CBC key.
pub(crate) struct CbcKey {
    key: Zeroizing<Vec<u8>>,
    cipher: Cipher,
}

impl aes::CbcKey for CbcKey {
    fn new(key: &[u8]) -> Result<Self> {
        let cipher = match key.len() {
            16 => Cipher::aes_128_cbc(),
            24 => Cipher::aes_192_cbc(),
            32 => Cipher::aes_256_cbc(),
            _ => return Err(BackendError::InvalidLength.into()),
        };

        Ok(Self {
            key: Zeroizing::new(key.to_vec()),
            cipher,
        })
    }

    fn encrypt(&self, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        if iv.len() != jwa::AesCbcHs::IV_LEN {
            return Err(BackendError::InvalidLength.into());
        }

        // PKCS#7 padding is enabled by default
        Ok(symm::encrypt(self.cipher, &self.key, Some(iv), plaintext)?)
    }

    fn decrypt(&self, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        if iv.len() != jwa::AesCbcHs::IV_LEN {
            return Err(BackendError::InvalidLength.into());
        }

        Ok(symm::decrypt(self.cipher, &self.key, Some(iv), ciphertext)?)
    }
}

/// A low level AES key encryption key.
///
/// [`AesKey`] is direction specific and not `Clone`, so it is created per
/// operation from the raw key.
pub(crate) struct KwKey {
    key: Zeroizing<Vec<u8>>,
}

const SEMIBLOCK: usize = 8;

impl aes::KwKey for KwKey {
    fn new(variant: jwa::AesKw, key: &[u8]) -> Result<Self> {
        if key.len() != variant.key_len() {
            return Err(BackendError::InvalidLength.into());
        }

        Ok(Self {
            key: Zeroizing::new(key.to_vec()),
        })
    }

    fn wrap(&self, key: &[u8]) -> Result<Vec<u8>> {
        // `wrap_key` panics on these
        if key.len() < 2 * SEMIBLOCK || key.len() % SEMIBLOCK != 0 {
            return Err(BackendError::InvalidLength.into());
        }

        let kek = AesKey::new_encrypt(&self.key)?;
        let mut out = alloc::vec![0u8; key.len() + SEMIBLOCK];
        let written = wrap_key(&kek, None, &mut out, key)?;
        out.truncate(written);

        Ok(out)
    }

    fn unwrap(&self, wrapped: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        // `unwrap_key` panics on these
        if wrapped.len() < 3 * SEMIBLOCK || wrapped.len() % SEMIBLOCK != 0 {
            return Err(BackendError::InvalidLength.into());
        }

        let kek = AesKey::new_decrypt(&self.key)?;
        let mut out = Zeroizing::new(alloc::vec![0u8; wrapped.len() - SEMIBLOCK]);
        let written = unwrap_key(&kek, None, &mut out, wrapped)?;
        out.truncate(written);

        Ok(out)
    }
}
