use alloc::vec::Vec;

use ::aes::{Aes128, Aes192, Aes256};
use aes_gcm::{
    aead::{
        consts::U12,
        generic_array::{typenum::Unsigned as _, GenericArray},
        AeadCore, AeadInPlace, KeyInit as _,
    },
    Aes128Gcm, Aes256Gcm,
};
use aes_kw::{KekAes128, KekAes192, KekAes256};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut as _, BlockEncryptMut as _, KeyIvInit as _};
use zeroize::Zeroizing;

use super::BackendError;
use crate::{
    crypto::{backend::interface::aes, Result},
    jwa,
};

type Aes192Gcm = aes_gcm::AesGcm<Aes192, U12>;

enum ErasedGcm {
    Aes128(Aes128Gcm),
    Aes192(Aes192Gcm),
    Aes256(Aes256Gcm),
}

/// A low level AES-GCM key.
pub(crate) struct GcmKey {
    inner: ErasedGcm,
}

fn seal<C: AeadInPlace>(
    cipher: &C,
    iv: &[u8],
    aad: &[u8],
    plaintext: &[u8],
) -> Result<(Vec<u8>, Vec<u8>)> {
    // `GenericArray::from_slice` panics on a length mismatch
    if iv.len() != <C as AeadCore>::NonceSize::USIZE {
        return Err(BackendError::InvalidLength.into());
    }

    let mut buffer = plaintext.to_vec();
    let tag = cipher.encrypt_in_place_detached(GenericArray::from_slice(iv), aad, &mut buffer)?;

    Ok((buffer, tag.to_vec()))
}

fn open<C: AeadInPlace>(
    cipher: &C,
    iv: &[u8],
    aad: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
) -> Result<Vec<u8>> {
    if iv.len() != <C as AeadCore>::NonceSize::USIZE
        || tag.len() != <C as AeadCore>::TagSize::USIZE
    {
        return Err(BackendError::InvalidLength.into());
    }

    let mut buffer = ciphertext.to_vec();
    cipher.decrypt_in_place_detached(
        GenericArray::from_slice(iv),
        aad,
        &mut buffer,
        GenericArray::from_slice(tag),
    )?;

    Ok(buffer)
}

impl aes::GcmKey for GcmKey {
    fn new(variant: jwa::AesGcm, key: &[u8]) -> Result<Self> {
        if key.len() != variant.key_len() {
            return Err(BackendError::InvalidLength.into());
        }

        let inner = match variant {
            jwa::AesGcm::Aes128 => ErasedGcm::Aes128(Aes128Gcm::new_from_slice(key)?),
            jwa::AesGcm::Aes192 => ErasedGcm::Aes192(Aes192Gcm::new_from_slice(key)?),
            jwa::AesGcm::Aes256 => ErasedGcm::Aes256(Aes256Gcm::new_from_slice(key)?),
        };

        Ok(Self { inner })
    }

    fn encrypt(&self, iv: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<(Vec<u8>, Vec<u8>)> {
        match &self.inner {
            ErasedGcm::Aes128(cipher) => seal(cipher, iv, aad, plaintext),
            ErasedGcm::Aes192(cipher) => seal(cipher, iv, aad, plaintext),
            ErasedGcm::Aes256(cipher) => seal(cipher, iv, aad, plaintext),
        }
    }

    fn decrypt(&self, iv: &[u8], aad: &[u8], ciphertext: &[u8], tag: &[u8]) -> Result<Vec<u8>> {
        match &self.inner {
            ErasedGcm::Aes128(cipher) => open(cipher, iv, aad, ciphertext, tag),
            ErasedGcm::Aes192(cipher) => open(cipher, iv, aad, ciphertext, tag),
            ErasedGcm::Aes256(cipher) => open(cipher, iv, aad, ciphertext, tag),
        }
    }
}

/// A low level AES-CBC key.
///
/// The `cbc` modes take key and IV at once, so only the raw key is kept.
pub(crate) struct CbcKey {
    key: Zeroizing<Vec<u8>>,
}

impl aes::CbcKey for CbcKey {
    fn new(key: &[u8]) -> Result<Self> {
        match key.len() {
            16 | 24 | 32 => Ok(Self {
                key: Zeroizing::new(key.to_vec()),
            }),
            _ => Err(BackendError::InvalidLength.into()),
        }
    }

    fn encrypt(&self, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        let key = self.key.as_slice();
        let ciphertext = match key.len() {
            16 => cbc::Encryptor::<Aes128>::new_from_slices(key, iv)?
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
            24 => cbc::Encryptor::<Aes192>::new_from_slices(key, iv)?
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
            32 => cbc::Encryptor::<Aes256>::new_from_slices(key, iv)?
                .encrypt_padded_vec_mut::<Pkcs7>(plaintext),
            _ => return Err(BackendError::InvalidLength.into()),
        };

        Ok(ciphertext)
    }

    fn decrypt(&self, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        let key = self.key.as_slice();
        let plaintext = match key.len() {
            16 => cbc::Decryptor::<Aes128>::new_from_slices(key, iv)?
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)?,
            24 => cbc::Decryptor::<Aes192>::new_from_slices(key, iv)?
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)?,
            32 => cbc::Decryptor::<Aes256>::new_from_slices(key, iv)?
                .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)?,
            _ => return Err(BackendError::InvalidLength.into()),
        };

        Ok(plaintext)
    }
}

enum ErasedKek {
    Aes128(KekAes128),
    Aes192(KekAes192),
    Aes256(KekAes256),
}

/// A low level AES key encryption key.
pub(crate) struct KwKey {
    inner: ErasedKek,
}

impl aes::KwKey for KwKey {
    fn new(variant: jwa::AesKw, key: &[u8]) -> Result<Self> {
        if key.len() != variant.key_len() {
            return Err(BackendError::InvalidLength.into());
        }

        let inner = match variant {
            jwa::AesKw::Aes128 => ErasedKek::Aes128(KekAes128::try_from(key)?),
            jwa::AesKw::Aes192 => ErasedKek::Aes192(KekAes192::try_from(key)?),
            jwa::AesKw::Aes256 => ErasedKek::Aes256(KekAes256::try_from(key)?),
        };

        Ok(Self { inner })
    }

    fn wrap(&self, key: &[u8]) -> Result<Vec<u8>> {
        let mut out = alloc::vec![0u8; key.len() + aes_kw::IV_LEN];

        match &self.inner {
            ErasedKek::Aes128(kek) => kek.wrap(key, &mut out)?,
            ErasedKek::Aes192(kek) => kek.wrap(key, &mut out)?,
            ErasedKek::Aes256(kek) => kek.wrap(key, &mut out)?,
        }

        Ok(out)
    }

    fn unwrap(&self, wrapped: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        let len = wrapped
            .len()
            .checked_sub(aes_kw::IV_LEN)
            .ok_or(BackendError::InvalidLength)?;
        let mut out = Zeroizing::new(alloc::vec![0u8; len]);

        match &self.inner {
            ErasedKek::Aes128(kek) => kek.unwrap(wrapped, &mut out)?,
            ErasedKek::Aes192(kek) => kek.unwrap(wrapped, &mut out)?,
            ErasedKek::Aes256(kek) => kek.unwrap(wrapped, &mut out)?,
        }

        Ok(out)
    }
}
