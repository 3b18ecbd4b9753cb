//! The AES based primitives: AES-GCM, AES-CBC and AES key wrap.

use alloc::vec::Vec;

use zeroize::Zeroizing;

use super::{
    backend::{
        interface::{
            self,
            aes::{CbcKey as _, GcmKey as _, KwKey as _},
        },
        Backend,
    },
    Result,
};
use crate::jwa;

type BackendGcmKey = <Backend as interface::Backend>::AesGcmKey;
type BackendCbcKey = <Backend as interface::Backend>::AesCbcKey;
type BackendKwKey = <Backend as interface::Backend>::AesKwKey;

/// An AES-GCM key.
pub(crate) struct GcmKey {
    inner: BackendGcmKey,
}

impl GcmKey {
    pub(crate) fn new(variant: jwa::AesGcm, key: &[u8]) -> Result<Self> {
        Ok(Self {
            inner: BackendGcmKey::new(variant, key)?,
        })
    }

    pub(crate) fn encrypt(
        &self,
        iv: &[u8],
        aad: &[u8],
        plaintext: &[u8],
    ) -> Result<(Vec<u8>, Vec<u8>)> {
        self.inner.encrypt(iv, aad, plaintext)
    }

    pub(crate) fn decrypt(
        &self,
        iv: &[u8],
        aad: &[u8],
        ciphertext: &[u8],
        tag: &[u8],
    ) -> Result<Vec<u8>> {
        self.inner.decrypt(iv, aad, ciphertext, tag)
    }
}

/// An AES-CBC key with PKCS#7 padding.
pub(crate) struct CbcKey {
    inner: BackendCbcKey,
}

impl CbcKey {
    pub(crate) fn new(key: &[u8]) -> Result<Self> {
        Ok(Self {
            inner: BackendCbcKey::new(key)?,
        })
    }

    pub(crate) fn encrypt(&self, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
        self.inner.encrypt(iv, plaintext)
    }

    pub(crate) fn decrypt(&self, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>> {
        self.inner.decrypt(iv, ciphertext)
    }
}

/// An AES key encryption key.
pub(crate) struct KwKey {
    inner: BackendKwKey,
}

impl KwKey {
    pub(crate) fn new(variant: jwa::AesKw, key: &[u8]) -> Result<Self> {
        Ok(Self {
            inner: BackendKwKey::new(variant, key)?,
        })
    }

    pub(crate) fn wrap(&self, key: &[u8]) -> Result<Vec<u8>> {
        self.inner.wrap(key)
    }

    pub(crate) fn unwrap(&self, wrapped: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
        self.inner.unwrap(wrapped)
    }
}
