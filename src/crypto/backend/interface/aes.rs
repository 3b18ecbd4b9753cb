//! The interfaces for the AES based primitives.

use alloc::vec::Vec;

use zeroize::Zeroizing;

use crate::{crypto::Result, jwa};

/// AES in Galois/Counter Mode with a 96 bit nonce and a 128 bit tag.
pub(crate) trait GcmKey: Sized {
    /// Creates a new key. Fails if `key` does not have the length required
    /// by `variant`.
    fn new(variant: jwa::AesGcm, key: &[u8]) -> Result<Self>;

    /// Encrypts `plaintext` and returns the ciphertext and the detached tag.
    fn encrypt(&self, iv: &[u8], aad: &[u8], plaintext: &[u8]) -> Result<(Vec<u8>, Vec<u8>)>;

    /// Verifies `tag` and decrypts `ciphertext`.
    fn decrypt(&self, iv: &[u8], aad: &[u8], ciphertext: &[u8], tag: &[u8]) -> Result<Vec<u8>>;
}

/// AES in Cipher Block Chaining mode with PKCS#7 padding.
///
/// This is not authenticated on its own.
pub(crate) trait CbcKey: Sized {
    /// Creates a new key of 16, 24 or 32 bytes.
    fn new(key: &[u8]) -> Result<Self>;

    /// Pads and encrypts `plaintext`.
    fn encrypt(&self, iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>>;

    /// Decrypts `ciphertext` and removes the padding.
    fn decrypt(&self, iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>>;
}

/// AES Key Wrap as defined in RFC 3394, with the default initial value.
pub(crate) trait KwKey: Sized {
    /// Creates a new key encryption key. Fails if `key` does not have the
    /// length required by `variant`.
    fn new(variant: jwa::AesKw, key: &[u8]) -> Result<Self>;

    /// Wraps `key`, the output is 8 bytes longer than the input.
    fn wrap(&self, key: &[u8]) -> Result<Vec<u8>>;

    /// Unwraps and integrity checks `wrapped`.
    fn unwrap(&self, wrapped: &[u8]) -> Result<Zeroizing<Vec<u8>>>;
}
