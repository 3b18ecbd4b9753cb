//! The interfaces for RSA.

use alloc::vec::Vec;

use rand_core::CryptoRngCore;
use secrecy::SecretSlice;
use zeroize::Zeroizing;

use crate::{crypto::Result, jwa::RsaEncryption};

/// Part of the [`PrivateKeyComponents`], which includes additional information
/// about the prime numbers.
pub(crate) struct PrivateKeyPrimeComponents {
    pub p: SecretSlice<u8>,
    pub q: SecretSlice<u8>,
    pub dp: SecretSlice<u8>,
    pub dq: SecretSlice<u8>,
    pub qi: SecretSlice<u8>,
}

/// The components of a private key.
///
/// All fields in this struct are big integers represented in big endian
/// bytes.
pub(crate) struct PrivateKeyComponents {
    pub d: SecretSlice<u8>,
    pub prime: PrivateKeyPrimeComponents,
}

/// The components of a public key.
///
/// All fields in this struct are of type `Vec<u8>` and are
/// big integers represented in big endian bytes.
pub(crate) struct PublicKeyComponents {
    pub n: Vec<u8>,
    pub e: Vec<u8>,
}

/// The common operations for an RSA private key.
pub(crate) trait PrivateKey: Sized + Clone {
    /// The public key type.
    type PublicKey: PublicKey;

    /// Generates a new key with a modulus of `bits` bits.
    fn generate<R: CryptoRngCore + ?Sized>(rng: &mut R, bits: usize) -> Result<Self>;

    /// Creates a new RSA private key from the given private key components.
    fn from_components(pri: PrivateKeyComponents, pu: PublicKeyComponents) -> Result<Self>;

    /// Creates a new public key from this private key.
    fn to_public_key(&self) -> Self::PublicKey;

    /// Returns the private components of this key.
    fn private_components(&self) -> Result<PrivateKeyComponents>;

    /// Returns the public components of this key.
    fn public_components(&self) -> PublicKeyComponents;

    /// The size of the modulus in bytes.
    fn size(&self) -> usize;

    /// Decrypts `ciphertext` using the given padding.
    ///
    /// Implementations blind the private key operation. Backends that can
    /// take an RNG for the blinding factor use `rng`.
    fn decrypt<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        padding: RsaEncryption,
        ciphertext: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>>;
}

/// The common operations for an RSA public key.
pub(crate) trait PublicKey: Sized + Clone {
    /// Creates a new RSA public key from the given public key components.
    fn from_components(components: PublicKeyComponents) -> Result<Self>;

    /// Returns the public components of this key.
    fn components(&self) -> PublicKeyComponents;

    /// The size of the modulus in bytes.
    fn size(&self) -> usize;

    /// Encrypts `msg` using the given padding.
    fn encrypt<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        padding: RsaEncryption,
        msg: &[u8],
    ) -> Result<Vec<u8>>;
}
