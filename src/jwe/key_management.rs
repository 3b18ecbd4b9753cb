//! Wrapping and unwrapping of the content encryption key
//!
//! [`KeyWrapper::select`] and [`KeyUnwrapper::select`] check the pairing of
//! key and algorithm before anything else happens. Neither consumes
//! randomness, so a refused key never touches the caller's RNG.

use alloc::vec::Vec;

use rand_core::CryptoRngCore;

use super::{cek::ContentEncryptionKey, content::ContentEncryption, KeyError};
use crate::{
    crypto::{
        self,
        aes::KwKey,
        rsa::{PrivateKey, PublicKey},
    },
    jwa::{AesKw, JsonWebEncryptionAlgorithm, RsaEncryption},
    jwk::{JsonWebKey, JsonWebKeyType, KeyUsage, OctetSequence},
};

/// Encrypts a CEK for one recipient key.
#[derive(Debug)]
pub(crate) enum KeyWrapper<'a> {
    Rsa {
        key: PublicKey,
        padding: RsaEncryption,
    },
    AesKw {
        key: &'a [u8],
        variant: AesKw,
    },
}

impl<'a> KeyWrapper<'a> {
    /// Pick the wrapping operation for `alg` and `jwk`.
    ///
    /// An RSA private key wraps with its public half.
    pub(crate) fn select(
        alg: &JsonWebEncryptionAlgorithm,
        content: ContentEncryption,
        jwk: &'a JsonWebKey,
    ) -> Result<Self, KeyError> {
        check_metadata(alg, jwk)?;

        let (key, padding) = match (alg, jwk.key_type()) {
            (JsonWebEncryptionAlgorithm::Other(name), _) => {
                return Err(KeyError::UnsupportedAlgorithm(name.clone()))
            }
            (JsonWebEncryptionAlgorithm::AesKw(variant), JsonWebKeyType::Symmetric(key)) => {
                return Ok(Self::AesKw {
                    key: kek_bytes(*variant, key)?,
                    variant: *variant,
                });
            }
            (_, JsonWebKeyType::RsaPublic(key)) => (key.clone(), rsa_padding(alg, jwk)?),
            (_, JsonWebKeyType::RsaPrivate(key)) => (key.to_public_key(), rsa_padding(alg, jwk)?),
            _ => return Err(incompatible(alg, jwk)),
        };

        let cek_len = content.key_len();
        if key.size().saturating_sub(padding.overhead()) < cek_len {
            return Err(KeyError::KeyTooSmall {
                alg: alg.clone(),
                bits: key.bits(),
                cek_len,
            });
        }

        Ok(Self::Rsa { key, padding })
    }

    pub(crate) fn wrap<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        cek: &ContentEncryptionKey,
    ) -> crypto::Result<Vec<u8>> {
        match self {
            Self::Rsa { key, padding } => key.encrypt(rng, *padding, cek.as_bytes()),
            Self::AesKw { key, variant } => KwKey::new(*variant, key)?.wrap(cek.as_bytes()),
        }
    }
}

/// Recovers a CEK with a recipient key.
#[derive(Debug)]
pub(crate) enum KeyUnwrapper<'a> {
    Rsa {
        key: &'a PrivateKey,
        padding: RsaEncryption,
    },
    AesKw {
        key: &'a [u8],
        variant: AesKw,
    },
}

impl<'a> KeyUnwrapper<'a> {
    /// Pick the unwrapping operation for `alg` and `jwk`.
    pub(crate) fn select(
        alg: &JsonWebEncryptionAlgorithm,
        jwk: &'a JsonWebKey,
    ) -> Result<Self, KeyError> {
        check_metadata(alg, jwk)?;

        match (alg, jwk.key_type()) {
            (JsonWebEncryptionAlgorithm::Other(name), _) => {
                Err(KeyError::UnsupportedAlgorithm(name.clone()))
            }
            (JsonWebEncryptionAlgorithm::AesKw(variant), JsonWebKeyType::Symmetric(key)) => {
                Ok(Self::AesKw {
                    key: kek_bytes(*variant, key)?,
                    variant: *variant,
                })
            }
            (_, JsonWebKeyType::RsaPrivate(key)) => Ok(Self::Rsa {
                key,
                padding: rsa_padding(alg, jwk)?,
            }),
            (_, JsonWebKeyType::RsaPublic(_)) if alg.rsa_encryption().is_some() => {
                Err(KeyError::MissingPrivateKey(alg.clone()))
            }
            _ => Err(incompatible(alg, jwk)),
        }
    }

    /// Recover the CEK from `encrypted_key`.
    ///
    /// The error is only ever inspected for being an error.
    pub(crate) fn unwrap<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        encrypted_key: &[u8],
    ) -> crypto::Result<ContentEncryptionKey> {
        let cek = match self {
            Self::Rsa { key, padding } => key.decrypt(rng, *padding, encrypted_key)?,
            Self::AesKw { key, variant } => KwKey::new(*variant, key)?.unwrap(encrypted_key)?,
        };
        Ok(ContentEncryptionKey::from(cek))
    }
}

fn check_metadata(alg: &JsonWebEncryptionAlgorithm, jwk: &JsonWebKey) -> Result<(), KeyError> {
    if let Some(key_use) = jwk.key_use() {
        if *key_use != KeyUsage::Encryption {
            return Err(KeyError::InvalidKeyUsage(key_use.clone()));
        }
    }

    match jwk.algorithm() {
        Some(allowed) if allowed != alg => Err(KeyError::AlgorithmMismatch {
            allowed: allowed.clone(),
            requested: alg.clone(),
        }),
        _ => Ok(()),
    }
}

fn rsa_padding(
    alg: &JsonWebEncryptionAlgorithm,
    jwk: &JsonWebKey,
) -> Result<RsaEncryption, KeyError> {
    alg.rsa_encryption().ok_or_else(|| incompatible(alg, jwk))
}

fn kek_bytes(variant: AesKw, key: &OctetSequence) -> Result<&[u8], KeyError> {
    if key.len() != variant.key_len() {
        return Err(KeyError::InvalidKeyLength {
            expected: variant.key_len(),
            got: key.len(),
        });
    }
    Ok(key.bytes())
}

fn incompatible(alg: &JsonWebEncryptionAlgorithm, jwk: &JsonWebKey) -> KeyError {
    KeyError::IncompatibleKey {
        alg: alg.clone(),
        kind: jwk.kind(),
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use rand_core::OsRng;

    use super::*;
    use crate::jwa::{AesCbcHs, AesGcm, RsaesOaep};

    const A128GCM: ContentEncryption = ContentEncryption::AesGcm(AesGcm::Aes128);

    fn oct(len: usize) -> JsonWebKey {
        JsonWebKey::new(OctetSequence::new(vec![0x42; len]))
    }

    #[test]
    fn compatibility_table() {
        let alg = JsonWebEncryptionAlgorithm::AesKw(AesKw::Aes192);
        assert!(KeyWrapper::select(&alg, A128GCM, &oct(24)).is_ok());
        assert!(KeyUnwrapper::select(&alg, &oct(24)).is_ok());

        assert!(matches!(
            KeyWrapper::select(&alg, A128GCM, &oct(16)),
            Err(KeyError::InvalidKeyLength {
                expected: 24,
                got: 16
            })
        ));

        assert!(matches!(
            KeyWrapper::select(&JsonWebEncryptionAlgorithm::Rsa1_5, A128GCM, &oct(16)),
            Err(KeyError::IncompatibleKey { .. })
        ));
        assert!(matches!(
            KeyUnwrapper::select(&"dir".parse().unwrap(), &oct(16)),
            Err(KeyError::UnsupportedAlgorithm(ref name)) if name == "dir"
        ));
    }

    #[test]
    fn rsa_keys() {
        let private = PrivateKey::generate(&mut OsRng, 1024).unwrap();
        let public = JsonWebKey::new(private.to_public_key());
        let private = JsonWebKey::new(private);
        let alg = JsonWebEncryptionAlgorithm::RsaesOaep(RsaesOaep::RsaesOaep256);

        // both halves wrap, only the private one unwraps
        assert!(KeyWrapper::select(&alg, A128GCM, &public).is_ok());
        assert!(KeyWrapper::select(&alg, A128GCM, &private).is_ok());
        assert!(matches!(
            KeyUnwrapper::select(&alg, &public),
            Err(KeyError::MissingPrivateKey(_))
        ));

        let kw = JsonWebEncryptionAlgorithm::AesKw(AesKw::Aes128);
        assert!(matches!(
            KeyUnwrapper::select(&kw, &private),
            Err(KeyError::IncompatibleKey { .. })
        ));

        let wrapper = KeyWrapper::select(&alg, A128GCM, &public).unwrap();
        let unwrapper = KeyUnwrapper::select(&alg, &private).unwrap();
        let (cek, _) = super::super::cek::generate(&mut OsRng, A128GCM);

        let wrapped = wrapper.wrap(&mut OsRng, &cek).unwrap();
        let unwrapped = unwrapper.unwrap(&mut OsRng, &wrapped).unwrap();
        assert_eq!(unwrapped.as_bytes(), cek.as_bytes());
    }

    #[test]
    fn rsa_capacity() {
        let private = PrivateKey::generate(&mut OsRng, 512).unwrap();
        let key = JsonWebKey::new(private);
        let cbc = ContentEncryption::AesCbcHs(AesCbcHs::Aes256CbcHs512);

        // 64 - 66 leaves no room at all
        let oaep256 = JsonWebEncryptionAlgorithm::RsaesOaep(RsaesOaep::RsaesOaep256);
        assert!(matches!(
            KeyWrapper::select(&oaep256, A128GCM, &key),
            Err(KeyError::KeyTooSmall {
                bits: 512,
                cek_len: 16,
                ..
            })
        ));

        // 64 - 11 = 53 bytes fit a 16 byte CEK, not a 64 byte one
        assert!(KeyWrapper::select(&JsonWebEncryptionAlgorithm::Rsa1_5, A128GCM, &key).is_ok());
        assert!(matches!(
            KeyWrapper::select(&JsonWebEncryptionAlgorithm::Rsa1_5, cbc, &key),
            Err(KeyError::KeyTooSmall { .. })
        ));
    }

    #[test]
    fn metadata_conflicts() {
        let alg = JsonWebEncryptionAlgorithm::AesKw(AesKw::Aes128);

        let signing = oct(16).with_key_use(KeyUsage::Signing);
        assert!(matches!(
            KeyWrapper::select(&alg, A128GCM, &signing),
            Err(KeyError::InvalidKeyUsage(KeyUsage::Signing))
        ));

        let pinned = oct(16).with_algorithm(JsonWebEncryptionAlgorithm::AesKw(AesKw::Aes256));
        assert!(matches!(
            KeyUnwrapper::select(&alg, &pinned),
            Err(KeyError::AlgorithmMismatch { .. })
        ));

        let fine = oct(16)
            .with_key_use(KeyUsage::Encryption)
            .with_algorithm(alg.clone());
        assert!(KeyUnwrapper::select(&alg, &fine).is_ok());
    }

    #[test]
    fn garbage_does_not_unwrap() {
        let key = oct(16);
        let alg = JsonWebEncryptionAlgorithm::AesKw(AesKw::Aes128);
        let unwrapper = KeyUnwrapper::select(&alg, &key).unwrap();

        let cases: [&[u8]; 4] = [&[], &[0; 7], &[0; 24], &[0; 40]];
        for garbage in cases {
            assert!(unwrapper.unwrap(&mut OsRng, garbage).is_err());
        }
    }
}
