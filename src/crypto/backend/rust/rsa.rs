use alloc::vec::Vec;

use ::rsa::{
    traits::{PrivateKeyParts as _, PublicKeyParts as _},
    BigUint, Oaep, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey,
};
use rand_core::CryptoRngCore;
use secrecy::{ExposeSecret as _, SecretSlice};
use zeroize::Zeroizing;

use super::BackendError;
use crate::{
    crypto::{backend::interface::rsa, Result},
    jwa::{RsaEncryption, RsaesOaep},
};

/// A low level private RSA key.
#[derive(Clone)]
#[repr(transparent)]
pub(crate) struct PrivateKey {
    // WARN: It is important that the `inner` key always contains it's precomupted values.
    // It must be ensured that on each construction of this type, `precomputed` method is called
    inner: RsaPrivateKey,
}

impl rsa::PrivateKey for PrivateKey {
    type PublicKey = PublicKey;

    fn generate<R: CryptoRngCore + ?Sized>(rng: &mut R, bits: usize) -> Result<Self> {
        let mut inner = RsaPrivateKey::new(rng, bits)?;
        inner.precompute()?;
        Ok(Self { inner })
    }

    fn from_components(
        pri: rsa::PrivateKeyComponents,
        pu: rsa::PublicKeyComponents,
    ) -> Result<Self> {
        let n = BigUint::from_bytes_be(&pu.n);
        let e = BigUint::from_bytes_be(&pu.e);

        let d = BigUint::from_bytes_be(pri.d.expose_secret());
        let p = BigUint::from_bytes_be(pri.prime.p.expose_secret());
        let q = BigUint::from_bytes_be(pri.prime.q.expose_secret());

        // dp, dq and qi are derived again by `precompute`
        let mut key = RsaPrivateKey::from_components(n, e, d, alloc::vec![p, q])?;
        key.precompute()?;
        Ok(Self { inner: key })
    }

    fn to_public_key(&self) -> Self::PublicKey {
        PublicKey {
            inner: self.inner.to_public_key(),
        }
    }

    fn private_components(&self) -> Result<rsa::PrivateKeyComponents> {
        let [p, q] = self.inner.primes() else {
            return Err(BackendError::RsaTwoPrimes.into());
        };

        let secret = |x: Option<&BigUint>| {
            x.map(|x| SecretSlice::from(x.to_bytes_be()))
                .ok_or(BackendError::MissingPrecomputed)
        };
        let qi = Zeroizing::new(self.inner.crt_coefficient());

        Ok(rsa::PrivateKeyComponents {
            d: SecretSlice::from(self.inner.d().to_bytes_be()),
            prime: rsa::PrivateKeyPrimeComponents {
                p: SecretSlice::from(p.to_bytes_be()),
                q: SecretSlice::from(q.to_bytes_be()),
                dp: secret(self.inner.dp())?,
                dq: secret(self.inner.dq())?,
                qi: secret(Option::as_ref(&qi))?,
            },
        })
    }

    fn public_components(&self) -> rsa::PublicKeyComponents {
        rsa::PublicKeyComponents {
            n: self.inner.n().to_bytes_be(),
            e: self.inner.e().to_bytes_be(),
        }
    }

    fn size(&self) -> usize {
        self.inner.size()
    }

    fn decrypt<R: CryptoRngCore + ?Sized>(
        &self,
        mut rng: &mut R,
        padding: RsaEncryption,
        ciphertext: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>> {
        let msg = match padding {
            RsaEncryption::Pkcs1V1_5 => {
                self.inner
                    .decrypt_blinded(&mut rng, Pkcs1v15Encrypt, ciphertext)
            }
            RsaEncryption::Oaep(RsaesOaep::RsaesOaep) => self.inner.decrypt_blinded(
                &mut rng,
                Oaep::new::<sha1::Sha1>(),
                ciphertext,
            ),
            RsaEncryption::Oaep(RsaesOaep::RsaesOaep256) => self.inner.decrypt_blinded(
                &mut rng,
                Oaep::new::<sha2::Sha256>(),
                ciphertext,
            ),
        };

        Ok(Zeroizing::new(msg?))
    }
}

/// A low level public RSA key.
#[derive(Clone)]
#[repr(transparent)]
pub(crate) struct PublicKey {
    inner: RsaPublicKey,
}

impl rsa::PublicKey for PublicKey {
    fn from_components(c: rsa::PublicKeyComponents) -> Result<Self> {
        let n = BigUint::from_bytes_be(&c.n);
        let e = BigUint::from_bytes_be(&c.e);
        let key = RsaPublicKey::new(n, e)?;

        Ok(Self { inner: key })
    }

    fn components(&self) -> rsa::PublicKeyComponents {
        rsa::PublicKeyComponents {
            n: self.inner.n().to_bytes_be(),
            e: self.inner.e().to_bytes_be(),
        }
    }

    fn size(&self) -> usize {
        self.inner.size()
    }

    fn encrypt<R: CryptoRngCore + ?Sized>(
        &self,
        mut rng: &mut R,
        padding: RsaEncryption,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        let ciphertext = match padding {
            RsaEncryption::Pkcs1V1_5 => self.inner.encrypt(&mut rng, Pkcs1v15Encrypt, msg),
            RsaEncryption::Oaep(RsaesOaep::RsaesOaep) => {
                self.inner
                    .encrypt(&mut rng, Oaep::new::<sha1::Sha1>(), msg)
            }
            RsaEncryption::Oaep(RsaesOaep::RsaesOaep256) => {
                self.inner
                    .encrypt(&mut rng, Oaep::new::<sha2::Sha256>(), msg)
            }
        };

        Ok(ciphertext?)
    }
}
