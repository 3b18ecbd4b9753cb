use alloc::vec::Vec;

use openssl::{
    bn::BigNum,
    encrypt::{Decrypter, Encrypter},
    hash::MessageDigest,
    pkey::{PKey, Private, Public},
    rsa::{Padding, Rsa},
};
use rand_core::CryptoRngCore;
use secrecy::{ExposeSecret as _, SecretSlice};
use zeroize::Zeroizing;

use super::BackendError;
use crate::{
    crypto::{backend::interface::rsa, Result},
    jwa::{RsaEncryption, RsaesOaep},
};

fn oaep_digest(oaep: RsaesOaep) -> MessageDigest {
    match oaep {
        RsaesOaep::RsaesOaep => MessageDigest::sha1(),
        RsaesOaep::RsaesOaep256 => MessageDigest::sha256(),
    }
}

/// A low level private RSA key.
#[derive(Clone)]
pub(crate) struct PrivateKey {
    private_key: PKey<Private>,
    public_key: PKey<Public>,

    private_data: Rsa<Private>,
    public_data: Rsa<Public>,
}

impl PrivateKey {
    fn from_rsa(private_data: Rsa<Private>) -> Result<Self> {
        let n = private_data.n().to_owned()?;
        let e = private_data.e().to_owned()?;
        let public_data = Rsa::from_public_components(n, e)?;

        Ok(Self {
            private_key: PKey::from_rsa(private_data.clone())?,
            public_key: PKey::from_rsa(public_data.clone())?,
            private_data,
            public_data,
        })
    }
}

impl rsa::PrivateKey for PrivateKey {
    type PublicKey = PublicKey;

    fn generate<R: CryptoRngCore + ?Sized>(_rng: &mut R, bits: usize) -> Result<Self> {
        let bits = u32::try_from(bits).map_err(|_| BackendError::InvalidLength)?;
        Self::from_rsa(Rsa::generate(bits)?)
    }

    fn from_components(
        pri: rsa::PrivateKeyComponents,
        pu: rsa::PublicKeyComponents,
    ) -> Result<Self> {
        let n = BigNum::from_slice(&pu.n)?;
        let e = BigNum::from_slice(&pu.e)?;
        let d = BigNum::from_slice(pri.d.expose_secret())?;
        let p = BigNum::from_slice(pri.prime.p.expose_secret())?;
        let q = BigNum::from_slice(pri.prime.q.expose_secret())?;
        let dp = BigNum::from_slice(pri.prime.dp.expose_secret())?;
        let dq = BigNum::from_slice(pri.prime.dq.expose_secret())?;
        let qi = BigNum::from_slice(pri.prime.qi.expose_secret())?;

        let private_data = Rsa::from_private_components(n, e, d, p, q, dp, dq, qi)?;
        private_data.check_key()?;

        Self::from_rsa(private_data)
    }

    fn to_public_key(&self) -> Self::PublicKey {
        PublicKey {
            key: self.public_key.clone(),
            data: self.public_data.clone(),
        }
    }

    fn private_components(&self) -> Result<rsa::PrivateKeyComponents> {
        let err = || BackendError::NoPrimeData;
        let secret = |x: &openssl::bn::BigNumRef| SecretSlice::from(x.to_vec());

        Ok(rsa::PrivateKeyComponents {
            d: secret(self.private_data.d()),
            prime: rsa::PrivateKeyPrimeComponents {
                p: secret(self.private_data.p().ok_or_else(err)?),
                q: secret(self.private_data.q().ok_or_else(err)?),
                dp: secret(self.private_data.dmp1().ok_or_else(err)?),
                dq: secret(self.private_data.dmq1().ok_or_else(err)?),
                qi: secret(self.private_data.iqmp().ok_or_else(err)?),
            },
        })
    }

    fn public_components(&self) -> rsa::PublicKeyComponents {
        rsa::PublicKeyComponents {
            n: self.private_data.n().to_vec(),
            e: self.private_data.e().to_vec(),
        }
    }

    fn size(&self) -> usize {
        self.private_data.size() as usize
    }

    fn decrypt<R: CryptoRngCore + ?Sized>(
        &self,
        _rng: &mut R,
        padding: RsaEncryption,
        ciphertext: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>> {
        let mut decrypter = Decrypter::new(&self.private_key)?;

        match padding {
            RsaEncryption::Pkcs1V1_5 => decrypter.set_rsa_padding(Padding::PKCS1)?,
            RsaEncryption::Oaep(oaep) => {
                decrypter.set_rsa_padding(Padding::PKCS1_OAEP)?;
                decrypter.set_rsa_oaep_md(oaep_digest(oaep))?;
                decrypter.set_rsa_mgf1_md(oaep_digest(oaep))?;
            }
        }

        let len = decrypter.decrypt_len(ciphertext)?;
        let mut msg = Zeroizing::new(alloc::vec![0u8; len]);
        let written = decrypter.decrypt(ciphertext, &mut msg)?;
        msg.truncate(written);

        Ok(msg)
    }
}

/// A low level public RSA key.
#[derive(Clone)]
pub(crate) struct PublicKey {
    key: PKey<Public>,
    data: Rsa<Public>,
}

impl rsa::PublicKey for PublicKey {
    fn from_components(c: rsa::PublicKeyComponents) -> Result<Self> {
        let n = BigNum::from_slice(&c.n)?;
        let e = BigNum::from_slice(&c.e)?;
        let data = Rsa::from_public_components(n, e)?;

        Ok(Self {
            key: PKey::from_rsa(data.clone())?,
            data,
        })
    }

    fn components(&self) -> rsa::PublicKeyComponents {
        rsa::PublicKeyComponents {
            n: self.data.n().to_vec(),
            e: self.data.e().to_vec(),
        }
    }

    fn size(&self) -> usize {
        self.data.size() as usize
    }

    fn encrypt<R: CryptoRngCore + ?Sized>(
        &self,
        _rng: &mut R,
        padding: RsaEncryption,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        let mut encrypter = Encrypter::new(&self.key)?;

        match padding {
            RsaEncryption::Pkcs1V1_5 => encrypter.set_rsa_padding(Padding::PKCS1)?,
            RsaEncryption::Oaep(oaep) => {
                encrypter.set_rsa_padding(Padding::PKCS1_OAEP)?;
                encrypter.set_rsa_oaep_md(oaep_digest(oaep))?;
                encrypter.set_rsa_mgf1_md(oaep_digest(oaep))?;
            }
        }

        let len = encrypter.encrypt_len(msg)?;
        let mut ciphertext = alloc::vec![0u8; len];
        let written = encrypter.encrypt(msg, &mut ciphertext)?;
        ciphertext.truncate(written);

        Ok(ciphertext)
    }
}
