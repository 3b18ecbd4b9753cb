//! The primitives for working with [RSA] encryption.
//!
//! Keys serialize to and from the `kty: "RSA"` JSON Web Key form of [section
//! 6.3 of RFC 7518]. Only the key material is handled here, the other JWK
//! parameters live in [`JsonWebKey`](crate::jwk::JsonWebKey).
//!
//! [RSA]: https://en.wikipedia.org/wiki/RSA_cryptosystem
//! [section 6.3 of RFC 7518]: <https://datatracker.ietf.org/doc/html/rfc7518#section-6.3>

use alloc::{boxed::Box, format, string::String, vec::Vec};
use core::fmt;

use rand_core::CryptoRngCore;
use serde::{de::Error as _, ser::Error as _, Deserialize, Serialize};
use zeroize::Zeroizing;

use super::backend::{
    interface::{
        self,
        rsa::{self, PrivateKey as _, PublicKey as _},
    },
    Backend,
};
use crate::{
    base64_url::{Base64UrlBytes, SecretBase64UrlBytes},
    crypto::Result,
    jwa::RsaEncryption,
    jwk,
};

type BackendPublicKey = <Backend as interface::Backend>::RsaPublicKey;
type BackendPrivateKey = <Backend as interface::Backend>::RsaPrivateKey;

/// The RSA public key type.
#[derive(Clone)]
pub struct PublicKey {
    inner: BackendPublicKey,
}

impl PublicKey {
    /// The size of the modulus in bytes.
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    /// The size of the modulus in bits.
    pub fn bits(&self) -> usize {
        self.size() * 8
    }

    pub(crate) fn encrypt<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        padding: RsaEncryption,
        msg: &[u8],
    ) -> Result<Vec<u8>> {
        self.inner.encrypt(rng, padding, msg)
    }
}

impl Eq for PublicKey {}
impl PartialEq for PublicKey {
    fn eq(&self, o: &Self) -> bool {
        let (a, b) = (self.inner.components(), o.inner.components());
        a.n == b.n && a.e == b.e
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let components = self.inner.components();
        f.debug_struct("PublicKey")
            .field("bits", &self.bits())
            .field("e", &components.e)
            .finish()
    }
}

impl From<PublicKey> for jwk::JsonWebKeyType {
    fn from(x: PublicKey) -> Self {
        jwk::JsonWebKeyType::RsaPublic(x)
    }
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        struct Repr {
            kty: &'static str,

            n: Base64UrlBytes,
            e: Base64UrlBytes,
        }

        let components = self.inner.components();
        Repr {
            kty: "RSA",
            n: Base64UrlBytes(components.n),
            e: Base64UrlBytes(components.e),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Repr {
            kty: String,

            n: Base64UrlBytes,
            e: Base64UrlBytes,
        }

        let repr = Repr::deserialize(deserializer)?;

        if &*repr.kty != "RSA" {
            return Err(D::Error::custom("`kty` field is required to be `RSA`"));
        }

        let components = rsa::PublicKeyComponents {
            n: repr.n.0,
            e: repr.e.0,
        };
        let key = BackendPublicKey::from_components(components)
            .map_err(|e| D::Error::custom(format!("failed to construct RSA public key: {}", e)))?;
        Ok(Self { inner: key })
    }
}

/// The RSA private key type.
#[derive(Clone)]
pub struct PrivateKey {
    inner: BackendPrivateKey,
}

impl PrivateKey {
    /// Generate a new RSA key pair with a modulus of `bits` bits.
    ///
    /// The RustCrypto backend draws the primes from `rng`, the OpenSSL backend
    /// uses its own generator.
    ///
    /// # Errors
    ///
    /// Returns an [`Err`] if the key generation fails, e.g. because `bits` is
    /// not supported by the backend.
    pub fn generate<R: CryptoRngCore + ?Sized>(rng: &mut R, bits: usize) -> Result<Self> {
        Ok(Self {
            inner: BackendPrivateKey::generate(rng, bits)?,
        })
    }

    /// Get the public key corresponding to this private key.
    pub fn to_public_key(&self) -> PublicKey {
        PublicKey {
            inner: self.inner.to_public_key(),
        }
    }

    /// The size of the modulus in bytes.
    pub fn size(&self) -> usize {
        self.inner.size()
    }

    /// The size of the modulus in bits.
    pub fn bits(&self) -> usize {
        self.size() * 8
    }

    pub(crate) fn decrypt<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        padding: RsaEncryption,
        ciphertext: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>> {
        self.inner.decrypt(rng, padding, ciphertext)
    }
}

impl Eq for PrivateKey {}
impl PartialEq for PrivateKey {
    fn eq(&self, o: &Self) -> bool {
        self.to_public_key() == o.to_public_key()
    }
}

impl From<PrivateKey> for jwk::JsonWebKeyType {
    fn from(x: PrivateKey) -> Self {
        jwk::JsonWebKeyType::RsaPrivate(Box::new(x))
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("bits", &self.bits())
            .field("primes", &"[REDACTED]")
            .finish()
    }
}

impl Serialize for PrivateKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        struct Repr {
            kty: &'static str,

            n: Base64UrlBytes,
            e: Base64UrlBytes,

            d: SecretBase64UrlBytes,
            p: SecretBase64UrlBytes,
            q: SecretBase64UrlBytes,
            dp: SecretBase64UrlBytes,
            dq: SecretBase64UrlBytes,
            qi: SecretBase64UrlBytes,
        }

        let public = self.inner.public_components();
        let private = self
            .inner
            .private_components()
            .map_err(|e| S::Error::custom(format!("failed to export RSA private key: {e}")))?;

        let repr = Repr {
            kty: "RSA",
            n: Base64UrlBytes(public.n),
            e: Base64UrlBytes(public.e),
            d: SecretBase64UrlBytes(private.d),
            p: SecretBase64UrlBytes(private.prime.p),
            q: SecretBase64UrlBytes(private.prime.q),
            dp: SecretBase64UrlBytes(private.prime.dp),
            dq: SecretBase64UrlBytes(private.prime.dq),
            qi: SecretBase64UrlBytes(private.prime.qi),
        };

        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PrivateKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Repr {
            kty: String,

            n: Base64UrlBytes,
            e: Base64UrlBytes,
            d: SecretBase64UrlBytes,

            p: Option<SecretBase64UrlBytes>,
            q: Option<SecretBase64UrlBytes>,
            dp: Option<SecretBase64UrlBytes>,
            dq: Option<SecretBase64UrlBytes>,
            qi: Option<SecretBase64UrlBytes>,

            oth: Option<serde_json::Value>,
        }

        let repr = Repr::deserialize(deserializer)?;

        if &*repr.kty != "RSA" {
            return Err(D::Error::custom("`kty` field is required to be `RSA`"));
        }

        // RFC:
        //
        // The parameter "d" is REQUIRED for RSA private keys.  The others enable
        // optimizations and SHOULD be included by producers of JWKs
        // representing RSA private keys.  If the producer includes any of the
        // other private key parameters, then all of the others MUST be present,
        // with the exception of "oth", which MUST only be present when more than two
        // prime factors were used.

        if repr.oth.is_some() {
            return Err(D::Error::custom(
                "RSA private keys with `oth` field set are not supported",
            ));
        }

        let any_prime_present = repr.p.is_some()
            | repr.q.is_some()
            | repr.dp.is_some()
            | repr.dq.is_some()
            | repr.qi.is_some();

        if !any_prime_present {
            return Err(D::Error::custom(
                "RSA private keys without any primes are not supported",
            ));
        }

        let err = |field: &str| {
            D::Error::custom(format!(
                "expected `{}` to be present because all prime fields must be set if one of them \
                 is set",
                field
            ))
        };

        let prime = rsa::PrivateKeyPrimeComponents {
            p: repr.p.ok_or_else(|| err("p"))?.0,
            q: repr.q.ok_or_else(|| err("q"))?.0,
            dp: repr.dp.ok_or_else(|| err("dp"))?.0,
            dq: repr.dq.ok_or_else(|| err("dq"))?.0,
            qi: repr.qi.ok_or_else(|| err("qi"))?.0,
        };

        let public = rsa::PublicKeyComponents {
            n: repr.n.0,
            e: repr.e.0,
        };
        let private = rsa::PrivateKeyComponents {
            d: repr.d.0,
            prime,
        };

        let key = BackendPrivateKey::from_components(private, public)
            .map_err(|e| D::Error::custom(format!("failed to construct RSA private key: {e}")))?;
        Ok(Self { inner: key })
    }
}
