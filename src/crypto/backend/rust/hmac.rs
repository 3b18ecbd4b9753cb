use ::hmac::Hmac;
use digest::{Mac as _, Output};

use crate::{
    crypto::{backend::interface::hmac, Result},
    jwa,
};

/// Rust crypto uses generic arguments to represent the variant.
///
/// We don't to that at this level, so we have to erase the type.
enum ErasedKey {
    Hs256(Hmac<sha2::Sha256>),
    Hs384(Hmac<sha2::Sha384>),
    Hs512(Hmac<sha2::Sha512>),
}

pub(crate) enum ErasedTag {
    Hs256(Output<Hmac<sha2::Sha256>>),
    Hs384(Output<Hmac<sha2::Sha384>>),
    Hs512(Output<Hmac<sha2::Sha512>>),
}

impl AsRef<[u8]> for ErasedTag {
    fn as_ref(&self) -> &[u8] {
        match self {
            ErasedTag::Hs256(tag) => tag.as_ref(),
            ErasedTag::Hs384(tag) => tag.as_ref(),
            ErasedTag::Hs512(tag) => tag.as_ref(),
        }
    }
}

fn update_all<M: ::hmac::Mac>(mac: &mut M, parts: &[&[u8]]) {
    for part in parts {
        mac.update(part);
    }
}

/// A low level HMAC key.
#[repr(transparent)]
pub(crate) struct Key {
    inner: ErasedKey,
}

impl hmac::Key for Key {
    type Tag = ErasedTag;

    fn new(variant: jwa::Hmac, data: &[u8]) -> Result<Self> {
        let key = match variant {
            jwa::Hmac::Hs256 => ErasedKey::Hs256(Hmac::<sha2::Sha256>::new_from_slice(data)?),
            jwa::Hmac::Hs384 => ErasedKey::Hs384(Hmac::<sha2::Sha384>::new_from_slice(data)?),
            jwa::Hmac::Hs512 => ErasedKey::Hs512(Hmac::<sha2::Sha512>::new_from_slice(data)?),
        };

        Ok(Self { inner: key })
    }

    fn tag(&mut self, parts: &[&[u8]]) -> Result<Self::Tag> {
        let tag = match &mut self.inner {
            ErasedKey::Hs256(hmac) => {
                update_all(hmac, parts);
                ErasedTag::Hs256(hmac.finalize_reset().into_bytes())
            }
            ErasedKey::Hs384(hmac) => {
                update_all(hmac, parts);
                ErasedTag::Hs384(hmac.finalize_reset().into_bytes())
            }
            ErasedKey::Hs512(hmac) => {
                update_all(hmac, parts);
                ErasedTag::Hs512(hmac.finalize_reset().into_bytes())
            }
        };

        Ok(tag)
    }
}
