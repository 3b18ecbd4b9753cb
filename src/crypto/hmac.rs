//! The primitives for working with [HMAC] algorithms.
//!
//! [HMAC]: https://en.wikipedia.org/wiki/HMAC

use super::{
    backend::{
        interface::{self, hmac::Key as _},
        Backend,
    },
    Result,
};
use crate::jwa;

type BackendHmacKey = <Backend as interface::Backend>::HmacKey;

/// The untruncated output of an HMAC operation.
#[repr(transparent)]
pub(crate) struct Tag {
    inner: <BackendHmacKey as interface::hmac::Key>::Tag,
}

impl AsRef<[u8]> for Tag {
    fn as_ref(&self) -> &[u8] {
        self.inner.as_ref()
    }
}

/// A key to compute HMAC tags with.
pub(crate) struct Key {
    inner: BackendHmacKey,
}

impl Key {
    pub(crate) fn new(variant: jwa::Hmac, key: &[u8]) -> Result<Self> {
        Ok(Self {
            inner: BackendHmacKey::new(variant, key)?,
        })
    }

    /// Computes the HMAC over the concatenation of `parts`.
    pub(crate) fn tag(&mut self, parts: &[&[u8]]) -> Result<Tag> {
        let inner = self.inner.tag(parts)?;
        Ok(Tag { inner })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 4231 test case 2
    #[test]
    fn hmac_sha256_known_answer() {
        let mut key = Key::new(jwa::Hmac::Hs256, b"Jefe").unwrap();
        let tag = key
            .tag(&[b"what do ya want ", b"for nothing?"])
            .unwrap();

        assert_eq!(
            tag.as_ref(),
            [
                0x5b, 0xdc, 0xc1, 0x46, 0xbf, 0x60, 0x75, 0x4e, 0x6a, 0x04, 0x24, 0x26, 0x08, 0x95,
                0x75, 0xc7, 0x5a, 0x00, 0x3f, 0x08, 0x9d, 0x27, 0x39, 0x83, 0x9d, 0xec, 0x58, 0xb9,
                0x64, 0xec, 0x38, 0x43,
            ]
        );

        // the key is reusable
        let again = key.tag(&[b"what do ya want for nothing?"]).unwrap();
        assert_eq!(again.as_ref(), tag.as_ref());
    }

    #[test]
    fn output_sizes() {
        for (variant, len) in [
            (jwa::Hmac::Hs256, 32),
            (jwa::Hmac::Hs384, 48),
            (jwa::Hmac::Hs512, 64),
        ] {
            let tag = Key::new(variant, &[0; 16]).unwrap().tag(&[b"x"]).unwrap();
            assert_eq!(tag.as_ref().len(), len);
        }
    }
}
