//! The interfaces for HMAC.

use crate::{crypto::Result, jwa};

/// The common operations for an HMAC key.
pub(crate) trait Key: Sized {
    /// The full, untruncated MAC produced by this key.
    type Tag: AsRef<[u8]>;

    /// Creates a new key from the given data.
    fn new(variant: jwa::Hmac, key: &[u8]) -> Result<Self>;

    /// Computes the MAC over the concatenation of all `parts`.
    ///
    /// This operation **must** be re-usable, meaning this method can be
    /// called multiple times with different data.
    fn tag(&mut self, parts: &[&[u8]]) -> Result<Self::Tag>;
}
