//! The actual implementations for the cryptographic backends.

pub(crate) mod interface;

cfg_if::cfg_if! {
    if #[cfg(feature = "crypto-rustcrypto")] {
        mod rust;
        pub(crate) use rust::*;
    } else if #[cfg(any(feature = "crypto-openssl", feature = "crypto-aws-lc"))] {
        mod openssl;
        pub(crate) use self::openssl::*;
    } else {
        compile_error!("no cryptographic backend selected, enable one of the `crypto-*` features");
    }
}
