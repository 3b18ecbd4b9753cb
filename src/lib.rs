//! JSON Web Encryption (JWE, [RFC 7516]) in compact serialization.
//!
//! The content encryption key is wrapped with RSA (`RSA1_5`, `RSA-OAEP`,
//! `RSA-OAEP-256`) or AES key wrap (`A128KW`, `A192KW`, `A256KW`), the payload
//! is encrypted with AES-GCM or AES-CBC-HMAC-SHA2.
//!
//! ```
//! use jose_jwe::{
//!     jwa::{JsonWebContentEncryptionAlgorithm, JsonWebEncryptionAlgorithm, RsaesOaep, AesGcm},
//!     crypto::rsa::PrivateKey,
//!     JsonWebKey,
//! };
//! use rand_core::OsRng;
//!
//! let key = JsonWebKey::new(PrivateKey::generate(&mut OsRng, 2048)?);
//!
//! let token = jose_jwe::encode(
//!     &mut OsRng,
//!     JsonWebEncryptionAlgorithm::RsaesOaep(RsaesOaep::RsaesOaep),
//!     JsonWebContentEncryptionAlgorithm::AesGcm(AesGcm::Aes256),
//!     &key,
//!     "Live long and prosper.",
//! )?
//! .to_string();
//!
//! let decrypted = jose_jwe::decode(&mut OsRng, &key, &token)?;
//! assert_eq!(decrypted.plaintext(), b"Live long and prosper.");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The cryptographic primitives come from the backend selected with the
//! `crypto-rustcrypto` (default), `crypto-openssl` or `crypto-aws-lc`
//! feature. Randomness is always supplied by the caller.
//!
//! [RFC 7516]: <https://www.rfc-editor.org/rfc/rfc7516.html>
#![warn(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    explicit_outlives_requirements,
    clippy::missing_const_for_fn,
    clippy::missing_errors_doc
)]
#![deny(
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    macro_use_extern_crate,
    non_ascii_idents,
    elided_lifetimes_in_paths
)]
#![forbid(unsafe_code)]
#![no_std]

extern crate alloc;

#[macro_use]
mod macros;

pub(crate) mod base64_url;

pub mod crypto;
pub mod format;
pub mod header;
pub mod jwa;
pub mod jwe;
pub mod jwk;

pub use base64_url::{Base64UrlString, NoBase64UrlString};
pub use header::JweHeader;
pub use jwe::{decode, encode, Decrypted, Payload};
pub use jwk::JsonWebKey;
