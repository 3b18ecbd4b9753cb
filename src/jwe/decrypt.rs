use alloc::{string::String, vec::Vec};
use core::str::{self, FromStr};

use rand_core::CryptoRngCore;
use tracing::{debug, field, Span};

use super::{cek, content::ContentEncryption, key_management::KeyUnwrapper, Error};
use crate::{
    format::{self, Compact, ParseError, ParsedForm},
    header, JsonWebKey, JweHeader,
};

/// A successfully decrypted JWE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decrypted {
    header: JweHeader,
    plaintext: Vec<u8>,
}

impl Decrypted {
    /// The protected header of the JWE.
    pub const fn header(&self) -> &JweHeader {
        &self.header
    }

    /// The decrypted payload.
    pub fn plaintext(&self) -> &[u8] {
        &self.plaintext
    }

    /// Take the decrypted payload.
    pub fn into_plaintext(self) -> Vec<u8> {
        self.plaintext
    }

    /// The payload as a nested token, if the header marks it as one
    /// (`cty: "JWT"`) and it is a JWE or JWS in compact serialization.
    pub fn nested(&self) -> Option<Compact> {
        if !self.header.is_nested() {
            return None;
        }

        let token = str::from_utf8(&self.plaintext).ok()?;
        match format::parse(token) {
            ParsedForm::Jws(jws) => Some(jws),
            ParsedForm::Jwe(_) => Compact::from_str(token).ok(),
            ParsedForm::Malformed(_) => None,
        }
    }
}

/// Decrypt a JWE in compact serialization with `key`.
///
/// `rng` provides the replacement key used when unwrapping fails, and the
/// blinding of RSA private key operations.
///
/// # Errors
///
/// - [`Error::HeaderFormat`] if `token` is not a well formed JWE. A JWS is
///   reported as [`ParseError::UnexpectedJws`].
/// - [`Error::Key`] if `key` can not be used with the `alg` of the header.
/// - [`Error::Cryptographic`] for everything else: a wrong key, a modified
///   encrypted key, ciphertext, IV or tag, or a modified header.
#[tracing::instrument(level = "debug", skip_all, fields(alg = field::Empty, enc = field::Empty))]
pub fn decode<R: CryptoRngCore + ?Sized>(
    rng: &mut R,
    key: &JsonWebKey,
    token: &str,
) -> Result<Decrypted, Error> {
    let jwe = match format::parse(token) {
        ParsedForm::Jwe(jwe) => jwe,
        ParsedForm::Jws(_) => {
            debug!("input is a JWS");
            return Err(ParseError::UnexpectedJws.into());
        }
        ParsedForm::Malformed(err) => {
            debug!(error = %err, "malformed input");
            return Err(err.into());
        }
    };

    let protected = jwe.header();
    let span = Span::current();
    span.record("alg", field::display(protected.algorithm()));
    span.record("enc", field::display(protected.content_encryption()));

    // parsing already refuses unknown algorithms
    let content = ContentEncryption::from_jwa(protected.content_encryption()).ok_or_else(|| {
        ParseError::Header(header::Error::UnsupportedAlgorithm {
            parameter: "enc",
            value: String::from(protected.content_encryption().name()),
        })
    })?;
    let unwrapper = KeyUnwrapper::select(protected.algorithm(), key)?;

    // From here on, every failure must end in the same error. The outcome of
    // the unwrap only decides which key is used and is never reported.
    let (dummy, _) = cek::generate(rng, content);
    let cek = match unwrapper.unwrap(rng, jwe.encrypted_key()).ok() {
        Some(cek) if cek.len() == dummy.len() => cek,
        _ => dummy,
    };

    let plaintext = content
        .decrypt(&cek, jwe.iv(), jwe.aad(), jwe.ciphertext(), jwe.tag())
        .map_err(|_| {
            debug!("decryption failed");
            Error::Cryptographic
        })?;

    Ok(Decrypted {
        header: jwe.into_header(),
        plaintext,
    })
}
