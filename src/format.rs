//! The JWE compact serialization
//!
//! [`serialize`] assembles the five segments of a JWE, [`parse`] splits a
//! token and tells a JWE apart from a JWS and from garbage.

mod compact;

use alloc::vec::Vec;
use core::str::FromStr;

use base64ct::{Base64UrlUnpadded, Encoding};
use thiserror::Error;

#[doc(inline)]
pub use self::compact::Compact;
use crate::{header, Base64UrlString, JweHeader};

/// The number of segments of a JWE in compact serialization.
pub const JWE_SEGMENTS: usize = 5;
/// The number of segments of a JWS in compact serialization.
pub const JWS_SEGMENTS: usize = 3;

const SEGMENT_NAMES: [&str; JWE_SEGMENTS] =
    ["header", "encrypted key", "initialization vector", "ciphertext", "tag"];

/// Errors that may occur while parsing a compact serialization.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// The input has neither five (JWE) nor three (JWS) segments.
    #[error("expected 5 segments, found {0}")]
    SegmentCount(usize),
    /// One segment is not unpadded Base64Url.
    #[error("the {segment} segment is not valid Base64Url")]
    InvalidBase64 {
        /// Name of the offending segment.
        segment: &'static str,
    },
    /// The protected header could not be decoded.
    #[error(transparent)]
    Header(#[from] header::Error),
    /// The input is a JWS, but a JWE was expected.
    #[error("expected a JWE, found a JWS")]
    UnexpectedJws,
}

/// The classification of a compact serialized input.
#[derive(Debug)]
pub enum ParsedForm {
    /// Five segments that decoded successfully.
    Jwe(ParsedJwe),
    /// Three valid Base64Url segments. Recognized, not decoded.
    Jws(Compact),
    /// Anything else.
    Malformed(ParseError),
}

/// The decoded segments of a JWE.
#[derive(Debug, Clone)]
pub struct ParsedJwe {
    header: JweHeader,
    encrypted_key: Vec<u8>,
    iv: Vec<u8>,
    ciphertext: Vec<u8>,
    tag: Vec<u8>,
    aad: Base64UrlString,
}

impl ParsedJwe {
    /// The decoded protected header.
    pub fn header(&self) -> &JweHeader {
        &self.header
    }

    /// The wrapped content encryption key.
    pub fn encrypted_key(&self) -> &[u8] {
        &self.encrypted_key
    }

    /// The initialization vector.
    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    /// The encrypted payload.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// The authentication tag.
    pub fn tag(&self) -> &[u8] {
        &self.tag
    }

    /// The additional authenticated data: the header segment exactly as it
    /// was transmitted.
    pub fn aad(&self) -> &[u8] {
        self.aad.as_bytes()
    }

    pub(crate) fn into_header(self) -> JweHeader {
        self.header
    }
}

/// Assemble the compact serialization of a JWE.
///
/// `header` is the already encoded header segment, so the bytes used as AAD
/// are the bytes on the wire.
pub fn serialize(
    header: Base64UrlString,
    encrypted_key: &[u8],
    iv: &[u8],
    ciphertext: &[u8],
    tag: &[u8],
) -> Compact {
    let mut compact = Compact::with_capacity(JWE_SEGMENTS);

    compact.push_base64url(header);
    compact.push(encrypted_key);
    compact.push(iv);
    compact.push(ciphertext);
    compact.push(tag);

    compact
}

/// Split and classify a compact serialized input.
pub fn parse(input: &str) -> ParsedForm {
    let segments: Vec<&str> = input.split('.').collect();

    match segments.len() {
        JWE_SEGMENTS => match parse_jwe(&segments) {
            Ok(jwe) => ParsedForm::Jwe(jwe),
            Err(err) => ParsedForm::Malformed(err),
        },
        JWS_SEGMENTS => match Compact::from_str(input) {
            Ok(jws) => ParsedForm::Jws(jws),
            Err(_) => ParsedForm::Malformed(ParseError::InvalidBase64 { segment: "JWS" }),
        },
        n => ParsedForm::Malformed(ParseError::SegmentCount(n)),
    }
}

fn parse_jwe(segments: &[&str]) -> Result<ParsedJwe, ParseError> {
    let [header, encrypted_key, iv, ciphertext, tag] = segments else {
        return Err(ParseError::SegmentCount(segments.len()));
    };

    let aad = Base64UrlString::from_str(header).map_err(|_| ParseError::InvalidBase64 {
        segment: SEGMENT_NAMES[0],
    })?;
    let raw_header = decode_segment(header, SEGMENT_NAMES[0])?;
    let encrypted_key = decode_segment(encrypted_key, SEGMENT_NAMES[1])?;
    let iv = decode_segment(iv, SEGMENT_NAMES[2])?;
    let ciphertext = decode_segment(ciphertext, SEGMENT_NAMES[3])?;
    let tag = decode_segment(tag, SEGMENT_NAMES[4])?;

    Ok(ParsedJwe {
        header: JweHeader::decode(&raw_header)?,
        encrypted_key,
        iv,
        ciphertext,
        tag,
        aad,
    })
}

fn decode_segment(segment: &str, name: &'static str) -> Result<Vec<u8>, ParseError> {
    Base64UrlUnpadded::decode_vec(segment).map_err(|_| ParseError::InvalidBase64 { segment: name })
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    // RFC 7516 appendix A.3
    const A3: &str = "eyJhbGciOiJBMTI4S1ciLCJlbmMiOiJBMTI4Q0JDLUhTMjU2In0.\
        6KB707dM9YTIgHtLvtgWQ8mKwboJW3of9locizkDTHzBC2IlrT1oOQ.\
        AxY8DCtDaGlsbGljb3RoZQ.\
        KDlTtXchhZTGufMYmOYGS4HffxPSUrfmqCHXaI9wOGY.\
        U0m_YmjN04DJvceFICbCVQ";

    #[test]
    fn parses_five_segments() {
        let ParsedForm::Jwe(jwe) = parse(A3) else {
            panic!("expected a JWE");
        };

        assert_eq!(jwe.header().algorithm().to_string(), "A128KW");
        assert_eq!(jwe.encrypted_key().len(), 40);
        assert_eq!(jwe.iv().len(), 16);
        assert_eq!(jwe.tag().len(), 16);
        assert_eq!(jwe.aad(), b"eyJhbGciOiJBMTI4S1ciLCJlbmMiOiJBMTI4Q0JDLUhTMjU2In0");
    }

    #[test]
    fn serialize_then_parse_keeps_segments() {
        let header = Base64UrlString::encode(br#"{"alg":"RSA1_5","enc":"A128GCM"}"#);
        let token = serialize(header.clone(), &[1; 8], &[2; 12], b"", &[3; 16]).to_string();

        assert_eq!(token.split('.').nth(3), Some(""));

        let ParsedForm::Jwe(jwe) = parse(&token) else {
            panic!("expected a JWE");
        };
        assert_eq!(jwe.aad(), header.as_bytes());
        assert!(jwe.ciphertext().is_empty());
        assert_eq!(jwe.iv(), [2; 12]);
    }

    #[test]
    fn classifies_jws_and_segment_counts() {
        assert!(matches!(parse("e30.e30.e30"), ParsedForm::Jws(_)));

        for (input, count) in [("", 1), ("a.b", 2), ("a.b.c.d", 4), ("a.b.c.d.e.f", 6)] {
            match parse(input) {
                ParsedForm::Malformed(ParseError::SegmentCount(n)) => assert_eq!(n, count),
                other => panic!("{input:?} parsed as {other:?}"),
            }
        }
    }

    #[test]
    fn reports_the_bad_segment() {
        let mut segments: Vec<&str> = A3.split('.').collect();
        segments[2] = "AxY8DCtDaGls+GljbA";
        let token = segments.join(".");

        assert!(matches!(
            parse(&token),
            ParsedForm::Malformed(ParseError::InvalidBase64 {
                segment: "initialization vector"
            })
        ));
    }

    #[test]
    fn header_errors_are_wrapped() {
        let header = Base64UrlString::encode(br#"{"alg":"dir","enc":"A128GCM"}"#);
        let token = serialize(header, b"", &[0; 12], b"", &[0; 16]).to_string();

        assert!(matches!(
            parse(&token),
            ParsedForm::Malformed(ParseError::Header(
                header::Error::UnsupportedAlgorithm { .. }
            ))
        ));
    }
}
