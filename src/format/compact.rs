use alloc::vec::Vec;
use core::{fmt, str::FromStr};

use crate::{base64_url::NoBase64UrlString, Base64UrlString};

/// The compact representation is essentially a list of Base64Url
/// strings that are separated by `.`.
///
/// A JWE in compact form has five parts, a JWS has three.
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Compact {
    parts: Vec<Base64UrlString>,
}

impl Compact {
    pub(crate) fn with_capacity(cap: usize) -> Self {
        Compact {
            parts: Vec::with_capacity(cap),
        }
    }

    pub(crate) fn push_base64url(&mut self, part: Base64UrlString) {
        self.parts.push(part);
    }

    pub(crate) fn push(&mut self, part: impl AsRef<[u8]>) {
        self.parts.push(Base64UrlString::encode(part));
    }

    /// Returns the part at the given index, if present.
    pub fn part(&self, idx: usize) -> Option<&Base64UrlString> {
        self.parts.get(idx)
    }

    /// The number of `.` separated parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether this representation has no parts at all.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl FromStr for Compact {
    type Err = NoBase64UrlString;

    /// Verifies if every part of the string is valid base64url format
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s
            .split('.')
            .map(Base64UrlString::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { parts })
    }
}

impl fmt::Display for Compact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.parts.len();

        for (idx, part) in self.parts.iter().enumerate() {
            fmt::Display::fmt(&part, f)?;

            if idx != len - 1 {
                f.write_str(".")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn display_joins_parts() {
        let mut compact = Compact::with_capacity(3);
        compact.push(b"abc");
        compact.push(b"");
        compact.push_base64url(Base64UrlString::from_str("ZGVm").unwrap());

        assert_eq!(compact.len(), 3);
        assert_eq!(compact.to_string(), "YWJj..ZGVm");
        assert_eq!(Compact::from_str("YWJj..ZGVm").unwrap(), compact);
    }

    #[test]
    fn rejects_invalid_part() {
        assert_eq!(Compact::from_str("YWJj.Y=.ZGVm"), Err(NoBase64UrlString));
    }
}
