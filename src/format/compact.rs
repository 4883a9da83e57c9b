use alloc::{string::String, vec::Vec};
use core::{convert::Infallible, fmt, str::FromStr};

use crate::base64_url::{decode_base64url_unpadded, encode_base64url, NoBase64UrlString};

/// The compact representation is essentially a list of Base64Url
/// strings that are separated by `.`.
///
/// Parsing only splits the input. Each part is decoded on demand with
/// [`decode_part`](Self::decode_part), so the number of parts can be checked
/// before anything is decoded.
///
/// # Examples
///
/// ```
/// # use jose_es256k::format::Compact;
/// let mut c = Compact::with_capacity(3);
///
/// c.push(b"abc");
/// c.push_raw("");
/// c.push(b"def");
///
/// assert_eq!(c.to_string(), "YWJj..ZGVm");
///
/// let c2: Compact = "YWJj..ZGVm".parse().unwrap();
/// assert_eq!(c, c2);
/// assert_eq!(c2.decode_part(0), Some(Ok(b"abc".to_vec())));
/// assert_eq!(c2.decode_part(1), Some(Ok(vec![])));
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq, Hash)]
pub struct Compact {
    parts: Vec<String>,
}

impl Compact {
    /// Creates an empty compact representation with space for `cap` parts.
    pub fn with_capacity(cap: usize) -> Self {
        Compact {
            parts: Vec::with_capacity(cap),
        }
    }

    /// Encodes the given bytes and appends them as a new part.
    pub fn push(&mut self, part: impl AsRef<[u8]>) {
        self.parts.push(encode_base64url(part));
    }

    /// Appends an already encoded part.
    pub fn push_raw(&mut self, part: impl Into<String>) {
        self.parts.push(part.into());
    }

    /// Returns the raw, still encoded, part at the given index.
    pub fn part(&self, idx: usize) -> Option<&str> {
        self.parts.get(idx).map(String::as_str)
    }

    /// Decodes the part at the given index.
    ///
    /// Returns `None` if there is no such part. Parts must not carry `=`
    /// padding.
    pub fn decode_part(&self, idx: usize) -> Option<Result<Vec<u8>, NoBase64UrlString>> {
        self.part(idx).map(decode_base64url_unpadded)
    }

    /// The number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether there are no parts at all.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl FromStr for Compact {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts = s.split('.').map(String::from).collect();
        Ok(Self { parts })
    }
}

impl fmt::Display for Compact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.parts.len();

        for (idx, part) in self.parts.iter().enumerate() {
            f.write_str(part)?;

            if idx != len - 1 {
                f.write_str(".")?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString as _;

    use super::*;

    #[test]
    fn split_keeps_empty_parts() {
        let c: Compact = "a..c".parse().unwrap();
        assert_eq!(c.len(), 3);
        assert_eq!(c.part(1), Some(""));

        let c: Compact = "".parse().unwrap();
        assert_eq!(c.len(), 1);

        let c: Compact = "a.b.c.d".parse().unwrap();
        assert_eq!(c.len(), 4);
        assert_eq!(c.to_string(), "a.b.c.d");
    }

    #[test]
    fn decode_part_reports_invalid() {
        let c: Compact = "YWJj.*".parse().unwrap();
        assert_eq!(c.decode_part(0), Some(Ok(b"abc".to_vec())));
        assert_eq!(c.decode_part(1), Some(Err(NoBase64UrlString)));
        assert_eq!(c.decode_part(2), None);
    }

    #[test]
    fn decode_part_rejects_padding() {
        let c: Compact = "YWI=.YQ==.YWJj==".parse().unwrap();
        assert_eq!(c.decode_part(0), Some(Err(NoBase64UrlString)));
        assert_eq!(c.decode_part(1), Some(Err(NoBase64UrlString)));
        assert_eq!(c.decode_part(2), Some(Err(NoBase64UrlString)));
    }
}
