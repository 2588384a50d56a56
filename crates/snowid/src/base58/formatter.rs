use core::{fmt, ops::Deref};

use super::alphabet::MAX_LEN;

/// A stack-allocated base58 encoding of a single ID.
///
/// Returned by [`encode_base58`] and [`SnowId::try_encode`]; it derefs to
/// `&str` so most callers never need to allocate.
///
/// [`encode_base58`]: crate::encode_base58
/// [`SnowId::try_encode`]: crate::SnowId::try_encode
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Base58Buf {
    buf: [u8; MAX_LEN],
    start: usize,
}

impl Base58Buf {
    pub(crate) const fn from_parts(buf: [u8; MAX_LEN], start: usize) -> Self {
        Self { buf, start }
    }

    /// Returns a `&str` view of the encoding.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // SAFETY: `encode_base58` is the only constructor and writes nothing
        // but `ALPHABET` bytes into `buf[start..]`, all of which are ASCII.
        unsafe { core::str::from_utf8_unchecked(&self.buf[self.start..]) }
    }

    /// Number of digits in the encoding.
    #[must_use]
    pub const fn len(&self) -> usize {
        MAX_LEN - self.start
    }

    /// `true` only for the encoding of zero.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == MAX_LEN
    }
}

impl Deref for Base58Buf {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for Base58Buf {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<[u8]> for Base58Buf {
    fn as_ref(&self) -> &[u8] {
        &self.buf[self.start..]
    }
}

impl fmt::Display for Base58Buf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Base58Buf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

impl PartialEq<str> for Base58Buf {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for Base58Buf {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl PartialEq<String> for Base58Buf {
    fn eq(&self, other: &String) -> bool {
        self.as_str() == other.as_str()
    }
}

impl From<Base58Buf> for String {
    fn from(buf: Base58Buf) -> Self {
        buf.as_str().to_owned()
    }
}
