use core::fmt;

use crate::{Base58Buf, Base58Error, decode_base58, encode_base58};

/// A 63-bit Snowflake ID.
///
/// The value is stored in an `i64` whose sign bit is always clear for IDs
/// produced by a [`Generator`]. The remaining bits hold, most significant
/// first, the timestamp, the node and the sequence; see [`Layout`] for how to
/// split them apart.
///
/// ```text
///  Bit Index:  63       63 62                 22 21            12 11             0
///              +----------+--------------------+----------------+---------------+
///  Field:      | sign (1) |   timestamp (41)   |   node (10)    | sequence (12) |
///              +----------+--------------------+----------------+---------------+
///              |<--------- MSB --------- 64 bits (default layout) ---- LSB ---->|
/// ```
///
/// `Display` prints the raw decimal value. The compact text form goes through
/// [`SnowId::to_text`] and [`SnowId::parse`].
///
/// [`Generator`]: crate::Generator
/// [`Layout`]: crate::Layout
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SnowId {
    id: i64,
}

impl SnowId {
    /// Wraps a raw value without validation.
    #[must_use]
    pub const fn from_raw(raw: i64) -> Self {
        Self { id: raw }
    }

    /// Returns the raw packed value.
    #[must_use]
    pub const fn to_raw(&self) -> i64 {
        self.id
    }

    /// `true` when the sign bit is clear.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.id >= 0
    }

    /// Encodes the ID as base58 into a stack buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Base58Error::NegativeValue`] if the sign bit is set.
    ///
    /// # Example
    /// ```
    /// use snowid::SnowId;
    ///
    /// let id = SnowId::from_raw(1_428_076_403_798_048_768);
    /// assert_eq!(id.try_encode().unwrap(), "4jgmnx8Js8A");
    /// assert!(SnowId::from_raw(-1).try_encode().is_err());
    /// ```
    pub fn try_encode(&self) -> Result<Base58Buf, Base58Error> {
        if !self.is_valid() {
            return Err(Base58Error::NegativeValue { value: self.id });
        }
        Ok(encode_base58(self.id))
    }

    /// Encodes the ID as an owned base58 `String`.
    ///
    /// # Errors
    ///
    /// Returns [`Base58Error::NegativeValue`] if the sign bit is set.
    pub fn to_text(&self) -> Result<String, Base58Error> {
        self.try_encode().map(String::from)
    }

    /// Parses the base58 text form produced by [`SnowId::to_text`].
    ///
    /// # Errors
    ///
    /// Any [`Base58Error`] raised by [`decode_base58`], unchanged.
    pub fn parse(text: &str) -> Result<Self, Base58Error> {
        decode_base58(text).map(Self::from_raw)
    }
}

impl From<SnowId> for i64 {
    fn from(id: SnowId) -> Self {
        id.id
    }
}

impl From<i64> for SnowId {
    fn from(raw: i64) -> Self {
        Self::from_raw(raw)
    }
}

impl fmt::Display for SnowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl fmt::Debug for SnowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SnowId").field(&self.id).finish()
    }
}
