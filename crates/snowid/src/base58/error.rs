/// Errors produced while converting a [`SnowId`] to or from its base58 text
/// form.
///
/// Every failure is all-or-nothing: no partially decoded value escapes.
///
/// [`SnowId`]: crate::SnowId
#[derive(Clone, Debug, PartialEq, Eq, Hash, thiserror::Error)]
#[non_exhaustive]
pub enum Base58Error {
    /// The ID has its sign bit set and has no text form.
    #[error("invalid base58: negative value {value}")]
    NegativeValue {
        /// The rejected raw value.
        value: i64,
    },

    /// The input starts with the zero digit (`1`), which never appears in a
    /// canonical encoding.
    #[error("invalid base58: ID is not in canonical form")]
    NonCanonicalForm,

    /// The input has more digits than a 63-bit value can need.
    #[error("invalid base58: too long ({len} characters)")]
    TooLong {
        /// Length of the rejected input, in bytes.
        len: usize,
    },

    /// A byte outside the alphabet was found.
    #[error("invalid base58: byte {index} is out of range")]
    OutOfRangeCharacter {
        /// The offending byte.
        byte: u8,
        /// Zero-based position of the byte in the input.
        index: usize,
    },

    /// The decoded value does not fit in 63 bits.
    #[error("invalid base58: value too large")]
    ValueTooLarge,
}
