use super::{
    Base58Buf, Base58Error,
    alphabet::{ALPHABET, BASE, MAX_LEN, digit},
};

/// Encodes `value` as big-endian base58 into a stack buffer.
///
/// Digits are produced least-significant first by repeated division and
/// written from the back of the buffer, so the result is already in
/// most-significant-first order.
///
/// Zero has no digits and encodes to the empty string. Negative values have
/// no text form either; callers that must reject them should go through
/// [`SnowId::try_encode`] instead.
///
/// # Example
/// ```
/// use snowid::encode_base58;
///
/// assert_eq!(encode_base58(1_428_076_403_798_048_768), "4jgmnx8Js8A");
/// assert_eq!(encode_base58(i64::MAX), "npL6MjP8Qfc");
/// assert_eq!(encode_base58(0), "");
/// ```
///
/// [`SnowId::try_encode`]: crate::SnowId::try_encode
#[must_use]
pub fn encode_base58(value: i64) -> Base58Buf {
    let mut buf = [0_u8; MAX_LEN];
    let mut start = MAX_LEN;
    let mut rest = value;
    while rest > 0 {
        start -= 1;
        // `rest % BASE` is in 0..58 because `rest` is positive.
        buf[start] = ALPHABET[(rest % BASE) as usize];
        rest /= BASE;
    }
    Base58Buf::from_parts(buf, start)
}

/// Decodes a canonical base58 string into a non-negative `i64`.
///
/// The empty string decodes to zero, mirroring [`encode_base58`].
///
/// # Errors
///
/// - [`Base58Error::NonCanonicalForm`] if the input starts with the zero
///   digit `1`
/// - [`Base58Error::TooLong`] if the input exceeds 11 characters
/// - [`Base58Error::OutOfRangeCharacter`] for the first byte outside the
///   alphabet
/// - [`Base58Error::ValueTooLarge`] as soon as the value would leave the
///   63-bit range
///
/// # Example
/// ```
/// use snowid::{Base58Error, decode_base58};
///
/// assert_eq!(decode_base58("4jgmnx8Js8A"), Ok(1_428_076_403_798_048_768));
/// assert_eq!(decode_base58("npL6MjP8Qfd"), Err(Base58Error::ValueTooLarge));
/// ```
pub fn decode_base58(text: &str) -> Result<i64, Base58Error> {
    let bytes = text.as_bytes();
    if bytes.first() == Some(&ALPHABET[0]) {
        return Err(Base58Error::NonCanonicalForm);
    }
    if bytes.len() > MAX_LEN {
        return Err(Base58Error::TooLong { len: bytes.len() });
    }

    let mut acc = 0_i64;
    for (index, &byte) in bytes.iter().enumerate() {
        let Some(d) = digit(byte) else {
            return Err(Base58Error::OutOfRangeCharacter { byte, index });
        };

        let (shifted, ok) = multiply_checked(acc, BASE);
        if !ok {
            return Err(Base58Error::ValueTooLarge);
        }
        let (next, ok) = add_checked(shifted, i64::from(d));
        if !ok || next <= 0 {
            return Err(Base58Error::ValueTooLarge);
        }
        acc = next;
    }

    Ok(acc)
}

/// `a * b`, with `false` in the second slot if the product left the `i64`
/// range. The first slot is meaningless when the flag is `false`.
#[inline]
const fn multiply_checked(a: i64, b: i64) -> (i64, bool) {
    let (product, overflowed) = a.overflowing_mul(b);
    (product, !overflowed)
}

/// `a + b`, with `false` in the second slot on overflow.
#[inline]
const fn add_checked(a: i64, b: i64) -> (i64, bool) {
    let (sum, overflowed) = a.overflowing_add(b);
    (sum, !overflowed)
}
