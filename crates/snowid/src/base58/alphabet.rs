/// The base58 digit alphabet, ordered by digit value.
///
/// `0`, `O`, `I` and `l` are left out so that IDs survive being read aloud or
/// copied by hand.
pub const ALPHABET: &[u8; 58] = b"123456789abcdefghijkmnopqrstuvwxyzABCDEFGHJKLMNPQRSTUVWXYZ";

/// Base of the positional encoding.
pub(crate) const BASE: i64 = 58;

/// Longest canonical encoding of a non-negative `i64` (58^11 > 2^63).
pub(crate) const MAX_LEN: usize = 11;

pub(crate) const NO_VALUE: u8 = 0xFF;

/// Inverse of [`ALPHABET`]: byte -> digit value, or [`NO_VALUE`].
pub(crate) const LOOKUP: [u8; 256] = {
    let mut lut = [NO_VALUE; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        lut[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    lut
};

/// Digit value of `byte`, if it belongs to the alphabet.
#[inline]
pub(crate) const fn digit(byte: u8) -> Option<u8> {
    match LOOKUP[byte as usize] {
        NO_VALUE => None,
        d => Some(d),
    }
}
