//! Base62 codec over the `0-9A-Za-z` alphabet.
//!
//! The alphabet is ordered by code point, so comparing two encodings of equal
//! length byte by byte gives the same answer as comparing the numbers.
//!
//! [`encode`] writes the most significant digit first. [`decode`] reads the
//! *least* significant digit first and expects its input to have been passed
//! through [`reverse`]; the parser in [`Generator`](crate::Generator) does
//! exactly that.

use crate::error::{Error, Result};

/// Base62 alphabet in code-point order.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Number of symbols in [`ALPHABET`].
pub const BASE: u64 = 62;

/// Digits needed for `u64::MAX`.
pub const MAX_DIGITS: usize = 11;

/// Encode `n` as base62, most significant digit first, without padding.
///
/// Zero encodes to the empty string.
///
/// # Example
/// ```
/// assert_eq!(lexid::encode::encode(61), "z");
/// assert_eq!(lexid::encode::encode(62), "10");
/// assert_eq!(lexid::encode::encode(0), "");
/// ```
pub fn encode(n: u64) -> String {
    let mut out = String::with_capacity(MAX_DIGITS);
    encode_into(n, &mut out);
    out
}

/// Append the base62 encoding of `n` to `out`.
pub fn encode_into(mut n: u64, out: &mut String) {
    let mut digits = [0u8; MAX_DIGITS];
    let mut start = MAX_DIGITS;
    while n > 0 {
        start -= 1;
        digits[start] = ALPHABET[(n % BASE) as usize];
        n /= BASE;
    }
    for &digit in &digits[start..] {
        out.push(digit as char);
    }
}

/// Value of a single base62 character, or `None` outside the alphabet.
pub fn digit_value(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'A'..=b'Z' => Some(ch - b'A' + 10),
        b'a'..=b'z' => Some(ch - b'a' + 36),
        _ => None,
    }
}

/// Decode a base62 string given least significant digit first.
///
/// # Errors
/// [`Error::InvalidCharacter`] for anything outside [`ALPHABET`] (the position
/// is a character index into `reversed`), [`Error::Overflow`] when the value
/// does not fit in a `u64`.
///
/// # Example
/// ```
/// use lexid::encode::{decode, encode, reverse};
///
/// let n = 1_559_594_098_651u64;
/// assert_eq!(decode(&reverse(&encode(n))).unwrap(), n);
/// ```
pub fn decode(reversed: &str) -> Result<u64> {
    let mut value: u64 = 0;
    // `None` once the place value has left the u64 range; only zero digits
    // are accepted past that point.
    let mut place = Some(1u64);

    for (position, character) in reversed.chars().enumerate() {
        let digit = u8::try_from(character)
            .ok()
            .and_then(digit_value)
            .ok_or(Error::InvalidCharacter { character, position })?;

        if digit != 0 {
            let term = place
                .and_then(|p| p.checked_mul(u64::from(digit)))
                .ok_or(Error::Overflow)?;
            value = value.checked_add(term).ok_or(Error::Overflow)?;
        }
        place = place.and_then(|p| p.checked_mul(BASE));
    }

    Ok(value)
}

/// Decode without validation: unknown characters count as digit zero and the
/// arithmetic wraps.
///
/// Matches ids decoded by older readers bit for bit. Prefer [`decode`].
pub fn decode_lossy(reversed: &str) -> u64 {
    let mut value: u64 = 0;
    let mut place: u64 = 1;

    for byte in reversed.bytes() {
        let digit = digit_value(byte).unwrap_or(0);
        value = value.wrapping_add(u64::from(digit).wrapping_mul(place));
        place = place.wrapping_mul(BASE);
    }

    value
}

/// Reverse a string character by character.
pub fn reverse(s: &str) -> String {
    s.chars().rev().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "")]
    #[case(1, "1")]
    #[case(10, "A")]
    #[case(36, "a")]
    #[case(61, "z")]
    #[case(62, "10")]
    #[case(3843, "zz")]
    #[case(u64::MAX, "LygHa16AHYF")]
    fn test_encode_known_values(#[case] n: u64, #[case] expected: &str) {
        assert_eq!(encode(n), expected);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(61)]
    #[case(62)]
    #[case(1_559_594_098_651)]
    #[case(1_559_594_098_651_387_237)]
    #[case(u64::MAX - 1)]
    #[case(u64::MAX)]
    fn test_decode_inverts_encode(#[case] n: u64) {
        assert_eq!(decode(&reverse(&encode(n))).unwrap(), n);
    }

    #[test]
    fn test_encode_into_appends() {
        let mut out = String::from("x");
        encode_into(62, &mut out);
        assert_eq!(out, "x10");
    }

    #[test]
    fn test_encode_preserves_numeric_order() {
        let mut previous = encode(62);
        for n in 63..4000u64 {
            let current = encode(n);
            if current.len() == previous.len() {
                assert!(current > previous, "{current} <= {previous}");
            }
            previous = current;
        }
    }

    #[test]
    fn test_alphabet_is_sorted() {
        assert!(ALPHABET.windows(2).all(|w| w[0] < w[1]));
        for (i, &ch) in ALPHABET.iter().enumerate() {
            assert_eq!(digit_value(ch), Some(i as u8));
        }
    }

    #[test]
    fn test_decode_reads_least_significant_first() {
        assert_eq!(decode("01").unwrap(), 62);
        assert_eq!(decode("10").unwrap(), 1);
    }

    #[test]
    fn test_decode_rejects_invalid_character() {
        assert_eq!(
            decode("1-2"),
            Err(Error::InvalidCharacter { character: '-', position: 1 })
        );
        assert_eq!(
            decode("é"),
            Err(Error::InvalidCharacter { character: 'é', position: 0 })
        );
    }

    #[test]
    fn test_decode_overflow() {
        // one past u64::MAX
        let too_big = reverse("LygHa16AHYG");
        assert_eq!(decode(&too_big), Err(Error::Overflow));
        assert_eq!(decode(&reverse("100000000000")), Err(Error::Overflow));
    }

    #[test]
    fn test_decode_accepts_leading_zeros_past_u64() {
        // leading zeros in most-significant-first order trail after reversal
        assert_eq!(decode(&reverse("0000000000001")).unwrap(), 1);
    }

    #[test]
    fn test_decode_lossy_maps_unknown_to_zero() {
        assert_eq!(decode_lossy("1-1"), 1 + 62 * 62);
        assert_eq!(decode_lossy(&reverse(&encode(123_456))), 123_456);
    }
}
