//! Bit-field extraction from 32-bit words.
//!
//! The binary graph packs several fields into single 32-bit words: a node's
//! out-edge base and out-degree, an edge's profile sample index and
//! compression type, and the delta-compressed elevation samples themselves.
//! These helpers pull a contiguous bit range out of a word, sign- or
//! zero-extended.

/// Extract the `length`-bit field starting at bit `start` of `value`,
/// interpreted as a two's-complement signed value.
///
/// # Panics
///
/// Panics unless `start < 32`, `0 < length <= 32` and `start + length <= 32`.
pub fn extract_signed(value: u32, start: u32, length: u32) -> i32 {
    assert!(
        start < 32 && length > 0 && length <= 32 && start + length <= 32,
        "invalid signed bit range: start={start}, length={length}"
    );
    // Shift the field up against the sign bit, then arithmetic-shift it back
    // down. Both shift amounts are in [0, 31] given the assertion above.
    ((value << (32 - (start + length))) as i32) >> (32 - length)
}

/// Extract the `length`-bit field starting at bit `start` of `value`,
/// zero-extended.
///
/// # Panics
///
/// Panics unless `start < 32`, `0 < length < 32` and `start + length <= 32`.
/// A full 32-bit unsigned extraction is disallowed: the caller would get the
/// word back unchanged and almost certainly meant `extract_signed`.
pub fn extract_unsigned(value: u32, start: u32, length: u32) -> u32 {
    assert!(
        start < 32 && length > 0 && length < 32 && start + length <= 32,
        "invalid unsigned bit range: start={start}, length={length}"
    );
    (value << (32 - (start + length))) >> (32 - length)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_unsigned_pulls_middle_field() {
        // 0b...1101_0110 -> bits 1..5 are 1011
        assert_eq!(extract_unsigned(0b1101_0110, 1, 4), 0b1011);
        assert_eq!(extract_unsigned(0xFFFF_FFFF, 0, 31), 0x7FFF_FFFF);
        assert_eq!(extract_unsigned(0xABCD_1234, 16, 16), 0xABCD);
    }

    #[test]
    fn extract_signed_sign_extends() {
        assert_eq!(extract_signed(0b1101_0110, 1, 4), -5); // 1011 as 4-bit signed
        assert_eq!(extract_signed(0b0101_0110, 1, 4), -5);
        assert_eq!(extract_signed(0b0000_0110, 1, 2), -1);
        assert_eq!(extract_signed(0xFFFF_FFFF, 0, 32), -1);
        assert_eq!(extract_signed(0x7FFF_FFFF, 0, 32), i32::MAX);
    }

    #[test]
    fn extraction_ranges_are_bounded() {
        // unsigned results fit in [0, 2^length), signed in
        // [-2^(length-1), 2^(length-1)).
        let word = 0xDEAD_BEEFu32;
        for start in 0..32u32 {
            for length in 1..=(32 - start) {
                if length < 32 {
                    let u = extract_unsigned(word, start, length);
                    assert!(u64::from(u) < (1u64 << length));
                }
                let s = i64::from(extract_signed(word, start, length));
                let half = 1i64 << (length - 1);
                assert!((-half..half).contains(&s));
            }
        }
    }

    #[test]
    #[should_panic]
    fn extract_signed_rejects_zero_length() {
        extract_signed(0, 4, 0);
    }

    #[test]
    #[should_panic]
    fn extract_unsigned_rejects_full_word() {
        extract_unsigned(0, 0, 32);
    }

    #[test]
    #[should_panic]
    fn extract_unsigned_rejects_overflowing_range() {
        extract_unsigned(0, 30, 4);
    }
}
