//! Positional bit packing over growable vectors of `u64` words.
//!
//! Position `p` lives in word `p / 64` at bit offset `p % 64`; the
//! least-significant bit of a word is its lowest position.

/// Number of positions packed into a single word
pub const WORD_BITS: usize = 64;

/// Word index holding `position`
#[inline]
pub fn word_index(position: usize) -> usize {
    position / WORD_BITS
}

/// Single-bit mask selecting `position` inside its word
#[inline]
pub fn bit_mask(position: usize) -> u64 {
    1u64 << (position % WORD_BITS)
}

/// Set the bit for `position`, growing `words` with zero words as needed.
///
/// Setting an already-set bit is a no-op.
#[inline]
pub fn set_bit(words: &mut Vec<u64>, position: usize) {
    let group = word_index(position);

    if group >= words.len() {
        words.resize(group + 1, 0);
    }

    words[group] |= bit_mask(position);
}

/// Test the bit for `position`. Positions past the end are unset.
#[inline]
pub fn test_bit(words: &[u64], position: usize) -> bool {
    words
        .get(word_index(position))
        .is_some_and(|&w| w & bit_mask(position) != 0)
}

/// Append the set bit offsets of `word` to `dest`, lowest first.
pub fn decode_word(mut word: u64, dest: &mut Vec<u32>) {
    while word != 0 {
        let lowest = word & word.wrapping_neg();
        dest.push(lowest.trailing_zeros());
        word ^= lowest;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(word: u64) -> Vec<u32> {
        let mut out = Vec::new();
        decode_word(word, &mut out);
        out
    }

    #[test]
    fn test_set_bit_first_word() {
        let mut v = Vec::new();
        set_bit(&mut v, 0);
        assert_eq!(v, vec![1]);

        let mut v = Vec::new();
        set_bit(&mut v, 5);
        assert_eq!(v, vec![32]);
    }

    #[test]
    fn test_set_bit_grows() {
        let mut v = vec![0];
        set_bit(&mut v, 67);
        assert_eq!(v, vec![0, 8]);

        let mut v = Vec::new();
        set_bit(&mut v, 64);
        assert_eq!(v, vec![0, 1]);

        let mut v = Vec::new();
        set_bit(&mut v, 128);
        assert_eq!(v, vec![0, 0, 1]);
    }

    #[test]
    fn test_set_bit_word_boundaries() {
        // Multiples of 64 start a new word, they never land in the previous one
        for g in 1..5usize {
            let mut v = Vec::new();
            set_bit(&mut v, g * 64);
            assert_eq!(v.len(), g + 1);
            assert_eq!(v[g], 1);
            assert!(v[..g].iter().all(|&w| w == 0));

            let mut v = Vec::new();
            set_bit(&mut v, g * 64 - 1);
            assert_eq!(v.len(), g);
            assert_eq!(v[g - 1], 1 << 63);
        }
    }

    #[test]
    fn test_set_bit_idempotent() {
        let mut v = Vec::new();
        set_bit(&mut v, 70);
        let before = v.clone();
        set_bit(&mut v, 70);
        assert_eq!(v, before);
    }

    #[test]
    fn test_test_bit() {
        let mut v = Vec::new();
        set_bit(&mut v, 3);
        set_bit(&mut v, 100);
        assert!(test_bit(&v, 3));
        assert!(test_bit(&v, 100));
        assert!(!test_bit(&v, 4));
        assert!(!test_bit(&v, 10_000));
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode(0).is_empty());
    }

    #[test]
    fn test_decode_mixed() {
        let word = 0b00000000_00000000_00000000_00000010_00000000_00000100_00000100_00001001u64;
        assert_eq!(decode(word), vec![0, 3, 10, 18, 33]);
    }

    #[test]
    fn test_decode_first_and_last() {
        let word = 0b10000000_00000000_00000000_00000000_00000000_00000000_00000000_00000001u64;
        assert_eq!(decode(word), vec![0, 63]);
    }

    #[test]
    fn test_decode_every_single_bit() {
        for b in 0..64u32 {
            assert_eq!(decode(1u64 << b), vec![b], "bit {}", b);
        }
        assert_eq!(decode(u64::MAX), (0..64).collect::<Vec<_>>());
    }

    #[test]
    fn test_decode_appends() {
        let mut out = vec![99];
        decode_word(0b101, &mut out);
        assert_eq!(out, vec![99, 0, 2]);
    }
}
