//! Growable bitset over `u64` words.
//!
//! A [`Bitset`] only ever grows by appending zero words, so positions keep
//! their word and bit for the lifetime of the set. The in-place boolean
//! operations are what query evaluation runs on its private working copy;
//! they accept operands of a different length.

use crate::index::types::{Op, Position};
use crate::utils::bits::{self, WORD_BITS};

/// Set of positions packed 64 per word, lowest position in the lowest bit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bitset {
    words: Vec<u64>,
}

impl Bitset {
    /// Create an empty bitset (no words)
    pub fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Build from raw words
    pub fn from_words(words: Vec<u64>) -> Self {
        Self { words }
    }

    /// Raw words, word `g` covering positions `[64g, 64g + 63]`
    #[inline]
    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Number of words currently allocated
    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Mark `position` as a member, growing as needed
    #[inline]
    pub fn insert(&mut self, position: Position) {
        bits::set_bit(&mut self.words, position);
    }

    #[inline]
    pub fn contains(&self, position: Position) -> bool {
        bits::test_bit(&self.words, position)
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Number of set bits strictly below `limit`
    pub fn count_below(&self, limit: Position) -> usize {
        let full = limit / WORD_BITS;
        let rest = limit % WORD_BITS;

        let mut count: usize = self
            .words
            .iter()
            .take(full)
            .map(|w| w.count_ones() as usize)
            .sum();

        if rest > 0 {
            if let Some(&w) = self.words.get(full) {
                count += (w & ((1u64 << rest) - 1)).count_ones() as usize;
            }
        }
        count
    }

    /// Iterate set positions in ascending order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.words.iter().enumerate().flat_map(|(i, &word)| {
            let base = i * WORD_BITS;
            let mut w = word;
            std::iter::from_fn(move || {
                if w == 0 {
                    return None;
                }
                let bit = w.trailing_zeros() as usize;
                w &= w - 1;
                Some(base + bit)
            })
        })
    }

    /// Drop every word, keeping the allocation
    pub fn clear(&mut self) {
        self.words.clear();
    }

    /// Intersect in place.
    ///
    /// Positions past the end of either operand cannot be in both, so the
    /// result is cut to the shorter length and never grows.
    pub fn and_with(&mut self, other: &Bitset) {
        self.words.truncate(other.words.len());
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a &= *b;
        }
    }

    /// Union in place; trailing words of a longer `other` are appended as-is
    pub fn or_with(&mut self, other: &Bitset) {
        let shared = self.words.len().min(other.words.len());
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a |= *b;
        }
        if other.words.len() > shared {
            self.words.extend_from_slice(&other.words[shared..]);
        }
    }

    /// Difference in place; words past the end of `other` are left untouched
    pub fn and_not_with(&mut self, other: &Bitset) {
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a &= !*b;
        }
    }

    /// Dispatch a query step operation
    #[inline]
    pub fn apply(&mut self, op: Op, other: &Bitset) {
        match op {
            Op::And => self.and_with(other),
            Op::Or => self.or_with(other),
            Op::AndNot => self.and_not_with(other),
        }
    }

    /// Approximate heap usage in bytes
    pub fn memory_usage(&self) -> usize {
        self.words.capacity() * std::mem::size_of::<u64>()
    }
}

impl FromIterator<Position> for Bitset {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Self {
        let mut set = Bitset::new();
        for p in iter {
            set.insert(p);
        }
        set
    }
}
