/*!
A fixed-width set of bits, ordered most-significant-bit first.

A [BitSet] represents some subset of the positions 0..*width*, where *width* is fixed at creation.
Bits are stored in 64 bit words, with position *i* stored at bit *i* mod 64 of word *i* / 64.

# Order

Bit sets are compared by scanning from the highest position downward, and the first position at which two bit sets differ decides the order --- the bit set with the bit set is greater.
Equivalently, bit sets are compared as (unsigned) integers.

The order has the useful property that *a* ⊆ *b* implies *a* ≤ *b*, as at the highest differing position *b* must be the bit set with the bit.
This is a necessary condition only: {0} ≤ {1}, though neither is a subset of the other.

```rust
# use containment_cache::structures::bitset::BitSet;
let mut a = BitSet::new(70);
let mut b = BitSet::new(70);
a.set(3);
b.set(3);
b.set(65);

assert!(a.is_subset_of(&b));
assert!(a < b);

let mut c = BitSet::new(70);
c.set(4);
assert!(!a.is_subset_of(&c));
assert!(a < c);
```

Comparison of bit sets with different widths orders by width first, though within an [index](crate::index) all bit sets share the width of the permutation.
*/

use std::cmp::Ordering;

const WORD_BITS: usize = u64::BITS as usize;

/// The bit set struct.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitSet {
    words: Vec<u64>,
    width: usize,
}

impl BitSet {
    /// An empty bit set over positions 0..`width`.
    pub fn new(width: usize) -> Self {
        BitSet {
            words: vec![0; width.div_ceil(WORD_BITS)],
            width,
        }
    }

    /// The number of positions of the bit set.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Sets the bit at `position`.
    ///
    /// # Panics
    /// If `position` is not less than the width of the bit set.
    pub fn set(&mut self, position: usize) {
        assert!(position < self.width, "Position {position} beyond width {}", self.width);
        self.words[position / WORD_BITS] |= 1_u64 << (position % WORD_BITS);
    }

    /// Clears the bit at `position`.
    ///
    /// # Panics
    /// If `position` is not less than the width of the bit set.
    pub fn clear(&mut self, position: usize) {
        assert!(position < self.width, "Position {position} beyond width {}", self.width);
        self.words[position / WORD_BITS] &= !(1_u64 << (position % WORD_BITS));
    }

    /// Whether the bit at `position` is set, false for any position beyond the width.
    pub fn get(&self, position: usize) -> bool {
        match self.words.get(position / WORD_BITS) {
            Some(word) if position < self.width => word & (1_u64 << (position % WORD_BITS)) != 0,
            _ => false,
        }
    }

    /// A count of the bits set.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Whether no bit is set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|word| *word == 0)
    }

    /// Whether every bit set in `self` is set in `other`.
    pub fn is_subset_of(&self, other: &BitSet) -> bool {
        self.words.len() == other.words.len()
            && self
                .words
                .iter()
                .zip(other.words.iter())
                .all(|(mine, theirs)| mine & !theirs == 0)
    }

    /// Whether every bit set in `other` is set in `self`.
    pub fn is_superset_of(&self, other: &BitSet) -> bool {
        other.is_subset_of(self)
    }

    /// A count of the bits set in both `self` and `other`.
    pub fn intersection_count(&self, other: &BitSet) -> usize {
        self.words
            .iter()
            .zip(other.words.iter())
            .map(|(mine, theirs)| (mine & theirs).count_ones() as usize)
            .sum()
    }

    /// An iterator over the set positions, in ascending order.
    pub fn ones(&self) -> Ones<'_> {
        Ones {
            words: &self.words,
            word_index: 0,
            remaining: self.words.first().copied().unwrap_or(0),
        }
    }
}

/// An iterator over the set positions of a [BitSet].
pub struct Ones<'a> {
    words: &'a [u64],
    word_index: usize,
    remaining: u64,
}

impl Iterator for Ones<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining == 0 {
            self.word_index += 1;
            self.remaining = *self.words.get(self.word_index)?;
        }
        let offset = self.remaining.trailing_zeros() as usize;
        // Clear the lowest set bit.
        self.remaining &= self.remaining - 1;
        Some(self.word_index * WORD_BITS + offset)
    }
}

impl Ord for BitSet {
    fn cmp(&self, other: &Self) -> Ordering {
        self.width.cmp(&other.width).then_with(|| {
            // Words are compared from the most significant down.
            self.words.iter().rev().cmp(other.words.iter().rev())
        })
    }
}

impl PartialOrd for BitSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Debug for BitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "BitSet({})", self)
    }
}

impl std::fmt::Display for BitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Most significant bit first, as in the order.
        for position in (0..self.width).rev() {
            match self.get(position) {
                true => write!(f, "1")?,
                false => write!(f, "0")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_mask(mask: u32, width: usize) -> BitSet {
        let mut bits = BitSet::new(width);
        for position in 0..width {
            if mask & (1_u32 << position) != 0 {
                bits.set(position);
            }
        }
        bits
    }

    #[test]
    fn order_is_integer_order() {
        let width = 6;
        for x in 0..(1_u32 << width) {
            for y in 0..(1_u32 << width) {
                assert_eq!(from_mask(x, width).cmp(&from_mask(y, width)), x.cmp(&y));
            }
        }
    }

    #[test]
    fn subset_implies_order() {
        let width = 6;
        for x in 0..(1_u32 << width) {
            for y in 0..(1_u32 << width) {
                let (a, b) = (from_mask(x, width), from_mask(y, width));
                assert_eq!(a.is_subset_of(&b), x & !y == 0);
                if a.is_subset_of(&b) {
                    assert!(a <= b);
                }
            }
        }
    }

    #[test]
    fn order_across_words() {
        let mut low = BitSet::new(130);
        let mut high = BitSet::new(130);

        for position in 0..64 {
            low.set(position);
        }
        high.set(129);

        assert!(low < high);
        assert_eq!(high.to_string().len(), 130);
        assert!(high.to_string().starts_with('1'));
    }

    #[test]
    fn ones() {
        let mut bits = BitSet::new(200);
        let positions = [0, 5, 63, 64, 127, 128, 199];
        for position in positions {
            bits.set(position);
        }

        assert_eq!(bits.ones().collect::<Vec<_>>(), positions);
        assert_eq!(bits.count_ones(), positions.len());

        bits.clear(64);
        assert!(!bits.get(64));
        assert_eq!(bits.count_ones(), positions.len() - 1);

        assert_eq!(BitSet::new(200).ones().count(), 0);
        assert_eq!(BitSet::new(0).ones().count(), 0);
    }

    #[test]
    fn intersection() {
        let a = from_mask(0b1011, 4);
        let b = from_mask(0b0110, 4);
        assert_eq!(a.intersection_count(&b), 1);
        assert!(!a.get(10));
    }

    #[test]
    fn empty_is_least() {
        let empty = BitSet::new(8);
        assert!(empty.is_empty());
        for x in 0..256 {
            let other = from_mask(x, 8);
            assert!(empty.is_subset_of(&other));
            assert!(empty <= other);
        }
    }
}
