/*!
A bijection from elements to bit positions.

Every [index](crate::index) is built with a permutation, which fixes the bit-vector used to represent any set of elements for the life of the index.
The permutation maps each of the N elements of a universe to exactly one of the positions 0..N, and each position is the image of exactly one element.

```rust
# use containment_cache::structures::permutation::Permutation;
# use std::collections::HashMap;
let permutation = Permutation::new(HashMap::from([(10, 1), (20, 0), (30, 2)])).unwrap();

let bits = permutation.bitset(&[10, 30]).unwrap();
assert!(bits.get(1) && bits.get(2) && !bits.get(0));

assert_eq!(permutation.decode(&bits).copied().collect::<Vec<_>>(), vec![10, 30]);

// 40 is not an element of the universe.
assert!(permutation.bitset(&[10, 40]).is_err());

// Nothing is mapped to position 1.
assert!(Permutation::new(HashMap::from([(10, 0), (20, 2)])).is_err());
```

Growing the universe requires a new permutation, and so a new index.
*/

use std::{
    collections::{BTreeSet, HashMap},
    hash::Hash,
};

use rand::seq::SliceRandom;

use crate::{
    misc::log::targets::{self},
    structures::bitset::BitSet,
    types::err::{self},
};

/// The permutation struct.
#[derive(Clone, Debug)]
pub struct Permutation<E: Eq + Hash> {
    /// The position of each element.
    positions: HashMap<E, usize>,

    /// The element at each position.
    elements: Vec<E>,
}

impl<E: Clone + Eq + Hash> Permutation<E> {
    /// A permutation from an explicit map of elements to positions.
    ///
    /// Returns an error if the map is empty, or some position in 0..N is not the image of any element (whether as some element is mapped beyond N, or two elements are mapped to the same position).
    pub fn new(positions: HashMap<E, usize>) -> Result<Self, err::PermutationError> {
        if positions.is_empty() {
            log::error!(target: targets::PERMUTATION, "Permutation over an empty universe");
            return Err(err::PermutationError::Empty);
        }

        let mut slots: Vec<Option<E>> = vec![None; positions.len()];
        for (element, position) in &positions {
            if let Some(slot) = slots.get_mut(*position) {
                *slot = Some(element.clone());
            }
        }

        let mut elements = Vec::with_capacity(slots.len());
        for (position, slot) in slots.into_iter().enumerate() {
            match slot {
                Some(element) => elements.push(element),
                None => {
                    log::error!(target: targets::PERMUTATION, "No element is mapped to position {position}");
                    return Err(err::PermutationError::MissingPosition(position));
                }
            }
        }

        Ok(Permutation {
            positions,
            elements,
        })
    }

    /// The number of elements in the universe of the permutation.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Always false, as a permutation may not be empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// The position of `element`, if `element` is in the universe of the permutation.
    pub fn position(&self, element: &E) -> Option<usize> {
        self.positions.get(element).copied()
    }

    /// The element at `position`, if `position` is less than the size of the universe.
    pub fn element(&self, position: usize) -> Option<&E> {
        self.elements.get(position)
    }

    /// The elements of the universe, in order of position.
    pub fn elements(&self) -> &[E] {
        &self.elements
    }

    /// Whether `element` is in the universe of the permutation.
    pub fn contains(&self, element: &E) -> bool {
        self.positions.contains_key(element)
    }

    /// The bit-vector representation of `elements`.
    ///
    /// Returns an error if any element is outside the universe of the permutation.
    /// No element is ignored.
    pub fn bitset<'a, I>(&self, elements: I) -> Result<BitSet, err::IndexError>
    where
        I: IntoIterator<Item = &'a E>,
        E: 'a,
    {
        let mut bits = BitSet::new(self.len());
        for element in elements {
            match self.positions.get(element) {
                Some(position) => bits.set(*position),
                None => {
                    log::warn!(target: targets::PERMUTATION, "Element outside of the permutation");
                    return Err(err::IndexError::UnknownElement);
                }
            }
        }
        Ok(bits)
    }

    /// The elements represented by `bits`, in order of position.
    pub fn decode<'a>(&'a self, bits: &'a BitSet) -> impl Iterator<Item = &'a E> + 'a {
        bits.ones().filter_map(|position| self.elements.get(position))
    }
}

impl<E: Clone + Eq + Hash + Ord> Permutation<E> {
    /// A permutation which maps the elements of `universe` to positions in ascending order of the elements.
    ///
    /// Repeated elements are ignored.
    pub fn from_universe<I>(universe: I) -> Result<Self, err::PermutationError>
    where
        I: IntoIterator<Item = E>,
    {
        let elements = universe.into_iter().collect::<BTreeSet<_>>();
        Self::new(elements.into_iter().enumerate().map(|(position, element)| (element, position)).collect())
    }

    /// A permutation which maps the elements of `universe` to positions uniformly at random.
    ///
    /// As the order of bit-vectors depends on the permutation, a random permutation spreads sets which share elements with large identifiers across the order of an index.
    pub fn shuffled<I, R>(universe: I, rng: &mut R) -> Result<Self, err::PermutationError>
    where
        I: IntoIterator<Item = E>,
        R: rand::Rng + ?Sized,
    {
        let mut elements = universe.into_iter().collect::<BTreeSet<_>>().into_iter().collect::<Vec<_>>();
        elements.shuffle(rng);
        Self::new(elements.into_iter().enumerate().map(|(position, element)| (element, position)).collect())
    }
}
