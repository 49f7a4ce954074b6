use std::{
    collections::{hash_map, BTreeSet, HashMap},
    hash::Hash,
    sync::Arc,
};

use crate::{
    index::{
        iterators::{Containing, Direction, MatchingSets},
        ContainmentIndex,
    },
    misc::log::targets,
    structures::{bitset::BitSet, entry::CacheEntry, permutation::Permutation},
    types::err::{self, ErrorKind},
};

/// An index of entries, by the bit-vectors of the sets the entries represent.
///
/// Bit-vectors are kept in order, and as a set is always at least any subset of the set under the order, a query need only examine one side of the order.
/// Entries representing the same set share a bucket, in the order the entries were added.
///
/// The permutation is shared, as the indices of a cache use the same permutation.
pub struct BitSetIndex<E: Eq + Hash, C> {
    /// Entries, by the bit-vector of the set each entry represents.
    buckets: HashMap<BitSet, Vec<C>>,

    /// The keys of the buckets, in order.
    tree: BTreeSet<BitSet>,

    permutation: Arc<Permutation<E>>,

    entry_count: usize,
}

impl<E: Clone + Eq + Hash, C: CacheEntry<E> + PartialEq> BitSetIndex<E, C> {
    pub fn new(permutation: Arc<Permutation<E>>) -> Self {
        BitSetIndex {
            buckets: HashMap::default(),
            tree: BTreeSet::default(),
            permutation,
            entry_count: 0,
        }
    }

    pub fn from_permutation(permutation: Permutation<E>) -> Self {
        Self::new(Arc::new(permutation))
    }

    /// An index from an explicit map of elements to positions.
    ///
    /// Returns an error if the map is not a bijection to positions 0..N.
    pub fn from_positions(positions: HashMap<E, usize>) -> Result<Self, err::PermutationError> {
        Ok(Self::from_permutation(Permutation::new(positions)?))
    }

    pub fn permutation(&self) -> &Arc<Permutation<E>> {
        &self.permutation
    }

    fn bits_of<Q: CacheEntry<E> + ?Sized>(&self, query: &Q) -> Result<BitSet, err::IndexError> {
        self.permutation.bitset(query.elements())
    }

    /// The bit-vectors of stored sets which answer a query.
    fn matching_sets<Q>(&self, query: &Q, direction: Direction) -> Result<MatchingSets<'_>, err::IndexError>
    where
        Q: CacheEntry<E> + ?Sized,
    {
        let bits = self.bits_of(query)?;
        log::trace!(target: targets::INDEX, "{direction:?} query on {bits}");

        let candidates = match direction {
            Direction::Subsets => self.tree.range::<BitSet, _>(..=&bits),
            Direction::Supersets => self.tree.range::<BitSet, _>(&bits..),
        };
        Ok(MatchingSets::new(candidates, bits, direction))
    }

    fn count(&self, sets: MatchingSets<'_>) -> Result<usize, err::ConsistencyError> {
        let mut count = 0;
        for bits in sets {
            match self.buckets.get(bits) {
                Some(bucket) => count += bucket.len(),
                None => {
                    log::error!(target: targets::INDEX, "No bucket for indexed set {bits}");
                    return Err(err::ConsistencyError::MissingBucket);
                }
            }
        }
        Ok(count)
    }

    /// Checks the buckets and the ordered bit-vectors of the index agree.
    ///
    /// That is:
    /// - Every ordered bit-vector has a non-empty bucket, and every bucket has an ordered bit-vector.
    /// - Every bit-vector has the width of the permutation.
    /// - The count of entries is the sum of the sizes of the buckets.
    pub fn check_consistency(&self) -> Result<(), err::ConsistencyError> {
        if self.tree.len() != self.buckets.len() {
            log::error!(target: targets::INDEX, "{} ordered sets, {} buckets", self.tree.len(), self.buckets.len());
            return Err(err::ConsistencyError::MissingFromTree);
        }

        let mut entry_count = 0;
        for bits in &self.tree {
            if bits.width() != self.permutation.len() {
                return Err(err::ConsistencyError::WidthMismatch);
            }
            match self.buckets.get(bits) {
                None => return Err(err::ConsistencyError::MissingBucket),
                Some(bucket) if bucket.is_empty() => return Err(err::ConsistencyError::EmptyBucket),
                Some(bucket) => entry_count += bucket.len(),
            }
        }

        if entry_count != self.entry_count {
            log::error!(target: targets::INDEX, "Counted {entry_count} entries, expected {}", self.entry_count);
            return Err(err::ConsistencyError::MissingBucket);
        }

        Ok(())
    }
}

impl<E: Clone + Eq + Hash, C: CacheEntry<E> + PartialEq> ContainmentIndex for BitSetIndex<E, C> {
    type Element = E;

    type Entry = C;

    type Iter<'a>
        = Containing<'a, C>
    where
        Self: 'a;

    fn add(&mut self, entry: C) -> Result<bool, ErrorKind> {
        let bits = self.bits_of(&entry)?;

        match self.buckets.entry(bits) {
            hash_map::Entry::Occupied(mut bucket) => {
                if bucket.get().contains(&entry) {
                    log::trace!(target: targets::INDEX, "Entry already present");
                    return Ok(false);
                }
                bucket.get_mut().push(entry);
            }
            hash_map::Entry::Vacant(bucket) => {
                self.tree.insert(bucket.key().clone());
                bucket.insert(vec![entry]);
            }
        }

        self.entry_count += 1;
        Ok(true)
    }

    fn remove(&mut self, entry: &C) -> Result<bool, ErrorKind> {
        let bits = self.bits_of(entry)?;

        let Some(bucket) = self.buckets.get_mut(&bits) else {
            return Ok(false);
        };

        let Some(position) = bucket.iter().position(|stored| stored == entry) else {
            return Ok(false);
        };
        bucket.remove(position);
        self.entry_count -= 1;

        if bucket.is_empty() {
            self.buckets.remove(&bits);
            if !self.tree.remove(&bits) {
                log::error!(target: targets::INDEX, "Bucket for {bits} without an ordered set");
                return Err(err::ConsistencyError::MissingFromTree.into());
            }
        }

        Ok(true)
    }

    fn contains(&self, entry: &C) -> Result<bool, ErrorKind> {
        let bits = self.bits_of(entry)?;
        Ok(self
            .buckets
            .get(&bits)
            .is_some_and(|bucket| bucket.contains(entry)))
    }

    fn subsets<Q>(&self, query: &Q) -> Result<Self::Iter<'_>, ErrorKind>
    where
        Q: CacheEntry<E> + ?Sized,
    {
        let sets = self.matching_sets(query, Direction::Subsets)?;
        Ok(Containing::new(sets, &self.buckets))
    }

    fn supersets<Q>(&self, query: &Q) -> Result<Self::Iter<'_>, ErrorKind>
    where
        Q: CacheEntry<E> + ?Sized,
    {
        let sets = self.matching_sets(query, Direction::Supersets)?;
        Ok(Containing::new(sets, &self.buckets))
    }

    fn count_subsets<Q>(&self, query: &Q) -> Result<usize, ErrorKind>
    where
        Q: CacheEntry<E> + ?Sized,
    {
        let sets = self.matching_sets(query, Direction::Subsets)?;
        Ok(self.count(sets)?)
    }

    fn count_supersets<Q>(&self, query: &Q) -> Result<usize, ErrorKind>
    where
        Q: CacheEntry<E> + ?Sized,
    {
        let sets = self.matching_sets(query, Direction::Supersets)?;
        Ok(self.count(sets)?)
    }

    fn entries(&self) -> impl Iterator<Item = &C> {
        self.tree
            .iter()
            .flat_map(move |bits| self.buckets.get(bits).into_iter().flatten())
    }

    fn size(&self) -> usize {
        self.tree.len()
    }

    fn entry_count(&self) -> usize {
        self.entry_count
    }
}
