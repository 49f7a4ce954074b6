/*!
Indices of entries, supporting subset and superset queries over the sets the entries represent.

The [ContainmentIndex] trait captures what is required of an index, and [BitSetIndex] is the canonical implementation.
[LockableIndex](lockable::LockableIndex) wraps any index behind a reader/writer lock, for use across threads.

# Queries

Given a query set *q*:
- The subsets of *q* are the stored entries whose set is contained in *q*.
- The supersets of *q* are the stored entries whose set contains *q*.

Queries return lazy iterators which borrow the index.
An iterator is finite, and not restartable --- to repeat a query, make the query again.
Counting queries perform the same search without visiting entries.

Any query which mentions an element outside the permutation of the index returns an [IndexError](crate::types::err::IndexError), rather than ignoring the element.

```rust
# use containment_cache::index::{BitSetIndex, ContainmentIndex};
# use containment_cache::structures::permutation::Permutation;
# use std::collections::BTreeSet;
let permutation = Permutation::from_universe(1..=4_u32).unwrap();
let mut index = BitSetIndex::<u32, BTreeSet<u32>>::from_permutation(permutation);

index.add(BTreeSet::from([1, 2])).unwrap();
index.add(BTreeSet::from([2, 3, 4])).unwrap();
index.add(BTreeSet::from([3])).unwrap();

let query = BTreeSet::from([2, 3, 4]);
assert_eq!(index.subsets(&query).unwrap().count(), 2);
assert_eq!(index.count_supersets(&BTreeSet::from([3])).unwrap(), 2);

assert!(index.subsets(&BTreeSet::from([5])).is_err());
```
*/

mod bitset_index;
pub use bitset_index::BitSetIndex;

mod iterators;
pub use iterators::{Containing, Direction, MatchingSets};

pub mod lockable;

use crate::{structures::entry::CacheEntry, types::err::ErrorKind};

/// An index of entries, by the sets the entries represent.
pub trait ContainmentIndex {
    /// Elements of the sets represented by entries.
    type Element;

    /// The entries of the index.
    type Entry: CacheEntry<Self::Element>;

    /// An iterator over the entries which answer a subset or superset query.
    type Iter<'a>: Iterator<Item = &'a Self::Entry>
    where
        Self: 'a;

    /// Adds `entry` to the index.
    ///
    /// Returns true if the entry was added, and false if an equal entry was already present.
    /// The index is unchanged if an error is returned.
    fn add(&mut self, entry: Self::Entry) -> Result<bool, ErrorKind>;

    /// Removes `entry` from the index.
    ///
    /// Returns true if the entry was removed, and false if the entry was not present.
    fn remove(&mut self, entry: &Self::Entry) -> Result<bool, ErrorKind>;

    /// Whether `entry` is present in the index.
    ///
    /// This is a test for the entry, not for some other entry representing the same set.
    fn contains(&self, entry: &Self::Entry) -> Result<bool, ErrorKind>;

    /// The entries whose sets are subsets of (or equal to) the set of `query`.
    fn subsets<Q>(&self, query: &Q) -> Result<Self::Iter<'_>, ErrorKind>
    where
        Q: CacheEntry<Self::Element> + ?Sized;

    /// The entries whose sets are supersets of (or equal to) the set of `query`.
    fn supersets<Q>(&self, query: &Q) -> Result<Self::Iter<'_>, ErrorKind>
    where
        Q: CacheEntry<Self::Element> + ?Sized;

    /// A count of the entries whose sets are subsets of the set of `query`.
    fn count_subsets<Q>(&self, query: &Q) -> Result<usize, ErrorKind>
    where
        Q: CacheEntry<Self::Element> + ?Sized;

    /// A count of the entries whose sets are supersets of the set of `query`.
    fn count_supersets<Q>(&self, query: &Q) -> Result<usize, ErrorKind>
    where
        Q: CacheEntry<Self::Element> + ?Sized;

    /// Every entry of the index.
    fn entries(&self) -> impl Iterator<Item = &Self::Entry>;

    /// The number of distinct sets represented by the entries of the index.
    fn size(&self) -> usize;

    /// The number of entries of the index.
    fn entry_count(&self) -> usize;
}
