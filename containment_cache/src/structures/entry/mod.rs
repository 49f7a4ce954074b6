/*!
Entries of a containment index.

The only requirement of an entry is that it reports the finite set of elements it represents, as captured by the [CacheEntry] trait.
Distinct entries may represent the same set --- e.g. two witnesses over the same stations --- and an index keeps each.

The trait is implemented for common collections, so a plain set may be used as a query:

```rust
# use containment_cache::structures::entry::CacheEntry;
# use std::collections::BTreeSet;
let query = BTreeSet::from([1_u32, 2, 3]);
assert_eq!(query.cardinality(), 3);
assert_eq!(vec![4_u32, 5].elements().count(), 2);
```

Entries of a satisfiability cache are one of:
- A [SatEntry], a witness to the satisfiability of a set of stations.
- An [UnsatEntry], a record that a set of stations (with some domains) cannot be packed.

[Entry] is the sum of these, for when an entry of either kind is of interest.
*/

mod sat;
pub use sat::SatEntry;

mod unsat;
pub use unsat::UnsatEntry;

use std::{
    collections::{btree_map, btree_set, BTreeSet, HashSet},
    hash::Hash,
};

use crate::{
    reports::Report,
    structures::station::{Channel, Station},
};

/// Something which represents a finite set of elements.
pub trait CacheEntry<E> {
    /// The elements of the set, each exactly once.
    fn elements<'a>(&'a self) -> impl Iterator<Item = &'a E>
    where
        E: 'a;

    /// The number of elements of the set.
    fn cardinality(&self) -> usize {
        self.elements().count()
    }
}

impl<E: Ord> CacheEntry<E> for BTreeSet<E> {
    fn elements<'a>(&'a self) -> impl Iterator<Item = &'a E>
    where
        E: 'a,
    {
        self.iter()
    }

    fn cardinality(&self) -> usize {
        self.len()
    }
}

impl<E: Eq + Hash, S> CacheEntry<E> for HashSet<E, S> {
    fn elements<'a>(&'a self) -> impl Iterator<Item = &'a E>
    where
        E: 'a,
    {
        self.iter()
    }

    fn cardinality(&self) -> usize {
        self.len()
    }
}

/// Slices and vectors are taken to be free of repeated elements.
impl<E> CacheEntry<E> for [E] {
    fn elements<'a>(&'a self) -> impl Iterator<Item = &'a E>
    where
        E: 'a,
    {
        self.iter()
    }

    fn cardinality(&self) -> usize {
        self.len()
    }
}

impl<E> CacheEntry<E> for Vec<E> {
    fn elements<'a>(&'a self) -> impl Iterator<Item = &'a E>
    where
        E: 'a,
    {
        self.iter()
    }

    fn cardinality(&self) -> usize {
        self.len()
    }
}

/// An entry of a satisfiability cache.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Entry {
    Sat(SatEntry),
    Unsat(UnsatEntry),
}

impl Entry {
    /// The key identifying the entry.
    pub fn key(&self) -> &str {
        match self {
            Self::Sat(entry) => entry.key(),
            Self::Unsat(entry) => entry.key(),
        }
    }

    /// The report the entry records.
    pub fn report(&self) -> Report {
        match self {
            Self::Sat(_) => Report::Satisfiable,
            Self::Unsat(_) => Report::Unsatisfiable,
        }
    }
}

impl From<SatEntry> for Entry {
    fn from(entry: SatEntry) -> Self {
        Entry::Sat(entry)
    }
}

impl From<UnsatEntry> for Entry {
    fn from(entry: UnsatEntry) -> Self {
        Entry::Unsat(entry)
    }
}

/// The elements of an [Entry].
pub enum EntryElements<'a> {
    Sat(btree_map::Keys<'a, Station, Channel>),
    Unsat(btree_set::Iter<'a, Station>),
}

impl<'a> Iterator for EntryElements<'a> {
    type Item = &'a Station;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Sat(keys) => keys.next(),
            Self::Unsat(stations) => stations.next(),
        }
    }
}

impl CacheEntry<Station> for Entry {
    fn elements<'a>(&'a self) -> impl Iterator<Item = &'a Station>
    where
        Station: 'a,
    {
        match self {
            Self::Sat(entry) => EntryElements::Sat(entry.assignment().keys()),
            Self::Unsat(entry) => EntryElements::Unsat(entry.stations().iter()),
        }
    }

    fn cardinality(&self) -> usize {
        match self {
            Self::Sat(entry) => entry.cardinality(),
            Self::Unsat(entry) => entry.cardinality(),
        }
    }
}
