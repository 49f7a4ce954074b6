//! Iterators over the answers to a query.
//!
//! A query first narrows the ordered sets of an index to those on the correct side of the query --- at most the query for subsets, at least the query for supersets --- as this is necessary for containment.
//! Each remaining set is then checked bitwise.

use std::collections::{btree_set, HashMap};

use crate::{misc::log::targets, structures::bitset::BitSet};

/// The direction of a containment query.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Sets contained in the query.
    Subsets,

    /// Sets containing the query.
    Supersets,
}

/// The stored sets which answer a query, in ascending order.
pub struct MatchingSets<'a> {
    candidates: btree_set::Range<'a, BitSet>,
    query: BitSet,
    direction: Direction,
}

impl<'a> MatchingSets<'a> {
    pub(super) fn new(candidates: btree_set::Range<'a, BitSet>, query: BitSet, direction: Direction) -> Self {
        MatchingSets {
            candidates,
            query,
            direction,
        }
    }
}

impl<'a> Iterator for MatchingSets<'a> {
    type Item = &'a BitSet;

    fn next(&mut self) -> Option<Self::Item> {
        let query = &self.query;
        match self.direction {
            Direction::Subsets => self.candidates.find(|candidate| candidate.is_subset_of(query)),
            Direction::Supersets => self.candidates.find(|candidate| candidate.is_superset_of(query)),
        }
    }
}

/// The stored entries which answer a query.
///
/// Entries are given in ascending order of their sets, and entries with the same set in the order they were added.
pub struct Containing<'a, C> {
    sets: MatchingSets<'a>,
    buckets: &'a HashMap<BitSet, Vec<C>>,
    bucket: std::slice::Iter<'a, C>,
}

impl<'a, C> Containing<'a, C> {
    pub(super) fn new(sets: MatchingSets<'a>, buckets: &'a HashMap<BitSet, Vec<C>>) -> Self {
        let empty: &'a [C] = &[];
        Containing {
            sets,
            buckets,
            bucket: empty.iter(),
        }
    }
}

impl<'a, C> Iterator for Containing<'a, C> {
    type Item = &'a C;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.bucket.next() {
                return Some(entry);
            }

            let bits = self.sets.next()?;
            match self.buckets.get(bits) {
                Some(bucket) => self.bucket = bucket.iter(),
                None => {
                    log::error!(target: targets::INDEX, "No bucket for indexed set {bits}");
                    panic!("! Index corrupt: no bucket for an indexed set")
                }
            }
        }
    }
}
