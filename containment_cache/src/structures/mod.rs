//! Key structures, such as permutations, bit-vectors, and entries.
//!
//! # Stations and sets of stations
//!
//! A [station](station) is an opaque identifier, and the universe of stations is the set of stations an index was built to represent.
//! Every set of stations over the universe is represented by a [bit-vector](bitset), via a fixed [permutation](permutation) of the universe.
//!
//! # Entries
//!
//! An [entry](entry) is anything which represents a set of elements.
//! Entries of a satisfiability cache are witnesses to satisfiability and records of unsatisfiability, and an [instance] may also be used as a query.

pub mod bitset;
pub mod entry;
pub mod instance;
pub mod permutation;
pub mod station;
