//! A containment cache for station packing feasibility problems.
//!
//! containment_cache stores the results of previously solved station packing problems, indexed by the set of stations of each problem, so that a new problem already decided by some earlier problem need not be solved again.
//!
//! Satisfiability of a packing problem is monotone in its set of stations:
//! - A witness for some set of stations is, when restricted, a witness for any subset of the stations.
//! - A set of stations which cannot be packed cannot be packed with further stations.
//!
//! And so, given a cache of results, a problem is decided if some cached satisfiable problem has a superset of its stations, or some cached unsatisfiable problem has a subset of its stations.
//!
//! # Orientation
//!
//! The library is built around a [containment index](crate::index), which stores entries by the sets they represent and answers subset and superset queries.
//!
//! - Sets are represented as [bit-vectors](crate::structures::bitset), through a fixed [permutation](crate::structures::permutation) of the universe of stations.
//!   Bit-vectors are ordered so that a set is never less than any of its subsets, and so a query need only search one side of the order.
//! - An index may be wrapped in a [lock](crate::index::lockable), to be shared between threads.
//! - The [satisfiability cache](crate::cache) holds a lockable index of satisfiable entries and a lockable index of unsatisfiable entries, and applies monotonicity to prove [instances](crate::structures::instance).
//! - A [caching solver](crate::solver) places a cache in front of some solver.
//!
//! Useful starting points, then, may be:
//! - The [cache module](crate::cache) for proofs from cached results.
//! - The [index module](crate::index) for the containment queries underlying each proof.
//! - The [configuration](crate::config) to see what may be adjusted.
//!
//! # Examples
//!
//! + Proofs of satisfiability and unsatisfiability, over the universe of stations {1, 2, 3, 4}.
//!
//! ```rust
//! # use containment_cache::cache::{SatisfiabilityCache, SatResult, UnsatResult};
//! # use containment_cache::config::Config;
//! # use containment_cache::structures::entry::{SatEntry, UnsatEntry};
//! # use containment_cache::structures::{instance::Instance, station::Assignment};
//! let cache = SatisfiabilityCache::from_universe([1, 2, 3, 4], Config::default()).unwrap();
//!
//! cache.add_sat(SatEntry::new(Assignment::from([(1, 14), (2, 15)]), "A", "solver")).unwrap();
//! cache.add_unsat(UnsatEntry::new([3, 4], "B")).unwrap();
//!
//! // {1} is contained in {1, 2}, and the witness of A restricted to {1} is a witness for {1}.
//! assert_eq!(
//!     cache.prove_sat_by_superset(&Instance::from_stations([1])).unwrap(),
//!     SatResult::Proven { assignment: Assignment::from([(1, 14)]), key: "A".to_string() }
//! );
//!
//! // {3, 4} is contained in {1, 3, 4}.
//! assert_eq!(
//!     cache.prove_unsat_by_subset(&Instance::from_stations([1, 3, 4])).unwrap(),
//!     UnsatResult::Proven { key: "B".to_string() }
//! );
//!
//! // Neither {1, 2} nor {3, 4} is related to {1, 3}.
//! let instance = Instance::from_stations([1, 3]);
//! assert!(!cache.prove_sat_by_superset(&instance).unwrap().is_cached());
//! assert!(!cache.prove_unsat_by_subset(&instance).unwrap().is_cached());
//! ```
//!
//! + Containment queries on plain sets.
//!
//! ```rust
//! # use containment_cache::index::{BitSetIndex, ContainmentIndex};
//! # use containment_cache::structures::permutation::Permutation;
//! # use std::collections::BTreeSet;
//! let permutation = Permutation::from_universe(0..64_u32).unwrap();
//! let mut index = BitSetIndex::<u32, BTreeSet<u32>>::from_permutation(permutation);
//!
//! for set in [vec![1, 2], vec![2, 3], vec![1, 2, 3, 4]] {
//!     index.add(set.into_iter().collect()).unwrap();
//! }
//!
//! assert_eq!(index.count_supersets(&BTreeSet::from([2])).unwrap(), 3);
//! assert_eq!(index.count_subsets(&BTreeSet::from([1, 2, 3])).unwrap(), 2);
//! ```
//!
//! # Logs
//!
//! Calls to [log!](log) are made throughout the library, with targets listed in [misc::log].
//! No log implementation is provided.
//!
//! For example, when used with [env_logger](https://docs.rs/env_logger/latest/env_logger/):
//!
//! ```sh
//! RUST_LOG=prune=info,satisfiability=debug …
//! ```
//!
//! # Features
//!
//! - `serde`: (de)serialisation of entries, instances, and reports, so a cache may be rebuilt from some persistence layer.

pub mod cache;
pub mod config;
pub mod index;
pub mod misc;
pub mod reports;
pub mod solver;
pub mod structures;
pub mod types;
