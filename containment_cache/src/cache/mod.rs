/*!
A cache of satisfiability results, which proves instances by monotonicity.

The cache holds two [indices](crate::index), over a shared permutation of the universe of stations:
- An index of [SAT entries](SatEntry), witnesses to satisfiability.
- An index of [UNSAT entries](UnsatEntry), records of unsatisfiability.

Satisfiability is monotone with respect to the set of stations of an instance:
- Removing stations never makes an instance unsatisfiable, and so any SAT entry over a superset of the stations of an instance proves the instance satisfiable (so long as the channels of the witness are admitted by the domains of the instance).
  The witness, restricted to the stations of the instance, is the proof.
- Adding stations never makes an instance satisfiable, and so any UNSAT entry over a subset of the stations of an instance proves the instance unsatisfiable (so long as the domains of the entry are no narrower than those of the instance).

An instance proven neither way is a miss, and is reported as such rather than as an error.
When several entries prove an instance, one is chosen by the configured [TieBreak](crate::config::TieBreak).

# Example

```rust
# use containment_cache::cache::{Lookup, SatisfiabilityCache, SatResult, UnsatResult};
# use containment_cache::config::Config;
# use containment_cache::reports::{Report, SolverResult};
# use containment_cache::structures::{instance::Instance, station::Assignment};
# use std::time::Duration;
let cache = SatisfiabilityCache::from_universe(1..=4, Config::default()).unwrap();

let solved = SolverResult::satisfiable(Assignment::from([(1, 14), (2, 15)]), "solver", Duration::ZERO);
cache.record(&Instance::from_stations([1, 2]), &solved, "A").unwrap();

let refuted = SolverResult::without_assignment(Report::Unsatisfiable, "solver", Duration::ZERO);
cache.record(&Instance::from_stations([3, 4]), &refuted, "B").unwrap();

let proof = cache.prove_sat_by_superset(&Instance::from_stations([1])).unwrap();
assert_eq!(proof.assignment(), Some(&Assignment::from([(1, 14)])));

let proof = cache.prove_unsat_by_subset(&Instance::from_stations([1, 3, 4])).unwrap();
assert_eq!(proof.key(), Some("B"));

assert_eq!(cache.lookup(&Instance::from_stations([1, 3])).unwrap(), Lookup::Miss);
```
*/

mod prune;

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use crate::{
    config::Config,
    index::{lockable::LockableIndex, BitSetIndex, ContainmentIndex},
    misc::log::targets,
    reports::{Report, SolverResult},
    structures::{
        entry::{CacheEntry, Entry, SatEntry, UnsatEntry},
        instance::Instance,
        permutation::Permutation,
        station::{Assignment, Station},
    },
    types::err::{self, ErrorKind},
};

/// The index of SAT entries.
pub type SatIndex = BitSetIndex<Station, SatEntry>;

/// The index of UNSAT entries.
pub type UnsatIndex = BitSetIndex<Station, UnsatEntry>;

/// The result of an attempt to prove an instance satisfiable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SatResult {
    /// A cached witness, restricted to the stations of the instance, and the key of the entry the witness is from.
    Proven { assignment: Assignment, key: String },

    Inconclusive,
}

impl SatResult {
    /// Whether the instance was proven from the cache.
    pub fn is_cached(&self) -> bool {
        matches!(self, Self::Proven { .. })
    }

    pub fn assignment(&self) -> Option<&Assignment> {
        match self {
            Self::Proven { assignment, .. } => Some(assignment),
            Self::Inconclusive => None,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Proven { key, .. } => Some(key),
            Self::Inconclusive => None,
        }
    }
}

/// The result of an attempt to prove an instance unsatisfiable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UnsatResult {
    /// The key of the entry which proves the instance.
    Proven { key: String },

    Inconclusive,
}

impl UnsatResult {
    /// Whether the instance was proven from the cache.
    pub fn is_cached(&self) -> bool {
        matches!(self, Self::Proven { .. })
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Proven { key } => Some(key),
            Self::Inconclusive => None,
        }
    }
}

/// The result of a lookup for either proof.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Lookup {
    Satisfiable { assignment: Assignment, key: String },
    Unsatisfiable { key: String },
    Miss,
}

impl Lookup {
    pub fn is_cached(&self) -> bool {
        !matches!(self, Self::Miss)
    }

    /// The report proven, if any.
    pub fn report(&self) -> Option<Report> {
        match self {
            Self::Satisfiable { .. } => Some(Report::Satisfiable),
            Self::Unsatisfiable { .. } => Some(Report::Unsatisfiable),
            Self::Miss => None,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            Self::Satisfiable { key, .. } | Self::Unsatisfiable { key } => Some(key),
            Self::Miss => None,
        }
    }
}

/// The satisfiability cache struct.
///
/// Each index has a lock of its own, and a cache may be shared between threads by reference (or [Arc]).
pub struct SatisfiabilityCache {
    config: Config,

    permutation: Arc<Permutation<Station>>,

    sat: LockableIndex<SatIndex>,

    unsat: LockableIndex<UnsatIndex>,

    /// A count of keys issued, shared by every writer to the cache.
    issued_keys: AtomicUsize,
}

impl SatisfiabilityCache {
    pub fn new(permutation: Arc<Permutation<Station>>, config: Config) -> Self {
        SatisfiabilityCache {
            config,
            sat: LockableIndex::new(BitSetIndex::new(permutation.clone())),
            unsat: LockableIndex::new(BitSetIndex::new(permutation.clone())),
            permutation,
            issued_keys: AtomicUsize::new(0),
        }
    }

    /// A cache over `universe`, with stations mapped to positions in ascending order.
    pub fn from_universe<I>(universe: I, config: Config) -> Result<Self, err::PermutationError>
    where
        I: IntoIterator<Item = Station>,
    {
        Ok(Self::new(Arc::new(Permutation::from_universe(universe)?), config))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn permutation(&self) -> &Arc<Permutation<Station>> {
        &self.permutation
    }

    /// The index of SAT entries, e.g. to hold a guard over several queries.
    pub fn sat_index(&self) -> &LockableIndex<SatIndex> {
        &self.sat
    }

    /// The index of UNSAT entries, e.g. to hold a guard over several queries.
    pub fn unsat_index(&self) -> &LockableIndex<UnsatIndex> {
        &self.unsat
    }

    /// The number of distinct station sets with a SAT entry.
    pub fn sat_size(&self) -> usize {
        self.sat.size()
    }

    /// The number of distinct station sets with an UNSAT entry.
    pub fn unsat_size(&self) -> usize {
        self.unsat.size()
    }

    /// A key of the form `{stem}#{n}`, distinct from any other key issued by the cache.
    pub fn fresh_key(&self, stem: &str) -> String {
        let n = self.issued_keys.fetch_add(1, Ordering::Relaxed);
        format!("{stem}#{n}")
    }
}

// Proofs
impl SatisfiabilityCache {
    /// Attempts to prove `instance` satisfiable, from a SAT entry over a superset of the stations of the instance.
    pub fn prove_sat_by_superset(&self, instance: &Instance) -> Result<SatResult, ErrorKind> {
        let guard = self.sat.read();
        self.sat_proof(&*guard, instance, |_| false)
    }

    /// As [prove_sat_by_superset](SatisfiabilityCache::prove_sat_by_superset), though skipping any entry for which `ignore` holds.
    ///
    /// For example, to ask whether some entry is needed, given the other entries.
    pub fn prove_sat_by_superset_excluding<F>(&self, instance: &Instance, ignore: F) -> Result<SatResult, ErrorKind>
    where
        F: Fn(&SatEntry) -> bool,
    {
        let guard = self.sat.read();
        self.sat_proof(&*guard, instance, ignore)
    }

    /// Attempts to prove `instance` unsatisfiable, from an UNSAT entry over a subset of the stations of the instance.
    pub fn prove_unsat_by_subset(&self, instance: &Instance) -> Result<UnsatResult, ErrorKind> {
        let guard = self.unsat.read();
        self.unsat_proof(&*guard, instance)
    }

    /// Attempts to prove `instance` satisfiable, and then unsatisfiable.
    ///
    /// Both indices are read under a single snapshot, so an entry added during the lookup is seen by neither proof or both.
    pub fn lookup(&self, instance: &Instance) -> Result<Lookup, ErrorKind> {
        let sat = self.sat.read();
        let unsat = self.unsat.read();

        if let SatResult::Proven { assignment, key } = self.sat_proof(&*sat, instance, |_| false)? {
            return Ok(Lookup::Satisfiable { assignment, key });
        }

        if let UnsatResult::Proven { key } = self.unsat_proof(&*unsat, instance)? {
            return Ok(Lookup::Unsatisfiable { key });
        }

        Ok(Lookup::Miss)
    }

    fn sat_proof<F>(&self, index: &SatIndex, instance: &Instance, ignore: F) -> Result<SatResult, ErrorKind>
    where
        F: Fn(&SatEntry) -> bool,
    {
        let candidates = index
            .supersets(instance)?
            .filter(|entry| !ignore(*entry) && entry.is_solution_to(instance));

        let tie_break = self.config.tie_break.value;
        match tie_break.select(candidates, |entry: &SatEntry| entry.cardinality()) {
            Some(entry) => {
                log::debug!(target: targets::SATISFIABILITY, "Satisfiable by {}", entry.key());
                Ok(SatResult::Proven {
                    assignment: entry.restrict_to(instance.stations()),
                    key: entry.key().to_owned(),
                })
            }

            None => {
                log::trace!(target: targets::SATISFIABILITY, "No SAT superset");
                Ok(SatResult::Inconclusive)
            }
        }
    }

    fn unsat_proof(&self, index: &UnsatIndex, instance: &Instance) -> Result<UnsatResult, ErrorKind> {
        let candidates = index.subsets(instance)?.filter(|entry| entry.proves(instance));

        let tie_break = self.config.tie_break.value;
        match tie_break.select(candidates, |entry: &UnsatEntry| entry.cardinality()) {
            Some(entry) => {
                log::debug!(target: targets::SATISFIABILITY, "Unsatisfiable by {}", entry.key());
                Ok(UnsatResult::Proven {
                    key: entry.key().to_owned(),
                })
            }

            None => {
                log::trace!(target: targets::SATISFIABILITY, "No UNSAT subset");
                Ok(UnsatResult::Inconclusive)
            }
        }
    }
}

// Entries
impl SatisfiabilityCache {
    /// Records the result of a solve on `instance`, under `key`.
    ///
    /// - A satisfiable result is recorded as a SAT entry, with the witness restricted to the stations of the instance.
    /// - An unsatisfiable result is recorded as an UNSAT entry, with the domains of the instance.
    ///
    /// Any other result proves nothing, and is returned as an error without change to the cache.
    pub fn record(&self, instance: &Instance, result: &SolverResult, key: impl Into<String>) -> Result<Entry, ErrorKind> {
        let entry = match result.report {
            Report::Satisfiable => {
                let Some(assignment) = &result.assignment else {
                    log::warn!(target: targets::SATISFIABILITY, "Satisfiable result without an assignment");
                    return Err(err::CacheError::MissingAssignment.into());
                };

                let mut witness = Assignment::default();
                for station in instance.stations() {
                    match assignment.get(station) {
                        Some(channel) => {
                            witness.insert(*station, *channel);
                        }
                        None => {
                            log::warn!(target: targets::SATISFIABILITY, "No channel for station {station}");
                            return Err(err::CacheError::IncompleteAssignment(*station).into());
                        }
                    }
                }

                Entry::Sat(SatEntry::new(witness, key, result.solved_by.as_str()))
            }

            Report::Unsatisfiable => Entry::Unsat(UnsatEntry::from_instance(instance, key)),

            report => {
                log::warn!(target: targets::SATISFIABILITY, "Attempt to record an {report} result");
                return Err(err::CacheError::Inconclusive(report).into());
            }
        };

        self.add(entry.clone())?;
        Ok(entry)
    }

    /// Adds `entry` to the index of its kind, returning whether the entry was new.
    pub fn add(&self, entry: Entry) -> Result<bool, ErrorKind> {
        match entry {
            Entry::Sat(entry) => self.add_sat(entry),
            Entry::Unsat(entry) => self.add_unsat(entry),
        }
    }

    pub fn add_sat(&self, entry: SatEntry) -> Result<bool, ErrorKind> {
        log::info!(target: targets::SATISFIABILITY, "SAT entry {} over {} stations", entry.key(), entry.cardinality());
        self.sat.add(entry)
    }

    pub fn add_unsat(&self, entry: UnsatEntry) -> Result<bool, ErrorKind> {
        log::info!(target: targets::SATISFIABILITY, "UNSAT entry {} over {} stations", entry.key(), entry.cardinality());
        self.unsat.add(entry)
    }

    /// Removes `entry` from the index of its kind, returning whether the entry was present.
    pub fn remove(&self, entry: &Entry) -> Result<bool, ErrorKind> {
        match entry {
            Entry::Sat(entry) => self.sat.remove(entry),
            Entry::Unsat(entry) => self.unsat.remove(entry),
        }
    }

    /// Every SAT entry, in index order.
    pub fn filter_sat(&self) -> Vec<SatEntry> {
        self.sat.entries_cloned()
    }

    /// Every UNSAT entry, in index order.
    pub fn filter_unsat(&self) -> Vec<UnsatEntry> {
        self.unsat.entries_cloned()
    }

    /// Up to `k` SAT entries which agree with `instance` on the most stations, most agreement first.
    ///
    /// An entry agrees with an instance on a station if the station is part of the instance, and the channel of the station is admitted by the instance.
    /// Entries of equal agreement are given in index order.
    /// At most [intersection_limit](crate::config::Config::intersection_limit) entries are returned, regardless of `k`.
    pub fn find_max_intersections(&self, instance: &Instance, k: usize) -> Result<Vec<SatEntry>, ErrorKind> {
        self.permutation.bitset(instance.stations())?;
        let k = std::cmp::min(k, self.config.intersection_limit.value);

        let guard = self.sat.read();
        let mut scored = guard
            .entries()
            .map(|entry| (entry.agreement_with(instance), entry))
            .collect::<Vec<_>>();

        // Stable, so index order is kept between equal agreement.
        scored.sort_by(|(a, _), (b, _)| b.cmp(a));

        Ok(scored.into_iter().take(k).map(|(_, entry)| entry.clone()).collect())
    }
}
