/*!
Solvers, and a solver which consults a cache before solving.

The [Solver] trait is the seam between the cache and whatever decides instances.
No solver is provided by the library, beyond [CachingSolver], which decorates some other solver.

A caching solver:
- Looks `instance` up in the cache, and returns the cached proof on a hit.
  Proofs by a SAT entry are credited to [SUPERSET_CACHE], and proofs by an UNSAT entry to [SUBSET_CACHE].
- On a miss, solves with the inner solver and records any conclusive result in the cache.

Failures of the cache --- e.g. an instance with a station outside the universe of the cache --- are logged, and the instance is passed to the inner solver.

```rust
# use containment_cache::cache::SatisfiabilityCache;
# use containment_cache::config::Config;
# use containment_cache::reports::{Report, SolverResult};
# use containment_cache::solver::{CachingSolver, Solver, SUPERSET_CACHE};
# use containment_cache::structures::{instance::Instance, station::Assignment};
# use std::{sync::Arc, time::Duration};
/// Assigns each station a channel equal to its identifier.
struct Identity;

impl Solver for Identity {
    fn solve(&mut self, instance: &Instance) -> SolverResult {
        let assignment = instance.stations().iter().map(|s| (*s, *s as u16)).collect();
        SolverResult::satisfiable(assignment, "identity", Duration::ZERO)
    }
}

let cache = Arc::new(SatisfiabilityCache::from_universe(1..=4, Config::default()).unwrap());
let mut solver = CachingSolver::new(cache.clone(), Identity);

let first = solver.solve(&Instance::from_stations([1, 2, 3]));
assert_eq!(first.solved_by, "identity");

let second = solver.solve(&Instance::from_stations([1, 3]));
assert_eq!(second.solved_by, SUPERSET_CACHE);
assert_eq!(second.assignment, Some(Assignment::from([(1, 1), (3, 3)])));
```
*/

use std::{sync::Arc, time::Instant};

use crate::{
    cache::{Lookup, SatisfiabilityCache},
    misc::log::targets,
    reports::{Report, SolverResult},
    structures::instance::Instance,
};

/// Credited with proofs from a SAT entry.
pub const SUPERSET_CACHE: &str = "superset_cache";

/// Credited with proofs from an UNSAT entry.
pub const SUBSET_CACHE: &str = "subset_cache";

/// Something which decides instances.
pub trait Solver {
    /// Attempts to decide `instance`.
    ///
    /// A solver may give up, with a report of [Timeout](Report::Timeout) or [Unknown](Report::Unknown).
    fn solve(&mut self, instance: &Instance) -> SolverResult;
}

/// A solver which consults a cache before solving.
pub struct CachingSolver<S: Solver> {
    cache: Arc<SatisfiabilityCache>,

    solver: S,

    /// A count of results recorded by this solver.
    recorded: usize,
}

impl<S: Solver> CachingSolver<S> {
    pub fn new(cache: Arc<SatisfiabilityCache>, solver: S) -> Self {
        CachingSolver {
            cache,
            solver,
            recorded: 0,
        }
    }

    pub fn cache(&self) -> &Arc<SatisfiabilityCache> {
        &self.cache
    }

    pub fn inner(&self) -> &S {
        &self.solver
    }

    pub fn into_inner(self) -> S {
        self.solver
    }

    /// A count of results recorded in the cache by this solver.
    pub fn recorded(&self) -> usize {
        self.recorded
    }

    /// Keys are issued by the cache, so solvers sharing a cache never reuse a key.
    fn key_for(&self, instance: &Instance) -> String {
        self.cache.fresh_key(instance.name().unwrap_or("instance"))
    }
}

impl<S: Solver> Solver for CachingSolver<S> {
    fn solve(&mut self, instance: &Instance) -> SolverResult {
        let start = Instant::now();

        match self.cache.lookup(instance) {
            Ok(Lookup::Satisfiable { assignment, key }) => {
                log::info!(target: targets::SOLVER, "Satisfiable from cached entry {key}");
                return SolverResult::satisfiable(assignment, SUPERSET_CACHE, start.elapsed());
            }

            Ok(Lookup::Unsatisfiable { key }) => {
                log::info!(target: targets::SOLVER, "Unsatisfiable from cached entry {key}");
                return SolverResult::without_assignment(Report::Unsatisfiable, SUBSET_CACHE, start.elapsed());
            }

            Ok(Lookup::Miss) => {
                log::debug!(target: targets::SOLVER, "Cache miss");
            }

            Err(e) => {
                log::warn!(target: targets::SOLVER, "Cache lookup failed: {e}");
            }
        }

        let lookup_time = start.elapsed();
        let mut result = self.solver.solve(instance);
        result.runtime += lookup_time;

        if result.report.is_conclusive() {
            let key = self.key_for(instance);
            match self.cache.record(instance, &result, key) {
                Ok(_) => self.recorded += 1,
                Err(e) => log::warn!(target: targets::SOLVER, "Result not recorded: {e}"),
            }
        }

        result
    }
}
