/*!
Miscelanous items related to [logging](log).

Calls to the log macro are made throughout the library, mostly at `trace` and `debug` level for queries and at `info` for insertions, cache hits, and pruning.

Note, no log implementation is provided.
For more details, see [log].
*/

/// Targets to be used within a [log]! macro.
pub mod targets {
    /// Logs related to the [containment index](crate::index)
    pub const INDEX: &str = "index";

    /// Logs related to [locking](crate::index::lockable)
    pub const LOCK: &str = "lock";

    /// Logs related to the [satisfiability cache](crate::cache)
    pub const SATISFIABILITY: &str = "satisfiability";

    /// Logs related to [pruning](crate::cache::SatisfiabilityCache::prune_sat)
    pub const PRUNE: &str = "prune";

    /// Logs related to [permutations](crate::structures::permutation)
    pub const PERMUTATION: &str = "permutation";

    /// Logs related to [solvers](crate::solver)
    pub const SOLVER: &str = "solver";
}
