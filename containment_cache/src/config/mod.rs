/*!
Configuration of a satisfiability cache.

All configuration for a cache is contained within [Config].
Indices themselves take no configuration beyond their [permutation](crate::structures::permutation).
*/

mod config_option;
pub use config_option::ConfigOption;

mod tie_break;
pub use tie_break::TieBreak;

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// How to choose between entries which each prove a query.
    pub tie_break: ConfigOption<TieBreak>,

    /// Pruning logs progress after every `prune_report_interval` entries scanned.
    pub prune_report_interval: ConfigOption<usize>,

    /// The most entries returned when searching for entries with maximal intersection.
    pub intersection_limit: ConfigOption<usize>,
}

impl Default for Config {
    /// The default configuration prefers the smallest proof, to keep results reproducible and close to the query.
    fn default() -> Self {
        Config {
            tie_break: ConfigOption {
                name: "tie_break",
                min: TieBreak::MIN,
                max: TieBreak::MAX,
                value: TieBreak::SmallestCardinality,
            },

            prune_report_interval: ConfigOption {
                name: "prune_report_interval",
                min: 1,
                max: usize::MAX,
                value: 1000,
            },

            intersection_limit: ConfigOption {
                name: "intersection_limit",
                min: 0,
                max: usize::MAX,
                value: 64,
            },
        }
    }
}
