//! Exhaustive answers, by comparing a query with every stored set.

use std::collections::BTreeSet;

use containment_cache::structures::{
    entry::{SatEntry, UnsatEntry},
    instance::Instance,
    station::Station,
};

/// The stored sets contained in `query`, sorted.
pub fn subsets(stored: &[BTreeSet<Station>], query: &BTreeSet<Station>) -> Vec<BTreeSet<Station>> {
    let mut found = stored
        .iter()
        .filter(|set| set.is_subset(query))
        .cloned()
        .collect::<Vec<_>>();
    found.sort();
    found
}

/// The stored sets containing `query`, sorted.
pub fn supersets(stored: &[BTreeSet<Station>], query: &BTreeSet<Station>) -> Vec<BTreeSet<Station>> {
    let mut found = stored
        .iter()
        .filter(|set| set.is_superset(query))
        .cloned()
        .collect::<Vec<_>>();
    found.sort();
    found
}

/// Whether any of `entries` proves `instance` satisfiable.
pub fn proves_sat(entries: &[SatEntry], instance: &Instance) -> bool {
    entries.iter().any(|entry| {
        instance.stations().iter().all(|station| {
            entry
                .channel(station)
                .is_some_and(|channel| instance.admits(*station, channel))
        })
    })
}

/// Whether any of `entries` proves `instance` unsatisfiable.
pub fn proves_unsat(entries: &[UnsatEntry], instance: &Instance) -> bool {
    entries.iter().any(|entry| {
        entry.stations().iter().all(|station| {
            instance.stations().contains(station)
                && match (entry.domain(station), instance.domain(station)) {
                    (None, _) => true,
                    (Some(_), None) => false,
                    (Some(outer), Some(inner)) => inner.is_subset(outer),
                }
        })
    })
}
