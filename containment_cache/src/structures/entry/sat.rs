use std::collections::{BTreeMap, BTreeSet};

use crate::structures::{
    entry::CacheEntry,
    instance::Instance,
    station::{self, Assignment, Channel, Station},
};

/// A witness to the satisfiability of a set of stations.
///
/// The set of stations of the entry is the domain of the assignment.
/// As any restriction of a witness is again a witness, a SAT entry proves every subset of its stations satisfiable.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SatEntry {
    /// The witness.
    assignment: Assignment,

    /// A key to identify the entry, e.g. from a persistence layer.
    key: String,

    /// The nickname of the solver which found the witness.
    solver: String,
}

impl SatEntry {
    pub fn new(assignment: Assignment, key: impl Into<String>, solver: impl Into<String>) -> Self {
        SatEntry {
            assignment,
            key: key.into(),
            solver: solver.into(),
        }
    }

    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn solver(&self) -> &str {
        &self.solver
    }

    /// The channel of `station`, if `station` is part of the entry.
    pub fn channel(&self, station: &Station) -> Option<Channel> {
        self.assignment.get(station).copied()
    }

    /// The witness, channel-major.
    pub fn by_channel(&self) -> BTreeMap<Channel, BTreeSet<Station>> {
        station::by_channel(&self.assignment)
    }

    /// Whether the witness, restricted to the stations of `instance`, solves `instance`.
    ///
    /// In other words, whether each station of the instance is assigned a channel in its domain.
    pub fn is_solution_to(&self, instance: &Instance) -> bool {
        instance.stations().iter().all(|station| {
            self.assignment
                .get(station)
                .is_some_and(|channel| instance.admits(*station, *channel))
        })
    }

    /// The witness restricted to `stations`, skipping any station not part of the entry.
    pub fn restrict_to<'a, I>(&self, stations: I) -> Assignment
    where
        I: IntoIterator<Item = &'a Station>,
    {
        stations
            .into_iter()
            .filter_map(|station| self.channel(station).map(|channel| (*station, channel)))
            .collect()
    }

    /// A count of the stations of `instance` the witness assigns a channel admitted by `instance`.
    pub fn agreement_with(&self, instance: &Instance) -> usize {
        self.assignment
            .iter()
            .filter(|(station, channel)| instance.admits(**station, **channel))
            .count()
    }

    /// Whether the witness of `self` extends the witness of `other`, so any instance proven by `other` is proven by `self`.
    ///
    /// An entry does not have more solving power than itself.
    pub fn has_more_solving_power(&self, other: &SatEntry) -> bool {
        self != other
            && other.assignment.len() <= self.assignment.len()
            && other
                .assignment
                .iter()
                .all(|(station, channel)| self.assignment.get(station) == Some(channel))
    }
}

impl CacheEntry<Station> for SatEntry {
    fn elements<'a>(&'a self) -> impl Iterator<Item = &'a Station>
    where
        Station: 'a,
    {
        self.assignment.keys()
    }

    fn cardinality(&self) -> usize {
        self.assignment.len()
    }
}
