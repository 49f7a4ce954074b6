use std::collections::{BTreeMap, BTreeSet};

use crate::structures::{
    entry::CacheEntry,
    instance::{domain_contains, Domain, Instance},
    station::Station,
};

/// A record that some set of stations cannot be packed.
///
/// If the stations were restricted to domains when shown unsatisfiable, the domains are kept, as the record then only applies to instances whose domains are no larger.
/// Adding stations only adds constraints, and so an UNSAT entry proves every superset of its stations unsatisfiable (given domains which are no larger).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnsatEntry {
    stations: BTreeSet<Station>,

    /// Domains of (some of) the stations, stations without a domain are unrestricted.
    domains: BTreeMap<Station, Domain>,

    key: String,
}

impl UnsatEntry {
    /// An entry over `stations`, each unrestricted.
    pub fn new<I: IntoIterator<Item = Station>>(stations: I, key: impl Into<String>) -> Self {
        UnsatEntry {
            stations: stations.into_iter().collect(),
            domains: BTreeMap::default(),
            key: key.into(),
        }
    }

    /// An entry recording that `instance` cannot be packed.
    pub fn from_instance(instance: &Instance, key: impl Into<String>) -> Self {
        UnsatEntry {
            stations: instance.stations().clone(),
            domains: instance.domains().clone(),
            key: key.into(),
        }
    }

    pub fn stations(&self) -> &BTreeSet<Station> {
        &self.stations
    }

    pub fn domain(&self, station: &Station) -> Option<&Domain> {
        self.domains.get(station)
    }

    pub fn domains(&self) -> &BTreeMap<Station, Domain> {
        &self.domains
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Whether the entry shows `instance` cannot be packed.
    ///
    /// This is so if the stations of the entry are a subset of those of the instance, and the domain of each station of the entry contains the domain of the station in the instance.
    pub fn proves(&self, instance: &Instance) -> bool {
        self.stations.is_subset(instance.stations())
            && self
                .stations
                .iter()
                .all(|station| domain_contains(self.domain(station), instance.domain(station)))
    }

    /// Whether `self` is less restrictive than `other`, so any instance proven by `other` is proven by `self`.
    ///
    /// That is, `self` has no more stations than `other`, and each station of `self` has at least the channels of the station in `other`.
    /// An entry is not less restrictive than itself.
    pub fn is_less_restrictive(&self, other: &UnsatEntry) -> bool {
        self != other
            && self.stations.is_subset(&other.stations)
            && self
                .stations
                .iter()
                .all(|station| domain_contains(self.domain(station), other.domain(station)))
    }
}

impl CacheEntry<Station> for UnsatEntry {
    fn elements<'a>(&'a self) -> impl Iterator<Item = &'a Station>
    where
        Station: 'a,
    {
        self.stations.iter()
    }

    fn cardinality(&self) -> usize {
        self.stations.len()
    }
}
