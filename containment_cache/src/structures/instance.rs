/*!
A problem instance: a set of stations, each possibly restricted to a domain of channels.

A station without a domain is unrestricted, and so an instance built from stations alone asks only whether the stations may be packed together.
Domains narrow this, and are respected by the cache: a cached witness proves an instance only if the witness assigns each station a channel in the domain of the station.

```rust
# use containment_cache::structures::instance::Instance;
# use std::collections::BTreeSet;
let instance = Instance::from_stations([1, 2])
    .with_domain(3, BTreeSet::from([14, 15]))
    .with_name("example");

assert_eq!(instance.len(), 3);
assert!(instance.admits(1, 40));
assert!(instance.admits(3, 14));
assert!(!instance.admits(3, 16));
assert!(!instance.admits(4, 14));
```
*/

use std::collections::{BTreeMap, BTreeSet};

use crate::structures::{
    entry::CacheEntry,
    station::{Channel, Station},
};

/// A domain of channels.
pub type Domain = BTreeSet<Channel>;

/// The instance struct.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    stations: BTreeSet<Station>,
    domains: BTreeMap<Station, Domain>,
    name: Option<String>,
}

impl Instance {
    /// An instance over `stations`, each unrestricted.
    pub fn from_stations<I: IntoIterator<Item = Station>>(stations: I) -> Self {
        Instance {
            stations: stations.into_iter().collect(),
            ..Default::default()
        }
    }

    /// An instance over the stations of `domains`, each restricted to its domain.
    pub fn from_domains<I: IntoIterator<Item = (Station, Domain)>>(domains: I) -> Self {
        let domains = domains.into_iter().collect::<BTreeMap<_, _>>();
        Instance {
            stations: domains.keys().copied().collect(),
            domains,
            name: None,
        }
    }

    /// Adds `station`, unrestricted.
    pub fn with_station(mut self, station: Station) -> Self {
        self.stations.insert(station);
        self
    }

    /// Adds `station`, restricted to `domain`.
    pub fn with_domain(mut self, station: Station, domain: Domain) -> Self {
        self.stations.insert(station);
        self.domains.insert(station, domain);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn stations(&self) -> &BTreeSet<Station> {
        &self.stations
    }

    /// The domain of `station`, or None if the station is unrestricted (or not part of the instance).
    pub fn domain(&self, station: &Station) -> Option<&Domain> {
        self.domains.get(station)
    }

    pub fn domains(&self) -> &BTreeMap<Station, Domain> {
        &self.domains
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Whether `station` is part of the instance and may be assigned `channel`.
    pub fn admits(&self, station: Station, channel: Channel) -> bool {
        self.stations.contains(&station)
            && self
                .domains
                .get(&station)
                .map_or(true, |domain| domain.contains(&channel))
    }

    /// The number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl CacheEntry<Station> for Instance {
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

/// Whether every channel permitted by `inner` is permitted by `outer`, with None permitting every channel.
pub(crate) fn domain_contains(outer: Option<&Domain>, inner: Option<&Domain>) -> bool {
    match (outer, inner) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(outer), Some(inner)) => inner.is_subset(outer),
    }
}
