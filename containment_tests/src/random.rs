use std::{collections::BTreeSet, ops::RangeInclusive};

use containment_cache::structures::{
    instance::Instance,
    station::{Assignment, Channel, Station},
};
use rand::{rngs::StdRng, Rng, SeedableRng};

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A set with each station of `universe` included with probability `density`.
pub fn random_set<R: Rng + ?Sized>(rng: &mut R, universe: &[Station], density: f64) -> BTreeSet<Station> {
    universe
        .iter()
        .filter(|_| rng.random_bool(density))
        .copied()
        .collect()
}

pub fn random_sets<R: Rng + ?Sized>(
    rng: &mut R,
    universe: &[Station],
    count: usize,
    density: f64,
) -> Vec<BTreeSet<Station>> {
    (0..count).map(|_| random_set(rng, universe, density)).collect()
}

/// An assignment of a channel from `channels` to each of `stations`.
pub fn random_assignment<R: Rng + ?Sized>(
    rng: &mut R,
    stations: &BTreeSet<Station>,
    channels: RangeInclusive<Channel>,
) -> Assignment {
    stations
        .iter()
        .map(|station| (*station, rng.random_range(channels.clone())))
        .collect()
}

/// An instance over a random set of stations, where each station is restricted to a random domain with probability `restriction`.
pub fn random_instance<R: Rng + ?Sized>(
    rng: &mut R,
    universe: &[Station],
    density: f64,
    restriction: f64,
    channels: RangeInclusive<Channel>,
) -> Instance {
    let mut instance = Instance::default();
    for station in random_set(rng, universe, density) {
        if rng.random_bool(restriction) {
            let domain = channels
                .clone()
                .filter(|_| rng.random_bool(0.5))
                .collect::<BTreeSet<_>>();
            instance = instance.with_domain(station, domain);
        } else {
            instance = instance.with_station(station);
        }
    }
    instance
}
