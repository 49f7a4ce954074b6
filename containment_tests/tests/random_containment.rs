use std::collections::BTreeSet;

use containment_cache::{
    cache::SatisfiabilityCache,
    config::Config,
    index::{BitSetIndex, ContainmentIndex},
    structures::{
        entry::{SatEntry, UnsatEntry},
        permutation::Permutation,
        station::Station,
    },
};
use containment_tests::{brute, init_logging, random};
use rand::Rng;

fn sorted<'a>(entries: impl Iterator<Item = &'a BTreeSet<Station>>) -> Vec<BTreeSet<Station>> {
    let mut entries = entries.cloned().collect::<Vec<_>>();
    entries.sort();
    entries
}

mod index {
    use super::*;

    fn cross_check(seed: u64, universe_size: u32, stored: usize, density: f64) {
        init_logging();
        let mut rng = random::seeded(seed);
        let universe = (0..universe_size).collect::<Vec<Station>>();

        let permutation = Permutation::shuffled(universe.clone(), &mut rng).unwrap();
        let mut index = BitSetIndex::<Station, BTreeSet<Station>>::from_permutation(permutation);

        let mut reference = Vec::new();
        for set in random::random_sets(&mut rng, &universe, stored, density) {
            if index.add(set.clone()).unwrap() {
                reference.push(set);
            }
        }
        assert_eq!(index.entry_count(), reference.len());
        assert!(index.check_consistency().is_ok());

        for _ in 0..200 {
            let query_density = rng.random_range(0.0..=1.0);
            let query = random::random_set(&mut rng, &universe, query_density);

            let expected = brute::subsets(&reference, &query);
            assert_eq!(sorted(index.subsets(&query).unwrap()), expected);
            assert_eq!(index.count_subsets(&query).unwrap(), expected.len());

            let expected = brute::supersets(&reference, &query);
            assert_eq!(sorted(index.supersets(&query).unwrap()), expected);
            assert_eq!(index.count_supersets(&query).unwrap(), expected.len());
        }
    }

    #[test]
    fn small_universe() {
        cross_check(1, 8, 100, 0.5);
    }

    #[test]
    fn sparse_sets() {
        cross_check(2, 100, 500, 0.1);
    }

    #[test]
    fn dense_sets() {
        cross_check(3, 130, 300, 0.9);
    }

    #[test]
    fn removal() {
        init_logging();
        let mut rng = random::seeded(4);
        let universe = (0..40).collect::<Vec<Station>>();
        let mut index = BitSetIndex::<Station, BTreeSet<Station>>::from_permutation(
            Permutation::from_universe(universe.clone()).unwrap(),
        );

        let mut reference = random::random_sets(&mut rng, &universe, 300, 0.2);
        reference.sort();
        reference.dedup();
        for set in &reference {
            index.add(set.clone()).unwrap();
        }

        let (removed, kept): (Vec<_>, Vec<_>) = reference.into_iter().partition(|_| rng.random_bool(0.5));
        for set in &removed {
            assert_eq!(index.remove(set), Ok(true));
        }
        assert_eq!(index.entry_count(), kept.len());
        assert!(index.check_consistency().is_ok());

        for _ in 0..100 {
            let query = random::random_set(&mut rng, &universe, 0.5);
            assert_eq!(sorted(index.subsets(&query).unwrap()), brute::subsets(&kept, &query));
            assert_eq!(sorted(index.supersets(&query).unwrap()), brute::supersets(&kept, &query));
        }
    }
}

mod cache {
    use super::*;

    #[test]
    fn proofs_match_exhaustive_search() {
        init_logging();
        let mut rng = random::seeded(5);
        let universe = (1..=30).collect::<Vec<Station>>();
        let cache = SatisfiabilityCache::from_universe(universe.clone(), Config::default()).unwrap();

        let mut sat_entries = Vec::new();
        for (count, stations) in random::random_sets(&mut rng, &universe, 150, 0.4).into_iter().enumerate() {
            let assignment = random::random_assignment(&mut rng, &stations, 14..=20);
            let entry = SatEntry::new(assignment, format!("sat#{count}"), "random");
            cache.add_sat(entry.clone()).unwrap();
            sat_entries.push(entry);
        }

        let mut unsat_entries = Vec::new();
        for count in 0..150 {
            let instance = random::random_instance(&mut rng, &universe, 0.2, 0.3, 14..=20);
            let entry = UnsatEntry::from_instance(&instance, format!("unsat#{count}"));
            cache.add_unsat(entry.clone()).unwrap();
            unsat_entries.push(entry);
        }

        let mut hits = 0;
        for _ in 0..500 {
            let density = rng.random_range(0.05..=0.6);
            let instance = random::random_instance(&mut rng, &universe, density, 0.2, 14..=20);

            let sat = cache.prove_sat_by_superset(&instance).unwrap();
            assert_eq!(sat.is_cached(), brute::proves_sat(&sat_entries, &instance));
            if let Some(assignment) = sat.assignment() {
                hits += 1;
                assert!(assignment.keys().eq(instance.stations().iter()));
                assert!(assignment
                    .iter()
                    .all(|(station, channel)| instance.admits(*station, *channel)));
            }

            let unsat = cache.prove_unsat_by_subset(&instance).unwrap();
            assert_eq!(unsat.is_cached(), brute::proves_unsat(&unsat_entries, &instance));
            hits += unsat.is_cached() as usize;
        }

        // Some instances should be decided either way, else the check is vacuous.
        assert!(hits > 0);
    }

    #[test]
    fn pruning_preserves_proofs() {
        init_logging();
        let mut rng = random::seeded(6);
        let universe = (1..=12).collect::<Vec<Station>>();
        let cache = SatisfiabilityCache::from_universe(universe.clone(), Config::default()).unwrap();

        for (count, stations) in random::random_sets(&mut rng, &universe, 200, 0.5).into_iter().enumerate() {
            // Few channels, so witnesses often extend one another.
            let assignment = random::random_assignment(&mut rng, &stations, 1..=2);
            cache.add_sat(SatEntry::new(assignment, format!("sat#{count}"), "random")).unwrap();
        }
        for count in 0..200 {
            let stations = random::random_set(&mut rng, &universe, 0.4);
            cache.add_unsat(UnsatEntry::new(stations, format!("unsat#{count}"))).unwrap();
        }

        let instances = (0..300)
            .map(|_| random::random_instance(&mut rng, &universe, 0.4, 0.3, 1..=2))
            .collect::<Vec<_>>();
        let before = instances
            .iter()
            .map(|instance| cache.lookup(instance).unwrap().report())
            .collect::<Vec<_>>();

        let sat_count = cache.filter_sat().len();
        let pruned = cache.prune_sat().unwrap();
        assert_eq!(cache.filter_sat().len(), sat_count - pruned.len());
        cache.prune_unsat().unwrap();

        let after = instances
            .iter()
            .map(|instance| cache.lookup(instance).unwrap().report())
            .collect::<Vec<_>>();
        assert_eq!(before, after);

        // Nothing remains to prune.
        assert!(cache.prune_sat().unwrap().is_empty());
        assert!(cache.prune_unsat().unwrap().is_empty());
    }
}
