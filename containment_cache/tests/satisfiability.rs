use std::{collections::BTreeSet, time::Duration};

use containment_cache::{
    cache::{Lookup, SatResult, SatisfiabilityCache, UnsatResult},
    config::{Config, TieBreak},
    index::ContainmentIndex,
    reports::{Report, SolverResult},
    structures::{
        entry::{Entry, SatEntry, UnsatEntry},
        instance::Instance,
        station::{Assignment, Station},
    },
    types::err::{self, ErrorKind},
};

fn cache(universe: impl IntoIterator<Item = Station>) -> SatisfiabilityCache {
    SatisfiabilityCache::from_universe(universe, Config::default()).unwrap()
}

fn sat(pairs: &[(Station, u16)], key: &str) -> SatEntry {
    SatEntry::new(pairs.iter().copied().collect::<Assignment>(), key, "test")
}

mod monotonicity {
    use super::*;

    #[test]
    fn end_to_end() {
        let cache = cache([1, 2, 3, 4]);

        cache.add_sat(sat(&[(1, 14), (2, 15)], "A")).unwrap();

        let proof = cache.prove_sat_by_superset(&Instance::from_stations([1])).unwrap();
        assert!(proof.is_cached());
        assert_eq!(proof.assignment(), Some(&Assignment::from([(1, 14)])));

        let proof = cache.prove_unsat_by_subset(&Instance::from_stations([1, 2, 3])).unwrap();
        assert!(!proof.is_cached());

        cache.add_unsat(UnsatEntry::new([3, 4], "B")).unwrap();

        let proof = cache.prove_unsat_by_subset(&Instance::from_stations([1, 3, 4])).unwrap();
        assert!(proof.is_cached());
        assert_eq!(proof.key(), Some("B"));
    }

    #[test]
    fn sat_needs_a_superset() {
        let cache = cache(1..=6);
        cache.add_sat(sat(&[(1, 14), (2, 15), (3, 16)], "A")).unwrap();

        for stations in [vec![], vec![1], vec![2, 3], vec![1, 2, 3]] {
            let proof = cache.prove_sat_by_superset(&Instance::from_stations(stations.clone())).unwrap();
            let assignment = proof.assignment().expect("proven");
            assert_eq!(assignment.keys().copied().collect::<Vec<_>>(), stations);
        }

        for stations in [vec![4], vec![1, 4], vec![1, 2, 3, 4]] {
            let proof = cache.prove_sat_by_superset(&Instance::from_stations(stations)).unwrap();
            assert_eq!(proof, SatResult::Inconclusive);
        }
    }

    #[test]
    fn unsat_needs_a_subset() {
        let cache = cache(1..=6);
        cache.add_unsat(UnsatEntry::new([2, 3], "B")).unwrap();

        for stations in [vec![2, 3], vec![1, 2, 3], vec![2, 3, 4, 5, 6]] {
            let proof = cache.prove_unsat_by_subset(&Instance::from_stations(stations)).unwrap();
            assert_eq!(proof, UnsatResult::Proven { key: "B".to_string() });
        }

        for stations in [vec![], vec![2], vec![3, 4]] {
            let proof = cache.prove_unsat_by_subset(&Instance::from_stations(stations)).unwrap();
            assert_eq!(proof, UnsatResult::Inconclusive);
        }
    }

    #[test]
    fn unknown_stations() {
        let cache = cache(1..=4);
        let outside = Instance::from_stations([1, 5]);

        assert_eq!(
            cache.prove_sat_by_superset(&outside),
            Err(ErrorKind::Index(err::IndexError::UnknownElement))
        );
        assert!(cache.prove_unsat_by_subset(&outside).is_err());
        assert!(cache.lookup(&outside).is_err());
        assert!(cache.add_unsat(UnsatEntry::new([5], "C")).is_err());
        assert_eq!(cache.unsat_size(), 0);
    }
}

mod domains {
    use super::*;

    #[test]
    fn witness_must_respect_domains() {
        let cache = cache(1..=4);
        cache.add_sat(sat(&[(1, 14), (2, 15)], "A")).unwrap();

        let admitted = Instance::from_stations([2]).with_domain(1, BTreeSet::from([14, 20]));
        assert!(cache.prove_sat_by_superset(&admitted).unwrap().is_cached());

        let excluded = Instance::from_stations([2]).with_domain(1, BTreeSet::from([20]));
        assert!(!cache.prove_sat_by_superset(&excluded).unwrap().is_cached());
    }

    #[test]
    fn entry_domains_must_contain_instance_domains() {
        let cache = cache(1..=4);
        let refuted = Instance::from_stations([2]).with_domain(1, BTreeSet::from([14, 15]));
        cache.add_unsat(UnsatEntry::from_instance(&refuted, "B")).unwrap();

        let narrower = Instance::from_stations([2, 3]).with_domain(1, BTreeSet::from([14]));
        assert!(cache.prove_unsat_by_subset(&narrower).unwrap().is_cached());

        let wider = Instance::from_stations([2, 3]).with_domain(1, BTreeSet::from([14, 16]));
        assert!(!cache.prove_unsat_by_subset(&wider).unwrap().is_cached());

        let unrestricted = Instance::from_stations([1, 2, 3]);
        assert!(!cache.prove_unsat_by_subset(&unrestricted).unwrap().is_cached());
    }
}

mod records {
    use super::*;

    #[test]
    fn conclusive_results_only() {
        let cache = cache(1..=4);
        let instance = Instance::from_stations([1, 2]);

        for report in [Report::Timeout, Report::Unknown] {
            let result = SolverResult::without_assignment(report, "test", Duration::ZERO);
            assert_eq!(
                cache.record(&instance, &result, "key"),
                Err(ErrorKind::Cache(err::CacheError::Inconclusive(report)))
            );
        }

        let without = SolverResult::without_assignment(Report::Satisfiable, "test", Duration::ZERO);
        assert_eq!(
            cache.record(&instance, &without, "key"),
            Err(ErrorKind::Cache(err::CacheError::MissingAssignment))
        );

        let partial = SolverResult::satisfiable(Assignment::from([(1, 14)]), "test", Duration::ZERO);
        assert_eq!(
            cache.record(&instance, &partial, "key"),
            Err(ErrorKind::Cache(err::CacheError::IncompleteAssignment(2)))
        );

        assert_eq!(cache.sat_size() + cache.unsat_size(), 0);
    }

    #[test]
    fn witnesses_are_restricted() {
        let cache = cache(1..=4);
        let result = SolverResult::satisfiable(Assignment::from([(1, 14), (2, 15), (3, 16)]), "test", Duration::ZERO);

        let entry = cache.record(&Instance::from_stations([1, 2]), &result, "key").unwrap();
        let Entry::Sat(entry) = entry else {
            panic!("Expected a SAT entry");
        };
        assert_eq!(entry.assignment(), &Assignment::from([(1, 14), (2, 15)]));
        assert_eq!(entry.solver(), "test");
        assert_eq!(cache.filter_sat(), vec![entry]);
    }

    #[test]
    fn add_and_remove() {
        let cache = cache(1..=4);
        let entry = Entry::from(UnsatEntry::new([1, 2], "B"));

        assert_eq!(cache.add(entry.clone()), Ok(true));
        assert_eq!(cache.add(entry.clone()), Ok(false));
        assert_eq!(cache.filter_unsat().len(), 1);

        assert_eq!(cache.remove(&entry), Ok(true));
        assert_eq!(cache.remove(&entry), Ok(false));
        assert!(cache.filter_unsat().is_empty());
    }
}

mod selection {
    use super::*;

    #[test]
    fn smallest_by_default() {
        let cache = cache(1..=4);
        cache.add_sat(sat(&[(1, 14), (2, 15), (3, 16), (4, 17)], "large")).unwrap();
        cache.add_sat(sat(&[(1, 20), (2, 21)], "small")).unwrap();
        cache.add_sat(sat(&[(1, 30), (2, 31)], "twin")).unwrap();

        let proof = cache.prove_sat_by_superset(&Instance::from_stations([1])).unwrap();
        assert_eq!(proof.key(), Some("small"));
    }

    #[test]
    fn first_in_order() {
        let mut config = Config::default();
        config.tie_break.set(TieBreak::FirstInOrder).unwrap();
        let cache = SatisfiabilityCache::from_universe(1..=4, config).unwrap();

        // {1, 2} is less than {1, 2, 3} in bit-vector order.
        cache.add_sat(sat(&[(1, 14), (2, 15), (3, 16)], "large")).unwrap();
        cache.add_sat(sat(&[(1, 20), (2, 21)], "small")).unwrap();

        let proof = cache.prove_sat_by_superset(&Instance::from_stations([1])).unwrap();
        assert_eq!(proof.key(), Some("small"));

        cache.add_unsat(UnsatEntry::new([4], "high")).unwrap();
        cache.add_unsat(UnsatEntry::new([1, 2], "low")).unwrap();
        let proof = cache.prove_unsat_by_subset(&Instance::from_stations([1, 2, 4])).unwrap();
        assert_eq!(proof.key(), Some("low"));
    }

    #[test]
    fn excluding() {
        let cache = cache(1..=4);
        cache.add_sat(sat(&[(1, 14), (2, 15)], "A")).unwrap();
        cache.add_sat(sat(&[(1, 14), (2, 15), (3, 16)], "B")).unwrap();

        let instance = Instance::from_stations([1, 2]);
        let proof = cache.prove_sat_by_superset_excluding(&instance, |entry| entry.key() == "A").unwrap();
        assert_eq!(proof.key(), Some("B"));

        let proof = cache.prove_sat_by_superset_excluding(&instance, |_| true).unwrap();
        assert!(!proof.is_cached());
    }
}

mod lookups {
    use super::*;

    #[test]
    fn both_proofs() {
        let cache = cache(1..=4);
        cache.add_sat(sat(&[(1, 14), (2, 15)], "A")).unwrap();
        cache.add_unsat(UnsatEntry::new([3, 4], "B")).unwrap();

        let lookup = cache.lookup(&Instance::from_stations([2])).unwrap();
        assert_eq!(lookup.report(), Some(Report::Satisfiable));
        assert_eq!(
            lookup,
            Lookup::Satisfiable {
                assignment: Assignment::from([(2, 15)]),
                key: "A".to_string()
            }
        );

        let lookup = cache.lookup(&Instance::from_stations([1, 2, 3, 4])).unwrap();
        assert_eq!(lookup, Lookup::Unsatisfiable { key: "B".to_string() });

        let lookup = cache.lookup(&Instance::from_stations([1, 3])).unwrap();
        assert!(!lookup.is_cached());
        assert_eq!(lookup.key(), None);
    }

    #[test]
    fn guard_held_over_several_queries() {
        let cache = cache(1..=4);
        {
            let mut guard = cache.sat_index().write();
            guard.add(sat(&[(1, 14)], "A")).unwrap();
            guard.add(sat(&[(1, 14), (2, 15)], "B")).unwrap();
        }

        let guard = cache.sat_index().read();
        let query = BTreeSet::from([1]);
        let keys = guard.supersets(&query).unwrap().map(|entry| entry.key()).collect::<Vec<_>>();
        assert_eq!(keys, vec!["A", "B"]);

        // Reads are recursive.
        assert!(cache.prove_sat_by_superset(&Instance::from_stations([2])).unwrap().is_cached());
        assert_eq!(guard.count_supersets(&query), Ok(2));
    }
}

mod intersections {
    use super::*;

    #[test]
    fn most_agreement_first() {
        let cache = cache(1..=6);
        cache.add_sat(sat(&[(1, 14), (2, 15)], "two")).unwrap();
        cache.add_sat(sat(&[(1, 14), (2, 15), (3, 16)], "three")).unwrap();
        cache.add_sat(sat(&[(5, 14)], "none")).unwrap();
        cache.add_sat(sat(&[(1, 14), (2, 99), (3, 16)], "restricted")).unwrap();

        let instance = Instance::from_stations([1, 3]).with_domain(2, BTreeSet::from([15]));
        let found = cache.find_max_intersections(&instance, 3).unwrap();
        let keys = found.iter().map(|entry| entry.key()).collect::<Vec<_>>();
        assert_eq!(keys, vec!["three", "two", "restricted"]);

        assert!(cache.find_max_intersections(&instance, 0).unwrap().is_empty());
        assert_eq!(cache.find_max_intersections(&instance, 10).unwrap().len(), 4);
        assert!(cache.find_max_intersections(&Instance::from_stations([9]), 1).is_err());
    }

    #[test]
    fn limited_by_config() {
        let mut config = Config::default();
        config.intersection_limit.set(1).unwrap();
        let cache = SatisfiabilityCache::from_universe(1..=4, config).unwrap();

        cache.add_sat(sat(&[(1, 14)], "A")).unwrap();
        cache.add_sat(sat(&[(2, 14)], "B")).unwrap();

        let found = cache.find_max_intersections(&Instance::from_stations([1, 2]), 2).unwrap();
        assert_eq!(found.len(), 1);
    }
}

mod pruning {
    use super::*;

    #[test]
    fn pruning_keeps_proofs() {
        let cache = cache(1..=5);
        cache.add_sat(sat(&[(1, 14)], "a")).unwrap();
        cache.add_sat(sat(&[(1, 14), (2, 15)], "b")).unwrap();
        cache.add_sat(sat(&[(1, 14), (2, 15), (3, 16)], "c")).unwrap();
        cache.add_unsat(UnsatEntry::new([4], "x")).unwrap();
        cache.add_unsat(UnsatEntry::new([4, 5], "y")).unwrap();

        let instances = [
            Instance::from_stations([1]),
            Instance::from_stations([1, 2]),
            Instance::from_stations([4, 5]),
            Instance::from_stations([3, 4]),
        ];
        let before = instances
            .iter()
            .map(|instance| cache.lookup(instance).unwrap().report())
            .collect::<Vec<_>>();

        assert_eq!(cache.prune_sat().unwrap().len(), 2);
        assert_eq!(cache.prune_unsat().unwrap().len(), 1);

        let after = instances
            .iter()
            .map(|instance| cache.lookup(instance).unwrap().report())
            .collect::<Vec<_>>();
        assert_eq!(before, after);

        assert_eq!(cache.filter_sat().len(), 1);
        assert_eq!(cache.filter_unsat().len(), 1);
    }
}
