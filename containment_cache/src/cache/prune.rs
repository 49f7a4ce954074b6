//! Removal of entries made redundant by other entries.
//!
//! A SAT entry is redundant if some other SAT entry extends its witness, and an UNSAT entry is redundant if some other UNSAT entry is less restrictive.
//! In either case, every instance proven by the redundant entry is proven by the other.
//!
//! Entries are scanned in index order, and an entry is marked for removal only if some entry not already marked makes it redundant.
//! As redundancy is transitive, each marked entry then has an unmarked entry which makes it redundant, and so pruning never changes which instances the cache proves.
//! In particular, of two entries with the same witness (under different keys) exactly one is kept.
//!
//! The scan holds an upgradable read lock, so queries continue during a scan, and the lock is upgraded to remove the marked entries.

use std::{collections::HashSet, hash::Hash};

use parking_lot::RwLockUpgradableReadGuard;

use crate::{
    cache::SatisfiabilityCache,
    index::{BitSetIndex, ContainmentIndex, Direction},
    misc::log::targets,
    structures::{
        entry::{CacheEntry, SatEntry, UnsatEntry},
        station::Station,
    },
    types::err::ErrorKind,
};

impl SatisfiabilityCache {
    /// Removes each SAT entry whose witness is extended by another SAT entry, and returns the removed entries.
    pub fn prune_sat(&self) -> Result<Vec<SatEntry>, ErrorKind> {
        let guard = self.sat.upgradable_read();
        let redundant = redundant_entries(
            &*guard,
            Direction::Supersets,
            |other: &SatEntry, entry: &SatEntry| other.has_more_solving_power(entry),
            self.config.prune_report_interval.value,
        )?;

        if !redundant.is_empty() {
            let mut guard = RwLockUpgradableReadGuard::upgrade(guard);
            for entry in &redundant {
                guard.remove(entry)?;
            }
        }

        log::info!(target: targets::PRUNE, "Pruned {} SAT entries", redundant.len());
        Ok(redundant)
    }

    /// Removes each UNSAT entry for which another UNSAT entry is less restrictive, and returns the removed entries.
    pub fn prune_unsat(&self) -> Result<Vec<UnsatEntry>, ErrorKind> {
        let guard = self.unsat.upgradable_read();
        let redundant = redundant_entries(
            &*guard,
            Direction::Subsets,
            |other: &UnsatEntry, entry: &UnsatEntry| other.is_less_restrictive(entry),
            self.config.prune_report_interval.value,
        )?;

        if !redundant.is_empty() {
            let mut guard = RwLockUpgradableReadGuard::upgrade(guard);
            for entry in &redundant {
                guard.remove(entry)?;
            }
        }

        log::info!(target: targets::PRUNE, "Pruned {} UNSAT entries", redundant.len());
        Ok(redundant)
    }
}

/// The entries of `index` made redundant by some other entry, in index order.
///
/// `redundant_by(other, entry)` holds when `other` makes `entry` redundant, and `direction` is where such an `other` is found relative to `entry`.
fn redundant_entries<C, R>(
    index: &BitSetIndex<Station, C>,
    direction: Direction,
    redundant_by: R,
    report_interval: usize,
) -> Result<Vec<C>, ErrorKind>
where
    C: CacheEntry<Station> + Clone + Eq + Hash,
    R: Fn(&C, &C) -> bool,
{
    let total = index.entry_count();
    let report_interval = report_interval.max(1);
    let mut marked: HashSet<&C> = HashSet::default();

    for (scanned, entry) in index.entries().enumerate() {
        if scanned > 0 && scanned % report_interval == 0 {
            log::info!(target: targets::PRUNE, "Scanned {scanned} of {total} entries, {} redundant", marked.len());
        }

        let mut others = match direction {
            Direction::Subsets => index.subsets(entry)?,
            Direction::Supersets => index.supersets(entry)?,
        };

        if others.any(|other| !marked.contains(other) && redundant_by(other, entry)) {
            log::trace!(target: targets::PRUNE, "Redundant entry");
            marked.insert(entry);
        }
    }

    Ok(index.entries().filter(|entry| marked.contains(entry)).cloned().collect())
}
