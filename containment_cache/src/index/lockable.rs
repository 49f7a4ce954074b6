/*!
An index behind a reader/writer lock.

[LockableIndex] serialises writers against readers, and allows any number of concurrent readers.

Single operations --- adds, removes, counts --- take the lock for the duration of the call.
Queries over entries come in two forms:
- `*_cloned` methods collect the answer under a read lock, and release the lock before returning.
- [read](LockableIndex::read) returns a guard, through which the lazy iterators of the index are available.
  An iterator borrows the guard, and so the lock is held until the iterator (and the guard) are dropped.

```rust
# use containment_cache::index::{lockable::LockableIndex, BitSetIndex, ContainmentIndex};
# use containment_cache::structures::permutation::Permutation;
# use std::collections::BTreeSet;
let permutation = Permutation::from_universe(1..=4_u32).unwrap();
let index = LockableIndex::new(BitSetIndex::<u32, BTreeSet<u32>>::from_permutation(permutation));

index.add(BTreeSet::from([1, 2])).unwrap();
index.add(BTreeSet::from([1])).unwrap();

{
    let guard = index.read();
    let smallest = guard.subsets(&BTreeSet::from([1, 2, 3])).unwrap().next();
    assert_eq!(smallest, Some(&BTreeSet::from([1])));
}

assert_eq!(index.supersets_cloned(&BTreeSet::from([1])).unwrap().len(), 2);
```

Read locks are taken recursively, so a thread holding a read guard may make further reads, even with a writer waiting.
The price is that readers do not queue behind writers, and a steady stream of overlapping reads may starve a writer.
A thread holding a read guard must not write.
*/

use parking_lot::{RwLock, RwLockReadGuard, RwLockUpgradableReadGuard, RwLockWriteGuard};

use crate::{index::ContainmentIndex, misc::log::targets, structures::entry::CacheEntry, types::err::ErrorKind};

/// Shared access to an index.
pub type ReadGuard<'a, I> = RwLockReadGuard<'a, I>;

/// Exclusive access to an index.
pub type WriteGuard<'a, I> = RwLockWriteGuard<'a, I>;

/// Shared access to an index, which may be upgraded to exclusive access.
pub type UpgradableGuard<'a, I> = RwLockUpgradableReadGuard<'a, I>;

/// An index guarded by a reader/writer lock.
#[derive(Debug)]
pub struct LockableIndex<I> {
    index: RwLock<I>,
}

impl<I: ContainmentIndex> LockableIndex<I> {
    pub fn new(index: I) -> Self {
        LockableIndex {
            index: RwLock::new(index),
        }
    }

    /// Shared access to the index, until the guard is dropped.
    ///
    /// The lock is taken recursively, ahead of any waiting writer, as are the read locks of the single operations.
    /// So, overlapping reads may starve writers, and guards should be short-lived.
    pub fn read(&self) -> ReadGuard<'_, I> {
        log::trace!(target: targets::LOCK, "Read lock");
        self.index.read_recursive()
    }

    /// Exclusive access to the index, until the guard is dropped.
    ///
    /// For batches of changes which should be seen together.
    pub fn write(&self) -> WriteGuard<'_, I> {
        log::trace!(target: targets::LOCK, "Write lock");
        self.index.write()
    }

    /// Shared access to the index, which may be upgraded to exclusive access.
    ///
    /// At most one upgradable guard is held at a time, though plain readers may hold the lock alongside.
    pub fn upgradable_read(&self) -> UpgradableGuard<'_, I> {
        log::trace!(target: targets::LOCK, "Upgradable read lock");
        self.index.upgradable_read()
    }

    pub fn add(&self, entry: I::Entry) -> Result<bool, ErrorKind> {
        self.write().add(entry)
    }

    pub fn remove(&self, entry: &I::Entry) -> Result<bool, ErrorKind> {
        self.write().remove(entry)
    }

    pub fn contains(&self, entry: &I::Entry) -> Result<bool, ErrorKind> {
        self.read().contains(entry)
    }

    pub fn count_subsets<Q>(&self, query: &Q) -> Result<usize, ErrorKind>
    where
        Q: CacheEntry<I::Element> + ?Sized,
    {
        self.read().count_subsets(query)
    }

    pub fn count_supersets<Q>(&self, query: &Q) -> Result<usize, ErrorKind>
    where
        Q: CacheEntry<I::Element> + ?Sized,
    {
        self.read().count_supersets(query)
    }

    pub fn size(&self) -> usize {
        self.read().size()
    }

    pub fn entry_count(&self) -> usize {
        self.read().entry_count()
    }

    /// The subsets of `query`, collected under a read lock.
    pub fn subsets_cloned<Q>(&self, query: &Q) -> Result<Vec<I::Entry>, ErrorKind>
    where
        Q: CacheEntry<I::Element> + ?Sized,
        I::Entry: Clone,
    {
        let guard = self.read();
        let subsets = guard.subsets(query)?.cloned().collect();
        Ok(subsets)
    }

    /// The supersets of `query`, collected under a read lock.
    pub fn supersets_cloned<Q>(&self, query: &Q) -> Result<Vec<I::Entry>, ErrorKind>
    where
        Q: CacheEntry<I::Element> + ?Sized,
        I::Entry: Clone,
    {
        let guard = self.read();
        let supersets = guard.supersets(query)?.cloned().collect();
        Ok(supersets)
    }

    /// Every entry, collected under a read lock.
    pub fn entries_cloned(&self) -> Vec<I::Entry>
    where
        I::Entry: Clone,
    {
        self.read().entries().cloned().collect()
    }

    pub fn into_inner(self) -> I {
        self.index.into_inner()
    }
}
