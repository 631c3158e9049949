//! Copy-on-write keyed store backing the registries.
//!
//! Readers clone an `Arc` to the current map and never observe a partially
//! applied write. Writers serialize on a mutex, build the next map off to the
//! side, and take the write lock only to swap the pointer.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

type Entries<V> = BTreeMap<String, Arc<V>>;

/// A keyed map with replace-on-write semantics and snapshot reads.
pub struct SnapshotMap<V> {
    current: RwLock<Arc<Entries<V>>>,
    writer: Mutex<()>,
}

impl<V> SnapshotMap<V> {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(BTreeMap::new())),
            writer: Mutex::new(()),
        }
    }

    /// The map as of this instant.
    pub fn snapshot(&self) -> Snapshot<V> {
        Snapshot {
            entries: Arc::clone(&self.current.read()),
        }
    }

    pub fn get(&self, key: &str) -> Option<Arc<V>> {
        self.snapshot().entries.get(key).cloned()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.snapshot().entries.contains_key(key)
    }

    /// Insert or replace `value` under `key`, returning the previous value.
    pub fn insert(&self, key: String, value: V) -> Option<Arc<V>> {
        let _writer = self.writer.lock();

        let mut next = (*self.snapshot().entries).clone();
        let previous = next.insert(key, Arc::new(value));

        *self.current.write() = Arc::new(next);
        previous
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}

impl<V> Default for SnapshotMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable view of a registry at one instant.
///
/// Iteration is in key order and may be repeated; later writes to the
/// registry are not reflected.
pub struct Snapshot<V> {
    entries: Arc<Entries<V>>,
}

impl<V> Snapshot<V> {
    pub fn iter(&self) -> SnapshotIter<'_, V> {
        SnapshotIter {
            inner: self.entries.values(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key).map(Arc::as_ref)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Clone for Snapshot<V> {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for Snapshot<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, V> IntoIterator for &'a Snapshot<V> {
    type Item = &'a V;
    type IntoIter = SnapshotIter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the values of a [`Snapshot`].
pub struct SnapshotIter<'a, V> {
    inner: btree_map::Values<'a, String, Arc<V>>,
}

impl<'a, V> Iterator for SnapshotIter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(Arc::as_ref)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for SnapshotIter<'_, V> {}
