use std::{fmt, mem};

use log::{debug, trace};

use crate::{bucket_store::BucketStore, hash_functions::HashFunction, prime::next_prime};

/// Table load at or above which `put` doubles the capacity before inserting
pub const LOAD_FACTOR_THRESHOLD: f64 = 0.5;

/// A live key-value pair
#[derive(Debug, Clone)]
struct Entry<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: V,
}

/// A single bucket of the table
#[derive(Debug, Clone)]
enum Slot<V> {
    /// Never used since the bucket store was built; ends every probe sequence
    Empty,
    /// Holds a live entry
    Live(Entry<V>),
    /// Removed entry. Probing continues past it and a `put` of the same key revives it
    Tombstone(String),
}

// Derived `Default` would require `V: Default`
#[allow(clippy::derivable_impls)]
impl<V> Default for Slot<V> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<V: fmt::Display> fmt::Display for Slot<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "None"),
            Self::Live(entry) => write!(f, "K: {} V: {} TS: False", entry.key, entry.value),
            Self::Tombstone(key) => write!(f, "K: {key} TS: True"),
        }
    }
}

/// Outcome of walking the probe sequence for an insertion
enum Insertion<V> {
    /// Stored in an empty slot or in the tombstone left by the same key
    Inserted,
    /// The key was live; holds the value it replaced
    Updated(V),
    /// Every probed slot was taken by other keys; the pair is handed back
    Exhausted(String, V),
}

/// Quadratic probe indices `(primary + i^2) mod capacity` for `i` in `0..capacity`
///
/// Consecutive squares differ by `2i + 1`, so the walk only ever adds values
/// already reduced modulo the capacity.
#[derive(Debug, Clone)]
struct QuadraticProbe {
    /// Index yielded next
    index: usize,
    /// Distance to the index after that
    step: usize,
    /// Number of buckets in the table
    capacity: usize,
    /// Indices left to yield
    remaining: usize,
}

impl QuadraticProbe {
    /// Starts a probe sequence at `primary`, which must be below `capacity`
    fn new(primary: usize, capacity: usize) -> Self {
        Self { index: primary, step: 1, capacity, remaining: capacity }
    }
}

impl Iterator for QuadraticProbe {
    type Item = usize;

    #[allow(clippy::arithmetic_side_effects)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let current = self.index;
        // `index` and `step` both stay below `capacity`, which is non-zero here
        self.index = (self.index + self.step) % self.capacity;
        self.step = (self.step + 2) % self.capacity;
        Some(current)
    }
}

/// A hash map resolving collisions by quadratic probing over a prime-sized table.
///
/// Removal leaves a tombstone so that probe sequences running through the slot stay
/// intact. Tombstones are only cleared when the table is rebuilt by `resize_table`.
///
/// Note: This implementation has no internal locking; concurrent mutation requires
/// external synchronization.
#[derive(Debug, Clone)]
pub struct OpenAddressingMap<V> {
    /// The slots, length always prime
    buckets: BucketStore<Slot<V>>,
    /// Number of live entries
    size: usize,
    /// Maps a key to its primary index before reduction modulo the capacity
    hash_function: HashFunction,
}

impl<V> Extend<(String, V)> for OpenAddressingMap<V> {
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<V> OpenAddressingMap<V> {
    /// Creates an empty map with at least `capacity` slots, rounded up to a prime
    #[must_use]
    pub fn new(capacity: usize, hash_function: HashFunction) -> Self {
        let capacity = next_prime(capacity);
        Self { buckets: BucketStore::with_capacity(capacity), size: 0, hash_function }
    }

    /// Primary index of `key` in the current table
    fn primary_index(&self, key: &str) -> usize {
        (self.hash_function)(key).checked_rem(self.buckets.len()).unwrap_or_default()
    }

    /// Inserts or updates a key-value pair, returning the value it replaced.
    ///
    /// Growth is decided before the new entry is counted: a table at or above
    /// [`LOAD_FACTOR_THRESHOLD`] doubles first.
    pub fn put(&mut self, key: String, value: V) -> Option<V> {
        if self.table_load() >= LOAD_FACTOR_THRESHOLD {
            self.resize_table(self.capacity().saturating_mul(2));
        }

        match self.insert_probed(key, value) {
            Insertion::Inserted => None,
            Insertion::Updated(previous) => Some(previous),
            Insertion::Exhausted(key, value) => {
                // Tombstones filled the probe sequence; a rebuild discards them
                debug!(
                    "probe sequence exhausted for key {key:?} at capacity {}, growing",
                    self.capacity()
                );
                self.resize_table(self.capacity().saturating_mul(2));
                self.put(key, value)
            }
        }
    }

    /// Walks the probe sequence of `key` and stores the pair in the first usable slot
    fn insert_probed(&mut self, key: String, value: V) -> Insertion<V> {
        let probe = QuadraticProbe::new(self.primary_index(&key), self.buckets.len());

        for index in probe {
            let Some(slot) = self.buckets.get_mut(index) else {
                break;
            };

            match slot {
                Slot::Live(entry) if entry.key == key => {
                    return Insertion::Updated(mem::replace(&mut entry.value, value));
                }
                Slot::Live(_) => {}
                Slot::Tombstone(buried) if *buried != key => {}
                Slot::Empty | Slot::Tombstone(_) => {
                    *slot = Slot::Live(Entry { key, value });
                    self.size = self.size.saturating_add(1);
                    return Insertion::Inserted;
                }
            }
        }

        Insertion::Exhausted(key, value)
    }

    /// Index of the live slot holding `key`.
    ///
    /// Only an empty slot ends the walk early; tombstones and other keys are skipped.
    fn find_index(&self, key: &str) -> Option<usize> {
        let probe = QuadraticProbe::new(self.primary_index(key), self.buckets.len());

        for index in probe {
            match self.buckets.get(index)? {
                Slot::Empty => return None,
                Slot::Live(entry) if entry.key == key => return Some(index),
                Slot::Live(_) | Slot::Tombstone(_) => {}
            }
        }

        None
    }

    /// Retrieve a value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        match self.buckets.get(self.find_index(key)?)? {
            Slot::Live(entry) => Some(&entry.value),
            Slot::Empty | Slot::Tombstone(_) => None,
        }
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.find_index(key)?;
        match self.buckets.get_mut(index)? {
            Slot::Live(entry) => Some(&mut entry.value),
            Slot::Empty | Slot::Tombstone(_) => None,
        }
    }

    /// Returns true if the map holds a live entry for `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.find_index(key).is_some()
    }

    /// Turns the slot holding `key` into a tombstone and returns its value.
    ///
    /// Removing an absent key does nothing.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.find_index(key)?;
        let slot = self.buckets.get_mut(index)?;

        match mem::take(slot) {
            Slot::Live(entry) => {
                *slot = Slot::Tombstone(entry.key);
                self.size = self.size.saturating_sub(1);
                Some(entry.value)
            }
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Rebuilds the table with at least `new_capacity` slots, rounded up to a prime.
    ///
    /// Requests that would not leave room beyond the live entries
    /// (`new_capacity <= len()`) are ignored. Live entries are re-put in slot order
    /// into a fresh table, which is then swapped in; tombstones are dropped.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity <= self.size {
            trace!("declined resize to {new_capacity} with {} live entries", self.size);
            return;
        }

        let old_capacity = self.capacity();
        let mut rebuilt = Self::new(new_capacity, self.hash_function);

        for slot in mem::replace(&mut self.buckets, BucketStore::with_capacity(0)) {
            if let Slot::Live(entry) = slot {
                rebuilt.put(entry.key, entry.value);
            }
        }

        debug!(
            "rebuilt open addressing table: {old_capacity} -> {} slots, {} live entries",
            rebuilt.capacity(),
            rebuilt.size
        );
        *self = rebuilt;
    }

    /// Empties every slot, keeping the current capacity
    pub fn clear(&mut self) {
        self.buckets.reset();
        self.size = 0;
    }

    /// Returns the number of live entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map has no live entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `len() / capacity()`
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Returns the number of slots without a live entry, tombstones included
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.capacity().saturating_sub(self.size)
    }

    /// Returns an iterator over the live key-value pairs in slot order
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { slots: self.buckets.as_slice(), index: 0 }
    }

    /// Snapshot of every live key-value pair, in no particular order
    #[must_use]
    pub fn keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.iter().map(|(key, value)| (key.to_owned(), value.clone())).collect()
    }
}

impl<V: fmt::Display> fmt::Display for OpenAddressingMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, slot) in self.buckets.iter().enumerate() {
            writeln!(f, "{index}: {slot}")?;
        }
        Ok(())
    }
}

/// Iterator over the live key-value pairs of an [`OpenAddressingMap`]
///
/// Holds its own cursor, so several iterators over one map can coexist.
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// The slots of the map being iterated
    slots: &'a [Slot<V>],
    /// Current position in the iteration
    index: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.get(self.index) {
            self.index = self.index.saturating_add(1);
            if let Slot::Live(entry) = slot {
                return Some((entry.key.as_str(), &entry.value));
            }
        }
        None
    }
}

impl<'a, V> IntoIterator for &'a OpenAddressingMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
