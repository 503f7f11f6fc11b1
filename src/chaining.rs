use std::{fmt, mem, slice};

use log::{debug, trace};

use crate::{
    bucket_store::BucketStore,
    chain::{Chain, ChainIter},
    hash_functions::{HashFunction, hash_function_1},
    prime::next_prime,
};

/// Table load at or above which `put` doubles the capacity before inserting
pub const LOAD_FACTOR_THRESHOLD: f64 = 1.0;

/// Capacity used by [`ChainingHashMap::default`]
pub const DEFAULT_CAPACITY: usize = 11;

/// A hash map resolving collisions with a linked list per bucket.
///
/// Removal unlinks the node, so there are no tombstones. The bucket count is
/// always prime.
///
/// Note: This implementation has no internal locking; concurrent mutation requires
/// external synchronization.
#[derive(Debug, Clone)]
pub struct ChainingHashMap<V> {
    /// One collision list per bucket
    buckets: BucketStore<Chain<V>>,
    /// Number of entries across all lists
    size: usize,
    /// Maps a key to its bucket before reduction modulo the capacity
    hash_function: HashFunction,
}

impl<V> Default for ChainingHashMap<V> {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, hash_function_1)
    }
}

impl<V> Extend<(String, V)> for ChainingHashMap<V> {
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<V> ChainingHashMap<V> {
    /// Creates an empty map with at least `capacity` buckets, rounded up to a prime
    #[must_use]
    pub fn new(capacity: usize, hash_function: HashFunction) -> Self {
        let capacity = next_prime(capacity);
        Self { buckets: BucketStore::with_capacity(capacity), size: 0, hash_function }
    }

    /// Index of the bucket `key` belongs to
    fn bucket_index(&self, key: &str) -> usize {
        (self.hash_function)(key).checked_rem(self.buckets.len()).unwrap_or_default()
    }

    /// Collision list `key` belongs to
    fn bucket(&self, key: &str) -> Option<&Chain<V>> {
        self.buckets.get(self.bucket_index(key))
    }

    /// Inserts or updates a key-value pair, returning the value it replaced.
    ///
    /// A table at or above [`LOAD_FACTOR_THRESHOLD`] doubles before the key is
    /// looked up. New keys go to the tail of their bucket's list.
    pub fn put(&mut self, key: String, value: V) -> Option<V> {
        if self.table_load() >= LOAD_FACTOR_THRESHOLD {
            self.resize_table(self.capacity().saturating_mul(2));
        }

        let index = self.bucket_index(&key);
        let bucket = self.buckets.get_mut(index)?;

        if let Some(existing) = bucket.get_mut(&key) {
            return Some(mem::replace(existing, value));
        }

        bucket.push_back(key, value);
        self.size = self.size.saturating_add(1);
        None
    }

    /// Retrieve a value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.bucket(key)?.get(key)
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.bucket_index(key);
        self.buckets.get_mut(index)?.get_mut(key)
    }

    /// Returns true if the map contains the given key
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Unlinks the node holding `key` and returns its value.
    ///
    /// Removing an absent key does nothing.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.bucket_index(key);
        let removed = self.buckets.get_mut(index)?.remove(key)?;
        self.size = self.size.saturating_sub(1);
        Some(removed)
    }

    /// Rebuilds the table with at least `new_capacity` buckets, rounded up to a prime.
    ///
    /// Entries are re-put bucket by bucket, in list order, into a fresh table that
    /// is then swapped in.
    pub fn resize_table(&mut self, new_capacity: usize) {
        // Unlike `OpenAddressingMap`, which declines anything at or below its live
        // count, only a zero capacity is declined here, so a request below `len()`
        // goes through and the re-puts grow the table again. The two policies
        // disagree and both are kept as is.
        if new_capacity < 1 {
            trace!("declined resize to {new_capacity} buckets");
            return;
        }

        let old_capacity = self.capacity();
        let mut rebuilt = Self::new(new_capacity, self.hash_function);

        for chain in mem::replace(&mut self.buckets, BucketStore::with_capacity(0)) {
            for (key, value) in chain {
                rebuilt.put(key, value);
            }
        }

        debug!(
            "rebuilt chaining table: {old_capacity} -> {} buckets, {} entries",
            rebuilt.capacity(),
            rebuilt.size
        );
        *self = rebuilt;
    }

    /// Replaces every list with an empty one, keeping the current capacity
    pub fn clear(&mut self) {
        self.buckets.reset();
        self.size = 0;
    }

    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets
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

    /// Returns the number of buckets whose list is empty
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|chain| chain.is_empty()).count()
    }

    /// Length of the longest collision list
    #[must_use]
    pub fn longest_chain(&self) -> usize {
        self.buckets.iter().map(Chain::len).max().unwrap_or_default()
    }

    /// Returns an iterator over the key-value pairs, bucket by bucket
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: self.buckets.iter(), chain: None }
    }

    /// Snapshot of every key-value pair, in no particular order
    #[must_use]
    pub fn keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.iter().map(|(key, value)| (key.to_owned(), value.clone())).collect()
    }
}

impl<V: fmt::Display> fmt::Display for ChainingHashMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, chain) in self.buckets.iter().enumerate() {
            writeln!(f, "{index}: {chain}")?;
        }
        Ok(())
    }
}

/// Iterator over the key-value pairs of a [`ChainingHashMap`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Buckets not yet visited
    buckets: slice::Iter<'a, Chain<V>>,
    /// Position inside the bucket being visited
    chain: Option<ChainIter<'a, V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.chain.as_mut().and_then(Iterator::next) {
                return Some(item);
            }
            self.chain = Some(self.buckets.next()?.iter());
        }
    }
}

impl<'a, V> IntoIterator for &'a ChainingHashMap<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hash_functions::hash_function_2, prime::is_prime};

    #[test]
    fn test_default() {
        let map: ChainingHashMap<i32> = ChainingHashMap::default();
        assert_eq!(map.capacity(), DEFAULT_CAPACITY);
        assert!(map.is_empty());
        assert_eq!(map.empty_buckets(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_put_get_update() {
        let mut map = ChainingHashMap::new(31, hash_function_1);
        assert_eq!(map.get("key"), None);
        assert_eq!(map.put("key1".to_string(), 10), None);
        assert_eq!(map.put("key1".to_string(), 30), Some(10));

        assert_eq!(map.get("key1"), Some(&30));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_colliding_keys_share_a_bucket() {
        let mut map = ChainingHashMap::new(7, hash_function_1);
        // Anagrams collide under hash_function_1
        map.put("abc".to_string(), 1);
        map.put("bca".to_string(), 2);
        map.put("cab".to_string(), 3);

        assert_eq!(map.len(), 3);
        assert_eq!(map.empty_buckets(), 6);
        assert_eq!(map.longest_chain(), 3);
        assert_eq!(map.get("bca"), Some(&2));

        assert_eq!(map.remove("bca"), Some(2));
        assert_eq!(map.get("abc"), Some(&1));
        assert_eq!(map.get("cab"), Some(&3));
        assert_eq!(map.longest_chain(), 2);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut map = ChainingHashMap::new(53, hash_function_1);
        map.put("key1".to_string(), 10);
        map.put("key2".to_string(), 20);

        assert_eq!(map.remove("key1"), Some(10));
        assert_eq!(map.remove("key1"), None);
        assert_eq!(map.remove("key4"), None);
        assert_eq!(map.len(), 1);
        assert!(!map.contains_key("key1"));
        assert!(map.contains_key("key2"));
    }

    #[test]
    fn test_empty_buckets() {
        let mut map = ChainingHashMap::new(101, hash_function_1);
        assert_eq!(map.empty_buckets(), 101);
        map.put("key1".to_string(), 10);
        assert_eq!(map.empty_buckets(), 100);
        map.put("key2".to_string(), 20);
        assert_eq!(map.empty_buckets(), 99);
        map.put("key1".to_string(), 30);
        assert_eq!(map.empty_buckets(), 99);
        map.put("key4".to_string(), 40);
        assert_eq!(map.empty_buckets(), 98);
    }

    #[test]
    fn test_automatic_growth() {
        let mut map = ChainingHashMap::new(53, hash_function_1);
        for i in 0..150 {
            map.put(format!("str{i}"), i * 100);
        }

        assert_eq!(map.len(), 150);
        assert_eq!(map.capacity(), 223);
        assert!(is_prime(map.capacity()));
        assert!(map.len() - 1 < map.capacity());
        for i in 0..150 {
            assert_eq!(map.get(&format!("str{i}")), Some(&(i * 100)));
        }
    }

    #[test]
    fn test_colliding_inserts_then_resize() {
        let mut map = ChainingHashMap::new(41, hash_function_2);
        for i in 0..50 {
            map.put(format!("str{}", i / 3), i * 100);
        }
        assert_eq!(map.len(), 17);
        assert_eq!(map.capacity(), 41);

        map.resize_table(60);

        assert_eq!(map.capacity(), 61);
        assert_eq!(map.len(), 17);
        for key in 0..17 {
            assert!(map.contains_key(&format!("str{key}")));
        }
        assert!(!map.contains_key("str17"));
        assert!(!map.contains_key("str99"));
        assert_eq!(map.get("str16"), Some(&4900));
        assert_eq!(map.get("str0"), Some(&200));
    }

    #[test]
    fn test_colliding_inserts_grow_automatically() {
        let mut map = ChainingHashMap::new(5, hash_function_2);
        for i in 0..50 {
            map.put(format!("str{}", i / 3), i * 100);
        }

        assert_eq!(map.len(), 17);
        assert_eq!(map.capacity(), 23);
        assert!(map.table_load() < 1.0);
        for key in 0..17 {
            assert!(map.contains_key(&format!("str{key}")));
        }
        assert!(!map.contains_key("str17"));
        assert_eq!(map.get("str16"), Some(&4900));
    }

    #[test]
    fn test_single_bucket_map_clones_and_formats() {
        fn constant_hash(_key: &str) -> usize {
            0
        }

        let mut map = ChainingHashMap::new(3, constant_hash);
        for i in 0..2_000 {
            map.put(i.to_string(), i);
        }
        assert_eq!(map.longest_chain(), 2_000);

        let cloned = map.clone();
        assert_eq!(cloned.len(), 2_000);
        assert_eq!(cloned.get("1999"), Some(&1_999));
        assert!(format!("{cloned:?}").contains("(\"1999\", 1999)"));
    }

    #[test]
    fn test_resize_below_size_regrows() {
        let mut map = ChainingHashMap::new(11, hash_function_2);
        for i in 1..6 {
            map.put(i.to_string(), (i * 10).to_string());
        }
        map.put("20".to_string(), "200".to_string());
        map.remove("1");

        // Three buckets fill up after three re-puts, so the rebuild grows to 7
        map.resize_table(2);

        assert_eq!(map.capacity(), 7);
        assert_eq!(map.len(), 5);
        let mut pairs = map.keys_and_values();
        pairs.sort();
        let keys: Vec<&str> = pairs.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, vec!["2", "20", "3", "4", "5"]);
    }

    #[test]
    fn test_resize_to_zero_is_declined() {
        let mut map = ChainingHashMap::new(20, hash_function_1);
        map.put("key1".to_string(), 10);

        map.resize_table(0);
        assert_eq!(map.capacity(), 23);

        map.resize_table(30);
        assert_eq!(map.capacity(), 31);
        assert_eq!(map.get("key1"), Some(&10));
    }

    #[test]
    fn test_clear() {
        let mut map = ChainingHashMap::new(53, hash_function_1);
        map.put("key1".to_string(), 10);
        map.put("key2".to_string(), 20);
        map.resize_table(100);
        assert_eq!(map.capacity(), 101);

        map.clear();

        assert_eq!(map.len(), 0);
        assert_eq!(map.capacity(), 101);
        assert_eq!(map.empty_buckets(), 101);
        assert_eq!(map.get("key2"), None);
    }

    #[test]
    fn test_iter_visits_buckets_in_order() {
        let mut map = ChainingHashMap::new(11, hash_function_1);
        for key in ["3", "1", "2"] {
            map.put(key.to_string(), key.len());
        }
        // Single characters land on consecutive buckets
        let keys: Vec<&str> = map.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["1", "2", "3"]);
        assert_eq!((&map).into_iter().count(), 3);
    }

    #[test]
    fn test_get_mut() {
        let mut map = ChainingHashMap::new(11, hash_function_1);
        map.put("key1".to_string(), 1);

        if let Some(value) = map.get_mut("key1") {
            *value += 10;
        }

        assert_eq!(map.get("key1"), Some(&11));
        assert_eq!(map.get_mut("key2"), None);
    }

    #[test]
    fn test_display() {
        let mut map = ChainingHashMap::new(7, hash_function_1);
        map.put("abc".to_string(), 1);
        map.put("cba".to_string(), 2);

        let dump = map.to_string();

        // 'a' + 'b' + 'c' = 294 = 7 * 42
        assert_eq!(dump.lines().count(), 7);
        assert!(dump.contains("0: -> (abc: 1) -> (cba: 2)"));
        assert!(dump.contains("1: \n"));
    }
}
