//! The mapping interface shared by `OpenAddressingMap` and `ChainingHashMap`

use crate::{ChainingHashMap, OpenAddressingMap, hash_functions::HashFunction};

/// Operations both map variants provide, so callers can be written once for either
pub trait HashMapInterface<V> {
    /// Creates an empty map with at least `capacity` buckets and the given hash function
    fn with_hash_function(capacity: usize, hash_function: HashFunction) -> Self
    where
        Self: Sized;

    /// Inserts or updates a key-value pair, returning the replaced value
    fn put(&mut self, key: String, value: V) -> Option<V>;

    /// Returns the value stored under `key`
    fn get(&self, key: &str) -> Option<&V>;

    /// Returns true if `key` is present
    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key`, returning its value; absent keys are ignored
    fn remove(&mut self, key: &str) -> Option<V>;

    /// Removes every entry without changing the capacity
    fn clear(&mut self);

    /// Returns the number of entries
    fn len(&self) -> usize;

    /// Returns true if there are no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of buckets
    fn capacity(&self) -> usize;

    /// Returns `len() / capacity()`
    fn table_load(&self) -> f64;

    /// Returns the number of buckets holding no entry
    fn empty_buckets(&self) -> usize;

    /// Rebuilds the table at a new prime capacity; invalid targets are ignored
    fn resize_table(&mut self, new_capacity: usize);

    /// Snapshot of every key-value pair, in no particular order
    fn keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone;
}

/// Forwards every trait method to the inherent method of the same name
macro_rules! forward_hash_map_interface {
    ($map:ident) => {
        impl<V> HashMapInterface<V> for $map<V> {
            fn with_hash_function(capacity: usize, hash_function: HashFunction) -> Self {
                Self::new(capacity, hash_function)
            }

            fn put(&mut self, key: String, value: V) -> Option<V> {
                $map::put(self, key, value)
            }

            fn get(&self, key: &str) -> Option<&V> {
                $map::get(self, key)
            }

            fn contains_key(&self, key: &str) -> bool {
                $map::contains_key(self, key)
            }

            fn remove(&mut self, key: &str) -> Option<V> {
                $map::remove(self, key)
            }

            fn clear(&mut self) {
                $map::clear(self);
            }

            fn len(&self) -> usize {
                $map::len(self)
            }

            fn capacity(&self) -> usize {
                $map::capacity(self)
            }

            fn table_load(&self) -> f64 {
                $map::table_load(self)
            }

            fn empty_buckets(&self) -> usize {
                $map::empty_buckets(self)
            }

            fn resize_table(&mut self, new_capacity: usize) {
                $map::resize_table(self, new_capacity);
            }

            fn keys_and_values(&self) -> Vec<(String, V)>
            where
                V: Clone,
            {
                $map::keys_and_values(self)
            }
        }
    };
}

forward_hash_map_interface!(OpenAddressingMap);
forward_hash_map_interface!(ChainingHashMap);

/// Creates a map of either kind from an iterator of key-value pairs
pub fn from_iter<M, V, I>(capacity: usize, hash_function: HashFunction, iter: I) -> M
where
    M: HashMapInterface<V>,
    I: IntoIterator<Item = (String, V)>,
{
    let mut map = M::with_hash_function(capacity, hash_function);

    for (key, value) in iter {
        map.put(key, value);
    }

    map
}
