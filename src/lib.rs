//! # Prime Hash Maps
//!
//! Two hash tables over a prime-sized bucket array, each with its own collision
//! resolution strategy:
//!
//! - `OpenAddressingMap`: quadratic probing, with tombstones marking removed slots
//! - `ChainingHashMap`: a linked collision list per bucket
//!
//! Both take the hash function as a plain `fn(&str) -> usize` at construction and
//! grow by rebuilding the whole table at the next prime past double the capacity.
//! The open addressing map grows once its load reaches 0.5, the chaining map at 1.0.
//!
//! ## Basic Usage
//!
//! ```rust
//! use primemap::{OpenAddressingMap, hash_function_1};
//!
//! // Capacity is rounded up to the next prime
//! let mut map = OpenAddressingMap::new(10, hash_function_1);
//! assert_eq!(map.capacity(), 11);
//!
//! // Insert values
//! map.put("apple".to_string(), 1);
//! map.put("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.put("apple".to_string(), 10);
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! assert_eq!(map.len(), 1);
//! ```
//!
//! ## Chaining
//!
//! ```rust
//! use primemap::{ChainingHashMap, HashMapInterface, hash_function_2};
//!
//! let mut map = ChainingHashMap::new(41, hash_function_2);
//! for i in 0..50 {
//!     map.put(format!("str{}", i / 3), i * 100);
//! }
//! assert_eq!(map.len(), 17);
//!
//! map.resize_table(60);
//! assert_eq!(map.capacity(), 61);
//! assert!((0..17).all(|i| map.contains_key(&format!("str{i}"))));
//!
//! // Both maps also implement the shared interface
//! fn load<M: HashMapInterface<i32>>(map: &M) -> f64 {
//!     map.table_load()
//! }
//! assert!(load(&map) < 1.0);
//! ```

/// Fixed-length bucket array both maps rebuild into
mod bucket_store;
/// Linked collision list for the chaining map
mod chain;
/// Module implementing a hash map with separate chaining
mod chaining;
/// Reference hash functions for string keys
mod hash_functions;
/// Frequency counting on top of the chaining map
mod mode;
/// Module implementing a hash map with quadratic probing
mod open_addressing;
/// Prime sizing of bucket arrays
mod prime;
/// The mapping interface shared by both maps
mod utils;

pub use chaining::{
    ChainingHashMap, DEFAULT_CAPACITY, Iter as ChainingIter,
    LOAD_FACTOR_THRESHOLD as CHAINING_LOAD_FACTOR_THRESHOLD,
};
pub use hash_functions::{HashFunction, hash_function_1, hash_function_2};
pub use mode::find_mode;
pub use open_addressing::{
    Iter as OpenAddressingIter, LOAD_FACTOR_THRESHOLD as OPEN_ADDRESSING_LOAD_FACTOR_THRESHOLD,
    OpenAddressingMap,
};
pub use prime::{is_prime, next_prime};
pub use utils::{HashMapInterface, from_iter};
