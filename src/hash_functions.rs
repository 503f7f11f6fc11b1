//! Reference hash functions for string keys

/// Signature of the hash capability injected into both maps.
///
/// Must be pure: the same key always hashes to the same value.
pub type HashFunction = fn(&str) -> usize;

/// Sums the scalar values of the key's characters.
///
/// Anagrams collide, which makes this a good stress input for probing.
#[must_use]
pub fn hash_function_1(key: &str) -> usize {
    key.chars().fold(0usize, |hash, letter| hash.wrapping_add(letter as usize))
}

/// Sums `(position + 1) * scalar` over the key's characters.
#[must_use]
pub fn hash_function_2(key: &str) -> usize {
    key.chars().zip(1usize..).fold(0usize, |hash, (letter, weight)| {
        hash.wrapping_add(weight.wrapping_mul(letter as usize))
    })
}
