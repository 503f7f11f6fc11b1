//! Fixed-length bucket array shared by both map variants

use std::slice;

/// A boxed slice of buckets, every bucket starting at its default value.
///
/// The store never changes length. Growing a map means building a new store
/// and swapping it in.
#[derive(Debug, Clone)]
pub(crate) struct BucketStore<T> {
    /// The bucket slots
    items: Box<[T]>,
}

impl<T: Default> BucketStore<T> {
    /// Creates a store of `capacity` default-initialized buckets
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let items = std::iter::repeat_with(T::default).take(capacity).collect();
        Self { items }
    }

    /// Resets every bucket to its default value, keeping the length
    pub(crate) fn reset(&mut self) {
        for item in &mut self.items {
            *item = T::default();
        }
    }
}

impl<T> BucketStore<T> {
    /// Number of buckets
    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }

    /// Bucket at `index`, if in range
    pub(crate) fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Mutable bucket at `index`, if in range
    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Buckets in index order
    pub(crate) fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Borrows the buckets as a slice, for iterators that outlive a method call
    pub(crate) fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> IntoIterator for BucketStore<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_vec().into_iter()
    }
}
