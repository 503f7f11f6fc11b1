//! Singly linked collision list used as a chaining bucket

use std::fmt;

/// A node of the collision list
struct Node<V> {
    /// The key stored in the node
    key: String,
    /// The value associated with the key
    value: V,
    /// The following node in the same bucket
    next: Option<Box<Self>>,
}

// Prints only the node's own pair; following nodes are not visited
impl<V: fmt::Debug> fmt::Debug for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node").field("key", &self.key).field("value", &self.value).finish_non_exhaustive()
    }
}

/// The collision list of one bucket, in insertion order
pub(crate) struct Chain<V> {
    /// First node, if any
    head: Option<Box<Node<V>>>,
    /// Number of nodes
    len: usize,
}

impl<V> Default for Chain<V> {
    fn default() -> Self {
        Self { head: None, len: 0 }
    }
}

impl<V: Clone> Clone for Chain<V> {
    fn clone(&self) -> Self {
        let mut cloned = Self::default();
        let mut tail = &mut cloned.head;
        for (key, value) in self.iter() {
            let node = tail.insert(Box::new(Node { key: key.to_owned(), value: value.clone(), next: None }));
            tail = &mut node.next;
        }
        cloned.len = self.len;
        cloned
    }
}

impl<V: fmt::Debug> fmt::Debug for Chain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<V> Chain<V> {
    /// Number of nodes in the list
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list has no nodes
    pub(crate) fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Value stored under `key`
    pub(crate) fn get(&self, key: &str) -> Option<&V> {
        self.iter().find(|&(node_key, _)| node_key == key).map(|(_, value)| value)
    }

    /// Mutable value stored under `key`
    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let mut cursor = self.head.as_deref_mut();
        while let Some(node) = cursor {
            if node.key == key {
                return Some(&mut node.value);
            }
            cursor = node.next.as_deref_mut();
        }
        None
    }

    /// Appends a node for a key known to be absent from the list
    pub(crate) fn push_back(&mut self, key: String, value: V) {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node { key, value, next: None }));
        self.len = self.len.saturating_add(1);
    }

    /// Unlinks the node holding `key` and returns its value
    pub(crate) fn remove(&mut self, key: &str) -> Option<V> {
        let mut cursor = &mut self.head;
        while cursor.as_ref().is_some_and(|node| node.key != key) {
            cursor = &mut cursor.as_mut()?.next;
        }

        let removed = *cursor.take()?;
        *cursor = removed.next;
        self.len = self.len.saturating_sub(1);
        Some(removed.value)
    }

    /// Iterates the nodes from head to tail
    pub(crate) fn iter(&self) -> ChainIter<'_, V> {
        ChainIter { next: self.head.as_deref() }
    }
}

impl<V> IntoIterator for Chain<V> {
    type Item = (String, V);
    type IntoIter = ChainIntoIter<V>;

    fn into_iter(mut self) -> Self::IntoIter {
        ChainIntoIter { next: self.head.take() }
    }
}

impl<V: fmt::Display> fmt::Display for Chain<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.iter() {
            write!(f, "-> ({key}: {value}) ")?;
        }
        Ok(())
    }
}

/// Borrowing iterator over a [`Chain`]
#[derive(Debug, Clone)]
pub(crate) struct ChainIter<'a, V> {
    /// Node yielded next
    next: Option<&'a Node<V>>,
}

impl<'a, V> Iterator for ChainIter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next.as_deref();
        Some((node.key.as_str(), &node.value))
    }
}

/// Consuming iterator over a [`Chain`]
#[derive(Debug)]
pub(crate) struct ChainIntoIter<V> {
    /// Node yielded next
    next: Option<Box<Node<V>>>,
}

impl<V> Iterator for ChainIntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = *self.next.take()?;
        self.next = node.next;
        Some((node.key, node.value))
    }
}

/// Unlinks nodes one at a time so long chains do not recurse on drop
fn unlink_all<V>(head: Option<Box<Node<V>>>) {
    let mut cursor = head;
    while let Some(mut node) = cursor {
        cursor = node.next.take();
    }
}

impl<V> Drop for Chain<V> {
    fn drop(&mut self) {
        unlink_all(self.head.take());
    }
}

impl<V> Drop for ChainIntoIter<V> {
    fn drop(&mut self) {
        unlink_all(self.next.take());
    }
}
