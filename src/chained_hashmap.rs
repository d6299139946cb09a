use std::mem;

use crate::hashing::{HashFn, additive_hash};
use crate::prime::{is_prime, next_prime};

/// Requested capacity used by `new` before prime rounding.
const DEFAULT_CAPACITY: usize = 11;

/// A node in a bucket's chain, owning the link to its successor.
#[derive(Debug, Clone)]
struct ChainNode<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: V,
    /// The next node in the chain, if any
    next: Option<Box<ChainNode<V>>>,
}

/// A singly linked list of the entries hashing to one bucket.
///
/// Every bucket holds a list; an empty bucket is an empty list, never an
/// absent one.
#[derive(Debug, Clone)]
struct ChainList<V> {
    /// The first node of the chain, if any
    head: Option<Box<ChainNode<V>>>,
}

impl<V> ChainList<V> {
    /// Creates an empty chain.
    const fn new() -> Self {
        Self { head: None }
    }

    /// Returns true if the chain holds no nodes.
    fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Walks the chain for the node holding `key`.
    fn find(&self, key: &str) -> Option<&ChainNode<V>> {
        let mut cursor = self.head.as_deref();
        while let Some(node) = cursor {
            if node.key == key {
                return Some(node);
            }
            cursor = node.next.as_deref();
        }
        None
    }

    /// Walks the chain for a mutable reference to the value stored for `key`.
    fn find_mut(&mut self, key: &str) -> Option<&mut V> {
        let mut cursor = self.head.as_deref_mut();
        while let Some(node) = cursor {
            if node.key == key {
                return Some(&mut node.value);
            }
            cursor = node.next.as_deref_mut();
        }
        None
    }

    /// Prepends a new node to the chain.
    fn push_front(&mut self, key: String, value: V) {
        let next = self.head.take();
        self.head = Some(Box::new(ChainNode { key, value, next }));
    }

    /// Unlinks the node holding `key`, returning its value.
    fn remove(&mut self, key: &str) -> Option<V> {
        let mut cursor = &mut self.head;
        loop {
            match cursor {
                None => return None,
                Some(node) if node.key == key => {
                    let mut removed = cursor.take()?;
                    *cursor = removed.next.take();
                    return Some(removed.value);
                }
                Some(node) => cursor = &mut node.next,
            }
        }
    }
}

/// A hash map using separate chaining.
///
/// Every bucket owns an independent singly linked list of entries; colliding
/// keys simply share a chain. The capacity is always an odd prime, spreading
/// chains evenly under modular reduction. Unlike [`ProbingHashMap`], no load
/// factor policy is applied automatically — the capacity only changes through
/// an explicit [`resize`](Self::resize), and chains absorb any load.
///
/// Note: This implementation is not thread-safe.
///
/// [`ProbingHashMap`]: crate::ProbingHashMap
#[derive(Debug, Clone)]
pub struct ChainedHashMap<V> {
    /// One chain per bucket; length is always the prime capacity.
    buckets: Vec<ChainList<V>>,
    /// Number of entries across all chains.
    size: usize,
    /// Hash function applied to keys before reduction modulo capacity.
    hash_function: HashFn,
}

impl<V> Default for ChainedHashMap<V>
where
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Extend<(String, V)> for ChainedHashMap<V>
where
    V: Clone,
{
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<V> ChainedHashMap<V>
where
    V: Clone,
{
    /// Creates a new `ChainedHashMap` with the default capacity and the
    /// additive hash function.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, additive_hash)
    }

    /// Creates a new `ChainedHashMap` with the default capacity and the given
    /// hash function.
    #[must_use]
    pub fn with_hasher(hash_function: HashFn) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hash_function)
    }

    /// Creates a new `ChainedHashMap` with the given capacity and hash
    /// function. The capacity is rounded up to the next odd prime.
    #[must_use]
    pub fn with_capacity_and_hasher(capacity: usize, hash_function: HashFn) -> Self {
        let capacity = next_prime(capacity);
        Self { buckets: vec![ChainList::new(); capacity], size: 0, hash_function }
    }

    /// Maps a key to its bucket under the current capacity.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn bucket_index(&self, key: &str) -> usize {
        let hash = (self.hash_function)(key);
        (hash % self.buckets.len() as u64) as usize
    }

    /// Inserts a key-value pair, returning the previous value if the key was
    /// already present.
    pub fn insert(&mut self, key: String, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        if let Some(bucket) = self.buckets.get_mut(index) {
            if let Some(existing) = bucket.find_mut(&key) {
                return Some(mem::replace(existing, value));
            }
            bucket.push_front(key, value);
            self.size = self.size.saturating_add(1);
        }
        None
    }

    /// Retrieves the value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        let index = self.bucket_index(key);
        self.buckets.get(index)?.find(key).map(|node| &node.value)
    }

    /// Retrieves a mutable reference to the value stored for `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.bucket_index(key);
        self.buckets.get_mut(index)?.find_mut(key)
    }

    /// Returns true if `key` has an entry in the map.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        let index = self.bucket_index(key);
        self.buckets.get(index).is_some_and(|bucket| bucket.find(key).is_some())
    }

    /// Removes `key` from the map, unlinking its node and returning its
    /// value.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.bucket_index(key);
        let removed = self.buckets.get_mut(index)?.remove(key);
        if removed.is_some() {
            self.size = self.size.saturating_sub(1);
        }
        removed
    }

    /// Returns the number of entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the current (prime) capacity of the bucket array.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the current load factor: entries divided by capacity.
    ///
    /// Chaining tolerates load factors above one; the value is the average
    /// chain length.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Returns the number of buckets whose chain is empty.
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|bucket| bucket.is_empty()).count()
    }

    /// Rebuilds the table at `new_capacity` (coerced up to a prime if
    /// needed), re-chaining every pair under the new bucket count.
    ///
    /// A target below one is rejected without touching the table.
    pub fn resize(&mut self, new_capacity: usize) {
        if new_capacity < 1 {
            return;
        }

        let new_capacity =
            if is_prime(new_capacity) { new_capacity } else { next_prime(new_capacity) };

        let pairs = self.entries();
        self.buckets = vec![ChainList::new(); new_capacity];
        self.size = 0;

        for (key, value) in pairs {
            self.insert(key, value);
        }
    }

    /// Clears the map, resetting every bucket to an empty chain while
    /// preserving the capacity.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            *bucket = ChainList::new();
        }
        self.size = 0;
    }

    /// Returns all key-value pairs, bucket by bucket and front to back
    /// within each chain.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, V)> {
        self.iter().map(|(key, value)| (key.to_owned(), value.clone())).collect()
    }

    /// Returns an iterator over the key-value pairs in bucket-then-chain
    /// order.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: &self.buckets, bucket: 0, node: None }
    }
}

/// Iterator over the key-value pairs of a [`ChainedHashMap`].
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// The bucket array being walked.
    buckets: &'a [ChainList<V>],
    /// Next bucket to enter once the current chain is exhausted.
    bucket: usize,
    /// Current node within the chain being walked.
    node: Option<&'a ChainNode<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.node {
                self.node = node.next.as_deref();
                return Some((node.key.as_str(), &node.value));
            }
            let bucket = self.buckets.get(self.bucket)?;
            self.bucket = self.bucket.saturating_add(1);
            self.node = bucket.head.as_deref();
        }
    }
}
