use std::mem;

use crate::hashing::{HashFn, additive_hash};
use crate::prime::{is_prime, next_prime};

/// Requested capacity used by `new` before prime rounding.
const DEFAULT_CAPACITY: usize = 11;

/// Load factor at or above which an insert doubles the table first.
const MAX_LOAD_FACTOR: f64 = 0.5;

/// A live key-value pair stored in an occupied slot.
#[derive(Debug, Clone)]
struct Entry<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: V,
}

/// A slot in the probing table.
#[derive(Debug, Clone)]
enum Slot<V> {
    /// Has never held an entry since the last clear or rebuild.
    Empty,
    /// Holds a live entry.
    Occupied(Entry<V>),
    /// Held an entry that was removed. The dead key stays behind so probe
    /// sequences passing through can still match against it.
    Tombstone(String),
}

impl<V> Slot<V> {
    /// True for slots an insert may claim.
    fn is_reusable(&self) -> bool {
        matches!(self, Self::Empty | Self::Tombstone(_))
    }
}

/// Outcome of a bounded insert probe.
enum InsertOutcome<V> {
    /// The key was newly written into a reusable slot.
    Inserted,
    /// The key already existed and its value was replaced.
    Updated(V),
    /// The probe bound was exhausted without finding a slot.
    Failed,
}

/// A hash map using open addressing with quadratic probing.
///
/// Collisions probe slots at offsets `j²` from the key's home slot, modulo
/// the capacity. The capacity is always an odd prime, which together with a
/// load factor kept below one half guarantees every probe sequence reaches a
/// free slot. Removal leaves a tombstone in place so probe sequences that
/// passed through the slot keep working.
///
/// Note: This implementation is not thread-safe.
#[derive(Debug, Clone)]
pub struct ProbingHashMap<V> {
    /// The slots storing key-value pairs; length is always the prime capacity.
    slots: Vec<Slot<V>>,
    /// Number of live (non-tombstoned) entries.
    size: usize,
    /// Hash function applied to keys before reduction modulo capacity.
    hash_function: HashFn,
}

impl<V> Default for ProbingHashMap<V>
where
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Extend<(String, V)> for ProbingHashMap<V>
where
    V: Clone,
{
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<V> ProbingHashMap<V>
where
    V: Clone,
{
    /// Creates a new `ProbingHashMap` with the default capacity and the
    /// additive hash function.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, additive_hash)
    }

    /// Creates a new `ProbingHashMap` with the default capacity and the given
    /// hash function.
    #[must_use]
    pub fn with_hasher(hash_function: HashFn) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hash_function)
    }

    /// Creates a new `ProbingHashMap` with the given capacity and hash
    /// function. The capacity is rounded up to the next odd prime.
    #[must_use]
    pub fn with_capacity_and_hasher(capacity: usize, hash_function: HashFn) -> Self {
        let capacity = next_prime(capacity);
        Self { slots: vec![Slot::Empty; capacity], size: 0, hash_function }
    }

    /// Maps a key to its home slot under the current capacity.
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn home_index(&self, key: &str) -> usize {
        let hash = (self.hash_function)(key);
        (hash % self.slots.len() as u64) as usize
    }

    /// Quadratic probe position `home + j²`, reduced modulo capacity.
    #[allow(clippy::arithmetic_side_effects)]
    fn probe_index(&self, home: usize, j: usize) -> usize {
        home.wrapping_add(j.wrapping_mul(j)) % self.slots.len()
    }

    /// Inserts a key-value pair, returning the previous value if the key was
    /// already present.
    ///
    /// If the load factor has reached one half, the capacity is doubled (and
    /// re-primed) before the new key's slot is computed, since rebuilding
    /// moves every entry's home slot.
    pub fn insert(&mut self, key: String, value: V) -> Option<V> {
        if self.load_factor() >= MAX_LOAD_FACTOR {
            self.resize(self.capacity().saturating_mul(2));
        }

        let home = self.home_index(&key);
        match self.probe_insert(home, key, value) {
            InsertOutcome::Inserted => {
                self.size = self.size.saturating_add(1);
                None
            }
            InsertOutcome::Updated(old_value) => Some(old_value),
            InsertOutcome::Failed => None,
        }
    }

    /// Probes from `home` for a slot to claim, keeping the first reusable
    /// slot in reserve so an existing key is always updated in place rather
    /// than duplicated past a tombstone.
    fn probe_insert(&mut self, home: usize, key: String, value: V) -> InsertOutcome<V> {
        let capacity = self.slots.len();
        let mut first_reusable = None;

        for j in 0..capacity {
            let index = self.probe_index(home, j);
            match self.slots.get_mut(index) {
                None => return InsertOutcome::Failed,
                Some(Slot::Empty) => {
                    return self.claim(first_reusable.unwrap_or(index), key, value);
                }
                Some(Slot::Occupied(entry)) if entry.key == key => {
                    return InsertOutcome::Updated(mem::replace(&mut entry.value, value));
                }
                Some(Slot::Occupied(_)) => {}
                Some(Slot::Tombstone(_)) => {
                    if first_reusable.is_none() {
                        first_reusable = Some(index);
                    }
                }
            }
        }

        // A full probe cycle found no empty slot and no match. Fall back to a
        // recorded tombstone; with the load factor held below one half this
        // path is unreachable.
        match first_reusable {
            Some(index) => self.claim(index, key, value),
            None => InsertOutcome::Failed,
        }
    }

    /// Writes a new entry into a reusable slot.
    fn claim(&mut self, index: usize, key: String, value: V) -> InsertOutcome<V> {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = Slot::Occupied(Entry { key, value });
                InsertOutcome::Inserted
            }
            None => InsertOutcome::Failed,
        }
    }

    /// Probes for the slot holding a live entry for `key`.
    ///
    /// Stops at the first empty slot or at a tombstone left by this key; an
    /// insert always claims the first reusable slot on its path, so a live
    /// entry sits before any of its own tombstones and either stop means the
    /// key is absent. The scan is bounded by one full probe cycle.
    fn probe_live(&self, key: &str) -> Option<usize> {
        let home = self.home_index(key);
        let capacity = self.slots.len();

        for j in 0..capacity {
            let index = self.probe_index(home, j);
            match self.slots.get(index)? {
                Slot::Empty => return None,
                Slot::Occupied(entry) if entry.key == key => return Some(index),
                Slot::Tombstone(dead_key) if dead_key.as_str() == key => return None,
                Slot::Occupied(_) | Slot::Tombstone(_) => {}
            }
        }

        None
    }

    /// Retrieves the value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&V> {
        let index = self.probe_live(key)?;
        match self.slots.get(index) {
            Some(Slot::Occupied(entry)) => Some(&entry.value),
            _ => None,
        }
    }

    /// Retrieves a mutable reference to the value stored for `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.probe_live(key)?;
        match self.slots.get_mut(index) {
            Some(Slot::Occupied(entry)) => Some(&mut entry.value),
            _ => None,
        }
    }

    /// Returns true if `key` has a live entry in the map.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.probe_live(key).is_some()
    }

    /// Removes `key` from the map, returning its value.
    ///
    /// The slot is tombstoned rather than emptied: physically clearing it
    /// would break lookups for keys whose probe sequences pass through it.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let index = self.probe_live(key)?;
        let slot = self.slots.get_mut(index)?;

        match mem::replace(slot, Slot::Empty) {
            Slot::Occupied(entry) => {
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

    /// Returns the number of live entries in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the current (prime) capacity of the slot array.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the current load factor: live entries divided by capacity.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.size as f64 / self.slots.len() as f64
    }

    /// Returns the number of slots an insert could claim; empty and
    /// tombstoned slots both count.
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_reusable()).count()
    }

    /// Rebuilds the table at `new_capacity` (coerced up to a prime if
    /// needed), re-probing every live pair under the new slot count.
    /// Tombstones are discarded by the rebuild.
    ///
    /// A target smaller than the current number of entries is rejected
    /// without touching the table, keeping the load factor at most one.
    pub fn resize(&mut self, new_capacity: usize) {
        if new_capacity < self.size {
            return;
        }

        let new_capacity =
            if is_prime(new_capacity) { new_capacity } else { next_prime(new_capacity) };

        let pairs = self.entries();
        self.slots = vec![Slot::Empty; new_capacity];
        self.size = 0;

        for (key, value) in pairs {
            self.insert(key, value);
        }
    }

    /// Clears the map, resetting every slot to empty while preserving the
    /// capacity.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.size = 0;
    }

    /// Returns all live key-value pairs in slot-scan order.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, V)> {
        self.iter().map(|(key, value)| (key.to_owned(), value.clone())).collect()
    }

    /// Returns an iterator over the live key-value pairs, in slot order.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { slots: &self.slots, index: 0 }
    }
}

/// Iterator over the live key-value pairs of a [`ProbingHashMap`].
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// The slot array being scanned.
    slots: &'a [Slot<V>],
    /// Current position in the scan.
    index: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.get(self.index) {
            self.index = self.index.saturating_add(1);
            if let Slot::Occupied(entry) = slot {
                return Some((entry.key.as_str(), &entry.value));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_get() {
        let mut map = ProbingHashMap::new();
        assert_eq!(map.insert("key1".to_string(), 1), None);
        assert_eq!(map.insert("key2".to_string(), 2), None);
        assert_eq!(map.insert("key3".to_string(), 3), None);

        assert_eq!(map.get("key1"), Some(&1));
        assert_eq!(map.get("key2"), Some(&2));
        assert_eq!(map.get("key3"), Some(&3));
        assert_eq!(map.get("key4"), None);
    }

    #[test]
    fn test_update_in_place() {
        let mut map = ProbingHashMap::new();
        assert_eq!(map.insert("key1".to_string(), 1), None);
        assert_eq!(map.insert("key1".to_string(), 10), Some(1));
        assert_eq!(map.get("key1"), Some(&10));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_capacity_is_rounded_to_prime() {
        let map: ProbingHashMap<i32> = ProbingHashMap::with_capacity_and_hasher(20, additive_hash);
        assert_eq!(map.capacity(), 23);

        let map: ProbingHashMap<i32> = ProbingHashMap::with_capacity_and_hasher(23, additive_hash);
        assert_eq!(map.capacity(), 23);
    }

    #[test]
    fn test_load_factor_doubles_capacity() {
        // Requested capacity 20 becomes 23. Thirty inserts force two
        // doublings, each checked before the insert that would cross one
        // half: 23 -> 47 at the thirteenth insert, 47 -> 97 at the
        // twenty-fifth.
        let mut map = ProbingHashMap::with_capacity_and_hasher(20, additive_hash);
        for i in 0..30 {
            map.insert(format!("str{i}"), i * 100);
        }

        assert_eq!(map.len(), 30);
        assert_eq!(map.capacity(), 97);
        assert!(map.load_factor() < 0.5);
        for i in 0..30 {
            assert_eq!(map.get(&format!("str{i}")), Some(&(i * 100)));
        }
    }

    #[test]
    fn test_remove_leaves_tombstone() {
        let mut map = ProbingHashMap::with_capacity_and_hasher(23, additive_hash);
        map.insert("key1".to_string(), 1);
        map.insert("key2".to_string(), 2);
        map.insert("key3".to_string(), 3);
        assert_eq!(map.empty_buckets(), 20);

        assert_eq!(map.remove("key2"), Some(2));
        assert_eq!(map.len(), 2);
        // The tombstoned slot counts as available again.
        assert_eq!(map.empty_buckets(), 21);

        assert_eq!(map.get("key2"), None);
        assert!(!map.contains_key("key2"));
        assert_eq!(map.remove("key2"), None);

        // Other entries are untouched by the removal.
        assert_eq!(map.get("key1"), Some(&1));
        assert_eq!(map.get("key3"), Some(&3));
    }

    #[test]
    fn test_reinsert_after_remove() {
        let mut map = ProbingHashMap::new();
        map.insert("key1".to_string(), 1);
        map.remove("key1");
        assert_eq!(map.insert("key1".to_string(), 2), None);
        assert_eq!(map.get("key1"), Some(&2));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_colliding_keys_probe_quadratically() {
        // A constant hash sends every key to slot zero; quadratic probing
        // over a prime capacity must still place and find them all.
        let mut map = ProbingHashMap::with_capacity_and_hasher(11, |_| 0);
        for i in 0..8 {
            map.insert(format!("key{i}"), i);
        }

        assert_eq!(map.len(), 8);
        assert!(map.load_factor() < 0.5);
        for i in 0..8 {
            assert_eq!(map.get(&format!("key{i}")), Some(&i));
        }
    }

    #[test]
    fn test_colliding_update_past_tombstone() {
        // Remove a key that sits on another key's probe path, then update the
        // surviving key: the update must land on the existing entry, not
        // duplicate it into the freed slot.
        let mut map = ProbingHashMap::with_capacity_and_hasher(11, |_| 0);
        map.insert("key0".to_string(), 0);
        map.insert("key1".to_string(), 1);
        map.insert("key2".to_string(), 2);

        map.remove("key1");
        assert_eq!(map.insert("key2".to_string(), 20), Some(2));
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("key2"), Some(&20));
    }

    #[test]
    fn test_resize_preserves_pairs() {
        let mut map = ProbingHashMap::with_capacity_and_hasher(23, additive_hash);
        for i in 0..10 {
            map.insert(format!("key{i}"), i);
        }
        let mut before = map.entries();

        map.resize(53);
        assert_eq!(map.capacity(), 53);
        assert_eq!(map.len(), 10);

        let mut after = map.entries();
        before.sort();
        after.sort();
        assert_eq!(before, after);
    }

    #[test]
    fn test_resize_rejects_capacity_below_size() {
        let mut map = ProbingHashMap::with_capacity_and_hasher(23, additive_hash);
        for i in 0..5 {
            map.insert(format!("key{i}"), i);
        }

        map.resize(2);
        assert_eq!(map.capacity(), 23);
        assert_eq!(map.len(), 5);
    }

    #[test]
    fn test_resize_refill_can_regrow() {
        // Resizing five entries into a table of five trips the load check
        // during the refill, doubling 5 to 10 and re-priming to 11.
        let mut map = ProbingHashMap::with_capacity_and_hasher(23, additive_hash);
        for i in 0..5 {
            map.insert(format!("key{i}"), i);
        }

        map.resize(5);
        assert_eq!(map.capacity(), 11);
        assert_eq!(map.len(), 5);
        for i in 0..5 {
            assert_eq!(map.get(&format!("key{i}")), Some(&i));
        }
    }

    #[test]
    fn test_clear_preserves_capacity() {
        let mut map = ProbingHashMap::with_capacity_and_hasher(20, additive_hash);
        map.insert("key1".to_string(), 1);
        map.insert("key2".to_string(), 2);

        map.clear();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert!((map.load_factor() - 0.0).abs() < f64::EPSILON);
        assert_eq!(map.capacity(), 23);
        assert!(map.entries().is_empty());
        assert_eq!(map.get("key1"), None);
    }

    #[test]
    fn test_empty_buckets_counts_whole_table_when_empty() {
        let map: ProbingHashMap<i32> = ProbingHashMap::with_capacity_and_hasher(31, additive_hash);
        assert_eq!(map.empty_buckets(), 31);
    }

    #[test]
    fn test_iter_yields_live_entries_only() {
        let mut map = ProbingHashMap::new();
        map.insert("key1".to_string(), 1);
        map.insert("key2".to_string(), 2);
        map.insert("key3".to_string(), 3);
        map.remove("key2");

        let mut pairs: Vec<(String, i32)> =
            map.iter().map(|(k, v)| (k.to_owned(), *v)).collect();
        pairs.sort();
        assert_eq!(pairs, vec![("key1".to_string(), 1), ("key3".to_string(), 3)]);
    }

    #[test]
    fn test_extend() {
        let mut map = ProbingHashMap::new();
        map.extend(vec![("a".to_string(), 1), ("b".to_string(), 2)]);
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("b"), Some(&2));
    }

    #[test]
    fn test_get_mut() {
        let mut map = ProbingHashMap::new();
        map.insert("key1".to_string(), 1);

        if let Some(value) = map.get_mut("key1") {
            *value += 10;
        }

        assert_eq!(map.get("key1"), Some(&11));
    }

    #[test]
    fn test_default_uses_prime_capacity() {
        let map: ProbingHashMap<i32> = ProbingHashMap::default();
        assert_eq!(map.capacity(), 11);
        assert!(map.is_empty());
    }
}
