//! Extension helpers shared by both map implementations.

use crate::chained_hashmap::ChainedHashMap;
use crate::probing_hashmap::ProbingHashMap;

/// Extension trait adding key and value projections to the map types.
pub trait HashMapExtensions<V> {
    /// Returns the keys of the map as a `Vec`, in scan order.
    fn keys(&self) -> Vec<String>;

    /// Returns the values of the map as a `Vec`, in scan order.
    fn values(&self) -> Vec<V>;
}

impl<V> HashMapExtensions<V> for ProbingHashMap<V>
where
    V: Clone,
{
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.to_owned()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, value)| value.clone()).collect()
    }
}

impl<V> HashMapExtensions<V> for ChainedHashMap<V>
where
    V: Clone,
{
    fn keys(&self) -> Vec<String> {
        self.iter().map(|(key, _)| key.to_owned()).collect()
    }

    fn values(&self) -> Vec<V> {
        self.iter().map(|(_, value)| value.clone()).collect()
    }
}
