//! # primemap
//!
//! Prime-capacity hash maps built on a fixed-size bucket array, with two
//! collision-resolution strategies:
//!
//! - [`ProbingHashMap`]: open addressing with quadratic probing and tombstone
//!   deletion
//! - [`ChainedHashMap`]: separate chaining with a singly linked list per
//!   bucket
//!
//! Every requested capacity is rounded up to an odd prime via
//! [`next_prime`], keeping quadratic probe sequences well distributed and
//! chains evenly spread under modular reduction. Hashing is injected: any
//! deterministic `fn(&str) -> u64` works, and two ready-made functions are
//! provided. [`find_mode`] uses the chained map to compute the most frequent
//! values of a sequence.
//!
//! ## Basic Usage
//!
//! ```rust
//! use primemap::ProbingHashMap;
//!
//! let mut map = ProbingHashMap::new();
//!
//! // Insert values
//! map.insert("apple".to_string(), 1);
//! map.insert("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.insert("apple".to_string(), 10);
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! ```
//!
//! ## Separate Chaining
//!
//! ```rust
//! use primemap::{ChainedHashMap, positional_hash};
//!
//! // Requested capacities round up to the next prime.
//! let mut map = ChainedHashMap::with_capacity_and_hasher(20, positional_hash);
//! assert_eq!(map.capacity(), 23);
//!
//! for i in 0..50 {
//!     map.insert(format!("key-{i}"), i);
//! }
//!
//! // Chains absorb load; the capacity only changes on an explicit resize.
//! assert_eq!(map.capacity(), 23);
//! map.resize(101);
//! assert_eq!(map.capacity(), 101);
//! assert_eq!(map.get("key-7"), Some(&7));
//! ```
//!
//! ## Mode Finding
//!
//! ```rust
//! use primemap::find_mode;
//!
//! let votes: Vec<String> =
//!     ["tea", "coffee", "tea"].iter().map(ToString::to_string).collect();
//! let (modes, frequency) = find_mode(&votes).unwrap();
//! assert_eq!(modes, vec!["tea".to_string()]);
//! assert_eq!(frequency, 2);
//! ```

/// Module implementing a hash map with separate chaining
mod chained_hashmap;
/// Caller-supplied hash functions over string keys
mod hashing;
/// Mode finding built on the chained map
mod mode;
/// Prime sizing for bucket arrays
mod prime;
/// Module implementing a hash map with quadratic probing
mod probing_hashmap;
/// Extension helpers shared by both map implementations
mod utils;

pub use chained_hashmap::ChainedHashMap;
pub use hashing::{HashFn, additive_hash, positional_hash};
pub use mode::find_mode;
pub use prime::{is_prime, next_prime};
pub use probing_hashmap::ProbingHashMap;
pub use utils::HashMapExtensions;
