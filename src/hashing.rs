//! Caller-supplied hash functions for string keys.
//!
//! The maps treat hashing as an opaque, injected function: any deterministic,
//! pure `fn(&str) -> u64` works. The map reduces the result modulo its
//! current capacity, so a weak function only degrades probe sequences and
//! chain lengths, never correctness. Two ready-made functions are provided.

/// A deterministic, pure hash over string keys.
pub type HashFn = fn(&str) -> u64;

/// Sums the Unicode code points of the key.
#[must_use]
pub fn additive_hash(key: &str) -> u64 {
    key.chars().fold(0_u64, |hash, c| hash.wrapping_add(u64::from(u32::from(c))))
}

/// Sums the Unicode code points of the key, weighted by character position.
///
/// Distinguishes permutations of the same characters, which
/// [`additive_hash`] maps to a single value.
#[must_use]
pub fn positional_hash(key: &str) -> u64 {
    key.chars().enumerate().fold(0_u64, |hash, (index, c)| {
        let weight = (index as u64).wrapping_add(1);
        hash.wrapping_add(weight.wrapping_mul(u64::from(u32::from(c))))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_additive_hash_known_values() {
        assert_eq!(additive_hash(""), 0);
        assert_eq!(additive_hash("a"), 97);
        assert_eq!(additive_hash("abc"), 97 + 98 + 99);
    }

    #[test]
    fn test_additive_hash_ignores_order() {
        assert_eq!(additive_hash("abc"), additive_hash("cba"));
    }

    #[test]
    fn test_positional_hash_known_values() {
        assert_eq!(positional_hash(""), 0);
        assert_eq!(positional_hash("a"), 97);
        assert_eq!(positional_hash("abc"), 97 + 2 * 98 + 3 * 99);
    }

    #[test]
    fn test_positional_hash_distinguishes_order() {
        assert_ne!(positional_hash("abc"), positional_hash("cba"));
    }
}
