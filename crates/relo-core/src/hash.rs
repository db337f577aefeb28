//! Fast hash map and hash set type aliases.
//!
//! The location map and the walker's skip list are keyed by short strings
//! (component basenames, directory names), which is the case the Fx hash
//! from `rustc-hash` is tuned for. None of these tables hold untrusted keys,
//! so denial-of-service resistance is not needed.
//!
//! # Examples
//!
//! ```
//! use relo_core::{FxHashMap, FxHashSet};
//!
//! let mut map: FxHashMap<&str, &str> = FxHashMap::default();
//! map.insert("Sidebar", "components/layout/Sidebar");
//!
//! let set: FxHashSet<&str> = ["node_modules", "dist"].into_iter().collect();
//! assert!(set.contains("dist"));
//! ```

/// A [`HashMap`](std::collections::HashMap) using the Fx hash algorithm.
pub type FxHashMap<K, V> = rustc_hash::FxHashMap<K, V>;

/// A [`HashSet`](std::collections::HashSet) using the Fx hash algorithm.
pub type FxHashSet<V> = rustc_hash::FxHashSet<V>;

/// Creates a new [`FxHashMap`] able to hold `capacity` entries without
/// reallocating.
///
/// # Examples
///
/// ```
/// use relo_core::hash::fx_hash_map_with_capacity;
///
/// let map: relo_core::FxHashMap<String, String> = fx_hash_map_with_capacity(64);
/// assert!(map.capacity() >= 64);
/// ```
#[inline]
#[must_use]
pub fn fx_hash_map_with_capacity<K, V>(capacity: usize) -> FxHashMap<K, V> {
    FxHashMap::with_capacity_and_hasher(capacity, rustc_hash::FxBuildHasher)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fx_hash_map_with_capacity() {
        let mut map: FxHashMap<String, String> = fx_hash_map_with_capacity(8);
        assert!(map.capacity() >= 8);
        map.insert("Help".to_owned(), "components/layout/Help".to_owned());
        assert_eq!(
            map.get("Help").map(String::as_str),
            Some("components/layout/Help")
        );
    }

    #[test]
    fn test_fx_hash_set_lookup() {
        let set: FxHashSet<&str> = ["lib", "hooks"].into_iter().collect();
        assert!(set.contains("lib"));
        assert!(!set.contains("utils"));
    }
}
