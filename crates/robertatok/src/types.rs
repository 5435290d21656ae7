//! # Common Types

/// A vocabulary token id.
///
/// Ids are stored as `u32`; the operator surface widens them to `i64`.
pub type TokenId = u32;

/// An interned merge symbol id.
///
/// Ids ``0..256`` are the single-byte symbols, in byte order.
pub type SymbolId = u32;

/// A pair of merge symbols.
pub type SymbolPair = (SymbolId, SymbolId);

/// A ``(start, end)`` character span in the original input.
pub type CharSpan = (usize, usize);

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type CommonHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Type Alias for hash sets in this crate.
        pub type CommonHashSet<V> = ahash::AHashSet<V>;

        /// Hasher state used where a crate needs to hash keys itself.
        pub type CommonBuildHasher = ahash::RandomState;

    } else {
        /// Type Alias for hash maps in this crate.
        pub type CommonHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Type Alias for hash sets in this crate.
        pub type CommonHashSet<V> = std::collections::HashSet<V>;

        /// Hasher state used where a crate needs to hash keys itself.
        pub type CommonBuildHasher = std::collections::hash_map::RandomState;
    }
}

/// Compile-time check that a value is `Send + Sync`.
pub fn static_is_send_sync_check<T: Send + Sync>(_: &T) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_aliases() {
        let mut map: CommonHashMap<String, TokenId> = Default::default();
        map.insert("a".to_string(), 1);
        assert_eq!(map.get("a"), Some(&1));

        let set: CommonHashSet<SymbolPair> = [(1, 2), (1, 2), (2, 1)].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
