//! # Merge Result Cache
//!
//! Chunk text -> merged symbols, shared by every call on one engine.
//! Entries are never evicted; once a cache is full, new results are
//! simply not stored.

use std::{hash::BuildHasher, sync::Arc};

use parking_lot::{Mutex, RwLock};

use crate::{
    concurrency::threads::est_max_parallelism,
    types::{CommonBuildHasher, CommonHashMap, SymbolId},
};

/// Default number of cached chunks.
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// Cached merge results.
pub type MergedSymbols = Arc<[SymbolId]>;

/// Replaceable merge result cache.
///
/// Implementations must be safe to call concurrently; a lookup never
/// observes a partially written entry.
pub trait MergeCache: Send + Sync {
    /// Look up the merge result for a chunk.
    fn get(
        &self,
        chunk: &str,
    ) -> Option<MergedSymbols>;

    /// Store the merge result for a chunk; may be dropped.
    fn insert(
        &self,
        chunk: &str,
        symbols: MergedSymbols,
    );

    /// Remove every entry.
    fn clear(&self);

    /// The number of cached chunks.
    fn len(&self) -> usize;

    /// Is the cache empty?
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A cache which stores nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMergeCache;

impl MergeCache for NoMergeCache {
    fn get(
        &self,
        _chunk: &str,
    ) -> Option<MergedSymbols> {
        None
    }

    fn insert(
        &self,
        _chunk: &str,
        _symbols: MergedSymbols,
    ) {
    }

    fn clear(&self) {}

    fn len(&self) -> usize {
        0
    }
}

/// A plain map behind one lock.
///
/// Uncontended single-threaded use costs one lock per chunk.
#[derive(Debug, Default)]
pub struct LockedMergeCache {
    map: Mutex<CommonHashMap<String, MergedSymbols>>,
    capacity: usize,
}

impl LockedMergeCache {
    /// Create a cache holding up to `capacity` chunks.
    pub fn new(capacity: usize) -> Self {
        Self {
            map: Default::default(),
            capacity,
        }
    }

    /// The maximum number of cached chunks.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl MergeCache for LockedMergeCache {
    fn get(
        &self,
        chunk: &str,
    ) -> Option<MergedSymbols> {
        self.map.lock().get(chunk).cloned()
    }

    fn insert(
        &self,
        chunk: &str,
        symbols: MergedSymbols,
    ) {
        let mut map = self.map.lock();
        if map.len() < self.capacity {
            map.insert(chunk.to_string(), symbols);
        }
    }

    fn clear(&self) {
        self.map.lock().clear();
    }

    fn len(&self) -> usize {
        self.map.lock().len()
    }
}

/// A map split into independently locked shards.
///
/// The shard is picked by hashing the chunk; readers of one shard never
/// block readers or writers of another.
#[derive(Debug)]
pub struct ShardedMergeCache {
    shards: Vec<RwLock<CommonHashMap<String, MergedSymbols>>>,
    hasher: CommonBuildHasher,
    shard_capacity: usize,
}

impl Default for ShardedMergeCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl ShardedMergeCache {
    /// Create a cache holding roughly `capacity` chunks.
    ///
    /// The shard count scales with the available parallelism.
    pub fn new(capacity: usize) -> Self {
        let shard_count = (est_max_parallelism() * 4).next_power_of_two();
        Self::with_shards(capacity, shard_count)
    }

    /// Create a cache with an explicit shard count.
    ///
    /// ## Arguments
    /// * `capacity` - Total chunk capacity, split evenly over the shards; 0 disables caching.
    /// * `shard_count` - The number of shards; clamped to ``1..=capacity``.
    pub fn with_shards(
        capacity: usize,
        shard_count: usize,
    ) -> Self {
        let shard_count = shard_count.clamp(1, capacity.max(1));
        Self {
            shards: (0..shard_count).map(|_| Default::default()).collect(),
            hasher: CommonBuildHasher::default(),
            shard_capacity: capacity.div_ceil(shard_count),
        }
    }

    /// The number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    fn shard(
        &self,
        chunk: &str,
    ) -> &RwLock<CommonHashMap<String, MergedSymbols>> {
        let idx = BuildHasher::hash_one(&self.hasher, chunk) as usize % self.shards.len();
        &self.shards[idx]
    }
}

impl MergeCache for ShardedMergeCache {
    fn get(
        &self,
        chunk: &str,
    ) -> Option<MergedSymbols> {
        self.shard(chunk).read().get(chunk).cloned()
    }

    fn insert(
        &self,
        chunk: &str,
        symbols: MergedSymbols,
    ) {
        if self.shard_capacity == 0 {
            return;
        }
        let mut shard = self.shard(chunk).write();
        if shard.len() < self.shard_capacity {
            shard.insert(chunk.to_string(), symbols);
        }
    }

    fn clear(&self) {
        for shard in &self.shards {
            shard.write().clear();
        }
    }

    fn len(&self) -> usize {
        self.shards.iter().map(|s| s.read().len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::static_is_send_sync_check;

    fn syms(ids: &[SymbolId]) -> MergedSymbols {
        ids.into()
    }

    fn check_cache<C: MergeCache>(
        cache: &C,
        capacity: usize,
    ) {
        assert!(cache.is_empty());
        assert_eq!(cache.get("hello"), None);

        cache.insert("hello", syms(&[300, 301]));
        assert_eq!(cache.get("hello").as_deref(), Some(&[300, 301][..]));
        assert_eq!(cache.len(), 1);

        for i in 0..capacity * 2 {
            cache.insert(&format!("w{i}"), syms(&[i as SymbolId]));
        }
        assert!(cache.len() <= capacity);
        assert!(cache.len() > 1);

        // Earlier entries survive a full cache.
        assert_eq!(cache.get("hello").as_deref(), Some(&[300, 301][..]));

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get("hello"), None);
    }

    #[test]
    fn test_locked_cache() {
        let cache = LockedMergeCache::new(16);
        static_is_send_sync_check(&cache);
        assert_eq!(cache.capacity(), 16);
        check_cache(&cache, 16);
    }

    #[test]
    fn test_sharded_cache() {
        let cache = ShardedMergeCache::with_shards(16, 4);
        static_is_send_sync_check(&cache);
        assert_eq!(cache.shard_count(), 4);
        check_cache(&cache, 16);

        assert!(ShardedMergeCache::default().shard_count().is_power_of_two());
    }

    #[test]
    fn test_shard_routing_is_stable() {
        let cache = ShardedMergeCache::with_shards(64, 8);
        for key in ["hello", "Ġworld", ""] {
            assert!(core::ptr::eq(cache.shard(key), cache.shard(key)));
        }

        cache.insert("hello", syms(&[1, 2]));
        assert_eq!(cache.shard("hello").read().len(), 1);
    }

    #[test]
    fn test_disabled_caches() {
        let cache = ShardedMergeCache::new(0);
        assert_eq!(cache.shard_count(), 1);
        cache.insert("a", syms(&[1]));
        assert!(cache.is_empty());

        let cache = LockedMergeCache::new(0);
        cache.insert("a", syms(&[1]));
        assert!(cache.is_empty());

        let cache = NoMergeCache;
        cache.insert("a", syms(&[1]));
        assert_eq!(cache.get("a"), None);
        assert!(cache.is_empty());
        cache.clear();
    }

    #[test]
    fn test_sharded_concurrent() {
        let cache = ShardedMergeCache::with_shards(1024, 8);
        std::thread::scope(|s| {
            for t in 0..4u32 {
                let cache = &cache;
                s.spawn(move || {
                    for i in 0..100u32 {
                        let key = format!("k{}", i % 50);
                        cache.insert(&key, syms(&[i % 50, t]));
                        let hit = cache.get(&key).unwrap();
                        assert_eq!(hit[0], i % 50);
                    }
                });
            }
        });
        assert_eq!(cache.len(), 50);
    }
}
