//! # Byte Pair Encoding

pub mod bpe_engine;
pub mod merge_cache;

#[doc(inline)]
pub use bpe_engine::{BpeEngine, merge_scan};
#[doc(inline)]
pub use merge_cache::{
    DEFAULT_CACHE_CAPACITY,
    LockedMergeCache,
    MergeCache,
    MergedSymbols,
    NoMergeCache,
    ShardedMergeCache,
};
