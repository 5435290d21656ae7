//! # Thread Utilities

use core::{num::NonZeroU64, str::FromStr};
use std::{env, num::NonZeroUsize, thread};

/// Hash of the current thread's id.
///
/// ``thread::current().id().as_u64()`` is unstable.
pub fn unstable_current_thread_id_hash() -> usize {
    // `ThreadId` is a private `NonZeroU64` counter; layout checked below.
    // https://github.com/rust-lang/rust/issues/67939
    struct FakeThreadId(NonZeroU64);
    const _: [u8; 8] = [0; std::mem::size_of::<std::thread::ThreadId>()];
    const _: [u8; 8] = [0; std::mem::size_of::<FakeThreadId>()];
    let val = unsafe {
        std::mem::transmute::<std::thread::ThreadId, FakeThreadId>(thread::current().id()).0
    };
    u64::from(val) as usize
}

/// Environment variables `rayon` reads to size its pool.
#[cfg(feature = "rayon")]
const RAYON_VARS: &[&str] = &["RAYON_NUM_THREADS", "RAYON_RS_NUM_CPUS"];

/// Estimate the available parallelism.
///
/// With `rayon` enabled, the `rayon` pool size variables take precedence.
pub fn est_max_parallelism() -> usize {
    #[cfg(feature = "rayon")]
    for name in RAYON_VARS {
        if let Some(x @ 1..) = env::var(name).ok().and_then(|s| usize::from_str(&s).ok()) {
            return x;
        }
    }

    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

/// Resolve a pool size.
///
/// ``min(max_pool, est_max_parallelism())``
pub fn resolve_max_pool(max_pool: Option<NonZeroUsize>) -> usize {
    let sys_max = est_max_parallelism();
    let max_pool = max_pool.map(|x| x.get()).unwrap_or(sys_max);
    core::cmp::min(max_pool, sys_max)
}
