//! # Thread Pool Toy

use core::fmt::Debug;
use std::num::NonZeroUsize;

use crate::concurrency::threads;

/// Current Thread -> T Pool.
///
/// A thread-id hashed pool of cloned items. Compiled regexes keep
/// per-instance scratch space; giving each thread its own clone avoids
/// contention on it.
pub struct PoolToy<T>
where
    T: Clone + Send,
{
    pool: Vec<T>,
}

impl<T> AsRef<T> for PoolToy<T>
where
    T: Clone + Send,
{
    fn as_ref(&self) -> &T {
        self.get()
    }
}

impl<T> PoolToy<T>
where
    T: Clone + Send,
{
    /// Initialize a pool of clones of `item`.
    ///
    /// ## Arguments
    /// * `item` - The item to clone.
    /// * `max_pool` - The maximum pool size; if None, the available parallelism.
    pub fn init(
        item: T,
        max_pool: Option<NonZeroUsize>,
    ) -> Self {
        let size = threads::resolve_max_pool(max_pool);
        Self {
            pool: vec![item; size.max(1)],
        }
    }

    /// Get a reference to the item for the current thread.
    pub fn get(&self) -> &T {
        let tid = threads::unstable_current_thread_id_hash();
        &self.pool[tid % self.pool.len()]
    }

    /// Get the length of the pool.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.pool.len()
    }
}

impl<T> Clone for PoolToy<T>
where
    T: Clone + Send,
{
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
        }
    }
}

impl<T> Debug for PoolToy<T>
where
    T: Clone + Send + Debug,
{
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("PoolToy")
            .field("item", &self.pool[0])
            .field("len", &self.pool.len())
            .finish()
    }
}
