//! # Concurrency Utilities

pub mod pool_toy;
pub mod threads;

#[doc(inline)]
pub use pool_toy::PoolToy;
