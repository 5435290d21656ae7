//! # Parallel Encoder

use rayon::prelude::*;

use crate::{
    encoders::{Encoding, TextEncoder},
    errors::TokResult,
};

/// Encode a batch on the `rayon` pool.
///
/// Results keep batch order.
pub fn par_encode_batch<E, S>(
    encoder: &E,
    batch: &[S],
) -> Vec<TokResult<Encoding>>
where
    E: TextEncoder,
    S: AsRef<[u8]> + Sync,
{
    batch
        .par_iter()
        .enumerate()
        .map(|(idx, text)| {
            encoder
                .encode_bytes(text.as_ref())
                .map_err(|e| e.with_batch_index(idx))
        })
        .collect()
}

/// Batch-Level Parallel Encoder Wrapper.
///
/// Enables `rayon` encoding of batches.
#[derive(Debug, Clone)]
pub struct ParallelRayonEncoder<E: TextEncoder> {
    /// Inner encoder.
    pub inner: E,
}

impl<E: TextEncoder> ParallelRayonEncoder<E> {
    /// Create a new parallel encoder.
    ///
    /// ## Arguments
    /// * `inner` - The encoder to wrap.
    pub fn new(inner: E) -> Self {
        Self { inner }
    }
}

impl<E: TextEncoder> TextEncoder for ParallelRayonEncoder<E> {
    fn encode_bytes(
        &self,
        text: &[u8],
    ) -> TokResult<Encoding> {
        self.inner.encode_bytes(text)
    }

    fn encode_batch<S>(
        &self,
        batch: &[S],
    ) -> Vec<TokResult<Encoding>>
    where
        S: AsRef<[u8]> + Sync,
    {
        par_encode_batch(&self.inner, batch)
    }
}
