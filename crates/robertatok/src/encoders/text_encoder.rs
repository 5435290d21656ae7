//! # Text Encoder Trait

use crate::{encoders::Encoding, errors::TokResult};

/// A trait for text -> [`Encoding`] encoders.
pub trait TextEncoder: Send + Sync {
    /// Encode raw bytes, which must be UTF-8.
    ///
    /// ## Arguments
    /// * `text` - The text bytes.
    ///
    /// ## Returns
    /// The encoding, or `InvalidUtf8` if `text` is not UTF-8.
    fn encode_bytes(
        &self,
        text: &[u8],
    ) -> TokResult<Encoding>;

    /// Encode a string.
    fn encode(
        &self,
        text: &str,
    ) -> TokResult<Encoding> {
        self.encode_bytes(text.as_bytes())
    }

    /// Encode a batch of texts.
    ///
    /// ## Arguments
    /// * `batch` - The texts to encode.
    ///
    /// ## Returns
    /// One result per text, in batch order; a failing text never affects the others.
    fn encode_batch<S>(
        &self,
        batch: &[S],
    ) -> Vec<TokResult<Encoding>>
    where
        S: AsRef<[u8]> + Sync,
    {
        encode_batch_sequential(self, batch)
    }
}

/// Encode a batch on the current thread.
pub fn encode_batch_sequential<E, S>(
    encoder: &E,
    batch: &[S],
) -> Vec<TokResult<Encoding>>
where
    E: TextEncoder + ?Sized,
    S: AsRef<[u8]>,
{
    batch
        .iter()
        .enumerate()
        .map(|(idx, text)| {
            encoder
                .encode_bytes(text.as_ref())
                .map_err(|e| e.with_batch_index(idx))
        })
        .collect()
}
