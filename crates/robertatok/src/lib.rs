//! # `robertatok` Byte-Level BPE Tokenizer
//!
//! Converts UTF-8 text into `RoBERTa` token ids, attention masks, and
//! character offset mappings, reproducing the reference byte-level BPE
//! tokenizer from a ``vocab.json`` / ``merges.txt`` pair.
//!
//! Pipeline:
//! * [`spanning::Pretokenizer`] splits text into word-like chunks.
//! * [`vocab::ByteEncoder`] maps each chunk's bytes to printable symbols.
//! * [`bpe::BpeEngine`] applies the ranked merges within each chunk.
//! * [`RobertaTokenizer`] maps subwords to ids, adds special tokens,
//!   and pads or truncates.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//! * ``rayon``
//!
//! #### feature: ``ahash``
//!
//! This swaps all `HashMap`/`HashSet` implementations for ``ahash``; which is a performance
//! win on many/(most?) modern CPUs.
//!
//! This is done by the ``types::CommonHash{*}`` type alias machinery.
//!
//! #### feature: ``rayon``
//!
//! This enables parallel batch encoding using the ``rayon`` crate;
//! see [`TokenizerOptions::parallel`] and [`rayon::ParallelRayonEncoder`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use robertatok::{Padding, TextEncoder, TokenizerOptions};
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let vocab = std::fs::read("vocab.json")?;
//!     let merges = std::fs::read("merges.txt")?;
//!
//!     let tokenizer = TokenizerOptions::default()
//!         .with_padding(Padding::Fixed(16))
//!         .build_from_bytes(&vocab, &merges)?;
//!
//!     let encoding = tokenizer.encode("Hello world")?;
//!     assert_eq!(encoding.input_ids.len(), 16);
//!     assert_eq!(encoding.attention_mask.len(), 16);
//!     assert_eq!(encoding.offset_mapping.len(), 16);
//!
//!     let batch = tokenizer.try_encode_batch(&["a diagram", "a dog", "a cat"])?;
//!     let ids: Vec<Vec<i64>> = batch.input_ids_i64();
//!     # let _ = ids;
//!     Ok(())
//! }
//! ```
#![warn(missing_docs, unused)]

pub mod bpe;
pub mod concurrency;
pub mod encoders;
pub mod errors;
pub mod regex;
pub mod spanning;
pub mod tokenizer;
pub mod types;
pub mod vocab;

#[cfg(feature = "rayon")]
pub mod rayon;

#[cfg(test)]
pub(crate) mod test_utils;

#[doc(inline)]
pub use encoders::{BatchEncoding, Encoding, TextEncoder};
#[doc(inline)]
pub use errors::{ErrorKind, RobertaTokError, TokResult};
#[doc(inline)]
pub use tokenizer::{Padding, RobertaTokenizer, TokenizerOptions};
#[doc(inline)]
pub use types::{CharSpan, TokenId};
#[doc(inline)]
pub use vocab::{SpecialTokensConfig, load_vocab_and_merges};
