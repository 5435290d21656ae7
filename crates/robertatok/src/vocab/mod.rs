//! # Vocabulary
//!
//! The byte alphabet, the ``token <-> id`` vocabulary, the ranked merge table,
//! and the special tokens; all immutable once loaded.

pub mod byte_encoder;
pub mod merge_table;
pub mod special_tokens;
pub mod vocab_io;
pub mod vocabulary;

#[doc(inline)]
pub use byte_encoder::ByteEncoder;
#[doc(inline)]
pub use merge_table::{MergeRule, MergeTable};
#[doc(inline)]
pub use special_tokens::{SpecialToken, SpecialTokens, SpecialTokensConfig};
#[doc(inline)]
pub use vocab_io::load_vocab_and_merges;
#[doc(inline)]
pub use vocabulary::Vocabulary;
