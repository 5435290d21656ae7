//! # Test Utilities

use crate::{
    errors::TokResult,
    tokenizer::{RobertaTokenizer, TokenizerOptions},
};

/// A small `RoBERTa`-style vocabulary.
pub const FIXTURE_VOCAB: &[u8] = include_bytes!("../tests/fixtures/vocab.json");

/// Merges for [`FIXTURE_VOCAB`].
pub const FIXTURE_MERGES: &[u8] = include_bytes!("../tests/fixtures/merges.txt");

/// Build a fixture tokenizer.
pub fn fixture_tokenizer(options: TokenizerOptions) -> TokResult<RobertaTokenizer> {
    options.build_from_bytes(FIXTURE_VOCAB, FIXTURE_MERGES)
}
