//! # Tokenizer Options

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    bpe::{DEFAULT_CACHE_CAPACITY, MergeCache, ShardedMergeCache},
    errors::{RobertaTokError, TokResult},
    tokenizer::RobertaTokenizer,
    vocab::{MergeTable, SpecialTokensConfig, Vocabulary, load_vocab_and_merges},
};

/// Padding and truncation policy.
///
/// Serialized as the operator's integer ``padding_length``:
/// ``-1`` is [`Padding::Disabled`], ``L >= 0`` is [`Padding::Fixed`].
/// Lengths beyond `i64::MAX` serialize as `i64::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Padding {
    /// No padding or truncation; rows keep their own lengths.
    #[default]
    Disabled,

    /// Truncate or right-pad every row to exactly this many tokens.
    Fixed(usize),
}

impl TryFrom<i64> for Padding {
    type Error = RobertaTokError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Padding::Disabled),
            v if v >= 0 => Ok(Padding::Fixed(v as usize)),
            v => Err(RobertaTokError::InvalidPaddingLength {
                value: v,
                reason: "must be -1 (disabled) or non-negative",
            }),
        }
    }
}

impl From<Padding> for i64 {
    fn from(padding: Padding) -> Self {
        match padding {
            Padding::Disabled => -1,
            Padding::Fixed(len) => i64::try_from(len).unwrap_or(i64::MAX),
        }
    }
}

/// Options for configuring a [`RobertaTokenizer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerOptions {
    /// Padding and truncation policy.
    pub padding: Padding,

    /// Special token strings.
    pub special_tokens: SpecialTokensConfig,

    /// Wrap every sequence in the bos / eos tokens.
    pub add_special_tokens: bool,

    /// Emit special token strings found in the input as their ids.
    pub match_special_tokens: bool,

    /// Trim encoded spaces out of subword offsets.
    pub trim_offsets: bool,

    /// Merge cache capacity, in chunks; 0 disables caching.
    pub cache_capacity: usize,

    /// Encode batches in parallel.
    pub parallel: bool,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            padding: Padding::Disabled,
            special_tokens: SpecialTokensConfig::default(),
            add_special_tokens: true,
            match_special_tokens: true,
            trim_offsets: false,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            parallel: false,
        }
    }
}

impl TokenizerOptions {
    /// Sets the padding policy.
    pub fn with_padding(
        mut self,
        padding: Padding,
    ) -> Self {
        self.padding = padding;
        self
    }

    /// Sets the padding policy from an operator ``padding_length``.
    ///
    /// ## Returns
    /// `InvalidPaddingLength` for values below ``-1``.
    pub fn with_padding_length(
        self,
        padding_length: i64,
    ) -> TokResult<Self> {
        Ok(self.with_padding(Padding::try_from(padding_length)?))
    }

    /// Sets the special token strings.
    pub fn with_special_tokens(
        mut self,
        special_tokens: SpecialTokensConfig,
    ) -> Self {
        self.special_tokens = special_tokens;
        self
    }

    /// Sets whether sequences are wrapped in bos / eos.
    pub fn with_add_special_tokens(
        mut self,
        add_special_tokens: bool,
    ) -> Self {
        self.add_special_tokens = add_special_tokens;
        self
    }

    /// Sets whether special token strings in the input are matched.
    pub fn with_match_special_tokens(
        mut self,
        match_special_tokens: bool,
    ) -> Self {
        self.match_special_tokens = match_special_tokens;
        self
    }

    /// Sets whether subword offsets are trimmed.
    pub fn with_trim_offsets(
        mut self,
        trim_offsets: bool,
    ) -> Self {
        self.trim_offsets = trim_offsets;
        self
    }

    /// Sets the merge cache capacity.
    pub fn with_cache_capacity(
        mut self,
        cache_capacity: usize,
    ) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    /// Sets the configured parallelism value.
    ///
    /// Enabling parallelism encodes batches on the `rayon` pool,
    /// when the `rayon` feature is enabled.
    pub fn with_parallel(
        mut self,
        parallel: bool,
    ) -> Self {
        self.parallel = parallel;
        self
    }

    /// Build a tokenizer from raw vocabulary and merge bytes.
    ///
    /// ## Arguments
    /// * `vocab_bytes` - A json ``{ token: id }`` object.
    /// * `merges_bytes` - The merges file.
    pub fn build_from_bytes(
        &self,
        vocab_bytes: &[u8],
        merges_bytes: &[u8],
    ) -> TokResult<RobertaTokenizer> {
        let (vocab, merges) = load_vocab_and_merges(vocab_bytes, merges_bytes)?;
        self.build(Arc::new(vocab), Arc::new(merges))
    }

    /// Build a tokenizer with a [`ShardedMergeCache`].
    pub fn build(
        &self,
        vocab: Arc<Vocabulary>,
        merges: Arc<MergeTable>,
    ) -> TokResult<RobertaTokenizer> {
        let cache = ShardedMergeCache::new(self.cache_capacity);
        self.build_with_cache(vocab, merges, cache)
    }

    /// Build a tokenizer with a custom merge cache.
    ///
    /// ## Returns
    /// A config error if the options do not fit the vocabulary.
    pub fn build_with_cache<C: MergeCache>(
        &self,
        vocab: Arc<Vocabulary>,
        merges: Arc<MergeTable>,
        cache: C,
    ) -> TokResult<RobertaTokenizer<C>> {
        RobertaTokenizer::new(self.clone(), vocab, merges, cache)
    }
}
