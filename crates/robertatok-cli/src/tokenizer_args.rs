use robertatok::{RobertaTokenizer, TokenizerOptions};

/// Tokenizer file and option arg group.
#[derive(clap::Args, Debug)]
pub struct TokenizerArgs {
    /// Path to the ``vocab.json`` token -> id mapping.
    #[arg(long)]
    vocab: String,

    /// Path to the ``merges.txt`` ranked merge list.
    #[arg(long)]
    merges: String,

    /// Pad or truncate every row to this length; -1 disables padding.
    #[arg(long, default_value_t = -1, allow_negative_numbers = true)]
    padding_length: i64,

    /// Trim encoded spaces out of token offsets.
    #[arg(long)]
    trim_offsets: bool,

    /// Do not wrap sequences in bos/eos tokens.
    #[arg(long)]
    no_special_tokens: bool,

    /// Merge cache capacity; 0 disables the cache.
    #[arg(long, default_value_t = robertatok::bpe::DEFAULT_CACHE_CAPACITY)]
    cache_capacity: usize,
}

impl TokenizerArgs {
    /// Build the tokenizer options.
    pub fn options(&self) -> Result<TokenizerOptions, Box<dyn std::error::Error>> {
        Ok(TokenizerOptions::default()
            .with_padding_length(self.padding_length)?
            .with_trim_offsets(self.trim_offsets)
            .with_add_special_tokens(!self.no_special_tokens)
            .with_cache_capacity(self.cache_capacity))
    }

    /// Load the tokenizer.
    ///
    /// ## Arguments
    /// * `parallel` - Encode batches on the rayon pool.
    pub fn load_tokenizer(
        &self,
        parallel: bool,
    ) -> Result<RobertaTokenizer, Box<dyn std::error::Error>> {
        let vocab = std::fs::read(&self.vocab)
            .map_err(|e| format!("failed to read vocab {:?}: {e}", self.vocab))?;
        let merges = std::fs::read(&self.merges)
            .map_err(|e| format!("failed to read merges {:?}: {e}", self.merges))?;

        log::debug!("loading vocab {:?} and merges {:?}", self.vocab, self.merges);
        let tokenizer = self
            .options()?
            .with_parallel(parallel)
            .build_from_bytes(&vocab, &merges)?;
        Ok(tokenizer)
    }
}
