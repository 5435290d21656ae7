//! # `RoBERTa` Tokenizer
//!
//! Text -> chunks -> merged subwords -> ids, attention mask, and offsets.

pub mod tokenizer_options;

use std::sync::Arc;

#[doc(inline)]
pub use tokenizer_options::{Padding, TokenizerOptions};

use crate::{
    bpe::{BpeEngine, MergeCache, ShardedMergeCache},
    encoders::{
        BatchEncoding,
        CharOffsets,
        Encoding,
        TextEncoder,
        encode_batch_sequential,
        trim_space_offsets,
    },
    errors::{RobertaTokError, TokResult},
    spanning::{Pretokenizer, SpanRef},
    types::TokenId,
    vocab::{ByteEncoder, MergeTable, SpecialTokens, Vocabulary},
};

/// Byte-level BPE tokenizer producing `RoBERTa` ids, masks, and offsets.
///
/// Immutable once built; safe to share across threads.
pub struct RobertaTokenizer<C: MergeCache = ShardedMergeCache> {
    options: TokenizerOptions,
    vocab: Arc<Vocabulary>,
    byte_encoder: ByteEncoder,
    pretokenizer: Pretokenizer,
    bpe: BpeEngine<C>,
    specials: SpecialTokens,

    /// Token id of each merge symbol, indexed by symbol id.
    symbol_tokens: Vec<Option<TokenId>>,
}

impl<C: MergeCache> core::fmt::Debug for RobertaTokenizer<C> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("RobertaTokenizer")
            .field("vocab_size", &self.vocab.len())
            .field("merges", &self.bpe.merges().merge_count())
            .field("options", &self.options)
            .finish()
    }
}

impl RobertaTokenizer {
    /// Build a tokenizer from the operator construction inputs.
    ///
    /// ## Arguments
    /// * `vocab_bytes` - A json ``{ token: id }`` object.
    /// * `merges_bytes` - The merges file.
    /// * `padding_length` - ``-1`` disables padding and truncation.
    pub fn from_bytes(
        vocab_bytes: &[u8],
        merges_bytes: &[u8],
        padding_length: i64,
    ) -> TokResult<Self> {
        TokenizerOptions::default()
            .with_padding_length(padding_length)?
            .build_from_bytes(vocab_bytes, merges_bytes)
    }
}

impl<C: MergeCache> RobertaTokenizer<C> {
    /// Build a tokenizer.
    ///
    /// ## Arguments
    /// * `options` - The tokenizer options.
    /// * `vocab` - The shared vocabulary.
    /// * `merges` - The shared merge table.
    /// * `cache` - The merge result cache.
    ///
    /// ## Returns
    /// A config error if the options do not fit the vocabulary.
    pub fn new(
        options: TokenizerOptions,
        vocab: Arc<Vocabulary>,
        merges: Arc<MergeTable>,
        cache: C,
    ) -> TokResult<Self> {
        let specials = options.special_tokens.resolve(&vocab)?;

        let match_specials: Vec<&str> = if options.match_special_tokens {
            specials.iter().map(|t| t.text.as_str()).collect()
        } else {
            vec![]
        };
        let pretokenizer = Pretokenizer::roberta(&match_specials, None)?
            .with_lstrip(options.special_tokens.lstrip.as_slice());

        let symbol_tokens = merges.symbols().map(|s| vocab.token_to_id(s)).collect();

        let tokenizer = Self {
            options,
            vocab,
            byte_encoder: ByteEncoder::new(),
            pretokenizer,
            bpe: BpeEngine::new(merges, cache),
            specials,
            symbol_tokens,
        };
        tokenizer.check_padding(tokenizer.options.padding)?;

        log::info!(
            "built tokenizer: {} tokens, {} merges, padding {}",
            tokenizer.vocab.len(),
            tokenizer.bpe.merges().merge_count(),
            i64::from(tokenizer.options.padding)
        );
        Ok(tokenizer)
    }

    /// Get the options.
    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// Get the vocabulary.
    pub fn vocab(&self) -> &Arc<Vocabulary> {
        &self.vocab
    }

    /// Get the merge table.
    pub fn merges(&self) -> &Arc<MergeTable> {
        self.bpe.merges()
    }

    /// Get the BPE engine.
    pub fn bpe(&self) -> &BpeEngine<C> {
        &self.bpe
    }

    /// Get the pretokenizer.
    pub fn pretokenizer(&self) -> &Pretokenizer {
        &self.pretokenizer
    }

    /// Get the byte alphabet.
    pub fn byte_encoder(&self) -> &ByteEncoder {
        &self.byte_encoder
    }

    /// Get the resolved special tokens.
    pub fn special_tokens(&self) -> &SpecialTokens {
        &self.specials
    }

    /// The number of special tokens added around each sequence.
    pub fn added_special_count(&self) -> usize {
        if self.options.add_special_tokens {
            self.specials.wrapper_count()
        } else {
            0
        }
    }

    fn check_padding(
        &self,
        padding: Padding,
    ) -> TokResult<()> {
        let Padding::Fixed(len) = padding else {
            return Ok(());
        };
        if self.specials.pad.is_none() {
            return Err(RobertaTokError::InvalidPaddingLength {
                value: i64::from(padding),
                reason: "fixed padding needs a pad token",
            });
        }
        if len < self.added_special_count() {
            return Err(RobertaTokError::InvalidPaddingLength {
                value: i64::from(padding),
                reason: "shorter than the added special tokens",
            });
        }
        Ok(())
    }

    /// Encode a string with an explicit padding policy.
    ///
    /// ## Arguments
    /// * `text` - The text to encode.
    /// * `padding` - Overrides the configured padding for this call.
    pub fn encode_with_padding(
        &self,
        text: &str,
        padding: Padding,
    ) -> TokResult<Encoding> {
        self.check_padding(padding)?;
        self.encode_str(text, padding)
    }

    fn encode_str(
        &self,
        text: &str,
        padding: Padding,
    ) -> TokResult<Encoding> {
        let offsets = CharOffsets::new(text);

        let mut body = Encoding::with_capacity(text.len() / 3 + 1);
        let mut chunk_count = 0;
        self.pretokenizer
            .split_spans(text)
            .into_iter()
            .try_for_each(|span| {
                chunk_count += 1;
                let range = span.range();
                if let SpanRef::Special(_) = span
                    && let Some(special) = self.specials.lookup(text[range.clone()].trim_start())
                {
                    body.push_special(special, offsets.char_span(range)?);
                    return Ok(());
                }
                self.encode_append_chunk(text, range, &offsets, &mut body)
            })?;

        log::trace!(
            "encoded {} chunks into {} subwords",
            chunk_count,
            body.len()
        );

        let wrap = self.options.add_special_tokens;
        let capacity = match padding {
            Padding::Fixed(len) => len,
            Padding::Disabled => body.len() + 2,
        };
        let mut encoding = Encoding::with_capacity(capacity);

        if wrap && let Some(bos) = &self.specials.bos {
            encoding.push_special(bos, (0, 0));
        }
        if let Padding::Fixed(len) = padding {
            body.truncate(len.saturating_sub(self.added_special_count()));
        }
        encoding.extend(body);
        if wrap && let Some(eos) = &self.specials.eos {
            encoding.push_special(eos, (0, 0));
        }

        if let Padding::Fixed(len) = padding
            && let Some(pad) = &self.specials.pad
        {
            encoding.pad_to(len, pad.id, &pad.text);
        }

        Ok(encoding)
    }

    /// Merge one chunk and append its subwords.
    fn encode_append_chunk(
        &self,
        text: &str,
        range: core::ops::Range<usize>,
        offsets: &CharOffsets,
        encoding: &mut Encoding,
    ) -> TokResult<()> {
        let merges = self.bpe.merges();
        let symbols = self.bpe.merge_symbols(&text[range.clone()]);

        let mut pos = range.start;
        for &symbol in symbols.iter() {
            let end = pos + merges.symbol_byte_len(symbol);
            let token = merges.symbol(symbol);

            let mut span = offsets.char_span(pos..end)?;
            if self.options.trim_offsets {
                span = trim_space_offsets(token, span);
            }

            let id = match self.symbol_tokens[symbol as usize] {
                Some(id) => id,
                None => {
                    log::trace!("unknown subword {token:?}");
                    self.specials.unk.id
                }
            };

            encoding.push_subword(id, token.to_string(), span);
            pos = end;
        }

        if pos != range.end {
            return Err(RobertaTokError::OffsetOutOfBounds {
                start: range.start,
                end: pos,
                len: text.len(),
            });
        }
        Ok(())
    }

    /// Encode a batch, failing on the first invalid text.
    ///
    /// ## Returns
    /// The batch, with the pad token set for [`BatchEncoding::to_dense`].
    pub fn try_encode_batch<S>(
        &self,
        batch: &[S],
    ) -> TokResult<BatchEncoding>
    where
        S: AsRef<[u8]> + Sync,
    {
        Ok(BatchEncoding::from_results(self.encode_batch(batch))?
            .with_pad_token(self.specials.pad.clone()))
    }

    /// Decode token ids back into text.
    ///
    /// ## Arguments
    /// * `ids` - The token ids.
    /// * `skip_special_tokens` - Drop special token ids from the output.
    ///
    /// ## Returns
    /// The text, with invalid UTF-8 replaced; or `UnknownTokenId`.
    pub fn decode(
        &self,
        ids: &[TokenId],
        skip_special_tokens: bool,
    ) -> TokResult<String> {
        let mut bytes = Vec::with_capacity(ids.len() * 4);
        for &id in ids {
            let token = self
                .vocab
                .id_to_token(id)
                .ok_or(RobertaTokError::UnknownTokenId(id))?;

            if self.specials.is_special_id(id) {
                if !skip_special_tokens {
                    bytes.extend_from_slice(token.as_bytes());
                }
                continue;
            }

            match self.byte_encoder.decode(token) {
                Some(raw) => bytes.extend(raw),
                None => bytes.extend_from_slice(token.as_bytes()),
            }
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl<C: MergeCache> TextEncoder for RobertaTokenizer<C> {
    fn encode_bytes(
        &self,
        text: &[u8],
    ) -> TokResult<Encoding> {
        let text = std::str::from_utf8(text)
            .map_err(|source| RobertaTokError::InvalidUtf8 {
                index: None,
                source,
            })?;
        self.encode_str(text, self.options.padding)
    }

    fn encode_batch<S>(
        &self,
        batch: &[S],
    ) -> Vec<TokResult<Encoding>>
    where
        S: AsRef<[u8]> + Sync,
    {
        #[cfg(feature = "rayon")]
        if self.options.parallel {
            return crate::rayon::par_encode_batch(self, batch);
        }
        encode_batch_sequential(self, batch)
    }
}
