//! # Encoding Results
//!
//! Row-aligned per-token outputs: every vector in an [`Encoding`]
//! has one entry per token.

use serde::{Deserialize, Serialize};

use crate::{
    errors::TokResult,
    types::{CharSpan, TokenId},
    vocab::SpecialToken,
};

/// The encoded form of one text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encoding {
    /// Token ids.
    pub input_ids: Vec<TokenId>,

    /// 1 for real tokens, 0 for padding.
    pub attention_mask: Vec<u8>,

    /// ``(start, end)`` character spans; ``(0, 0)`` for added specials and padding.
    pub offset_mapping: Vec<CharSpan>,

    /// Token strings, in the byte-encoded alphabet.
    pub tokens: Vec<String>,

    /// 1 for special and padding tokens, 0 for subwords.
    pub special_tokens_mask: Vec<u8>,
}

impl Encoding {
    /// Create an empty encoding with room for `capacity` tokens.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            input_ids: Vec::with_capacity(capacity),
            attention_mask: Vec::with_capacity(capacity),
            offset_mapping: Vec::with_capacity(capacity),
            tokens: Vec::with_capacity(capacity),
            special_tokens_mask: Vec::with_capacity(capacity),
        }
    }

    /// The number of tokens.
    pub fn len(&self) -> usize {
        self.input_ids.len()
    }

    /// Is the encoding empty?
    pub fn is_empty(&self) -> bool {
        self.input_ids.is_empty()
    }

    /// Append a subword.
    pub fn push_subword(
        &mut self,
        id: TokenId,
        token: String,
        span: CharSpan,
    ) {
        self.push(id, token, span, 1, 0);
    }

    /// Append a special token.
    pub fn push_special(
        &mut self,
        special: &SpecialToken,
        span: CharSpan,
    ) {
        self.push(special.id, special.text.clone(), span, 1, 1);
    }

    fn push(
        &mut self,
        id: TokenId,
        token: String,
        span: CharSpan,
        attention: u8,
        special: u8,
    ) {
        self.input_ids.push(id);
        self.attention_mask.push(attention);
        self.offset_mapping.push(span);
        self.tokens.push(token);
        self.special_tokens_mask.push(special);
    }

    /// Append another encoding's rows.
    pub fn extend(
        &mut self,
        other: Encoding,
    ) {
        self.input_ids.extend(other.input_ids);
        self.attention_mask.extend(other.attention_mask);
        self.offset_mapping.extend(other.offset_mapping);
        self.tokens.extend(other.tokens);
        self.special_tokens_mask.extend(other.special_tokens_mask);
    }

    /// Keep only the first `len` rows.
    pub fn truncate(
        &mut self,
        len: usize,
    ) {
        self.input_ids.truncate(len);
        self.attention_mask.truncate(len);
        self.offset_mapping.truncate(len);
        self.tokens.truncate(len);
        self.special_tokens_mask.truncate(len);
    }

    /// Right-pad to `len` rows; attention 0, offset ``(0, 0)``.
    ///
    /// ## Arguments
    /// * `len` - The target length; no-op if already at least this long.
    /// * `pad_id` - The padding token id.
    /// * `pad_token` - The padding token string.
    pub fn pad_to(
        &mut self,
        len: usize,
        pad_id: TokenId,
        pad_token: &str,
    ) {
        while self.len() < len {
            self.push(pad_id, pad_token.to_string(), (0, 0), 0, 1);
        }
    }

    /// The number of non-padding tokens.
    pub fn attended_len(&self) -> usize {
        self.attention_mask.iter().filter(|&&m| m == 1).count()
    }
}

/// Row-aligned encodings for a batch of texts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchEncoding {
    /// The per-text encodings, in batch order.
    pub encodings: Vec<Encoding>,

    /// The token used by [`Self::to_dense`]; id 0 and an empty string when unset.
    pub pad_token: Option<SpecialToken>,
}

impl BatchEncoding {
    /// Collect per-text results.
    ///
    /// ## Returns
    /// The batch, or the first failing element's error, tagged with its index.
    pub fn from_results<I>(results: I) -> TokResult<Self>
    where
        I: IntoIterator<Item = TokResult<Encoding>>,
    {
        let encodings = results
            .into_iter()
            .enumerate()
            .map(|(idx, r)| r.map_err(|e| e.with_batch_index(idx)))
            .collect::<TokResult<Vec<_>>>()?;
        Ok(Self {
            encodings,
            pad_token: None,
        })
    }

    /// Set the token used by [`Self::to_dense`].
    pub fn with_pad_token(
        mut self,
        pad_token: Option<SpecialToken>,
    ) -> Self {
        self.pad_token = pad_token;
        self
    }

    /// The number of texts.
    pub fn len(&self) -> usize {
        self.encodings.len()
    }

    /// Is the batch empty?
    pub fn is_empty(&self) -> bool {
        self.encodings.is_empty()
    }

    /// The longest row length.
    pub fn max_len(&self) -> usize {
        self.encodings.iter().map(Encoding::len).max().unwrap_or(0)
    }

    /// Pad every row to the longest row.
    pub fn to_dense(&self) -> BatchEncoding {
        let len = self.max_len();
        let (pad_id, pad_text) = match &self.pad_token {
            Some(t) => (t.id, t.text.as_str()),
            None => (0, ""),
        };

        let mut dense = self.clone();
        for encoding in &mut dense.encodings {
            encoding.pad_to(len, pad_id, pad_text);
        }
        dense
    }

    /// Token ids, widened to `i64`.
    pub fn input_ids_i64(&self) -> Vec<Vec<i64>> {
        self.encodings
            .iter()
            .map(|e| e.input_ids.iter().map(|&id| id as i64).collect())
            .collect()
    }

    /// Attention masks, widened to `i64`.
    pub fn attention_mask_i64(&self) -> Vec<Vec<i64>> {
        self.encodings
            .iter()
            .map(|e| e.attention_mask.iter().map(|&m| m as i64).collect())
            .collect()
    }

    /// Offset mappings, as ``[start, end]`` `i64` pairs.
    pub fn offset_mapping_i64(&self) -> Vec<Vec<[i64; 2]>> {
        self.encodings
            .iter()
            .map(|e| {
                e.offset_mapping
                    .iter()
                    .map(|&(s, t)| [s as i64, t as i64])
                    .collect()
            })
            .collect()
    }
}
