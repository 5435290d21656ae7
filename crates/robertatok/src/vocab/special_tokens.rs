//! # Special Tokens
//!
//! [`SpecialTokensConfig`] names the special tokens by string;
//! [`SpecialTokens`] is that configuration resolved against a [`Vocabulary`].

use serde::{Deserialize, Serialize};

use crate::{
    errors::{RobertaTokError, TokResult},
    types::TokenId,
    vocab::Vocabulary,
};

/// Special token strings, by role.
///
/// Defaults to the `RoBERTa` conventions, where `<mask>` strips left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialTokensConfig {
    /// Sequence start marker.
    pub bos: Option<String>,

    /// Sequence end marker.
    pub eos: Option<String>,

    /// Padding token.
    pub pad: Option<String>,

    /// Fallback for subwords missing from the vocabulary.
    pub unk: String,

    /// Mask token.
    pub mask: Option<String>,

    /// Special tokens which absorb the whitespace before them when found in text.
    ///
    /// The absorbed whitespace is part of the token's offsets. Defaults to
    /// ``["<mask>"]``.
    pub lstrip: Vec<String>,
}

impl Default for SpecialTokensConfig {
    fn default() -> Self {
        Self {
            bos: Some("<s>".to_string()),
            eos: Some("</s>".to_string()),
            pad: Some("<pad>".to_string()),
            unk: "<unk>".to_string(),
            mask: Some("<mask>".to_string()),
            lstrip: vec!["<mask>".to_string()],
        }
    }
}

impl SpecialTokensConfig {
    /// Only the `unk` token; no bos, eos, pad, or mask.
    pub fn unk_only<S: Into<String>>(unk: S) -> Self {
        Self {
            bos: None,
            eos: None,
            pad: None,
            unk: unk.into(),
            mask: None,
            lstrip: vec![],
        }
    }

    /// Set the bos token.
    pub fn with_bos<S: Into<String>>(
        mut self,
        bos: Option<S>,
    ) -> Self {
        self.bos = bos.map(Into::into);
        self
    }

    /// Set the eos token.
    pub fn with_eos<S: Into<String>>(
        mut self,
        eos: Option<S>,
    ) -> Self {
        self.eos = eos.map(Into::into);
        self
    }

    /// Set the pad token.
    pub fn with_pad<S: Into<String>>(
        mut self,
        pad: Option<S>,
    ) -> Self {
        self.pad = pad.map(Into::into);
        self
    }

    /// Set the mask token.
    pub fn with_mask<S: Into<String>>(
        mut self,
        mask: Option<S>,
    ) -> Self {
        self.mask = mask.map(Into::into);
        self
    }

    /// Set the tokens which strip whitespace to their left.
    pub fn with_lstrip<S: Into<String>>(
        mut self,
        lstrip: impl IntoIterator<Item = S>,
    ) -> Self {
        self.lstrip = lstrip.into_iter().map(Into::into).collect();
        self
    }

    /// Resolve the configured strings to ids.
    ///
    /// ## Returns
    /// `MissingSpecialToken` for the first configured token absent from `vocab`.
    pub fn resolve(
        &self,
        vocab: &Vocabulary,
    ) -> TokResult<SpecialTokens> {
        let lookup = |role: &'static str, token: &str| -> TokResult<SpecialToken> {
            vocab
                .token_to_id(token)
                .map(|id| SpecialToken {
                    text: token.to_string(),
                    id,
                })
                .ok_or_else(|| RobertaTokError::MissingSpecialToken {
                    role,
                    token: token.to_string(),
                })
        };
        let lookup_opt = |role: &'static str, token: &Option<String>| {
            token.as_deref().map(|t| lookup(role, t)).transpose()
        };

        Ok(SpecialTokens {
            bos: lookup_opt("bos", &self.bos)?,
            eos: lookup_opt("eos", &self.eos)?,
            pad: lookup_opt("pad", &self.pad)?,
            unk: lookup("unk", &self.unk)?,
            mask: lookup_opt("mask", &self.mask)?,
        })
    }
}

/// A special token with its vocabulary id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpecialToken {
    /// The token string.
    pub text: String,

    /// The token id.
    pub id: TokenId,
}

/// Resolved special tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialTokens {
    /// Sequence start marker.
    pub bos: Option<SpecialToken>,

    /// Sequence end marker.
    pub eos: Option<SpecialToken>,

    /// Padding token.
    pub pad: Option<SpecialToken>,

    /// Unknown-subword fallback.
    pub unk: SpecialToken,

    /// Mask token.
    pub mask: Option<SpecialToken>,
}

impl SpecialTokens {
    /// Iterate over all configured special tokens.
    pub fn iter(&self) -> impl Iterator<Item = &SpecialToken> {
        [
            self.bos.as_ref(),
            self.eos.as_ref(),
            self.pad.as_ref(),
            Some(&self.unk),
            self.mask.as_ref(),
        ]
        .into_iter()
        .flatten()
    }

    /// Is `id` one of the special token ids?
    pub fn is_special_id(
        &self,
        id: TokenId,
    ) -> bool {
        self.iter().any(|t| t.id == id)
    }

    /// Look up a special token by its exact text.
    pub fn lookup(
        &self,
        text: &str,
    ) -> Option<&SpecialToken> {
        self.iter().find(|t| t.text == text)
    }

    /// The number of special tokens wrapped around every sequence.
    pub fn wrapper_count(&self) -> usize {
        self.bos.is_some() as usize + self.eos.is_some() as usize
    }
}
