//! # Token Vocabulary

use serde_json::Value;

use crate::{
    errors::{RobertaTokError, TokResult},
    types::{CommonHashMap, TokenId},
};

/// Bijective ``token <-> id`` mapping over the dense id range ``[0, len)``.
///
/// Token strings are in the byte-encoded alphabet of
/// [`ByteEncoder`](crate::vocab::ByteEncoder).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vocabulary {
    token_ids: CommonHashMap<String, TokenId>,
    id_tokens: CommonHashMap<TokenId, String>,
}

/// Name a json value's type, for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Convert a json id value into a [`TokenId`].
fn parse_token_id(
    token: &str,
    value: &Value,
) -> TokResult<TokenId> {
    if let Some(id) = value.as_u64() {
        return TokenId::try_from(id).map_err(|_| RobertaTokError::TokenIdOverflow {
            token: token.to_string(),
            id,
        });
    }
    if let Some(id) = value.as_i64() {
        return Err(RobertaTokError::NegativeTokenId {
            token: token.to_string(),
            id,
        });
    }
    Err(RobertaTokError::InvalidTokenId {
        token: token.to_string(),
        value: value.to_string(),
    })
}

impl Vocabulary {
    /// Build a vocabulary from ``(token, id)`` pairs.
    ///
    /// ## Arguments
    /// * `pairs` - The ``(token, id)`` pairs.
    ///
    /// ## Returns
    /// `DuplicateTokenId` if two tokens share an id;
    /// `TokenIdOutOfRange` if the ids do not cover ``[0, len)``.
    pub fn from_pairs<I, S>(pairs: I) -> TokResult<Self>
    where
        I: IntoIterator<Item = (S, TokenId)>,
        S: Into<String>,
    {
        let mut vocab = Self::default();
        for (token, id) in pairs {
            vocab.insert(token.into(), id)?;
        }
        vocab.check_dense()
    }

    /// Parse a json ``{ token: id }`` object.
    ///
    /// ## Arguments
    /// * `bytes` - The raw json bytes.
    ///
    /// ## Returns
    /// The vocabulary, or a config error describing the offending entry.
    pub fn from_json_slice(bytes: &[u8]) -> TokResult<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        let Value::Object(entries) = value else {
            return Err(RobertaTokError::VocabNotObject {
                found: json_type_name(&value),
            });
        };

        let mut vocab = Self {
            token_ids: CommonHashMap::with_capacity(entries.len()),
            id_tokens: CommonHashMap::with_capacity(entries.len()),
        };
        for (token, value) in entries {
            let id = parse_token_id(&token, &value)?;
            vocab.insert(token, id)?;
        }
        vocab.check_dense()
    }

    /// Ids are unique, so they cover ``[0, len)`` iff none reaches `len`.
    fn check_dense(self) -> TokResult<Self> {
        let size = self.len();
        if let Some((id, token)) = self
            .id_tokens
            .iter()
            .filter(|&(&id, _)| id as usize >= size)
            .min_by_key(|&(&id, _)| id)
        {
            return Err(RobertaTokError::TokenIdOutOfRange {
                token: token.clone(),
                id: *id,
                size,
            });
        }
        Ok(self)
    }

    fn insert(
        &mut self,
        token: String,
        id: TokenId,
    ) -> TokResult<()> {
        if let Some(first) = self.id_tokens.get(&id) {
            if first != &token {
                return Err(RobertaTokError::DuplicateTokenId {
                    id,
                    first: first.clone(),
                    second: token,
                });
            }
            return Ok(());
        }
        if let Some(old_id) = self.token_ids.insert(token.clone(), id) {
            self.id_tokens.remove(&old_id);
        }
        self.id_tokens.insert(id, token);
        Ok(())
    }

    /// The number of tokens.
    pub fn len(&self) -> usize {
        self.token_ids.len()
    }

    /// Is the vocabulary empty?
    pub fn is_empty(&self) -> bool {
        self.token_ids.is_empty()
    }

    /// Look up the id of a token.
    pub fn token_to_id(
        &self,
        token: &str,
    ) -> Option<TokenId> {
        self.token_ids.get(token).copied()
    }

    /// Look up the token for an id.
    pub fn id_to_token(
        &self,
        id: TokenId,
    ) -> Option<&str> {
        self.id_tokens.get(&id).map(String::as_str)
    }
}
