//! # Error Types

/// The three failure categories a caller can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed vocabulary, merges, or options; fatal to construction.
    Config,

    /// A single invocation input was rejected.
    Input,

    /// An internal invariant was violated.
    Encoding,
}

/// Errors from robertatok operations.
#[derive(Debug, thiserror::Error)]
pub enum RobertaTokError {
    /// The vocabulary bytes are not valid JSON.
    #[error("vocab is not valid json: {0}")]
    VocabParse(#[from] serde_json::Error),

    /// The vocabulary JSON is not a `{ token: id }` object.
    #[error("vocab must be a json object of token -> id, found {found}")]
    VocabNotObject {
        /// The json type that was found instead.
        found: &'static str,
    },

    /// A vocabulary id is not an integer.
    #[error("vocab token {token:?} has non-integer id {value}")]
    InvalidTokenId {
        /// The offending token.
        token: String,
        /// The offending value, as json.
        value: String,
    },

    /// A vocabulary id is negative.
    #[error("vocab token {token:?} has negative id {id}")]
    NegativeTokenId {
        /// The offending token.
        token: String,
        /// The offending id.
        id: i64,
    },

    /// A vocabulary id does not fit the token id type.
    #[error("vocab token {token:?} has id {id} which exceeds the token id range")]
    TokenIdOverflow {
        /// The offending token.
        token: String,
        /// The offending id.
        id: u64,
    },

    /// Two vocabulary tokens share one id.
    #[error("vocab id {id} is used by both {first:?} and {second:?}")]
    DuplicateTokenId {
        /// The shared id.
        id: u32,
        /// The first token seen with the id.
        first: String,
        /// The second token seen with the id.
        second: String,
    },

    /// The vocabulary ids do not form the dense range ``[0, size)``.
    #[error("vocab token {token:?} has id {id}, outside the dense id range 0..{size}")]
    TokenIdOutOfRange {
        /// The offending token.
        token: String,
        /// The offending id.
        id: u32,
        /// The vocabulary size.
        size: usize,
    },

    /// The merges bytes are not valid UTF-8.
    #[error("merges are not valid utf-8: {0}")]
    MergesNotUtf8(#[source] std::str::Utf8Error),

    /// A merge line does not hold exactly two symbols.
    #[error("merge line {line} must hold exactly two symbols: {content:?}")]
    MalformedMerge {
        /// The 1-based line number.
        line: usize,
        /// The offending line.
        content: String,
    },

    /// A configured special token is missing from the vocabulary.
    #[error("special token {role} {token:?} is not in the vocab")]
    MissingSpecialToken {
        /// The role of the token (bos, eos, ...).
        role: &'static str,
        /// The configured token string.
        token: String,
    },

    /// The padding length is not usable.
    #[error("invalid padding length {value}: {reason}")]
    InvalidPaddingLength {
        /// The requested padding length.
        value: i64,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A split pattern failed to compile.
    #[error("invalid split pattern: {0}")]
    Pattern(String),

    /// An input is not valid UTF-8.
    #[error("input{} is not valid utf-8: {source}", .index.map(|i| format!(" {i}")).unwrap_or_default())]
    InvalidUtf8 {
        /// The batch index, when the input was part of a batch.
        index: Option<usize>,
        /// The underlying error.
        #[source]
        source: std::str::Utf8Error,
    },

    /// A computed offset lies outside the input.
    #[error("byte range {start}..{end} is outside input of {len} bytes")]
    OffsetOutOfBounds {
        /// Computed start byte.
        start: usize,
        /// Computed end byte.
        end: usize,
        /// Input length in bytes.
        len: usize,
    },

    /// A token id has no vocabulary entry.
    #[error("token id {0} is not in the vocab")]
    UnknownTokenId(u32),
}

impl RobertaTokError {
    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        use RobertaTokError::*;
        match self {
            VocabParse(_)
            | VocabNotObject { .. }
            | InvalidTokenId { .. }
            | NegativeTokenId { .. }
            | TokenIdOverflow { .. }
            | DuplicateTokenId { .. }
            | TokenIdOutOfRange { .. }
            | MergesNotUtf8(_)
            | MalformedMerge { .. }
            | MissingSpecialToken { .. }
            | InvalidPaddingLength { .. }
            | Pattern(_) => ErrorKind::Config,
            InvalidUtf8 { .. } => ErrorKind::Input,
            OffsetOutOfBounds { .. } | UnknownTokenId(_) => ErrorKind::Encoding,
        }
    }

    /// Attach a batch index to an input error.
    pub fn with_batch_index(
        self,
        batch_index: usize,
    ) -> Self {
        match self {
            RobertaTokError::InvalidUtf8 { source, .. } => RobertaTokError::InvalidUtf8 {
                index: Some(batch_index),
                source,
            },
            other => other,
        }
    }
}

/// Result type for robertatok operations.
pub type TokResult<T> = core::result::Result<T, RobertaTokError>;
