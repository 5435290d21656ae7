//! # Vocabulary Loading
//!
//! Reads the ``vocab.json`` / ``merges.txt`` pair shipped with
//! byte-level BPE models.

use crate::{
    errors::TokResult,
    vocab::{ByteEncoder, MergeTable, Vocabulary},
};

/// Parse vocabulary and merge bytes.
///
/// ## Arguments
/// * `vocab_bytes` - A json ``{ token: id }`` object.
/// * `merges_bytes` - Newline separated ``"left right"`` pairs, in priority order.
///
/// ## Returns
/// The immutable ``(Vocabulary, MergeTable)`` pair, or a config error.
pub fn load_vocab_and_merges(
    vocab_bytes: &[u8],
    merges_bytes: &[u8],
) -> TokResult<(Vocabulary, MergeTable)> {
    let vocab = Vocabulary::from_json_slice(vocab_bytes)?;
    let merges = MergeTable::from_merges_slice(&ByteEncoder::new(), merges_bytes)?;

    log::debug!(
        "loaded vocab ({} tokens) and merges ({} pairs, {} symbols)",
        vocab.len(),
        merges.merge_count(),
        merges.symbol_count()
    );

    Ok((vocab, merges))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorKind, RobertaTokError};

    #[test]
    fn test_load() {
        let (vocab, merges) =
            load_vocab_and_merges(br#"{"a": 0, "b": 1, "ab": 2}"#, b"#version: 0.2\na b\n").unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(merges.merge_count(), 1);
        assert_eq!(
            vocab.token_to_id(merges.symbol(merges.symbol_count() as u32 - 1)),
            Some(2)
        );
    }

    #[test]
    fn test_load_errors() {
        let err = load_vocab_and_merges(b"{}", b"a b c").unwrap_err();
        assert!(matches!(err, RobertaTokError::MalformedMerge { .. }));
        assert_eq!(err.kind(), ErrorKind::Config);

        let err = load_vocab_and_merges(b"null", b"").unwrap_err();
        assert!(matches!(err, RobertaTokError::VocabNotObject { found: "null" }));
    }
}
