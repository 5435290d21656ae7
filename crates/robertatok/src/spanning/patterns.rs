//! # Word Split Patterns

use crate::join_patterns;

/// The GPT-2 / `RoBERTa` word split pattern.
///
/// Keeps contractions, letter runs, digit runs, and punctuation runs as
/// single chunks, each with at most one leading space. A whitespace run
/// gives its last space to the following word.
///
/// The lookahead needs a backtracking engine; [`RobertaLexer`](crate::spanning::RobertaLexer)
/// implements the same split without one.
pub const ROBERTA_WORD_PATTERN: &str = join_patterns!(
    r"'s",
    r"'t",
    r"'re",
    r"'ve",
    r"'m",
    r"'ll",
    r"'d",
    r" ?\p{L}+",
    r" ?\p{N}+",
    r" ?[^\s\p{L}\p{N}]+",
    r"\s+(?!\S)",
    r"\s+",
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_shape() {
        assert!(ROBERTA_WORD_PATTERN.starts_with("'s|'t|'re"));
        assert!(ROBERTA_WORD_PATTERN.ends_with(r"|\s+"));
        assert_eq!(ROBERTA_WORD_PATTERN.split('|').count(), 12);

        // No lookaround in the linear engine.
        assert!(::regex::Regex::new(ROBERTA_WORD_PATTERN).is_err());
        assert!(fancy_regex::Regex::new(ROBERTA_WORD_PATTERN).is_ok());
    }
}
