//! # `RoBERTa` Word Lexer
//!
//! Compile-time DFA lexer for
//! [`ROBERTA_WORD_PATTERN`](crate::spanning::ROBERTA_WORD_PATTERN).
//!
//! Logos takes the longest match at each position and has no lookahead,
//! so the ``\s+(?!\S)`` branch is emulated: whitespace runs are buffered
//! and their last char is handed to the following word.

use core::ops::Range;

use logos::Logos;

use crate::spanning::{SpanLexer, SpanRef};

/// Logos token for the word split pattern.
///
/// | Regex branch               | Logos variant |
/// |----------------------------|---------------|
/// | `'s`, `'t`, ..., `'d`      | Contraction   |
/// | ` ?\p{L}+`                 | Letters       |
/// | ` ?\p{N}+`                 | Digits        |
/// | ` ?[^\s\p{L}\p{N}]+`       | Punctuation   |
/// | `\s+(?!\S)`, `\s+`         | Whitespace    |
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
enum RobertaToken {
    // Case-sensitive, unlike the cl100k family.
    #[regex(r"'([stdm]|re|ve|ll)")]
    Contraction,

    #[regex(r" ?\p{Letter}+")]
    Letters,

    #[regex(r" ?\p{Number}+")]
    Digits,

    #[regex(r" ?[^\s\p{Letter}\p{Number}]+")]
    Punctuation,

    #[regex(r"\s+")]
    Whitespace,
}

/// Start of the last char of a non-empty range.
fn last_char_start(
    text: &[u8],
    range: &Range<usize>,
) -> usize {
    let mut pos = range.end - 1;
    while pos > range.start && (text[pos] & 0xC0) == 0x80 {
        pos -= 1;
    }
    pos
}

/// A [`SpanLexer`] for the GPT-2 / `RoBERTa` word pattern.
///
/// Linear in the input; long runs of one char class are a single token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RobertaLexer;

impl SpanLexer for RobertaLexer {
    fn for_each_word(
        &self,
        text: &str,
        offset: usize,
        f: &mut dyn FnMut(SpanRef) -> bool,
    ) -> (bool, usize) {
        let bytes = text.as_bytes();
        let mut last = 0;

        // A whitespace run whose last char may still join the next word.
        let mut pending_ws: Option<Range<usize>> = None;

        // The letters of a contraction whose quote went to a preceding space;
        // they continue into an adjacent letter run.
        let mut pending_letters: Option<Range<usize>> = None;

        macro_rules! emit {
            ($kind:ident, $r:expr) => {{
                let r: Range<usize> = $r;
                if !f(SpanRef::$kind(r.start + offset..r.end + offset)) {
                    return (false, r.start);
                }
            }};
        }

        for (token, range) in RobertaToken::lexer(text).spanned() {
            let skipped = last < range.start;

            if let Some(letters) = pending_letters.take() {
                if !skipped
                    && token == Ok(RobertaToken::Letters)
                    && bytes[range.start] != b' '
                {
                    emit!(Word, letters.start..range.end);
                    last = range.end;
                    continue;
                }
                emit!(Word, letters);
            }

            if skipped {
                if let Some(ws) = pending_ws.take() {
                    emit!(Word, ws);
                }
                emit!(Gap, last..range.start);
            }
            last = range.end;

            let token = match token {
                Ok(RobertaToken::Whitespace) => {
                    if let Some(ws) = pending_ws.take() {
                        emit!(Word, ws);
                    }
                    pending_ws = Some(range);
                    continue;
                }
                Ok(token) => token,
                Err(()) => {
                    if let Some(ws) = pending_ws.take() {
                        emit!(Word, ws);
                    }
                    emit!(Gap, range);
                    continue;
                }
            };

            if let Some(ws) = pending_ws.take() {
                let tail = last_char_start(bytes, &ws);
                if tail > ws.start {
                    emit!(Word, ws.start..tail);
                    if bytes[tail] == b' ' {
                        if token == RobertaToken::Contraction {
                            // A spaced quote is punctuation; the suffix starts a letter run.
                            emit!(Word, tail..range.start + 1);
                            pending_letters = Some(range.start + 1..range.end);
                        } else {
                            emit!(Word, tail..range.end);
                        }
                        continue;
                    }
                }
                emit!(Word, tail..ws.end);
            }
            emit!(Word, range);
        }

        if let Some(letters) = pending_letters.take() {
            emit!(Word, letters);
        }
        if let Some(ws) = pending_ws.take() {
            emit!(Word, ws);
        }
        if last < text.len() {
            emit!(Gap, last..text.len());
        }

        (true, text.len())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::spanning::ROBERTA_WORD_PATTERN;

    fn lexer_words(text: &str) -> Vec<&str> {
        let mut words = vec![];
        let (completed, consumed) = RobertaLexer.for_each_word(text, 0, &mut |span| {
            assert!(matches!(span, SpanRef::Word(_)), "unexpected {span:?}");
            words.push(&text[span.range()]);
            true
        });
        assert!(completed);
        assert_eq!(consumed, text.len());
        words
    }

    fn regex_words(text: &str) -> Vec<&str> {
        fancy_regex::Regex::new(ROBERTA_WORD_PATTERN)
            .unwrap()
            .find_iter(text)
            .map(|m| m.unwrap().as_str())
            .collect()
    }

    #[test]
    fn test_basic_splitting() {
        assert_eq!(lexer_words("lower newer"), vec!["lower", " newer"]);
        assert_eq!(
            lexer_words("it's  2023!?"),
            vec!["it", "'s", " ", " 2023", "!?"]
        );
        assert_eq!(lexer_words("a \n"), vec!["a", " \n"]);
        assert_eq!(lexer_words("\ta"), vec!["\t", "a"]);
        assert_eq!(lexer_words("\t a"), vec!["\t", " a"]);
        assert_eq!(lexer_words(" \u{a0}a"), vec![" ", "\u{a0}", "a"]);
        assert!(lexer_words("").is_empty());
    }

    #[test]
    fn test_spaced_contractions() {
        assert_eq!(lexer_words(" 's"), vec![" '", "s"]);
        assert_eq!(lexer_words("  's"), vec![" ", " '", "s"]);
        assert_eq!(lexer_words("  'sup"), vec![" ", " '", "sup"]);
        assert_eq!(lexer_words("  'rex"), vec![" ", " '", "rex"]);
        assert_eq!(lexer_words("  's x"), vec![" ", " '", "s", " x"]);
        assert_eq!(lexer_words("  's1"), vec![" ", " '", "s", "1"]);
        assert_eq!(lexer_words("  \t's"), vec!["  ", "\t", "'s"]);
        assert_eq!(lexer_words("'sup"), vec!["'s", "up"]);
        assert_eq!(lexer_words("!'s"), vec!["!'", "s"]);
        assert_eq!(lexer_words("'S"), vec!["'", "S"]);
    }

    #[test]
    fn test_offset_and_halt() {
        let mut spans = vec![];
        let (completed, consumed) = RobertaLexer.for_each_word("ab  cd", 10, &mut |span| {
            spans.push(span);
            spans.len() < 2
        });
        assert!(!completed);
        assert_eq!(consumed, 2);
        assert_eq!(spans, vec![SpanRef::Word(10..12), SpanRef::Word(12..13)]);
    }

    #[test]
    fn test_long_runs() {
        for text in [
            "a".repeat(1_000_000),
            "7".repeat(1_000_000),
            format!("{}a", " ".repeat(1_000_000)),
        ] {
            let mut count = 0;
            let (completed, consumed) = RobertaLexer.for_each_word(&text, 0, &mut |_| {
                count += 1;
                true
            });
            assert!(completed);
            assert_eq!(consumed, text.len());
            assert!(count <= 2);
        }
    }

    #[test]
    fn test_matches_regex_samples() {
        let cases = [
            "Hello world",
            "I can feel the magic, can you?",
            "One Microsoft Way, Redmond, WA",
            "9 8 7 - 6 5 4 - 3 2 1 0",
            "It's a beautiful day, and I'll be taking my 3 dogs for a walk.",
            "  multiple   spaces  ",
            "line1\nline2\r\nline3",
            "caf\u{00e9} na\u{00ef}ve \u{4f60}\u{597d}",
            "emoji: \u{1f600}\u{1f680}\u{1f4a1}",
            "mixed: hello\u{00a0}world\u{2003}wide",
            "\t\ttabs\tand\tspaces ",
            "$$$!!!...---",
            "  'The quick",
            " \"sources,\" then",
            "  \u{2014}hello world",
            "we'll've they'RE 'll",
        ];
        for text in cases {
            assert_eq!(lexer_words(text), regex_words(text), "{text:?}");
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(2000))]

        #[test]
        fn matches_regex_on_tricky_alphabet(text in "[ a-zA-Z0-9'!.,\n\t\u{a0}\u{e9}\u{4f60}]{0,40}") {
            prop_assert_eq!(lexer_words(&text), regex_words(&text));
        }

        #[test]
        fn matches_regex_on_printable_text(text in "[\\PC\\n\\r\\t]{0,120}") {
            prop_assert_eq!(lexer_words(&text), regex_words(&text));
        }
    }
}
