//! # Pretokenizer
//!
//! Splits text into word-like chunks, each carrying its byte range and
//! character span in the original text. Chunks partition the text.

use core::{fmt::Debug, num::NonZeroUsize, ops::Range};
use std::sync::Arc;

use crate::{
    concurrency::PoolToy,
    errors::{RobertaTokError, TokResult},
    regex::exact_match_union_regex_pattern,
    spanning::{RobertaLexer, SpanLexer},
    types::{CharSpan, CommonHashSet},
};

/// Span label and byte range.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpanRef {
    /// A word pattern match.
    Word(Range<usize>),

    /// A verbatim special token.
    ///
    /// For tokens which strip left, the range includes the absorbed whitespace.
    Special(Range<usize>),

    /// Text the word pattern did not match.
    Gap(Range<usize>),
}

impl SpanRef {
    /// The byte range of the span.
    pub fn range(&self) -> Range<usize> {
        match self {
            SpanRef::Word(range) | SpanRef::Special(range) | SpanRef::Gap(range) => range.clone(),
        }
    }

    /// Is this a special token span?
    pub fn is_special(&self) -> bool {
        matches!(self, SpanRef::Special(_))
    }
}

impl From<SpanRef> for Range<usize> {
    fn from(span: SpanRef) -> Self {
        match span {
            SpanRef::Word(range) => range,
            SpanRef::Special(range) => range,
            SpanRef::Gap(range) => range,
        }
    }
}

/// A pretokenized chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chunk<'t> {
    /// The chunk text.
    pub text: &'t str,

    /// The chunk kind and byte range.
    pub span: SpanRef,

    /// The ``(start, end)`` character span.
    pub char_span: CharSpan,
}

/// Word splitter with special token matching.
///
/// Special tokens are found first with an exact-match regex; the text
/// between them goes to the word lexer.
#[derive(Clone)]
pub struct Pretokenizer {
    /// Lexer for splitting words.
    word_lexer: Arc<dyn SpanLexer>,

    /// Regex for matching special tokens.
    special_re: Option<PoolToy<::regex::Regex>>,

    /// Special tokens which absorb the whitespace before them.
    lstrip: CommonHashSet<String>,
}

impl Debug for Pretokenizer {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("Pretokenizer")
            .field(
                "special_re",
                &self.special_re.as_ref().map(|p| p.get().as_str()),
            )
            .field("lstrip", &self.lstrip)
            .finish_non_exhaustive()
    }
}

impl Pretokenizer {
    /// Build a pretokenizer with the `RoBERTa` word lexer.
    ///
    /// ## Arguments
    /// * `specials` - Special token strings to split out verbatim.
    /// * `max_pool` - The maximum size of the regex pool; if None, lib defaults are used.
    pub fn roberta<S: AsRef<str>>(
        specials: &[S],
        max_pool: Option<NonZeroUsize>,
    ) -> TokResult<Self> {
        Self::new(Arc::new(RobertaLexer), specials, max_pool)
    }

    /// Build a pretokenizer around a word lexer.
    ///
    /// ## Arguments
    /// * `word_lexer` - The word splitter.
    /// * `specials` - Special token strings to split out verbatim.
    /// * `max_pool` - The maximum size of the regex pool; if None, lib defaults are used.
    pub fn new<S: AsRef<str>>(
        word_lexer: Arc<dyn SpanLexer>,
        specials: &[S],
        max_pool: Option<NonZeroUsize>,
    ) -> TokResult<Self> {
        let specials: Vec<&str> = specials
            .iter()
            .map(|s| s.as_ref())
            .filter(|s| !s.is_empty())
            .collect();

        let special_re = if specials.is_empty() {
            None
        } else {
            let pattern = exact_match_union_regex_pattern(&specials);
            let re = ::regex::Regex::new(&pattern)
                .map_err(|err| RobertaTokError::Pattern(format!("{pattern:?}: {err}")))?;
            Some(PoolToy::init(re, max_pool))
        };

        Ok(Self {
            word_lexer,
            special_re,
            lstrip: CommonHashSet::default(),
        })
    }

    /// Set the special tokens which absorb the whitespace before them.
    pub fn with_lstrip<S: AsRef<str>>(
        mut self,
        tokens: &[S],
    ) -> Self {
        self.lstrip = tokens.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }

    /// Get the word lexer.
    pub fn word_lexer(&self) -> &dyn SpanLexer {
        self.word_lexer.as_ref()
    }

    /// Get the optional special token regex.
    pub fn special_regex(&self) -> Option<&::regex::Regex> {
        self.special_re.as_ref().map(|p| p.get())
    }

    fn next_special_span(
        &self,
        text: &str,
    ) -> Option<Range<usize>> {
        let Range { start, end } = self.special_regex()?.find(text)?.range();
        if self.lstrip.contains(&text[start..end]) {
            Some(text[..start].trim_end().len()..end)
        } else {
            Some(start..end)
        }
    }

    /// Iterate over all split [`SpanRef`]s in the text.
    ///
    /// ## Arguments
    /// * `text` - the text to split.
    /// * `f` - the function to apply to each span;
    ///   halts when the function returns `false`.
    ///
    /// ## Returns
    /// ``(completed, consumed)`` where `consumed` is the number of bytes
    /// covered by spans accepted by `f`, and `completed` is if all spans
    /// were accepted.
    pub fn for_each_split_span(
        &self,
        text: &str,
        f: &mut dyn FnMut(SpanRef) -> bool,
    ) -> (bool, usize) {
        let mut current = text;
        let mut offset = 0;

        while let Some(Range { start, end }) = self.next_special_span(current) {
            let (cont, used) = self.word_lexer.for_each_word(&current[..start], offset, f);
            if !cont {
                return (false, offset + used);
            }

            if !f(SpanRef::Special(offset + start..offset + end)) {
                return (false, offset + start);
            }

            current = &current[end..];
            offset += end;
        }

        let (cont, used) = self.word_lexer.for_each_word(current, offset, f);
        (cont, offset + used)
    }

    /// Split text into spans.
    pub fn split_spans(
        &self,
        text: &str,
    ) -> Vec<SpanRef> {
        let mut spans = Vec::with_capacity(text.len() / 4 + 1);
        self.for_each_split_span(text, &mut |span| {
            spans.push(span);
            true
        });
        spans
    }

    /// Split text into chunks with character spans.
    ///
    /// ## Arguments
    /// * `text` - The text to split.
    ///
    /// ## Returns
    /// Ordered chunks whose spans partition `text`.
    pub fn split<'t>(
        &self,
        text: &'t str,
    ) -> Vec<Chunk<'t>> {
        let mut char_pos = 0;
        let chunks = self
            .split_spans(text)
            .into_iter()
            .map(|span| {
                let chunk_text = &text[span.range()];
                let char_start = char_pos;
                char_pos += chunk_text.chars().count();
                Chunk {
                    text: chunk_text,
                    span,
                    char_span: (char_start, char_pos),
                }
            })
            .collect::<Vec<_>>();

        log::trace!("split {} bytes into {} chunks", text.len(), chunks.len());
        chunks
    }
}
