//! # Span Lexer

use core::ops::Range;

use crate::{concurrency::PoolToy, spanning::SpanRef};

/// Word-scanning plugin trait.
///
/// The default [`for_each_word`](Self::for_each_word) loops over
/// [`next_span`](Self::next_span) matches, emitting `Word` and `Gap` spans.
/// Lexers that produce richer token streams (the logos DFA) override
/// `for_each_word` directly and leave `next_span` at its default.
pub trait SpanLexer: Send + Sync {
    /// Find the next match in `text` starting from `offset`.
    ///
    /// Returns the byte range relative to `text`, or `None`.
    fn next_span(
        &self,
        text: &str,
        offset: usize,
    ) -> Option<Range<usize>> {
        let _ = (text, offset);
        None
    }

    /// Scan `text` into [`Word`](SpanRef::Word) and [`Gap`](SpanRef::Gap) spans.
    ///
    /// ## Arguments
    /// * `text` - the text segment to scan (no special tokens).
    /// * `offset` - byte offset to add to emitted span ranges.
    /// * `f` - callback; return `false` to halt early.
    ///
    /// ## Returns
    /// ``(completed, consumed)`` where `consumed` is the byte count of
    /// accepted spans and `completed` indicates all spans were accepted.
    fn for_each_word(
        &self,
        text: &str,
        offset: usize,
        f: &mut dyn FnMut(SpanRef) -> bool,
    ) -> (bool, usize) {
        let mut last = 0;
        let mut search = 0;
        while let Some(Range { start, end }) = self.next_span(text, search) {
            if start == end {
                // Empty matches carry no text; step over one char.
                match text[end..].chars().next() {
                    Some(c) => {
                        search = end + c.len_utf8();
                        continue;
                    }
                    None => break,
                }
            }

            if last < start {
                if !f(SpanRef::Gap(last + offset..start + offset)) {
                    return (false, last);
                }
                last = start;
            }

            if !f(SpanRef::Word(start + offset..end + offset)) {
                return (false, last);
            }
            last = end;
            search = end;
        }

        if last < text.len() {
            if !f(SpanRef::Gap(last + offset..text.len() + offset)) {
                return (false, last);
            }
            last = text.len();
        }

        (true, last)
    }
}

impl SpanLexer for ::regex::Regex {
    fn next_span(
        &self,
        text: &str,
        offset: usize,
    ) -> Option<Range<usize>> {
        self.find_at(text, offset).map(|m| m.range())
    }
}

impl<T> SpanLexer for PoolToy<T>
where
    T: SpanLexer + Clone,
{
    fn next_span(
        &self,
        text: &str,
        offset: usize,
    ) -> Option<Range<usize>> {
        self.get().next_span(text, offset)
    }

    fn for_each_word(
        &self,
        text: &str,
        offset: usize,
        f: &mut dyn FnMut(SpanRef) -> bool,
    ) -> (bool, usize) {
        self.get().for_each_word(text, offset, f)
    }
}
