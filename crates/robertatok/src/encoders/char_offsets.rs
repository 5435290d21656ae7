//! # Character Offsets
//!
//! Maps byte positions in a text to character positions.
//!
//! A byte position inside a multi-byte character rounds up to the next
//! character boundary. A subword ending mid-character therefore claims the
//! whole character, and the subwords after it start past it (possibly with
//! an empty span). Concatenating the spans of a text's subwords in order
//! reproduces the text exactly.

use core::ops::Range;

use crate::{
    errors::{RobertaTokError, TokResult},
    types::CharSpan,
};

/// The encoded-space marker, ``Ġ``.
const SPACE_MARKER: char = '\u{120}';

/// Byte position -> character position table for one text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharOffsets {
    /// `byte_to_char[p]` is the number of characters starting before byte `p`.
    byte_to_char: Vec<usize>,
}

/// Is this byte the first byte of a UTF-8 sequence?
#[inline(always)]
const fn is_char_start(b: u8) -> bool {
    (b as i8) >= -0x40
}

impl CharOffsets {
    /// Build the table for `text`.
    pub fn new(text: &str) -> Self {
        let mut byte_to_char = Vec::with_capacity(text.len() + 1);
        let mut count = 0;
        for b in text.bytes() {
            byte_to_char.push(count);
            if is_char_start(b) {
                count += 1;
            }
        }
        byte_to_char.push(count);
        Self { byte_to_char }
    }

    /// The length of the text, in bytes.
    pub fn byte_len(&self) -> usize {
        self.byte_to_char.len() - 1
    }

    /// The length of the text, in characters.
    pub fn char_len(&self) -> usize {
        self.byte_to_char[self.byte_len()]
    }

    /// Convert a byte range into a character span.
    ///
    /// ## Arguments
    /// * `bytes` - A byte range within the text.
    ///
    /// ## Returns
    /// The character span, or `OffsetOutOfBounds` if `bytes` lies outside the text.
    pub fn char_span(
        &self,
        bytes: Range<usize>,
    ) -> TokResult<CharSpan> {
        let len = self.byte_len();
        if bytes.start > bytes.end || bytes.end > len {
            return Err(RobertaTokError::OffsetOutOfBounds {
                start: bytes.start,
                end: bytes.end,
                len,
            });
        }
        Ok((self.byte_to_char[bytes.start], self.byte_to_char[bytes.end]))
    }
}

/// Trim encoded spaces off a subword's character span.
///
/// Leading ``Ġ`` markers move the start right, unless the span starts the
/// text; trailing ones move the end left. The span never inverts.
///
/// ## Arguments
/// * `token` - The subword, in the byte-encoded alphabet.
/// * `span` - The subword's character span.
pub fn trim_space_offsets(
    token: &str,
    span: CharSpan,
) -> CharSpan {
    let (mut start, mut end) = span;

    let leading = token.chars().take_while(|&c| c == SPACE_MARKER).count();
    let trailing = token.chars().rev().take_while(|&c| c == SPACE_MARKER).count();

    if leading > 0 && start != 0 {
        start = (start + leading).min(end);
    }
    if trailing > 0 && end >= trailing {
        end = (end - trailing).max(start);
    }
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii() {
        let offsets = CharOffsets::new("lower newer");
        assert_eq!(offsets.byte_len(), 11);
        assert_eq!(offsets.char_len(), 11);
        assert_eq!(offsets.char_span(0..5).unwrap(), (0, 5));
        assert_eq!(offsets.char_span(5..11).unwrap(), (5, 11));
        assert_eq!(offsets.char_span(11..11).unwrap(), (11, 11));
    }

    #[test]
    fn test_multibyte_rounding() {
        // "aé€b": a(1) é(2) €(3) b(1)
        let text = "aé€b";
        let offsets = CharOffsets::new(text);
        assert_eq!(offsets.byte_len(), 7);
        assert_eq!(offsets.char_len(), 4);

        assert_eq!(offsets.char_span(0..1).unwrap(), (0, 1));
        assert_eq!(offsets.char_span(1..3).unwrap(), (1, 2));
        assert_eq!(offsets.char_span(3..6).unwrap(), (2, 3));

        // Split "é": the first fragment claims it, the second is empty.
        assert_eq!(offsets.char_span(1..2).unwrap(), (1, 2));
        assert_eq!(offsets.char_span(2..3).unwrap(), (2, 2));

        // Split "€" three ways.
        assert_eq!(offsets.char_span(3..4).unwrap(), (2, 3));
        assert_eq!(offsets.char_span(4..5).unwrap(), (3, 3));
        assert_eq!(offsets.char_span(5..7).unwrap(), (3, 4));
    }

    #[test]
    fn test_out_of_bounds() {
        let offsets = CharOffsets::new("abc");
        assert!(matches!(
            offsets.char_span(2..4),
            Err(RobertaTokError::OffsetOutOfBounds {
                start: 2,
                end: 4,
                len: 3
            })
        ));
        assert!(offsets.char_span(2..1).is_err());

        let empty = CharOffsets::new("");
        assert_eq!(empty.char_len(), 0);
        assert_eq!(empty.char_span(0..0).unwrap(), (0, 0));
    }

    #[test]
    fn test_trim_space_offsets() {
        assert_eq!(trim_space_offsets("Ġworld", (5, 11)), (6, 11));
        assert_eq!(trim_space_offsets("world", (6, 11)), (6, 11));
        assert_eq!(trim_space_offsets("aĠ", (0, 2)), (0, 1));
        assert_eq!(trim_space_offsets("Ġ", (3, 4)), (4, 4));
        assert_eq!(trim_space_offsets("ĠĠ", (3, 5)), (5, 5));
        assert_eq!(trim_space_offsets("Ġhi", (0, 3)), (0, 3));
        // A span narrower than its markers never inverts.
        assert_eq!(trim_space_offsets("Ġé", (2, 2)), (2, 2));
    }
}
