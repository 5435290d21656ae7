//! # Byte/Char Alphabet
//!
//! Byte-level BPE vocabularies are stored as text, so every raw byte
//! is first given a printable stand-in character.
//!
//! Printable ASCII and printable Latin-1 bytes map to themselves:
//! ``[0x21-0x7E]``, ``[0xA1-0xAC]``, ``[0xAE-0xFF]``.
//! The remaining 68 bytes (controls, space, ``0x7F-0xA0``, soft hyphen)
//! map to ``U+0100..U+0143``, assigned in increasing byte order.
//! This is why a leading space shows up as `Ġ` (``U+0120``) in vocab files.

use crate::types::CommonHashMap;

/// Number of bytes which do not map to themselves.
const REMAPPED_BYTE_COUNT: u32 = 68;

/// Does this byte map to itself?
const fn is_printable_byte(b: u8) -> bool {
    matches!(b, 0x21..=0x7E | 0xA1..=0xAC | 0xAE..=0xFF)
}

/// Bijection between the 256 byte values and their printable characters.
#[derive(Clone, PartialEq)]
pub struct ByteEncoder {
    /// Table mapping from byte ordinal (position) to char.
    byte_chars: [char; 256],

    /// Hash map from char to byte ordinal value.
    char_bytes: CommonHashMap<char, u8>,
}

impl core::fmt::Debug for ByteEncoder {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("ByteEncoder")
            .field("space", &self.byte_chars[b' ' as usize])
            .finish()
    }
}

impl Default for ByteEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteEncoder {
    /// Build the canonical byte alphabet.
    pub fn new() -> Self {
        let mut byte_chars = ['\0'; 256];
        let mut n = 0u32;
        for (b, slot) in byte_chars.iter_mut().enumerate() {
            let b = b as u8;
            *slot = if is_printable_byte(b) {
                char::from(b)
            } else {
                // U+0100.. are all valid scalar values.
                let c = char::from_u32(0x100 + n).unwrap_or(char::REPLACEMENT_CHARACTER);
                n += 1;
                c
            };
        }
        debug_assert_eq!(n, REMAPPED_BYTE_COUNT);

        let mut char_bytes: CommonHashMap<char, u8> = byte_chars
            .iter()
            .enumerate()
            .map(|(b, &c)| (c, b as u8))
            .collect();
        char_bytes.shrink_to_fit();

        Self {
            byte_chars,
            char_bytes,
        }
    }

    /// Get the char standing in for a byte.
    #[inline(always)]
    pub fn byte_char(
        &self,
        byte: u8,
    ) -> char {
        self.byte_chars[byte as usize]
    }

    /// Get the byte a char stands in for, if it is part of the alphabet.
    #[inline(always)]
    pub fn char_byte(
        &self,
        c: char,
    ) -> Option<u8> {
        self.char_bytes.get(&c).copied()
    }

    /// Encode raw bytes into their printable representation.
    ///
    /// ## Arguments
    /// * `bytes` - The bytes to encode.
    ///
    /// ## Returns
    /// A string with exactly one char per input byte.
    pub fn encode(
        &self,
        bytes: &[u8],
    ) -> String {
        let mut out = String::with_capacity(bytes.len() * 2);
        self.encode_append(bytes, &mut out);
        out
    }

    /// Encode raw bytes, appending to a target buffer.
    pub fn encode_append(
        &self,
        bytes: &[u8],
        out: &mut String,
    ) {
        out.extend(bytes.iter().map(|&b| self.byte_char(b)));
    }

    /// Decode a printable representation back into raw bytes.
    ///
    /// ## Arguments
    /// * `text` - The encoded text.
    ///
    /// ## Returns
    /// `None` if `text` holds a char outside the byte alphabet.
    pub fn decode(
        &self,
        text: &str,
    ) -> Option<Vec<u8>> {
        text.chars().map(|c| self.char_byte(c)).collect()
    }
}
