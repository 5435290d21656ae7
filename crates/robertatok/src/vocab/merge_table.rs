//! # Merge Table
//!
//! Ranked pair merges over interned symbols.
//!
//! Symbols ``0..256`` are the single-byte symbols, in byte order;
//! every merge rule interns its two sides and their concatenation.

use crate::{
    errors::{RobertaTokError, TokResult},
    types::{CommonHashMap, SymbolId, SymbolPair},
    vocab::ByteEncoder,
};

/// The result of merging a symbol pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MergeRule {
    /// Priority of the rule; lower merges first.
    pub rank: u32,

    /// The symbol the pair merges into.
    pub merged: SymbolId,
}

/// Immutable ranked merge rules.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeTable {
    /// Symbol text, in the byte-encoded alphabet, indexed by [`SymbolId`].
    symbols: Vec<String>,

    /// Byte length of each symbol, indexed by [`SymbolId`].
    symbol_byte_lens: Vec<usize>,

    symbol_ids: CommonHashMap<String, SymbolId>,

    pairs: CommonHashMap<SymbolPair, MergeRule>,

    /// Number of merge lines read, including duplicates.
    line_count: usize,
}

impl MergeTable {
    /// Build a table holding only the byte symbols.
    pub fn new(byte_encoder: &ByteEncoder) -> Self {
        let mut table = Self {
            symbols: Vec::with_capacity(256),
            symbol_byte_lens: Vec::with_capacity(256),
            symbol_ids: CommonHashMap::with_capacity(256),
            pairs: Default::default(),
            line_count: 0,
        };
        for b in 0..=255u8 {
            table.intern(byte_encoder.byte_char(b).to_string());
        }
        table
    }

    /// Build a table from ordered pairs; the first pair is rank 0.
    pub fn from_pairs<I, A, B>(
        byte_encoder: &ByteEncoder,
        pairs: I,
    ) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut table = Self::new(byte_encoder);
        for (a, b) in pairs {
            table.push_rule(a.as_ref(), b.as_ref());
        }
        table
    }

    /// Parse a merges file.
    ///
    /// One ``"left right"`` pair per line, in priority order.
    /// A leading ``#version`` header, blank lines, and ``\r\n`` line ends are accepted.
    /// When a pair repeats, the later line's rank wins.
    ///
    /// ## Arguments
    /// * `byte_encoder` - The byte alphabet the merges are written in.
    /// * `bytes` - The raw merges file.
    ///
    /// ## Returns
    /// The table, or `MergesNotUtf8` / `MalformedMerge`.
    pub fn from_merges_slice(
        byte_encoder: &ByteEncoder,
        bytes: &[u8],
    ) -> TokResult<Self> {
        let text = std::str::from_utf8(bytes).map_err(RobertaTokError::MergesNotUtf8)?;

        let mut table = Self::new(byte_encoder);
        for (idx, line) in text.lines().enumerate() {
            if idx == 0 && line.starts_with("#version") {
                log::debug!("skipping merges header: {line:?}");
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }

            let mut parts = line.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(a), Some(b), None) => table.push_rule(a, b),
                _ => {
                    return Err(RobertaTokError::MalformedMerge {
                        line: idx + 1,
                        content: line.to_string(),
                    });
                }
            }
        }

        Ok(table)
    }

    fn intern(
        &mut self,
        symbol: String,
    ) -> SymbolId {
        if let Some(&id) = self.symbol_ids.get(&symbol) {
            return id;
        }
        let id = self.symbols.len() as SymbolId;
        self.symbol_byte_lens.push(symbol.chars().count());
        self.symbol_ids.insert(symbol.clone(), id);
        self.symbols.push(symbol);
        id
    }

    fn push_rule(
        &mut self,
        a: &str,
        b: &str,
    ) {
        let rank = self.line_count as u32;
        self.line_count += 1;

        let left = self.intern(a.to_string());
        let right = self.intern(b.to_string());
        let merged = self.intern(format!("{a}{b}"));

        if let Some(prev) = self.pairs.insert((left, right), MergeRule { rank, merged }) {
            log::debug!(
                "duplicate merge {a:?} {b:?}: rank {} replaced by {rank}",
                prev.rank
            );
        }
    }

    /// Look up the merge rule for an adjacent pair.
    #[inline(always)]
    pub fn lookup_pair(
        &self,
        pair: &SymbolPair,
    ) -> Option<MergeRule> {
        self.pairs.get(pair).copied()
    }

    /// The symbol id for a single byte.
    #[inline(always)]
    pub fn byte_symbol(
        &self,
        byte: u8,
    ) -> SymbolId {
        byte as SymbolId
    }

    /// Get the text of a symbol.
    pub fn symbol(
        &self,
        id: SymbolId,
    ) -> &str {
        &self.symbols[id as usize]
    }

    /// Get the number of raw bytes a symbol covers.
    pub fn symbol_byte_len(
        &self,
        id: SymbolId,
    ) -> usize {
        self.symbol_byte_lens[id as usize]
    }

    /// Look up a symbol by its text.
    pub fn symbol_id(
        &self,
        symbol: &str,
    ) -> Option<SymbolId> {
        self.symbol_ids.get(symbol).copied()
    }

    /// Iterate over all symbol texts, in id order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    /// The number of interned symbols.
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// The number of distinct merge pairs.
    pub fn merge_count(&self) -> usize {
        self.pairs.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_byte_symbols() {
        let be = ByteEncoder::new();
        let table = MergeTable::new(&be);
        assert_eq!(table.symbol_count(), 256);
        assert_eq!(table.merge_count(), 0);
        assert_eq!(table.symbol(table.byte_symbol(b' ')), "Ġ");
        assert_eq!(table.symbol_id("a"), Some(b'a' as SymbolId));
        assert_eq!(table.symbol_byte_len(table.byte_symbol(0xC3)), 1);
    }

    #[test]
    fn test_parse_merges() {
        let be = ByteEncoder::new();
        let merges = "#version: 0.2\r\nĠ l\r\nĠl o\n\ne r\n";
        let table = MergeTable::from_merges_slice(&be, merges.as_bytes()).unwrap();
        assert_eq!(table.merge_count(), 3);

        let g = table.symbol_id("Ġ").unwrap();
        let l = table.symbol_id("l").unwrap();
        let gl = table.symbol_id("Ġl").unwrap();
        assert_eq!(
            table.lookup_pair(&(g, l)),
            Some(MergeRule {
                rank: 0,
                merged: gl
            })
        );
        assert_eq!(table.symbol_byte_len(gl), 2);

        let o = table.symbol_id("o").unwrap();
        assert_eq!(table.lookup_pair(&(gl, o)).unwrap().rank, 1);

        let e = table.symbol_id("e").unwrap();
        let r = table.symbol_id("r").unwrap();
        let er = table.lookup_pair(&(e, r)).unwrap();
        assert_eq!(er.rank, 2);
        assert_eq!(table.symbol(er.merged), "er");

        assert_eq!(table.lookup_pair(&(r, e)), None);
    }

    #[test]
    fn test_duplicate_merge_later_wins() {
        let be = ByteEncoder::new();
        let table = MergeTable::from_pairs(&be, [("a", "b"), ("c", "d"), ("a", "b")]);
        assert_eq!(table.merge_count(), 2);
        let a = table.symbol_id("a").unwrap();
        let b = table.symbol_id("b").unwrap();
        assert_eq!(table.lookup_pair(&(a, b)).unwrap().rank, 2);
    }

    #[test]
    fn test_malformed_merges() {
        let be = ByteEncoder::new();

        let err = MergeTable::from_merges_slice(&be, b"a b\na b c\n").unwrap_err();
        match &err {
            RobertaTokError::MalformedMerge { line, content } => {
                assert_eq!(*line, 2);
                assert_eq!(content, "a b c");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(err.kind(), ErrorKind::Config);

        let err = MergeTable::from_merges_slice(&be, b"ab\n").unwrap_err();
        assert!(matches!(err, RobertaTokError::MalformedMerge { line: 1, .. }));

        // A header is only skipped on the first line.
        let table = MergeTable::from_merges_slice(&be, b"a b\n#version: 0.2\n").unwrap();
        assert_eq!(table.merge_count(), 2);
        assert!(table.symbol_id("#version:0.2").is_some());

        let err = MergeTable::from_merges_slice(&be, &[b'a', b' ', 0xff]).unwrap_err();
        assert!(matches!(err, RobertaTokError::MergesNotUtf8(_)));
    }
}
