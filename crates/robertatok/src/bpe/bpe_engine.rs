//! # BPE Merge Engine
//!
//! Repeatedly scans for the lowest-ranked adjacent pair, merges every
//! non-overlapping occurrence of it left to right, and iterates until no
//! pair merges.

use std::sync::Arc;

use crate::{
    bpe::merge_cache::{MergeCache, MergedSymbols, ShardedMergeCache},
    types::SymbolId,
    vocab::MergeTable,
};

/// Merge a chunk's bytes into symbols.
///
/// ## Arguments
/// * `table` - The merge rules.
/// * `bytes` - The raw chunk bytes.
/// * `symbols` - Output buffer; cleared, then filled with the merged symbols.
pub fn merge_scan(
    table: &MergeTable,
    bytes: &[u8],
    symbols: &mut Vec<SymbolId>,
) {
    symbols.clear();
    symbols.extend(bytes.iter().map(|&b| table.byte_symbol(b)));

    let mut scratch: Vec<SymbolId> = Vec::with_capacity(symbols.len());
    while symbols.len() >= 2 {
        // Find the lowest ranked merge available.
        let Some((rule, left, right)) = symbols
            .windows(2)
            .filter_map(|w| table.lookup_pair(&(w[0], w[1])).map(|rule| (rule, w[0], w[1])))
            .min()
        else {
            break;
        };

        // Merge every occurrence of (left, right), left to right.
        scratch.clear();
        let mut i = 0;
        while i < symbols.len() {
            if i + 1 < symbols.len() && symbols[i] == left && symbols[i + 1] == right {
                scratch.push(rule.merged);
                i += 2;
            } else {
                scratch.push(symbols[i]);
                i += 1;
            }
        }
        core::mem::swap(symbols, &mut scratch);
    }
}

/// Cached BPE merging over one [`MergeTable`].
///
/// The cache belongs to the engine and is cleared on construction,
/// so it only ever holds results for this engine's table.
#[derive(Debug)]
pub struct BpeEngine<C: MergeCache = ShardedMergeCache> {
    merges: Arc<MergeTable>,
    cache: C,
}

impl<C: MergeCache> BpeEngine<C> {
    /// Create an engine.
    ///
    /// ## Arguments
    /// * `merges` - The shared merge table.
    /// * `cache` - The merge result cache.
    pub fn new(
        merges: Arc<MergeTable>,
        cache: C,
    ) -> Self {
        cache.clear();
        Self { merges, cache }
    }

    /// Get the merge table.
    pub fn merges(&self) -> &Arc<MergeTable> {
        &self.merges
    }

    /// Get the cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Merge a chunk into symbol ids.
    ///
    /// ## Arguments
    /// * `chunk` - The chunk text.
    ///
    /// ## Returns
    /// The merged symbols; their byte lengths sum to ``chunk.len()``.
    pub fn merge_symbols(
        &self,
        chunk: &str,
    ) -> MergedSymbols {
        if let Some(hit) = self.cache.get(chunk) {
            log::trace!("merge cache hit: {chunk:?}");
            return hit;
        }

        let mut symbols = Vec::with_capacity(chunk.len());
        merge_scan(&self.merges, chunk.as_bytes(), &mut symbols);
        let symbols: MergedSymbols = symbols.into();

        log::trace!("merge cache miss: {chunk:?} -> {} symbols", symbols.len());
        self.cache.insert(chunk, symbols.clone());
        symbols
    }

    /// Merge a chunk into subword strings.
    ///
    /// ## Arguments
    /// * `chunk` - The chunk text.
    ///
    /// ## Returns
    /// Subwords in the byte-encoded alphabet, in order.
    pub fn merge(
        &self,
        chunk: &str,
    ) -> Vec<String> {
        self.merge_symbols(chunk)
            .iter()
            .map(|&s| self.merges.symbol(s).to_string())
            .collect()
    }
}
