//! Two-level text comparison.
//!
//! Texts are first compared as arrays of lines. Each changed line region
//! that is small enough is then compared again unit by unit, so the final
//! chunks point at the exact characters that changed.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::chunk::Chunk;
use crate::differencer::diff_sequences;
use crate::error::DiffError;
use crate::line_index::{CodeUnit, LineIndex};
use crate::views::{LineView, SliceView};
use crate::{CHUNK_LEN_LIMIT, MAX_TABLE_CELLS};

/// Configuration for [`compare_units`] and [`compare_strings`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// A changed line region is re-diffed per unit only when both of its
    /// sides are shorter than this.
    pub chunk_len_limit: usize,
    /// Largest differencer table any single pass may allocate.
    pub max_table_cells: usize,
    /// Run the per-unit passes on the rayon thread pool.
    pub parallel: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            chunk_len_limit: CHUNK_LEN_LIMIT,
            max_table_cells: MAX_TABLE_CELLS,
            parallel: false,
        }
    }
}

/// Compare two strings, with positions counted in `char`s.
pub fn compare_strings(s1: &str, s2: &str, config: &CompareConfig) -> Result<Vec<Chunk>, DiffError> {
    let text1: Vec<char> = s1.chars().collect();
    let text2: Vec<char> = s2.chars().collect();
    compare_units(&text1, &text2, config)
}

/// Compare two texts given as code units.
///
/// Returns the chunks in increasing order; positions are unit offsets into
/// `text1` and `text2`.
pub fn compare_units<U: CodeUnit>(
    text1: &[U],
    text2: &[U],
    config: &CompareConfig,
) -> Result<Vec<Chunk>, DiffError> {
    let lines1 = LineIndex::build(text1);
    let lines2 = LineIndex::build(text2);

    let line_view = LineView::new(text1, &lines1, text2, &lines2);
    let line_chunks = diff_sequences(line_view, config.max_table_cells)?;
    debug!(
        lines1 = lines1.line_count(),
        lines2 = lines2.line_count(),
        line_chunks = line_chunks.len(),
        "compared lines"
    );

    let regions: Vec<Chunk> = line_chunks
        .iter()
        .map(|chunk| char_region(chunk, &lines1, &lines2))
        .collect();

    let refine = |region: &Chunk| refine_region(text1, text2, *region, config);
    let refined: Vec<Vec<Chunk>> = if config.parallel {
        regions.par_iter().map(refine).collect::<Result<_, _>>()?
    } else {
        regions.iter().map(refine).collect::<Result<_, _>>()?
    };

    let chunks: Vec<Chunk> = refined.into_iter().flatten().collect();
    debug!(chunks = chunks.len(), "comparison finished");
    Ok(chunks)
}

/// Translate a chunk of line numbers into a chunk of unit positions.
fn char_region(line_chunk: &Chunk, lines1: &LineIndex, lines2: &LineIndex) -> Chunk {
    let char_pos1 = lines1.line_start(line_chunk.a_start);
    let char_pos2 = lines2.line_start(line_chunk.b_start);
    let char_len1 = lines1.line_start(line_chunk.a_end()) - char_pos1;
    let char_len2 = lines2.line_start(line_chunk.b_end()) - char_pos2;
    Chunk::new(char_pos1, char_len1, char_pos2, char_len2)
}

/// Run the per-unit pass inside one changed line region, if it is small enough.
fn refine_region<U: CodeUnit>(
    text1: &[U],
    text2: &[U],
    region: Chunk,
    config: &CompareConfig,
) -> Result<Vec<Chunk>, DiffError> {
    if region.a_len >= config.chunk_len_limit || region.b_len >= config.chunk_len_limit {
        trace!(?region, "region too large for a nested diff");
        return Ok(vec![region]);
    }

    let tokens_view = SliceView::new(
        &text1[region.a_start..region.a_end()],
        &text2[region.b_start..region.b_end()],
    );
    let chunks = diff_sequences(tokens_view, config.max_table_cells)?
        .into_iter()
        .map(|chunk| chunk.shifted(region.a_start, region.b_start))
        .collect::<Vec<_>>();
    trace!(?region, nested = chunks.len(), "nested diff");
    Ok(chunks)
}
