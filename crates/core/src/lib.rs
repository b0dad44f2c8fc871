//! Text difference engine producing change chunks.
//!
//! This crate compares two texts line by line with a dynamic-programming
//! differencer, then re-diffs each small changed region character by
//! character. The result is an ordered list of [`Chunk`]s that callers use
//! for display or for translating positions across an edit.

/// Read-only view over the two sequences being compared.
///
/// Implementors decide what an element is (a line, a character, a token)
/// and when two elements are equal. Indices are 0-based.
pub trait SequenceView {
    /// Number of elements in the first sequence.
    fn len_a(&self) -> usize;

    /// Number of elements in the second sequence.
    fn len_b(&self) -> usize;

    /// Whether element `i` of the first sequence equals element `j` of the second.
    fn equals(&self, i: usize, j: usize) -> bool;
}

// Blanket implementation for references to SequenceViews
impl<V: SequenceView + ?Sized> SequenceView for &V {
    fn len_a(&self) -> usize {
        (*self).len_a()
    }

    fn len_b(&self) -> usize {
        (*self).len_b()
    }

    fn equals(&self, i: usize, j: usize) -> bool {
        (*self).equals(i, j)
    }
}

mod chunk;
mod compare;
mod differencer;
mod error;
mod helpers;
mod line_index;
mod narrow;
mod position;
mod views;

pub use chunk::{Chunk, ChunkSink, ChunkWriter, OffsetSink};
pub use compare::{compare_strings, compare_units, CompareConfig};
pub use differencer::{calculate_difference, diff_sequences, Differencer};
pub use error::DiffError;
pub use helpers::{apply_chunks, chunk_text};
pub use line_index::{CodeUnit, LineIndex};
pub use narrow::{narrow_down, Narrowed};
pub use position::{flatten_position_changes, position_changes, translate_position, PositionChange};
pub use views::{LineView, SliceView};

/// Default size limit (in code units) below which a changed line region is
/// re-diffed at character granularity.
pub const CHUNK_LEN_LIMIT: usize = 800;

/// Default upper bound on the number of cells of one differencer table.
pub const MAX_TABLE_CELLS: usize = 1 << 25;
