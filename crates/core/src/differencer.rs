//! Dynamic-programming differencer.
//!
//! Finds the difference of two sequences with a table of subproblem results.
//! Each cell packs the cost of aligning the two tails together with a 2-bit
//! direction flag that is later walked to build the chunk list.

use crate::chunk::{Chunk, ChunkSink, ChunkWriter, OffsetSink};
use crate::error::DiffError;
use crate::narrow::narrow_down;
use crate::SequenceView;

const DIRECTION_SIZE_BITS: u32 = 2;
const DIRECTION_MASK: u32 = (1 << DIRECTION_SIZE_BITS) - 1;
const EMPTY_CELL: u32 = !0u32 << DIRECTION_SIZE_BITS;

/// Largest tail cost a cell can hold without colliding with `EMPTY_CELL`.
const MAX_COST: usize = (EMPTY_CELL >> DIRECTION_SIZE_BITS) as usize - 1;

/// Step to take from a cell on an optimal path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
enum Direction {
    Eq = 0,
    SkipA = 1,
    SkipB = 2,
    SkipAny = 3,
}

impl Direction {
    fn from_bits(bits: u32) -> Self {
        match bits & DIRECTION_MASK {
            0 => Direction::Eq,
            1 => Direction::SkipA,
            2 => Direction::SkipB,
            _ => Direction::SkipAny,
        }
    }
}

/// Table of tail costs for one pair of sequences.
///
/// The table is `len_a * len_b` cells and is owned by this value only.
pub struct Differencer<V> {
    view: V,
    len_a: usize,
    len_b: usize,
    table: Vec<u32>,
}

impl<V: SequenceView> Differencer<V> {
    /// Allocate the table for `view`, refusing grids above `max_cells`.
    pub fn new(view: V, max_cells: usize) -> Result<Self, DiffError> {
        let len_a = view.len_a();
        let len_b = view.len_b();

        let cells = len_a
            .checked_mul(len_b)
            .filter(|&cells| cells <= max_cells)
            .ok_or(DiffError::CapacityExceeded {
                len_a,
                len_b,
                limit: max_cells,
            })?;
        if len_a.saturating_add(len_b) > MAX_COST {
            return Err(DiffError::CostOverflow { len_a, len_b });
        }

        Ok(Self {
            view,
            len_a,
            len_b,
            table: vec![EMPTY_CELL; cells],
        })
    }

    /// Compute every cell, last row and column first.
    pub fn fill_table(&mut self) {
        for pos2 in (0..self.len_b).rev() {
            for pos1 in (0..self.len_a).rev() {
                let (cost, dir) = if self.view.equals(pos1, pos2) {
                    (self.cost_up_to_tail(pos1 + 1, pos2 + 1), Direction::Eq)
                } else {
                    let res1 = self.cost_up_to_tail(pos1 + 1, pos2) + 1;
                    let res2 = self.cost_up_to_tail(pos1, pos2 + 1) + 1;
                    if res1 == res2 {
                        (res1, Direction::SkipAny)
                    } else if res1 < res2 {
                        (res1, Direction::SkipA)
                    } else {
                        (res2, Direction::SkipB)
                    }
                };
                let index = self.cell_index(pos1, pos2);
                self.table[index] = (cost << DIRECTION_SIZE_BITS) | dir as u32;
            }
        }
    }

    /// Minimal number of skips needed to turn the first sequence into the second.
    pub fn total_cost(&self) -> usize {
        self.cost_up_to_tail(0, 0) as usize
    }

    /// Walk the optimal path from the origin and write its chunks into `sink`.
    ///
    /// Ties are resolved by consuming from the second sequence first.
    pub fn save_result<S: ChunkSink>(&self, sink: S) -> S {
        let mut writer = ChunkWriter::new(sink);

        let mut pos1 = 0;
        let mut pos2 = 0;
        loop {
            if pos1 < self.len_a {
                if pos2 < self.len_b {
                    match self.direction(pos1, pos2) {
                        Direction::Eq => {
                            writer.eq();
                            pos1 += 1;
                            pos2 += 1;
                        }
                        Direction::SkipA => {
                            writer.skip_a(1);
                            pos1 += 1;
                        }
                        Direction::SkipB | Direction::SkipAny => {
                            writer.skip_b(1);
                            pos2 += 1;
                        }
                    }
                } else {
                    writer.skip_a(self.len_a - pos1);
                    break;
                }
            } else {
                if pos2 < self.len_b {
                    writer.skip_b(self.len_b - pos2);
                }
                break;
            }
        }
        writer.close()
    }

    fn cell_index(&self, pos1: usize, pos2: usize) -> usize {
        pos1 + pos2 * self.len_a
    }

    fn cost_up_to_tail(&self, pos1: usize, pos2: usize) -> u32 {
        if pos1 == self.len_a {
            return (self.len_b - pos2) as u32;
        }
        if pos2 == self.len_b {
            return (self.len_a - pos1) as u32;
        }
        let cell = self.table[self.cell_index(pos1, pos2)];
        debug_assert_ne!(cell, EMPTY_CELL, "cell ({pos1}, {pos2}) read before it was filled");
        cell >> DIRECTION_SIZE_BITS
    }

    fn direction(&self, pos1: usize, pos2: usize) -> Direction {
        Direction::from_bits(self.table[self.cell_index(pos1, pos2)])
    }
}

/// Run the differencer over the whole view and write the chunks into `sink`.
pub fn calculate_difference<V, S>(view: V, sink: S, max_cells: usize) -> Result<S, DiffError>
where
    V: SequenceView,
    S: ChunkSink,
{
    let mut differencer = Differencer::new(view, max_cells)?;
    differencer.fill_table();
    Ok(differencer.save_result(sink))
}

/// Diff a view after stripping its common prefix and suffix.
///
/// Chunk positions are relative to the full view.
pub fn diff_sequences<V: SequenceView>(view: V, max_cells: usize) -> Result<Vec<Chunk>, DiffError> {
    let narrowed = narrow_down(view);
    let prefix = narrowed.prefix_len();
    let sink = calculate_difference(&narrowed, OffsetSink::new(Vec::new(), prefix, prefix), max_cells)?;
    Ok(sink.into_inner())
}
