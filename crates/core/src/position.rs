//! Position changes and translation of positions across an edit.
//!
//! A text change is a sorted set of non-overlapping regions that changed
//! their contents and length. Each region is described by three numbers:
//! where it starts, where it ended in the old text and where it ends in the
//! new text.

use serde::{Deserialize, Serialize};

use crate::chunk::Chunk;
use crate::error::DiffError;

/// One changed region, in old-text coordinates except `change_end_new`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionChange {
    pub change_start: usize,
    pub change_end_old: usize,
    pub change_end_new: usize,
}

impl From<&Chunk> for PositionChange {
    fn from(chunk: &Chunk) -> Self {
        Self {
            change_start: chunk.a_start,
            change_end_old: chunk.a_end(),
            change_end_new: chunk.b_end(),
        }
    }
}

impl PositionChange {
    /// Parse a flat `[start, end_old, end_new, ...]` array.
    pub fn from_flat(flat: &[usize]) -> Result<Vec<Self>, DiffError> {
        if flat.len() % 3 != 0 {
            return Err(DiffError::MalformedPositionChanges(flat.len()));
        }
        Ok(flat
            .chunks_exact(3)
            .map(|group| Self {
                change_start: group[0],
                change_end_old: group[1],
                change_end_new: group[2],
            })
            .collect())
    }
}

/// Position changes for a chunk list.
pub fn position_changes(chunks: &[Chunk]) -> Vec<PositionChange> {
    chunks.iter().map(PositionChange::from).collect()
}

/// Flatten position changes into groups of three numbers.
pub fn flatten_position_changes(changes: &[PositionChange]) -> Vec<usize> {
    changes
        .iter()
        .flat_map(|change| [change.change_start, change.change_end_old, change.change_end_new])
        .collect()
}

/// Map a position in the old text to the matching position in the new text.
///
/// Only positions outside every changed region translate meaningfully; a
/// position inside a region gets the shift of that region applied anyway.
pub fn translate_position(changes: &[PositionChange], original_position: usize) -> usize {
    let preceding = changes.partition_point(|change| change.change_start <= original_position);
    match preceding.checked_sub(1).map(|index| &changes[index]) {
        Some(change) => (original_position + change.change_end_new).saturating_sub(change.change_end_old),
        None => original_position,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::{compare_strings, CompareConfig};
    use proptest::prelude::*;

    #[test]
    fn test_position_changes_from_chunks() {
        let chunks = [Chunk::new(2, 1, 2, 3), Chunk::new(6, 0, 8, 2)];
        let changes = position_changes(&chunks);
        assert_eq!(flatten_position_changes(&changes), vec![2, 3, 5, 6, 6, 10]);
    }

    #[test]
    fn test_from_flat() {
        let changes = PositionChange::from_flat(&[2, 3, 5]).unwrap();
        assert_eq!(
            changes,
            vec![PositionChange {
                change_start: 2,
                change_end_old: 3,
                change_end_new: 5
            }]
        );
        assert_eq!(
            PositionChange::from_flat(&[1, 2]),
            Err(DiffError::MalformedPositionChanges(2))
        );
    }

    #[test]
    fn test_translate_position() {
        // "abcdef" -> "abXYZdef": "c" replaced by "XYZ"
        let changes = position_changes(&[Chunk::new(2, 1, 2, 3)]);
        assert_eq!(translate_position(&changes, 0), 0);
        assert_eq!(translate_position(&changes, 1), 1);
        assert_eq!(translate_position(&changes, 3), 5);
        assert_eq!(translate_position(&changes, 6), 8);
    }

    #[test]
    fn test_translate_uses_last_preceding_change() {
        let changes = position_changes(&[Chunk::new(1, 2, 1, 0), Chunk::new(5, 0, 3, 4)]);
        assert_eq!(translate_position(&changes, 4), 2);
        assert_eq!(translate_position(&changes, 5), 7);
        assert_eq!(translate_position(&changes, 10), 12);
    }

    #[test]
    fn test_translate_without_changes() {
        assert_eq!(translate_position(&[], 42), 42);
    }

    proptest! {
        #[test]
        fn prop_unchanged_characters_translate_to_themselves(
            old in "[ab\n]{0,30}",
            new in "[ab\n]{0,30}",
        ) {
            let chunks = compare_strings(&old, &new, &CompareConfig::default()).unwrap();
            let changes = position_changes(&chunks);
            let old_chars: Vec<char> = old.chars().collect();
            let new_chars: Vec<char> = new.chars().collect();
            for position in 0..old_chars.len() {
                let inside = chunks.iter().any(|c| c.a_start <= position && position < c.a_end());
                if !inside {
                    let translated = translate_position(&changes, position);
                    prop_assert_eq!(new_chars[translated], old_chars[position]);
                }
            }
        }
    }
}
