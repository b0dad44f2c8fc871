//! Helper functions for working with chunk lists over text.

use crate::chunk::Chunk;

/// Apply chunks computed between `old` and `new` to `old`.
///
/// Each chunk's span of `old` is replaced by its span of `new`; everything
/// outside the chunks is copied from `old`. Positions are `char` offsets,
/// as produced by [`crate::compare_strings`]. Out-of-range positions are
/// clamped to the text.
pub fn apply_chunks(old: &str, new: &str, chunks: &[Chunk]) -> String {
    let old_chars: Vec<char> = old.chars().collect();
    let new_chars: Vec<char> = new.chars().collect();

    let mut out = String::with_capacity(new.len());
    let mut cursor = 0;
    for chunk in chunks {
        let start = chunk.a_start.clamp(cursor, old_chars.len());
        out.extend(&old_chars[cursor..start]);

        let b_start = chunk.b_start.min(new_chars.len());
        let b_end = chunk.b_end().clamp(b_start, new_chars.len());
        out.extend(&new_chars[b_start..b_end]);

        cursor = chunk.a_end().clamp(start, old_chars.len());
    }
    out.extend(&old_chars[cursor..]);
    out
}

/// Text of `len` chars starting at char position `start`.
pub fn chunk_text(text: &str, start: usize, len: usize) -> String {
    text.chars().skip(start).take(len).collect()
}
