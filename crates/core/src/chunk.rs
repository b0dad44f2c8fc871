//! Change chunks and the writer that merges differencer steps into them.

use serde::{Deserialize, Serialize};

/// A maximal region where the two sequences diverge.
///
/// `a_len == 0` is a pure insertion, `b_len == 0` a pure deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chunk {
    /// Start of the replaced span in the first sequence
    pub a_start: usize,
    /// Length of the replaced span in the first sequence
    pub a_len: usize,
    /// Start of the replacing span in the second sequence
    pub b_start: usize,
    /// Length of the replacing span in the second sequence
    pub b_len: usize,
}

impl Chunk {
    pub fn new(a_start: usize, a_len: usize, b_start: usize, b_len: usize) -> Self {
        Self {
            a_start,
            a_len,
            b_start,
            b_len,
        }
    }

    /// End of the replaced span (exclusive).
    pub fn a_end(&self) -> usize {
        self.a_start + self.a_len
    }

    /// End of the replacing span (exclusive).
    pub fn b_end(&self) -> usize {
        self.b_start + self.b_len
    }

    pub fn is_insertion(&self) -> bool {
        self.a_len == 0
    }

    pub fn is_deletion(&self) -> bool {
        self.b_len == 0
    }

    /// Same chunk with both starts moved forward.
    pub fn shifted(self, offset_a: usize, offset_b: usize) -> Self {
        Self {
            a_start: self.a_start + offset_a,
            b_start: self.b_start + offset_b,
            ..self
        }
    }
}

/// Append-only receiver of chunks, in increasing position order.
pub trait ChunkSink {
    fn add_chunk(&mut self, chunk: Chunk);
}

impl ChunkSink for Vec<Chunk> {
    fn add_chunk(&mut self, chunk: Chunk) {
        self.push(chunk);
    }
}

impl<S: ChunkSink + ?Sized> ChunkSink for &mut S {
    fn add_chunk(&mut self, chunk: Chunk) {
        (**self).add_chunk(chunk);
    }
}

/// Sink adapter translating sub-range positions into absolute positions.
pub struct OffsetSink<S> {
    inner: S,
    offset_a: usize,
    offset_b: usize,
}

impl<S: ChunkSink> OffsetSink<S> {
    pub fn new(inner: S, offset_a: usize, offset_b: usize) -> Self {
        Self {
            inner,
            offset_a,
            offset_b,
        }
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: ChunkSink> ChunkSink for OffsetSink<S> {
    fn add_chunk(&mut self, chunk: Chunk) {
        self.inner
            .add_chunk(chunk.shifted(self.offset_a, self.offset_b));
    }
}

/// Coalesces a stream of equal / skip steps into chunks.
///
/// Skips of both kinds with no equal step between them end up in a single
/// replacement chunk. Every chunk is emitted exactly once, on the next equal
/// step or on [`ChunkWriter::close`].
pub struct ChunkWriter<S: ChunkSink> {
    sink: S,
    pos_a: usize,
    pos_b: usize,
    pending_a_start: usize,
    pending_b_start: usize,
    has_open_chunk: bool,
}

impl<S: ChunkSink> ChunkWriter<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            pos_a: 0,
            pos_b: 0,
            pending_a_start: 0,
            pending_b_start: 0,
            has_open_chunk: false,
        }
    }

    /// One element matched on both sides.
    pub fn eq(&mut self) {
        self.flush_chunk();
        self.pos_a += 1;
        self.pos_b += 1;
    }

    /// `len` elements of the first sequence are dropped.
    pub fn skip_a(&mut self, len: usize) {
        self.start_chunk();
        self.pos_a += len;
    }

    /// `len` elements of the second sequence are inserted.
    pub fn skip_b(&mut self, len: usize) {
        self.start_chunk();
        self.pos_b += len;
    }

    /// Emit the open chunk, if any, and hand the sink back.
    pub fn close(mut self) -> S {
        self.flush_chunk();
        self.sink
    }

    fn start_chunk(&mut self) {
        if !self.has_open_chunk {
            self.pending_a_start = self.pos_a;
            self.pending_b_start = self.pos_b;
            self.has_open_chunk = true;
        }
    }

    fn flush_chunk(&mut self) {
        if self.has_open_chunk {
            self.sink.add_chunk(Chunk::new(
                self.pending_a_start,
                self.pos_a - self.pending_a_start,
                self.pending_b_start,
                self.pos_b - self.pending_b_start,
            ));
            self.has_open_chunk = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_skips_merge_into_replacement() {
        let mut writer = ChunkWriter::new(Vec::new());
        writer.eq();
        writer.skip_a(1);
        writer.skip_b(1);
        writer.skip_a(1);
        writer.eq();
        let chunks = writer.close();
        assert_eq!(chunks, vec![Chunk::new(1, 2, 1, 1)]);
    }

    #[test]
    fn test_close_flushes_open_chunk() {
        let mut writer = ChunkWriter::new(Vec::new());
        writer.eq();
        writer.eq();
        writer.skip_b(3);
        let chunks = writer.close();
        assert_eq!(chunks, vec![Chunk::new(2, 0, 2, 3)]);
        assert!(chunks[0].is_insertion());
    }

    #[test]
    fn test_equal_steps_only_emit_nothing() {
        let mut writer = ChunkWriter::new(Vec::new());
        writer.eq();
        writer.eq();
        assert!(writer.close().is_empty());
    }

    #[test]
    fn test_separate_chunks_in_order() {
        let mut writer = ChunkWriter::new(Vec::new());
        writer.skip_a(1);
        writer.eq();
        writer.skip_b(2);
        writer.eq();
        writer.skip_a(1);
        let chunks = writer.close();
        assert_eq!(
            chunks,
            vec![
                Chunk::new(0, 1, 0, 0),
                Chunk::new(2, 0, 1, 2),
                Chunk::new(3, 1, 4, 0),
            ]
        );
    }

    #[test]
    fn test_offset_sink_shifts_positions() {
        let mut sink = OffsetSink::new(Vec::new(), 10, 20);
        sink.add_chunk(Chunk::new(1, 2, 3, 4));
        assert_eq!(sink.into_inner(), vec![Chunk::new(11, 2, 23, 4)]);
    }

    #[test]
    fn test_chunk_serializes_with_field_names() {
        let json = serde_json::to_string(&Chunk::new(0, 0, 0, 3)).unwrap();
        assert_eq!(json, r#"{"a_start":0,"a_len":0,"b_start":0,"b_len":3}"#);
    }
}
