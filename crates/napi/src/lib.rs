//! Node.js bindings for the linediff engine.
//!
//! Positions are UTF-16 code unit offsets so they index JavaScript strings
//! directly. Change lists cross the boundary as flat arrays of
//! `(changeStart, changeEndOld, changeEndNew)` triples.

use napi::bindgen_prelude::*;
use napi_derive::napi;

use linediff_core::{
    compare_units, flatten_position_changes, position_changes, translate_position,
    Chunk as CoreChunk, CompareConfig, DiffError, PositionChange,
};

/// Configuration options for a comparison.
/// All fields are optional; unspecified values use core defaults.
#[napi(object)]
pub struct CompareOptions {
    /// Changed line regions shorter than this are re-diffed per character.
    pub chunk_len_limit: Option<u32>,
    /// Largest diff table (in cells) a single pass may allocate.
    pub max_table_cells: Option<u32>,
    /// Run nested per-character diffs on a thread pool.
    pub parallel: Option<bool>,
}

/// A changed region, in UTF-16 code units.
#[napi(object)]
pub struct Chunk {
    pub a_start: u32,
    pub a_len: u32,
    pub b_start: u32,
    pub b_len: u32,
}

impl From<CoreChunk> for Chunk {
    fn from(chunk: CoreChunk) -> Self {
        Self {
            a_start: chunk.a_start as u32,
            a_len: chunk.a_len as u32,
            b_start: chunk.b_start as u32,
            b_len: chunk.b_len as u32,
        }
    }
}

fn to_config(options: Option<CompareOptions>) -> CompareConfig {
    let defaults = CompareConfig::default();
    match options {
        Some(opts) => CompareConfig {
            chunk_len_limit: opts.chunk_len_limit.map(|v| v as usize).unwrap_or(defaults.chunk_len_limit),
            max_table_cells: opts.max_table_cells.map(|v| v as usize).unwrap_or(defaults.max_table_cells),
            parallel: opts.parallel.unwrap_or(defaults.parallel),
        },
        None => defaults,
    }
}

fn to_napi_error(err: DiffError) -> Error {
    Error::from_reason(format!("{}: {}", err.code(), err))
}

fn compare_utf16(s1: &str, s2: &str, options: Option<CompareOptions>) -> Result<Vec<CoreChunk>> {
    let text1: Vec<u16> = s1.encode_utf16().collect();
    let text2: Vec<u16> = s2.encode_utf16().collect();
    compare_units(&text1, &text2, &to_config(options)).map_err(to_napi_error)
}

/// Compare two strings and return the flat position change array.
///
/// @param s1 - The original text.
/// @param s2 - The changed text.
/// @param options - Optional comparison settings.
#[napi]
pub fn compare_strings(s1: String, s2: String, options: Option<CompareOptions>) -> Result<Vec<u32>> {
    let chunks = compare_utf16(&s1, &s2, options)?;
    Ok(flatten_position_changes(&position_changes(&chunks))
        .into_iter()
        .map(|v| v as u32)
        .collect())
}

/// Compare two strings and return the chunk objects.
#[napi]
pub fn compare_chunks(s1: String, s2: String, options: Option<CompareOptions>) -> Result<Vec<Chunk>> {
    let chunks = compare_utf16(&s1, &s2, options)?;
    Ok(chunks.into_iter().map(Into::into).collect())
}

/// Translate a position in the old text into the new text.
///
/// @param changes - Flat change array as returned by `compareStrings`.
/// @param position - Position in the old text, outside every changed region.
#[napi(js_name = "translatePosition")]
pub fn translate(changes: Vec<u32>, position: u32) -> Result<u32> {
    let flat: Vec<usize> = changes.into_iter().map(|v| v as usize).collect();
    let changes = PositionChange::from_flat(&flat).map_err(to_napi_error)?;
    Ok(translate_position(&changes, position as usize) as u32)
}
