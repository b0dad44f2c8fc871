//! Line boundary table over a flat sequence of code units.

const LINE_FEED: u32 = 0x0A;
const CARRIAGE_RETURN: u32 = 0x0D;
const LINE_SEPARATOR: u32 = 0x2028;
const PARAGRAPH_SEPARATOR: u32 = 0x2029;

/// A unit of text: `char` for Unicode scalar values, `u16` for UTF-16.
pub trait CodeUnit: Copy + Eq + Send + Sync {
    fn code_point(self) -> u32;
}

impl<T> CodeUnit for T
where
    T: Copy + Eq + Send + Sync + Into<u32>,
{
    fn code_point(self) -> u32 {
        self.into()
    }
}

/// Whether the unit at `current` ends a line given the unit after it.
///
/// `\r\n` is one terminator ending at the `\n`.
fn is_line_terminator(current: u32, next: Option<u32>) -> bool {
    match current {
        LINE_FEED | LINE_SEPARATOR | PARAGRAPH_SEPARATOR => true,
        CARRIAGE_RETURN => next != Some(LINE_FEED),
        _ => false,
    }
}

/// Text split into lines, each line including its terminator.
///
/// A text with `n` terminators has `n + 1` lines; the last one never has a
/// terminator and is empty when the text ends with one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    /// Position right after each line terminator
    ends: Vec<usize>,
    text_len: usize,
}

impl LineIndex {
    pub fn build<U: CodeUnit>(text: &[U]) -> Self {
        let ends = text
            .iter()
            .enumerate()
            .filter(|&(i, &unit)| {
                is_line_terminator(unit.code_point(), text.get(i + 1).map(|&next| next.code_point()))
            })
            .map(|(i, _)| i + 1)
            .collect();
        Self {
            ends,
            text_len: text.len(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.ends.len() + 1
    }

    /// Start of line `index`; `line_count()` is accepted and yields the
    /// text length, the start of the imaginary line past the end.
    pub fn line_start(&self, index: usize) -> usize {
        if index == 0 {
            0
        } else {
            self.line_end(index - 1)
        }
    }

    /// End of line `index` (exclusive, after its terminator).
    pub fn line_end(&self, index: usize) -> usize {
        self.ends.get(index).copied().unwrap_or(self.text_len)
    }

    pub fn line_len(&self, index: usize) -> usize {
        self.line_end(index) - self.line_start(index)
    }

    pub fn text_len(&self) -> usize {
        self.text_len
    }
}
