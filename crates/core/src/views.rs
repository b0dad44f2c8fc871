//! Concrete sequence views over text.

use crate::line_index::{CodeUnit, LineIndex};
use crate::SequenceView;

/// Element-wise view over two slices.
///
/// Used for the token-level pass, where each code unit is one token, and for
/// any caller that already has its tokens in slices.
#[derive(Debug, Clone, Copy)]
pub struct SliceView<'a, T> {
    a: &'a [T],
    b: &'a [T],
}

impl<'a, T: PartialEq> SliceView<'a, T> {
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        Self { a, b }
    }
}

impl<T: PartialEq> SequenceView for SliceView<'_, T> {
    fn len_a(&self) -> usize {
        self.a.len()
    }

    fn len_b(&self) -> usize {
        self.b.len()
    }

    fn equals(&self, i: usize, j: usize) -> bool {
        self.a[i] == self.b[j]
    }
}

/// Two texts seen as arrays of lines.
///
/// Lines are equal when they have the same length and the same units,
/// terminators included.
#[derive(Debug, Clone, Copy)]
pub struct LineView<'a, U> {
    text1: &'a [U],
    text2: &'a [U],
    lines1: &'a LineIndex,
    lines2: &'a LineIndex,
}

impl<'a, U: CodeUnit> LineView<'a, U> {
    pub fn new(text1: &'a [U], lines1: &'a LineIndex, text2: &'a [U], lines2: &'a LineIndex) -> Self {
        Self {
            text1,
            text2,
            lines1,
            lines2,
        }
    }
}

impl<U: CodeUnit> SequenceView for LineView<'_, U> {
    fn len_a(&self) -> usize {
        self.lines1.line_count()
    }

    fn len_b(&self) -> usize {
        self.lines2.line_count()
    }

    fn equals(&self, index1: usize, index2: usize) -> bool {
        let line_start1 = self.lines1.line_start(index1);
        let line_start2 = self.lines2.line_start(index2);
        let line_end1 = self.lines1.line_end(index1);
        let line_end2 = self.lines2.line_end(index2);
        if line_end1 - line_start1 != line_end2 - line_start2 {
            return false;
        }
        self.text1[line_start1..line_end1] == self.text2[line_start2..line_end2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_view() {
        let a = [1, 2, 3];
        let b = [3, 2];
        let view = SliceView::new(&a, &b);
        assert_eq!(view.len_a(), 3);
        assert_eq!(view.len_b(), 2);
        assert!(view.equals(1, 1));
        assert!(view.equals(2, 0));
        assert!(!view.equals(0, 0));
    }

    #[test]
    fn test_line_view_compares_whole_lines() {
        let text1: Vec<char> = "let a;\nlet b;\nend".chars().collect();
        let text2: Vec<char> = "let b;\nlet a;\nend\n".chars().collect();
        let lines1 = LineIndex::build(&text1);
        let lines2 = LineIndex::build(&text2);
        let view = LineView::new(&text1, &lines1, &text2, &lines2);
        assert_eq!(view.len_a(), 3);
        assert_eq!(view.len_b(), 4);
        assert!(view.equals(0, 1));
        assert!(view.equals(1, 0));
        // "end" vs "end\n": the terminator is part of the line
        assert!(!view.equals(2, 2));
    }

    #[test]
    fn test_line_prefix_is_not_equal() {
        let text1: Vec<char> = "abc".chars().collect();
        let text2: Vec<char> = "abcd".chars().collect();
        let lines1 = LineIndex::build(&text1);
        let lines2 = LineIndex::build(&text2);
        let view = LineView::new(&text1, &lines1, &text2, &lines2);
        assert!(!view.equals(0, 0));
    }
}
