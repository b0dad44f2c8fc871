//! Common prefix and suffix detection.
//!
//! Matching leading and trailing elements shouldn't take space in the
//! differencer table, so the view is narrowed to the middle ranges first.

use crate::SequenceView;

/// A view restricted to the part between a common prefix and suffix.
///
/// Index `i` of the narrowed view is index `prefix_len + i` of the inner one.
#[derive(Debug, Clone)]
pub struct Narrowed<V> {
    inner: V,
    prefix_len: usize,
    suffix_len: usize,
    len_a: usize,
    len_b: usize,
}

impl<V> Narrowed<V> {
    /// Length of the common prefix that was stripped.
    pub fn prefix_len(&self) -> usize {
        self.prefix_len
    }

    /// Length of the common suffix that was stripped.
    pub fn suffix_len(&self) -> usize {
        self.suffix_len
    }

    pub fn into_inner(self) -> V {
        self.inner
    }
}

impl<V: SequenceView> SequenceView for Narrowed<V> {
    fn len_a(&self) -> usize {
        self.len_a
    }

    fn len_b(&self) -> usize {
        self.len_b
    }

    fn equals(&self, i: usize, j: usize) -> bool {
        self.inner
            .equals(i + self.prefix_len, j + self.prefix_len)
    }
}

/// Find the common prefix and suffix of `view` and restrict it to the rest.
pub fn narrow_down<V: SequenceView>(view: V) -> Narrowed<V> {
    let len1 = view.len_a();
    let len2 = view.len_b();

    let prefix_limit = len1.min(len2);
    let mut common_prefix_len = 0;
    while common_prefix_len < prefix_limit && view.equals(common_prefix_len, common_prefix_len) {
        common_prefix_len += 1;
    }

    let suffix_limit = prefix_limit - common_prefix_len;
    let mut common_suffix_len = 0;
    while common_suffix_len < suffix_limit
        && view.equals(len1 - common_suffix_len - 1, len2 - common_suffix_len - 1)
    {
        common_suffix_len += 1;
    }

    Narrowed {
        inner: view,
        prefix_len: common_prefix_len,
        suffix_len: common_suffix_len,
        len_a: len1 - common_prefix_len - common_suffix_len,
        len_b: len2 - common_prefix_len - common_suffix_len,
    }
}
