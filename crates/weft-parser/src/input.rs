//! Zero-copy cursor over the text being parsed.
//!
//! Every trial match in the engine works on an [`Input`]: a window
//! `[offset, end)` over the full source. Taking a suffix or narrowing the
//! window to a block interior is pointer arithmetic, never a copy, which keeps
//! backtracking over long runs of optional definitions linear.

use crate::span::Span;

/// A copyable window over an immutable source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Input<'src> {
    source: &'src str,
    start: usize,
    end: usize,
}

impl<'src> Input<'src> {
    /// Create an input covering the whole of `source`.
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            start: 0,
            end: source.len(),
        }
    }

    /// The full source text this window belongs to.
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Absolute byte offset of the first unconsumed byte.
    pub fn offset(&self) -> usize {
        self.start
    }

    /// Absolute byte offset one past the last byte of the window.
    pub fn end(&self) -> usize {
        self.end
    }

    /// The unconsumed text of the window.
    pub fn remaining(&self) -> &'src str {
        &self.source[self.start..self.end]
    }

    /// Number of unconsumed bytes in the window.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` when nothing is left in the window.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if the unconsumed text begins with `prefix`.
    pub fn starts_with(&self, prefix: &str) -> bool {
        self.remaining().starts_with(prefix)
    }

    /// Move the cursor forward by `len` bytes, clamped to the window end.
    ///
    /// `len` must land on a character boundary; the engine only ever advances
    /// by the length of text it has matched.
    pub fn advance(&self, len: usize) -> Self {
        Self {
            start: (self.start + len).min(self.end),
            ..*self
        }
    }

    /// Narrow the window to the next `len` bytes.
    pub fn take(&self, len: usize) -> Self {
        Self {
            end: (self.start + len).min(self.end),
            ..*self
        }
    }

    /// The text consumed between `earlier` and this cursor.
    pub fn consumed_since(&self, earlier: Input<'src>) -> &'src str {
        &self.source[earlier.start..self.start]
    }

    /// Span of `len` bytes starting at the cursor.
    pub fn span(&self, len: usize) -> Span {
        Span::new(self.start..self.start + len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_keeps_absolute_offset() {
        let input = Input::new("abc{def}").advance(3);

        assert_eq!(input.offset(), 3);
        assert_eq!(input.remaining(), "{def}");
        assert!(input.starts_with("{"));
    }

    #[test]
    fn test_take_restricts_window() {
        let inner = Input::new("{def}ghi").advance(1).take(3);

        assert_eq!(inner.remaining(), "def");
        assert_eq!(inner.offset(), 1);
        assert_eq!(inner.end(), 4);
        assert_eq!(inner.advance(10).remaining(), "");
        assert!(inner.advance(3).is_empty());
    }

    #[test]
    fn test_consumed_since() {
        let start = Input::new("hello world");
        let cursor = start.advance(5);

        assert_eq!(cursor.consumed_since(start), "hello");
        assert_eq!(cursor.len(), 6);
    }
}
