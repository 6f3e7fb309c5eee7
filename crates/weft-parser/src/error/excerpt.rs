//! Fixed-width source excerpts with a caret underline.
//!
//! The excerpt is a single display line cut out of the source around an
//! error span. Newlines and tabs are shown escaped so the excerpt always fits
//! on one line, and the caret line is shifted to match the escaped width.

use std::fmt;

use crate::span::Span;

/// Characters of context shown on each side of the marked range.
const CONTEXT: usize = 24;

/// Longest marked range rendered in full; longer spans are cut.
const MAX_MARKED: usize = 2 * CONTEXT;

const ELLIPSIS: &str = "...";

/// A one-line excerpt of a source text with a caret marker line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Excerpt {
    line: String,
    marker: String,
}

impl Excerpt {
    /// Build the excerpt for `span` within `src`.
    ///
    /// The window holds up to [`CONTEXT`] characters on either side of the
    /// span. When the span is close to one end of the source the unused
    /// context is given to the other side, so the excerpt keeps its width.
    pub fn new(src: &str, span: Span) -> Self {
        let chars: Vec<(usize, char)> = src.char_indices().collect();
        let total = chars.len();

        let start = chars.partition_point(|(pos, _)| *pos < span.start());
        let end = chars
            .partition_point(|(pos, _)| *pos < span.end())
            .max(start)
            .min(start + MAX_MARKED);

        let before = start.min(CONTEXT);
        let after = (total - end).min(CONTEXT);
        let extra_after = (CONTEXT - before).min(total - end - after);
        let extra_before = (CONTEXT - after).min(start - before);

        let window_start = start - before - extra_before;
        let window_end = end + after + extra_after;

        let mut line = String::new();
        let mut marker = String::new();

        if window_start > 0 {
            line.push_str(ELLIPSIS);
            marker.push_str(&" ".repeat(ELLIPSIS.len()));
        }

        for (i, (_, c)) in chars[window_start..window_end].iter().enumerate() {
            let shown = escape(*c);
            let width = shown.chars().count();
            line.push_str(&shown);

            let index = window_start + i;
            let fill = if index < start { ' ' } else { '^' };
            if index < end {
                marker.extend(std::iter::repeat_n(fill, width));
            }
        }

        if start == end {
            marker.push('^');
        }

        if window_end < total {
            line.push_str(ELLIPSIS);
        }

        Self { line, marker }
    }

    /// The excerpt text.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// The caret line aligned under [`line`](Self::line).
    pub fn marker(&self) -> &str {
        &self.marker
    }
}

impl fmt::Display for Excerpt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.line, self.marker)
    }
}

fn escape(c: char) -> String {
    match c {
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_source_is_shown_whole() {
        let excerpt = Excerpt::new("a { b }", Span::new(2..3));

        assert_eq!(excerpt.line(), "a { b }");
        assert_eq!(excerpt.marker(), "  ^");
    }

    #[test]
    fn test_marker_spans_range() {
        let excerpt = Excerpt::new("color: red", Span::new(0..5));

        assert_eq!(excerpt.marker(), "^^^^^");
    }

    #[test]
    fn test_escaped_characters_widen_marker() {
        let excerpt = Excerpt::new("a\n\tb", Span::new(3..4));

        assert_eq!(excerpt.line(), "a\\n\\tb");
        assert_eq!(excerpt.marker(), "     ^");
    }

    #[test]
    fn test_error_at_end_of_input() {
        let excerpt = Excerpt::new("abc", Span::new(3..4));

        assert_eq!(excerpt.line(), "abc");
        assert_eq!(excerpt.marker(), "   ^");
    }

    #[test]
    fn test_long_source_is_truncated_on_both_sides() {
        let src = format!("{}X{}", "a".repeat(100), "b".repeat(100));
        let excerpt = Excerpt::new(&src, Span::new(100..101));

        let expected_line = format!("...{}X{}...", "a".repeat(CONTEXT), "b".repeat(CONTEXT));
        assert_eq!(excerpt.line(), expected_line);
        assert_eq!(excerpt.marker().len(), ELLIPSIS.len() + CONTEXT + 1);
        assert!(excerpt.marker().ends_with('^'));
    }

    #[test]
    fn test_window_shifts_near_start() {
        let src = format!("X{}", "b".repeat(100));
        let excerpt = Excerpt::new(&src, Span::new(0..1));

        // Context unused before the span is given to the right-hand side.
        assert_eq!(excerpt.line(), format!("X{}...", "b".repeat(2 * CONTEXT)));
        assert_eq!(excerpt.marker(), "^");
    }

    #[test]
    fn test_window_shifts_near_end() {
        let src = format!("{}X", "a".repeat(100));
        let excerpt = Excerpt::new(&src, Span::new(100..101));

        assert_eq!(excerpt.line(), format!("...{}X", "a".repeat(2 * CONTEXT)));
    }
}
