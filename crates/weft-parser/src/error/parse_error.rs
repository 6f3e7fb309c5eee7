//! The ParseError type carried out of a failed parse.

use thiserror::Error;

use crate::{
    error::{ErrorCode, Excerpt},
    span::Span,
};

/// A type alias for `Result<T, ParseError>`.
pub type Result<T> = std::result::Result<T, ParseError>;

/// A hard parse error.
///
/// Carries the name of the element kind that failed, an [`ErrorCode`], a
/// message, the full original source text and the offending byte range in
/// that source. The full source is kept (rather than the failing suffix) so
/// that callers can render context around the error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error while parsing element \"{element}\": {message}")]
pub struct ParseError {
    element: &'static str,
    code: ErrorCode,
    message: String,
    src: String,
    span: Span,
}

impl ParseError {
    /// Create a new parse error.
    ///
    /// `span` accepts either a byte range or a bare position; a position `p`
    /// is normalized to the range `[p, p + 1)`.
    pub fn new(
        element: &'static str,
        code: ErrorCode,
        message: impl Into<String>,
        src: &str,
        span: impl Into<Span>,
    ) -> Self {
        Self {
            element,
            code,
            message: message.into(),
            src: src.to_owned(),
            span: span.into(),
        }
    }

    /// Name of the element kind that raised the error.
    pub fn element(&self) -> &'static str {
        self.element
    }

    /// Get the error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Get the message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The full source text the error refers to.
    pub fn src(&self) -> &str {
        &self.src
    }

    /// Byte range of the error within [`src`](Self::src).
    pub fn span(&self) -> Span {
        self.span
    }

    /// Source excerpt around the error with a caret underline.
    pub fn excerpt(&self) -> Excerpt {
        Excerpt::new(&self.src, self.span)
    }

    /// Render the error as a multi-line report: the element name and message
    /// followed by the source excerpt and its caret line.
    pub fn render(&self) -> String {
        format!("error[{}]: {}\n{}", self.code, self, self.excerpt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::new(
            "RuleSet",
            ErrorCode::E100,
            "expected element `DeclarationBlock`",
            "a b",
            3,
        );

        assert_eq!(
            err.to_string(),
            "Error while parsing element \"RuleSet\": expected element `DeclarationBlock`"
        );
    }

    #[test]
    fn test_parse_error_keeps_full_source() {
        let err = ParseError::new("Block", ErrorCode::E101, "unmatched", "x { y", 2..3);

        assert_eq!(err.src(), "x { y");
        assert_eq!(err.span(), Span::new(2..3));
        assert_eq!(err.element(), "Block");
        assert_eq!(err.code(), ErrorCode::E101);
    }

    #[test]
    fn test_render_contains_caret_line() {
        let err = ParseError::new("Declaration", ErrorCode::E100, "missing value", "a: ;", 3);
        let rendered = err.render();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(
            lines[0],
            "error[E100]: Error while parsing element \"Declaration\": missing value"
        );
        assert_eq!(lines[1], "a: ;");
        assert_eq!(lines[2], "   ^");
    }
}
