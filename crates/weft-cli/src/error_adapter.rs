//! Error adapter for converting WeftError to miette diagnostics.
//!
//! Parse errors carry their whole source, so they render as a labelled
//! snippet. Every other error renders as a one-line report. The plain style
//! skips miette and prints the engine's own caret excerpt.

use std::fmt;

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, NamedSource, SourceSpan,
};

use weft::{ParseError, Span, WeftError, config::ErrorStyle};

/// Name shown for sources that did not come from a file.
pub(crate) const INLINE_SOURCE_NAME: &str = "<input>";

/// Adapter for a single [`ParseError`].
pub struct ParseErrorAdapter<'a> {
    err: &'a ParseError,
    src: NamedSource<String>,
}

impl<'a> ParseErrorAdapter<'a> {
    /// Create a new adapter; `name` is shown above the snippet.
    pub fn new(err: &'a ParseError, name: impl AsRef<str>) -> Self {
        Self {
            err,
            src: NamedSource::new(name, err.src().to_owned()),
        }
    }
}

impl fmt::Debug for ParseErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseErrorAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for ParseErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for ParseErrorAdapter<'_> {}

impl MietteDiagnostic for ParseErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.err.code()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = span_to_miette(self.err.span(), self.err.src());
        let label = LabeledSpan::new_primary_with_span(
            Some(self.err.code().description().to_string()),
            span,
        );
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for non-parse [`WeftError`] variants.
pub struct ErrorAdapter<'a>(pub &'a WeftError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            WeftError::Io(_) => "weft::io",
            WeftError::Parse { err, .. } => return Some(Box::new(err.code())),
            WeftError::Config(_) => "weft::config",
        };
        Some(Box::new(code))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A parse error with its source snippet.
    Diagnostic(ParseErrorAdapter<'a>),
    /// An error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`Span`] to a miette [`SourceSpan`] that stays inside `src`.
///
/// Errors at the end of input point one byte past it; the span is clamped
/// to the source and widened to the next character boundary.
fn span_to_miette(span: Span, src: &str) -> SourceSpan {
    let start = span.start().min(src.len());
    let mut end = span.end().clamp(start, src.len());
    while !src.is_char_boundary(end) {
        end += 1;
    }
    SourceSpan::new(start.into(), end - start)
}

/// Wrap a [`WeftError`] for miette.
pub fn to_reportable(err: &WeftError) -> Reportable<'_> {
    match err {
        WeftError::Parse { path, err } => {
            let name = path
                .as_ref()
                .map_or_else(|| INLINE_SOURCE_NAME.to_string(), |path| path.display().to_string());
            Reportable::Diagnostic(ParseErrorAdapter::new(err, name))
        }
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

/// Render `err` in the given style.
pub fn render(err: &WeftError, style: ErrorStyle) -> String {
    match style {
        ErrorStyle::Fancy => {
            let reporter = GraphicalReportHandler::new();
            let mut writer = String::new();
            reporter
                .render_report(&mut writer, &to_reportable(err))
                .expect("Writing to String buffer is infallible");
            writer
        }
        ErrorStyle::Plain => match err {
            WeftError::Parse {
                path: Some(path),
                err,
            } => format!("{}: {}", path.display(), err.render()),
            WeftError::Parse { path: None, err } => err.render(),
            _ => err.to_string(),
        },
    }
}
