//! Weft - lossless CSS parsing on a declarative recursive-descent engine.
//!
//! This crate ties the generic engine in [`weft_parser`] and the CSS grammar
//! in [`weft_css`] together behind a configurable [`StylesheetBuilder`], and
//! adds multi-file [`Project`]s discovered from a directory tree.

pub mod config;

mod error;
mod project;

pub use weft_css::{AtRule, Declaration, RuleSet, Stylesheet, grammar};
pub use weft_parser::{Element, Node, ParseError, Span, error::ErrorCode};

pub use error::WeftError;
pub use project::{Project, ProjectStats};

use std::path::Path;

use log::{debug, info, trace};

use weft_parser::Parser;

use config::AppConfig;

/// Builder for parsing style sheets with a shared configuration.
///
/// # Examples
///
/// ```rust
/// use weft::{StylesheetBuilder, config::AppConfig};
///
/// let builder = StylesheetBuilder::new(AppConfig::default());
/// let sheet = builder.parse("a { color: red }").expect("Failed to parse");
/// assert_eq!(sheet.rule_sets()[0].selectors(), ["a"]);
///
/// // Or use default config
/// let builder = StylesheetBuilder::default();
/// ```
#[derive(Debug, Default)]
pub struct StylesheetBuilder {
    config: AppConfig,
}

impl StylesheetBuilder {
    /// Create a new builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// An engine parser carrying the configured options.
    pub fn parser(&self) -> Parser {
        Parser::new(self.config.parser().parse_options())
    }

    /// Parse a complete style sheet.
    ///
    /// # Errors
    ///
    /// Returns [`WeftError::Parse`] for malformed input, unterminated blocks,
    /// trailing text or input nested deeper than the configured limit.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use weft::{ErrorCode, StylesheetBuilder, WeftError};
    ///
    /// let err = StylesheetBuilder::default().parse("a { b: c").unwrap_err();
    /// let WeftError::Parse { err, .. } = err else {
    ///     panic!("expected a parse error");
    /// };
    /// assert_eq!(err.code(), ErrorCode::E101);
    /// ```
    pub fn parse<'src>(&self, source: &'src str) -> Result<Stylesheet<'src>, WeftError> {
        info!("Parsing stylesheet");
        self.parse_source(source, None)
    }

    /// Parse the contents of the file at `path`, tagging any parse error
    /// with that path.
    ///
    /// The file is not read; `source` must already hold its contents.
    ///
    /// # Errors
    ///
    /// See [`parse`](Self::parse).
    pub fn parse_with_path<'src>(
        &self,
        path: &Path,
        source: &'src str,
    ) -> Result<Stylesheet<'src>, WeftError> {
        info!(path = path.display().to_string(); "Parsing stylesheet file");
        self.parse_source(source, Some(path))
    }

    fn parse_source<'src>(
        &self,
        source: &'src str,
        path: Option<&Path>,
    ) -> Result<Stylesheet<'src>, WeftError> {
        let sheet = Stylesheet::parse_with(&self.parser(), source)
            .map_err(|err| WeftError::new_parse_error(err, path.map(Path::to_path_buf)))?;

        debug!(
            rule_sets = sheet.rule_sets().len(),
            at_rules = sheet.at_rules().len();
            "Stylesheet parsed successfully"
        );
        trace!(root:? = sheet.root(); "Parsed tree");

        Ok(sheet)
    }
}
