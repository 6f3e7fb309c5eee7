//! Configuration types for Weft.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field has a default, so an empty file is a valid
//! configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration.
//! - [`ParserConfig`] - Engine limits, such as the maximum nesting depth.
//! - [`OutputConfig`] - How errors are reported.
//! - [`ProjectConfig`] - Which files a project directory contributes.
//!
//! # Example
//!
//! ```
//! # use weft::config::{AppConfig, ErrorStyle};
//! let config = AppConfig::default();
//! assert_eq!(config.parser().max_depth(), 256);
//! assert_eq!(config.output().error_style(), ErrorStyle::Fancy);
//! assert_eq!(config.project().extensions(), ["css"]);
//! ```

use serde::Deserialize;

use weft_parser::{DEFAULT_MAX_DEPTH, ParseOptions};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Parser configuration section.
    #[serde(default)]
    parser: ParserConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,

    /// Project configuration section.
    #[serde(default)]
    project: ProjectConfig,
}

impl AppConfig {
    pub fn new(parser: ParserConfig, output: OutputConfig, project: ProjectConfig) -> Self {
        Self {
            parser,
            output,
            project,
        }
    }

    pub fn parser(&self) -> &ParserConfig {
        &self.parser
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    pub fn project(&self) -> &ProjectConfig {
        &self.project
    }
}

/// Engine settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// Maximum number of nested elements before parsing fails.
    #[serde(default = "default_max_depth")]
    max_depth: usize,
}

impl ParserConfig {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// The engine options described by this configuration.
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::default().with_max_depth(self.max_depth)
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

/// How parse errors are presented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorStyle {
    /// Graphical report with a labelled source snippet.
    #[default]
    Fancy,
    /// The engine's one-line excerpt with a caret underline.
    Plain,
}

/// Output settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    error_style: ErrorStyle,
}

impl OutputConfig {
    pub fn new(error_style: ErrorStyle) -> Self {
        Self { error_style }
    }

    pub fn error_style(&self) -> ErrorStyle {
        self.error_style
    }
}

/// Project discovery settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// File extensions, without the dot, collected from a project directory.
    #[serde(default = "default_extensions")]
    extensions: Vec<String>,
}

impl ProjectConfig {
    pub fn new(extensions: Vec<String>) -> Self {
        Self { extensions }
    }

    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Returns `true` if `extension` is one of the configured extensions,
    /// ignoring ASCII case.
    pub fn accepts_extension(&self, extension: &str) -> bool {
        self.extensions
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(extension))
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["css".to_string()]
}
