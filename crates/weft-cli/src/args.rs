//! Command-line argument definitions for the Weft CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Exactly one input source is accepted: a file, inline text
//! or a project directory.

use clap::{ArgGroup, Parser};

use weft::WeftError;

/// Command-line arguments for the Weft CSS parser
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("source")
        .required(true)
        .args(["input", "text", "project"])
))]
pub struct Args {
    /// Path to the input style sheet
    #[arg(help = "Path to the input file")]
    pub input: Option<String>,

    /// Style sheet text to parse instead of a file
    #[arg(short, long)]
    pub text: Option<String>,

    /// Directory whose style sheets are parsed as one project
    #[arg(short, long)]
    pub project: Option<String>,

    /// Print the parsed element tree
    #[arg(short = 'e', long)]
    pub print_elements: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Where the style sheet text comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source<'a> {
    File(&'a str),
    Text(&'a str),
    Project(&'a str),
}

impl Args {
    /// The single input source selected by the arguments.
    ///
    /// # Errors
    ///
    /// Returns [`WeftError::Config`] unless exactly one of the input path,
    /// `--text` or `--project` is set.
    pub fn source(&self) -> Result<Source<'_>, WeftError> {
        match (&self.input, &self.text, &self.project) {
            (Some(path), None, None) => Ok(Source::File(path)),
            (None, Some(text), None) => Ok(Source::Text(text)),
            (None, None, Some(dir)) => Ok(Source::Project(dir)),
            _ => Err(WeftError::Config(
                "exactly one of INPUT, --text or --project is required".to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, error::ErrorKind};

    use super::*;

    #[test]
    fn test_args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_single_source() {
        let args = Args::try_parse_from(["weft", "-t", "a { b: c }", "-e"]).expect("valid args");

        assert_eq!(args.source().expect("one source"), Source::Text("a { b: c }"));
        assert!(args.print_elements);
        assert_eq!(args.log_level, "info");
    }

    #[test]
    fn test_sources_conflict() {
        let err = Args::try_parse_from(["weft", "style.css", "-p", "styles"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);

        let err = Args::try_parse_from(["weft", "-e"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_source_requires_exactly_one() {
        let args = Args {
            input: Some("a.css".to_string()),
            text: Some("a {}".to_string()),
            ..Args::default()
        };
        assert!(matches!(args.source(), Err(WeftError::Config(_))));
        assert!(matches!(Args::default().source(), Err(WeftError::Config(_))));
    }
}
