//! Error types for Weft operations.
//!
//! [`WeftError`] wraps everything that can go wrong between reading a file
//! and producing a parsed style sheet.

use std::{io, path::PathBuf};

use thiserror::Error;

use weft_parser::ParseError;

/// The main error type for Weft operations.
///
/// The `Parse` variant keeps the engine's [`ParseError`], which carries the
/// full source and a byte span for rich error reporting, together with the
/// file it came from when there is one.
#[derive(Debug, Error)]
pub enum WeftError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse {
        path: Option<PathBuf>,
        err: ParseError,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WeftError {
    /// Create a new `Parse` error, optionally tagged with its file.
    pub fn new_parse_error(err: ParseError, path: Option<PathBuf>) -> Self {
        Self::Parse { path, err }
    }

    /// The file a parse error was found in, if known.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Parse { path, .. } => path.as_ref(),
            _ => None,
        }
    }
}

impl From<ParseError> for WeftError {
    fn from(err: ParseError) -> Self {
        Self::new_parse_error(err, None)
    }
}
