//! Error codes for the Weft engine.
//!
//! All engine errors live in the `E1xx` range so that grammar crates built on
//! top of the engine can claim their own ranges.

use std::fmt;

/// Error codes for categorizing hard parse errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Missing required element.
    ///
    /// A composite matched its first definition, committing to the construct,
    /// and then a later required definition did not match.
    E100,

    /// Unmatched block delimiter.
    ///
    /// A block's start delimiter was found but the input ended before the
    /// matching end delimiter.
    E101,

    /// Unexpected content.
    ///
    /// Text was left over after a block interior or a complete parse.
    E102,

    /// Nesting too deep.
    ///
    /// The element nesting depth exceeded the configured limit.
    E103,

    /// No match.
    ///
    /// A complete parse was requested but the input does not start with the
    /// requested element at all.
    E104,

    /// Invalid pattern.
    ///
    /// A leaf element's regular expression failed to compile.
    E105,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E103 => "E103",
            ErrorCode::E104 => "E104",
            ErrorCode::E105 => "E105",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "missing required element",
            ErrorCode::E101 => "unmatched block delimiter",
            ErrorCode::E102 => "unexpected content",
            ErrorCode::E103 => "nesting too deep",
            ErrorCode::E104 => "no match",
            ErrorCode::E105 => "invalid pattern",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E100.to_string(), "E100");
        assert_eq!(ErrorCode::E105.to_string(), "E105");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E101.description(), "unmatched block delimiter");
        assert_eq!(ErrorCode::E103.description(), "nesting too deep");
    }
}
