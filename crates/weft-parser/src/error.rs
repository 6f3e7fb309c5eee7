//! Hard parse errors raised by the engine.
//!
//! A soft mismatch ("this alternative does not apply here") is never an
//! error: it is reported as `Ok(None)` and drives backtracking. A
//! [`ParseError`] means the input committed to a construct and then turned
//! out to be malformed, so the whole parse is aborted.
//!
//! # Example
//!
//! ```
//! # use weft_parser::error::{ErrorCode, ParseError};
//! let err = ParseError::new(
//!     "Declaration",
//!     ErrorCode::E100,
//!     "expected element `Colon`",
//!     "color red",
//!     6,
//! );
//!
//! assert_eq!(err.span().start(), 6);
//! assert_eq!(err.span().end(), 7);
//! println!("{}", err.render());
//! ```

mod error_code;
mod excerpt;
mod parse_error;

pub use error_code::ErrorCode;
pub use excerpt::Excerpt;
pub use parse_error::ParseError;

pub(crate) use parse_error::Result;
