//! # Weft CSS
//!
//! A CSS grammar for the `weft-parser` engine. The grammar lives in
//! [`grammar`] as `static` element kinds; [`Stylesheet`] and the other views
//! give typed access to the resulting tree.
//!
//! The tree keeps every byte of the input, including whitespace and
//! comments, so `source_text` reproduces the original sheet exactly.
//!
//! ## Usage
//!
//! ```
//! # use weft_css::Stylesheet;
//! let sheet = Stylesheet::parse("a, b { color: red; margin: 0 }").unwrap();
//!
//! let rule = sheet.rule_sets()[0];
//! assert_eq!(rule.selectors(), ["a", "b"]);
//! assert_eq!(rule.get("color").map(|d| d.value()), Some("red"));
//! assert_eq!(sheet.source_text(), "a, b { color: red; margin: 0 }");
//! ```

pub mod grammar;
mod stylesheet;

pub use stylesheet::{AtRule, Declaration, RuleSet, Stylesheet};
