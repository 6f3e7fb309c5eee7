//! # Weft Parser
//!
//! A declarative recursive-descent parsing engine. Grammars are plain data:
//! `static` [`ElementKind`] values that describe leaves as anchored regular
//! expressions and composites as ordered lists of [`ElementDefinition`]s.
//! The engine interprets that data directly against the raw text, with no
//! separate lexing pass, and builds a tree of [`Node`]s that borrow the exact
//! text they consumed.
//!
//! ## Usage
//!
//! ```
//! # use weft_parser::{parse, Element, ElementDefinition, ElementKind};
//! static NAME: ElementKind = ElementKind::pattern("Name", r"[a-z]+");
//! static SPACE: ElementKind = ElementKind::pattern("Space", r"\s+");
//! static ARGS_DEFINITIONS: [ElementDefinition; 1] =
//!     [ElementDefinition::element(&NAMES).optional()];
//! static ARGS: ElementKind = ElementKind::block("Args", "(", ")", &ARGS_DEFINITIONS);
//! static NAMES: ElementKind = ElementKind::list("Names", ",", &NAME);
//! static CALL_DEFINITIONS: [ElementDefinition; 3] = [
//!     ElementDefinition::element(&NAME),
//!     ElementDefinition::element(&SPACE).optional(),
//!     ElementDefinition::element(&ARGS),
//! ];
//! static CALL: ElementKind = ElementKind::composite("Call", &CALL_DEFINITIONS);
//!
//! let tree = parse(&CALL, "max (a,b)").unwrap().unwrap();
//! assert_eq!(tree.source_text(), "max (a,b)");
//! assert_eq!(tree.find_all(&NAME).len(), 3);
//!
//! let args = tree.child(&ARGS).and_then(|node| node.as_block()).unwrap();
//! assert_eq!(args.content(), "a,b");
//!
//! // Once `max` matched, the missing argument block is a hard error.
//! let err = parse(&CALL, "max").unwrap_err();
//! assert_eq!(err.span().start(), 3);
//! ```

mod definition;
mod element;
pub mod error;
mod input;
mod kind;
mod parser;
mod span;

pub use definition::{ElementDefinition, Target};
pub use element::{Block, Composite, Descendants, Element, Leaf, List, Node};
pub use error::ParseError;
pub use input::Input;
pub use kind::{BlockRule, ElementKind, ListRule, Pattern, Rule};
pub use parser::{DEFAULT_MAX_DEPTH, ParseOptions, Parser, parse};
pub use span::Span;
