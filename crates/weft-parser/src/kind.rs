//! Element kinds: the grammar expressed as data.
//!
//! An [`ElementKind`] is the "type" of a node in the parse tree. A grammar is
//! a set of `static` kinds that reference each other, each carrying a
//! [`Rule`] that tells the engine how to match it:
//!
//! - [`Rule::Pattern`] - a leaf matched by a regular expression anchored at
//!   the current position
//! - [`Rule::Composite`] - an ordered list of [`ElementDefinition`]s
//! - [`Rule::Block`] - a composite enclosed in start/end delimiters, matched
//!   with nesting-depth tracking
//! - [`Rule::List`] - items of a single kind separated by a literal delimiter
//!
//! # Example
//!
//! ```
//! use weft_parser::{Element, ElementDefinition, ElementKind};
//!
//! static WORD: ElementKind = ElementKind::pattern("Word", r"[a-z]+");
//! static SPACE: ElementKind = ElementKind::pattern("Space", r"\s+");
//!
//! static PHRASE_DEFINITIONS: [ElementDefinition; 2] = [
//!     ElementDefinition::element(&WORD),
//!     ElementDefinition::element(&SPACE).optional(),
//! ];
//! static PHRASE: ElementKind = ElementKind::composite("Phrase", &PHRASE_DEFINITIONS);
//! static PHRASES: ElementKind = ElementKind::list("Phrases", ",", &PHRASE);
//!
//! let tree = PHRASES.parse("one ,two").unwrap().unwrap();
//! assert_eq!(tree.children().len(), 2);
//! ```

use std::{fmt, ptr, sync::OnceLock};

use regex::Regex;

use crate::{
    definition::ElementDefinition,
    element::Node,
    error::ParseError,
    parser::Parser,
};

/// The type of a grammar node: a name and the rule used to match it.
///
/// Kinds are compared by identity, so two kinds with the same name are still
/// distinct. Build them with the `const` constructors and store them in
/// `static` items.
pub struct ElementKind {
    name: &'static str,
    rule: Rule,
}

/// How an [`ElementKind`] is matched.
pub enum Rule {
    /// Leaf matched by an anchored regular expression.
    Pattern(Pattern),
    /// Ordered definitions matched one after another.
    Composite(&'static [ElementDefinition]),
    /// Delimited block whose interior is parsed against its definitions.
    Block(BlockRule),
    /// Items separated by a literal delimiter.
    List(ListRule),
}

/// A lazily compiled regular expression for a leaf kind.
pub struct Pattern {
    source: &'static str,
    compiled: OnceLock<Regex>,
}

impl Pattern {
    const fn new(source: &'static str) -> Self {
        Self {
            source,
            compiled: OnceLock::new(),
        }
    }

    /// The pattern as written by the grammar author, without the anchor.
    pub fn as_str(&self) -> &'static str {
        self.source
    }

    /// The compiled pattern, anchored at the start of the haystack.
    ///
    /// Compiled on first use and cached for the lifetime of the kind.
    pub(crate) fn regex(&self) -> Result<&Regex, regex::Error> {
        if let Some(regex) = self.compiled.get() {
            return Ok(regex);
        }
        let regex = Regex::new(&format!("^(?:{})", self.source))?;
        Ok(self.compiled.get_or_init(|| regex))
    }
}

/// Delimiters and interior definitions of a block kind.
pub struct BlockRule {
    start: &'static str,
    end: &'static str,
    nested: bool,
    opaque: &'static [(&'static str, &'static str)],
    definitions: &'static [ElementDefinition],
}

impl BlockRule {
    const fn new(
        start: &'static str,
        end: &'static str,
        nested: bool,
        opaque: &'static [(&'static str, &'static str)],
        definitions: &'static [ElementDefinition],
    ) -> Self {
        assert!(
            !start.is_empty() && !end.is_empty(),
            "block delimiters must not be empty"
        );
        Self {
            start,
            end,
            nested,
            opaque,
            definitions,
        }
    }

    /// The opening delimiter.
    pub fn start(&self) -> &'static str {
        self.start
    }

    /// The closing delimiter.
    pub fn end(&self) -> &'static str {
        self.end
    }

    /// Whether inner occurrences of the start delimiter open nested blocks.
    ///
    /// Always `false` when both delimiters are the same literal.
    pub fn is_nested(&self) -> bool {
        self.nested && self.start != self.end
    }

    /// `(open, close)` pairs of regions skipped while looking for the
    /// closing delimiter, such as strings and comments. Empty for most
    /// blocks.
    pub fn opaque(&self) -> &'static [(&'static str, &'static str)] {
        self.opaque
    }

    /// Definitions the interior is parsed against.
    pub fn definitions(&self) -> &'static [ElementDefinition] {
        self.definitions
    }
}

/// Delimiter and item kind of a list kind.
pub struct ListRule {
    delimiter: &'static str,
    item: &'static ElementKind,
}

impl ListRule {
    /// The literal separating items.
    pub fn delimiter(&self) -> &'static str {
        self.delimiter
    }

    /// The kind of every item.
    pub fn item(&self) -> &'static ElementKind {
        self.item
    }
}

impl ElementKind {
    /// A leaf kind matched by `regex` at the start of the remaining text.
    pub const fn pattern(name: &'static str, regex: &'static str) -> Self {
        Self {
            name,
            rule: Rule::Pattern(Pattern::new(regex)),
        }
    }

    /// A composite kind matched by walking `definitions` in order.
    pub const fn composite(name: &'static str, definitions: &'static [ElementDefinition]) -> Self {
        Self {
            name,
            rule: Rule::Composite(definitions),
        }
    }

    /// A block kind enclosed in `start` and `end`, with nesting.
    ///
    /// # Panics
    ///
    /// Panics (at compile time when used in a `static`) if either delimiter
    /// is empty.
    pub const fn block(
        name: &'static str,
        start: &'static str,
        end: &'static str,
        definitions: &'static [ElementDefinition],
    ) -> Self {
        Self {
            name,
            rule: Rule::Block(BlockRule::new(start, end, true, &[], definitions)),
        }
    }

    /// A nesting block kind with opaque regions: delimiters between an
    /// `(open, close)` pair of `opaque` are ignored, so a string or comment
    /// cannot close the block. In regions whose two literals are equal,
    /// such as quoted strings, a backslash escapes the next character.
    ///
    /// # Panics
    ///
    /// Panics if either delimiter is empty.
    pub const fn opaque_block(
        name: &'static str,
        start: &'static str,
        end: &'static str,
        opaque: &'static [(&'static str, &'static str)],
        definitions: &'static [ElementDefinition],
    ) -> Self {
        Self {
            name,
            rule: Rule::Block(BlockRule::new(start, end, true, opaque, definitions)),
        }
    }

    /// A block kind whose first `end` always closes it, such as a comment.
    ///
    /// # Panics
    ///
    /// Panics if either delimiter is empty.
    pub const fn flat_block(
        name: &'static str,
        start: &'static str,
        end: &'static str,
        definitions: &'static [ElementDefinition],
    ) -> Self {
        Self {
            name,
            rule: Rule::Block(BlockRule::new(start, end, false, &[], definitions)),
        }
    }

    /// A list kind of `item`s separated by `delimiter`.
    ///
    /// # Panics
    ///
    /// Panics if the delimiter is empty.
    pub const fn list(name: &'static str, delimiter: &'static str, item: &'static ElementKind) -> Self {
        assert!(!delimiter.is_empty(), "list delimiter must not be empty");
        Self {
            name,
            rule: Rule::List(ListRule { delimiter, item }),
        }
    }

    /// The kind's name, used in tree dumps and error messages.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The rule used to match this kind.
    pub fn rule(&self) -> &Rule {
        &self.rule
    }

    /// The definitions interpreted for this kind; empty for leaves and lists.
    pub fn definitions(&self) -> &'static [ElementDefinition] {
        match &self.rule {
            Rule::Composite(definitions) => *definitions,
            Rule::Block(block) => block.definitions,
            Rule::Pattern(_) | Rule::List(_) => &[],
        }
    }

    /// Returns `true` if `self` and `other` are the same kind.
    pub fn is(&self, other: &ElementKind) -> bool {
        ptr::eq(self, other)
    }

    /// Parse the start of `source` as this kind with default options.
    ///
    /// Returns `Ok(None)` when the text does not start with this kind.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the text commits to the kind (or one of
    /// its descendants) and is then malformed.
    pub fn parse<'src>(&'static self, source: &'src str) -> Result<Option<Node<'src>>, ParseError> {
        Parser::default().parse(self, source)
    }
}

impl PartialEq for ElementKind {
    fn eq(&self, other: &Self) -> bool {
        self.is(other)
    }
}

impl Eq for ElementKind {}

impl fmt::Debug for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = match &self.rule {
            Rule::Pattern(_) => "Pattern",
            Rule::Composite(_) => "Composite",
            Rule::Block(_) => "Block",
            Rule::List(_) => "List",
        };
        write!(f, "{}({rule})", self.name)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static DIGITS: ElementKind = ElementKind::pattern("Digits", r"\d+");
    static OTHER_DIGITS: ElementKind = ElementKind::pattern("Digits", r"\d+");
    static PARENS: ElementKind = ElementKind::block("Parens", "(", ")", &[]);
    static QUOTED: ElementKind = ElementKind::block("Quoted", "'", "'", &[]);
    static BRACES: ElementKind =
        ElementKind::opaque_block("Braces", "{", "}", &[("\"", "\""), ("/*", "*/")], &[]);

    #[test]
    fn test_kinds_compare_by_identity() {
        assert!(DIGITS.is(&DIGITS));
        assert_ne!(DIGITS, OTHER_DIGITS);
        assert_eq!(DIGITS.name(), OTHER_DIGITS.name());
    }

    #[test]
    fn test_pattern_is_anchored() {
        let Rule::Pattern(pattern) = DIGITS.rule() else {
            panic!("Expected pattern rule");
        };
        let regex = pattern.regex().expect("pattern compiles");

        assert!(regex.find("12ab").is_some());
        assert!(regex.find("ab12").is_none());
        assert_eq!(pattern.as_str(), r"\d+");
    }

    #[test]
    fn test_identical_delimiters_disable_nesting() {
        let Rule::Block(parens) = PARENS.rule() else {
            panic!("Expected block rule");
        };
        let Rule::Block(quoted) = QUOTED.rule() else {
            panic!("Expected block rule");
        };

        assert!(parens.is_nested());
        assert!(!quoted.is_nested());
    }

    #[test]
    fn test_opaque_block_keeps_regions() {
        let Rule::Block(braces) = BRACES.rule() else {
            panic!("Expected block rule");
        };
        let Rule::Block(parens) = PARENS.rule() else {
            panic!("Expected block rule");
        };

        assert!(braces.is_nested());
        assert_eq!(braces.opaque(), [("\"", "\""), ("/*", "*/")]);
        assert!(parens.opaque().is_empty());
    }

    #[test]
    fn test_debug_shows_rule() {
        assert_eq!(format!("{:?}", PARENS), "Parens(Block)");
        assert_eq!(DIGITS.to_string(), "Digits");
    }
}
