//! Typed views over a parsed style sheet.
//!
//! The views borrow the generic [`Node`] tree and never copy text: every
//! string they return is a slice of the original source.

use log::{debug, trace};

use weft_parser::{Element, Node, ParseError, Parser};

use crate::grammar::{
    AT_KEYWORD, AT_PRELUDE, AT_RULE, COMMENT, DECLARATION, DECLARATION_BLOCK, NESTED_AT_KEYWORD,
    NESTED_AT_RULE, PROPERTY, RULE_BLOCK, RULE_SET, SELECTOR_ITEM, SELECTOR_LIST, SPACE, STYLESHEET,
    VALUE,
};

/// A parsed style sheet that owns its tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet<'src> {
    root: Node<'src>,
}

impl<'src> Stylesheet<'src> {
    /// Parse a complete style sheet with default options.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for malformed input or trailing text the
    /// grammar cannot consume.
    pub fn parse(source: &'src str) -> Result<Self, ParseError> {
        Self::parse_with(&Parser::default(), source)
    }

    /// Parse a complete style sheet with the given parser.
    ///
    /// # Errors
    ///
    /// See [`parse`](Self::parse).
    pub fn parse_with(parser: &Parser, source: &'src str) -> Result<Self, ParseError> {
        debug!(len = source.len(); "Parsing stylesheet");
        let root = parser.parse_complete(&STYLESHEET, source)?;
        trace!("Parsed stylesheet:\n{root}");
        Ok(Self { root })
    }

    /// Wrap an already parsed node, if it is a style sheet.
    pub fn from_node(root: Node<'src>) -> Option<Self> {
        root.is(&STYLESHEET).then_some(Self { root })
    }

    /// The underlying tree.
    pub fn root(&self) -> &Node<'src> {
        &self.root
    }

    pub fn into_root(self) -> Node<'src> {
        self.root
    }

    /// The full source text, byte for byte.
    pub fn source_text(&self) -> &'src str {
        self.root.source_text()
    }

    /// Every rule set, including those nested in conditional at-rules, in
    /// source order.
    pub fn rule_sets(&self) -> Vec<RuleSet<'_, 'src>> {
        self.root.find_all(&RULE_SET).into_iter().map(RuleSet::wrap).collect()
    }

    /// Every at-rule, nested or not, in source order.
    pub fn at_rules(&self) -> Vec<AtRule<'_, 'src>> {
        self.root.descendants().filter_map(AtRule::new).collect()
    }

    /// The interior text of every comment.
    pub fn comments(&self) -> Vec<&'src str> {
        self.root
            .find_all(&COMMENT)
            .into_iter()
            .filter_map(|node| node.as_block().map(|block| block.content()))
            .collect()
    }

    /// Every declaration in the sheet.
    pub fn declarations(&self) -> Vec<Declaration<'_, 'src>> {
        self.root
            .find_all(&DECLARATION)
            .into_iter()
            .map(Declaration::wrap)
            .collect()
    }

    /// Declarations of custom properties (`--name: value`).
    pub fn custom_properties(&self) -> Vec<Declaration<'_, 'src>> {
        self.declarations()
            .into_iter()
            .filter(Declaration::is_custom_property)
            .collect()
    }
}

/// A rule set: a selector list and a declaration block.
#[derive(Debug, Clone, Copy)]
pub struct RuleSet<'a, 'src> {
    node: &'a Node<'src>,
}

impl<'a, 'src> RuleSet<'a, 'src> {
    /// View `node` as a rule set, if it is one.
    pub fn new(node: &'a Node<'src>) -> Option<Self> {
        node.is(&RULE_SET).then_some(Self { node })
    }

    fn wrap(node: &'a Node<'src>) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &'a Node<'src> {
        self.node
    }

    /// The selector list as written, without surrounding whitespace.
    pub fn selector_text(&self) -> &'src str {
        self.node
            .child(&SELECTOR_LIST)
            .map_or("", |list| list.source_text().trim())
    }

    /// Each comma-separated selector, without the whitespace and comments
    /// around it. Items holding only trivia, as after a trailing comma, are
    /// skipped.
    pub fn selectors(&self) -> Vec<&'src str> {
        self.node
            .child(&SELECTOR_LIST)
            .into_iter()
            .flat_map(|list| list.children_of(&SELECTOR_ITEM))
            .filter_map(selector_body)
            .collect()
    }

    /// Declarations in the rule's block, in source order.
    pub fn declarations(&self) -> Vec<Declaration<'a, 'src>> {
        self.node
            .child(&DECLARATION_BLOCK)
            .map(|block| block.find_all(&DECLARATION))
            .unwrap_or_default()
            .into_iter()
            .map(Declaration::wrap)
            .collect()
    }

    /// The last declaration of `property`, which is the one that applies.
    pub fn get(&self, property: &str) -> Option<Declaration<'a, 'src>> {
        self.declarations()
            .into_iter()
            .rev()
            .find(|declaration| declaration.property() == property)
    }
}

/// The text of a selector item between its leading and trailing trivia.
fn selector_body<'src>(item: &Node<'src>) -> Option<&'src str> {
    let text = item.source_text();
    let children = item.children();
    let is_trivia = |child: &&Node<'src>| child.is(&SPACE) || child.is(&COMMENT);

    let start: usize = children
        .iter()
        .take_while(is_trivia)
        .map(|child| child.source_text().len())
        .sum();
    let end = text.len()
        - children
            .iter()
            .rev()
            .take_while(is_trivia)
            .map(|child| child.source_text().len())
            .sum::<usize>();

    (start < end).then(|| &text[start..end])
}

/// A single `property: value` declaration.
#[derive(Debug, Clone, Copy)]
pub struct Declaration<'a, 'src> {
    node: &'a Node<'src>,
}

impl<'a, 'src> Declaration<'a, 'src> {
    /// View `node` as a declaration, if it is one.
    pub fn new(node: &'a Node<'src>) -> Option<Self> {
        node.is(&DECLARATION).then_some(Self { node })
    }

    fn wrap(node: &'a Node<'src>) -> Self {
        Self { node }
    }

    pub fn node(&self) -> &'a Node<'src> {
        self.node
    }

    pub fn property(&self) -> &'src str {
        self.node.child(&PROPERTY).map_or("", |property| property.source_text())
    }

    /// The value text, without trailing whitespace.
    pub fn value(&self) -> &'src str {
        self.node
            .child(&VALUE)
            .map_or("", |value| value.source_text().trim_end())
    }

    /// Returns `true` for custom properties (`--name`).
    pub fn is_custom_property(&self) -> bool {
        self.property().starts_with("--")
    }

    /// Returns `true` if the value ends with `!important`.
    pub fn is_important(&self) -> bool {
        self.value()
            .strip_suffix("important")
            .is_some_and(|rest| rest.trim_end().ends_with('!'))
    }
}

/// An at-rule such as `@import`, `@font-face` or `@media`.
#[derive(Debug, Clone, Copy)]
pub struct AtRule<'a, 'src> {
    node: &'a Node<'src>,
}

impl<'a, 'src> AtRule<'a, 'src> {
    /// View `node` as an at-rule, if it is one.
    pub fn new(node: &'a Node<'src>) -> Option<Self> {
        (node.is(&AT_RULE) || node.is(&NESTED_AT_RULE)).then_some(Self { node })
    }

    pub fn node(&self) -> &'a Node<'src> {
        self.node
    }

    /// The keyword without the leading `@`, such as `media`.
    pub fn name(&self) -> &'src str {
        self.node
            .child(&AT_KEYWORD)
            .or_else(|| self.node.child(&NESTED_AT_KEYWORD))
            .map_or("", |keyword| keyword.source_text().trim_start_matches('@'))
    }

    /// The text between the keyword and the block or semicolon, trimmed.
    pub fn prelude(&self) -> Option<&'src str> {
        self.node
            .child(&AT_PRELUDE)
            .map(|prelude| prelude.source_text().trim())
    }

    /// Returns `true` if the rule's block holds rules rather than
    /// declarations.
    pub fn is_nested(&self) -> bool {
        self.node.is(&NESTED_AT_RULE)
    }

    /// Rule sets inside this at-rule's block, at any depth.
    pub fn rule_sets(&self) -> Vec<RuleSet<'a, 'src>> {
        self.node
            .child(&RULE_BLOCK)
            .map(|block| block.find_all(&RULE_SET))
            .unwrap_or_default()
            .into_iter()
            .map(RuleSet::wrap)
            .collect()
    }

    /// Declarations of a declaration-bodied at-rule such as `@font-face`.
    pub fn declarations(&self) -> Vec<Declaration<'a, 'src>> {
        self.node
            .child(&DECLARATION_BLOCK)
            .map(|block| block.find_all(&DECLARATION))
            .unwrap_or_default()
            .into_iter()
            .map(Declaration::wrap)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHEET: &str = "\
/* theme */
:root { --accent: #c33; --gap: 4px }
@import url(base.css);
h1, h2 > span { color: var(--accent); margin: 0 !important; color: red }
@media (max-width: 600px) {
  h1 { font-size: 1.2em }
}
@font-face { font-family: Mono; src: url(mono.woff2) format(\"woff2\") }
";

    fn sheet() -> Stylesheet<'static> {
        Stylesheet::parse(SHEET).unwrap_or_else(|err| panic!("{}", err.render()))
    }

    #[test]
    fn test_round_trip() {
        assert_eq!(sheet().source_text(), SHEET);
    }

    #[test]
    fn test_rule_sets_include_nested() {
        let sheet = sheet();
        let selectors: Vec<Vec<&str>> = sheet.rule_sets().iter().map(RuleSet::selectors).collect();

        assert_eq!(selectors, vec![vec![":root"], vec!["h1", "h2 > span"], vec!["h1"]]);
    }

    #[test]
    fn test_selectors_drop_surrounding_trivia() {
        let sheet = Stylesheet::parse("a /* x */ , /* y */ b:not(.c, .d), { e: f }")
            .unwrap_or_else(|err| panic!("{}", err.render()));
        let rules = sheet.rule_sets();

        assert_eq!(rules[0].selectors(), ["a", "b:not(.c, .d)"]);
        assert_eq!(rules[0].selector_text(), "a /* x */ , /* y */ b:not(.c, .d),");
    }

    #[test]
    fn test_declarations_of_rule() {
        let sheet = sheet();
        let rules = sheet.rule_sets();
        let heading = rules[1];

        let pairs: Vec<(&str, &str)> = heading
            .declarations()
            .iter()
            .map(|declaration| (declaration.property(), declaration.value()))
            .collect();
        assert_eq!(
            pairs,
            vec![("color", "var(--accent)"), ("margin", "0 !important"), ("color", "red")]
        );
        assert_eq!(heading.get("color").map(|d| d.value()), Some("red"));
        assert!(heading.get("margin").is_some_and(|d| d.is_important()));
        assert_eq!(heading.selector_text(), "h1, h2 > span");
    }

    #[test]
    fn test_at_rules() {
        let sheet = sheet();
        let at_rules = sheet.at_rules();
        let names: Vec<&str> = at_rules.iter().map(AtRule::name).collect();

        assert_eq!(names, ["import", "media", "font-face"]);
        assert_eq!(at_rules[0].prelude(), Some("url(base.css)"));
        assert!(at_rules[1].is_nested());
        assert_eq!(at_rules[1].prelude(), Some("(max-width: 600px)"));
        assert_eq!(at_rules[1].rule_sets().len(), 1);
        assert_eq!(at_rules[2].declarations().len(), 2);
    }

    #[test]
    fn test_custom_properties_and_comments() {
        let sheet = sheet();
        let custom: Vec<&str> = sheet
            .custom_properties()
            .iter()
            .map(Declaration::property)
            .collect();

        assert_eq!(custom, ["--accent", "--gap"]);
        assert_eq!(sheet.comments(), [" theme "]);
    }

    #[test]
    fn test_views_reject_other_kinds() {
        let sheet = sheet();
        let root = sheet.root();

        assert!(RuleSet::new(root).is_none());
        assert!(Declaration::new(root).is_none());
        assert!(AtRule::new(root).is_none());
        assert!(Stylesheet::from_node(root.clone()).is_some());
    }
}
