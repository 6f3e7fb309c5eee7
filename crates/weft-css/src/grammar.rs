//! The CSS grammar as element kinds.
//!
//! Every kind is a `static` so that the grammar can be recursive: a
//! [`RULE_BLOCK`] contains a stylesheet body, which contains nested at-rules,
//! which contain rule blocks.
//!
//! Whitespace and comments ("trivia") are kept in the tree so that
//! `source_text` always reproduces the input byte for byte. Quoted strings
//! and comments are opaque to the blocks around them, so a `}` inside a
//! string or comment never closes a rule.

use weft_parser::{ElementDefinition, ElementKind};

/// Regions whose contents blocks skip over: strings and comments.
const OPAQUE: &[(&str, &str)] = &[("\"", "\""), ("'", "'"), ("/*", "*/")];

// Leaves

pub static SPACE: ElementKind = ElementKind::pattern("Space", r"\s+");
pub static COLON: ElementKind = ElementKind::pattern("Colon", r":");
pub static SEMICOLON: ElementKind = ElementKind::pattern("Semicolon", r";");
pub static COMMENT_TEXT: ElementKind = ElementKind::pattern("CommentText", r"[\s\S]+");

/// Selector text outside parentheses: compound selectors joined by
/// whitespace or combinators, with no surrounding whitespace. Quoted
/// attribute values are kept whole. A selector never starts with `@`, which
/// leaves at-rules to their own kinds.
pub static SELECTOR_TEXT: ElementKind = ElementKind::pattern(
    "SelectorText",
    concat!(
        r#"(?:[^\s{},;/@()"']|"(?:[^"\\]|\\[\s\S])*"|'(?:[^'\\]|\\[\s\S])*')"#,
        r#"(?:[^\s{},;/()"']|"(?:[^"\\]|\\[\s\S])*"|'(?:[^'\\]|\\[\s\S])*')*"#,
        r#"(?:\s+(?:[^\s{},;/()"']|"(?:[^"\\]|\\[\s\S])*"|'(?:[^'\\]|\\[\s\S])*')+)*"#,
    ),
);

/// Property names, including custom properties (`--name`) and vendor
/// prefixes (`-webkit-name`).
pub static PROPERTY: ElementKind = ElementKind::pattern("Property", r"-?-?[A-Za-z_][-\w]*");

/// Value words outside parentheses and strings. A `/` is allowed unless it
/// opens a comment.
pub static VALUE_TEXT: ElementKind = ElementKind::pattern(
    "ValueText",
    r#"\s*(?:[^\s;(){}/"']|/[^*;(){}"']|/$)+(?:\s+(?:[^\s;(){}/"']|/[^*;(){}"']|/$)+)*"#,
);

/// A single- or double-quoted string with backslash escapes, after optional
/// whitespace.
pub static QUOTED_STRING: ElementKind = ElementKind::pattern(
    "QuotedString",
    r#"\s*(?:"(?:[^"\\]|\\[\s\S])*"|'(?:[^'\\]|\\[\s\S])*')"#,
);

pub static PARENTHESIZED_TEXT: ElementKind = ElementKind::pattern("ParenthesizedText", r#"[^()"']+"#);

pub static AT_KEYWORD: ElementKind = ElementKind::pattern("AtKeyword", r"@[-\w]+");

/// At-keywords whose block holds rules rather than declarations.
pub static NESTED_AT_KEYWORD: ElementKind = ElementKind::pattern(
    "NestedAtKeyword",
    r"@(?:-[a-zA-Z]+-)?(?:media|supports|container|layer|document|keyframes)\b",
);

/// Everything between an at-keyword and its `;` or block, without trailing
/// whitespace.
pub static AT_PRELUDE: ElementKind = ElementKind::pattern("AtPrelude", r"\s*[^;{}\s](?:[^;{}]*[^;{}\s])?");

// Comments and trivia

static COMMENT_DEFINITIONS: [ElementDefinition; 1] = [ElementDefinition::element(&COMMENT_TEXT)];

/// `/* ... */`; comments do not nest.
pub static COMMENT: ElementKind = ElementKind::flat_block("Comment", "/*", "*/", &COMMENT_DEFINITIONS);

static TRIVIA: [ElementDefinition; 2] = [
    ElementDefinition::element(&SPACE).optional(),
    ElementDefinition::element(&COMMENT).optional(),
];

// Selectors

static SELECTOR_TAIL: [ElementDefinition; 3] = [
    ElementDefinition::group(&TRIVIA).optional().repeated(),
    ElementDefinition::element(&PARENTHESES_GROUP).optional(),
    ElementDefinition::element(&SELECTOR_TEXT).optional(),
];
static SELECTOR_BODY: [ElementDefinition; 2] = [
    ElementDefinition::element(&SELECTOR_TEXT),
    ElementDefinition::group(&SELECTOR_TAIL).optional().repeated(),
];
static SELECTOR_ITEM_DEFINITIONS: [ElementDefinition; 2] = [
    ElementDefinition::group(&TRIVIA).optional().repeated(),
    ElementDefinition::group(&SELECTOR_BODY).optional(),
];

/// One complex selector between commas, with the trivia around it.
/// Parenthesized arguments such as `:not(.a, .b)` are kept whole.
pub static SELECTOR_ITEM: ElementKind = ElementKind::composite("SelectorItem", &SELECTOR_ITEM_DEFINITIONS);

pub static SELECTOR_LIST: ElementKind = ElementKind::list("SelectorList", ",", &SELECTOR_ITEM);

// Values

static PARENTHESES_ITEM: [ElementDefinition; 3] = [
    ElementDefinition::element(&PARENTHESIZED_TEXT).optional(),
    ElementDefinition::element(&QUOTED_STRING).optional(),
    ElementDefinition::element(&PARENTHESES_GROUP).optional(),
];
static PARENTHESES_DEFINITIONS: [ElementDefinition; 1] =
    [ElementDefinition::group(&PARENTHESES_ITEM).optional().repeated()];

/// A balanced `( ... )` inside a value, such as function arguments.
pub static PARENTHESES_GROUP: ElementKind =
    ElementKind::opaque_block("ParenthesesGroup", "(", ")", OPAQUE, &PARENTHESES_DEFINITIONS);

static VALUE_ITEM: [ElementDefinition; 3] = [
    ElementDefinition::element(&VALUE_TEXT).optional(),
    ElementDefinition::element(&QUOTED_STRING).optional(),
    ElementDefinition::element(&PARENTHESES_GROUP).optional(),
];
static VALUE_DEFINITIONS: [ElementDefinition; 1] = [ElementDefinition::group(&VALUE_ITEM).repeated()];

pub static VALUE: ElementKind = ElementKind::composite("Value", &VALUE_DEFINITIONS);

// Declarations

static DECLARATION_DEFINITIONS: [ElementDefinition; 6] = [
    ElementDefinition::element(&PROPERTY),
    ElementDefinition::group(&TRIVIA).optional().repeated(),
    ElementDefinition::element(&COLON),
    ElementDefinition::group(&TRIVIA).optional().repeated(),
    ElementDefinition::element(&VALUE),
    ElementDefinition::group(&TRIVIA).optional().repeated(),
];

/// `property: value`, with trailing trivia up to the `;` or `}`.
pub static DECLARATION: ElementKind = ElementKind::composite("Declaration", &DECLARATION_DEFINITIONS);

static DECLARATION_SLOT_DEFINITIONS: [ElementDefinition; 2] = [
    ElementDefinition::group(&TRIVIA).optional().repeated(),
    ElementDefinition::element(&DECLARATION).optional(),
];

/// The text between two semicolons: leading trivia and at most one
/// declaration. Slots holding only trivia come from `;;` and trailing `;`.
pub static DECLARATION_SLOT: ElementKind =
    ElementKind::composite("DeclarationSlot", &DECLARATION_SLOT_DEFINITIONS);

pub static DECLARATION_LIST: ElementKind = ElementKind::list("DeclarationList", ";", &DECLARATION_SLOT);

static DECLARATION_BLOCK_DEFINITIONS: [ElementDefinition; 1] =
    [ElementDefinition::element(&DECLARATION_LIST).optional()];

pub static DECLARATION_BLOCK: ElementKind =
    ElementKind::opaque_block("DeclarationBlock", "{", "}", OPAQUE, &DECLARATION_BLOCK_DEFINITIONS);

// Rules

static RULE_SET_DEFINITIONS: [ElementDefinition; 3] = [
    ElementDefinition::element(&SELECTOR_LIST),
    ElementDefinition::group(&TRIVIA).optional().repeated(),
    ElementDefinition::element(&DECLARATION_BLOCK),
];

pub static RULE_SET: ElementKind = ElementKind::composite("RuleSet", &RULE_SET_DEFINITIONS);

static AT_RULE_DEFINITIONS: [ElementDefinition; 5] = [
    ElementDefinition::element(&AT_KEYWORD),
    ElementDefinition::element(&AT_PRELUDE).optional(),
    ElementDefinition::group(&TRIVIA).optional().repeated(),
    ElementDefinition::element(&SEMICOLON).optional(),
    ElementDefinition::element(&DECLARATION_BLOCK).optional(),
];

/// Statement at-rules (`@import ...;`) and at-rules whose block holds
/// declarations (`@font-face { ... }`).
pub static AT_RULE: ElementKind = ElementKind::composite("AtRule", &AT_RULE_DEFINITIONS);

static NESTED_AT_RULE_BODY: [ElementDefinition; 2] = [
    ElementDefinition::element(&RULE_BLOCK).optional(),
    ElementDefinition::element(&SEMICOLON).optional(),
];
static NESTED_AT_RULE_DEFINITIONS: [ElementDefinition; 4] = [
    ElementDefinition::element(&NESTED_AT_KEYWORD),
    ElementDefinition::element(&AT_PRELUDE).optional(),
    ElementDefinition::group(&TRIVIA).optional().repeated(),
    ElementDefinition::group(&NESTED_AT_RULE_BODY),
];

/// Conditional group rules such as `@media` whose block holds rules. The
/// statement form (`@layer base, theme;`) ends in a semicolon instead.
pub static NESTED_AT_RULE: ElementKind = ElementKind::composite("NestedAtRule", &NESTED_AT_RULE_DEFINITIONS);

/// `{ ... }` holding a stylesheet body.
pub static RULE_BLOCK: ElementKind =
    ElementKind::opaque_block("RuleBlock", "{", "}", OPAQUE, &STYLESHEET_DEFINITIONS);

// Stylesheet

static STYLESHEET_ITEM: [ElementDefinition; 4] = [
    ElementDefinition::group(&TRIVIA).optional().repeated(),
    ElementDefinition::element(&NESTED_AT_RULE).optional(),
    ElementDefinition::element(&AT_RULE).optional(),
    ElementDefinition::element(&RULE_SET).optional(),
];
static STYLESHEET_DEFINITIONS: [ElementDefinition; 1] =
    [ElementDefinition::group(&STYLESHEET_ITEM).optional().repeated()];

/// A whole style sheet: rules and at-rules separated by trivia.
pub static STYLESHEET: ElementKind = ElementKind::composite("Stylesheet", &STYLESHEET_DEFINITIONS);
