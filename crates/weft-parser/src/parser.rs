//! The engine that interprets element kinds against a text.
//!
//! Parsing is a single top-down pass over [`Input`] windows. Each rule has
//! one matching routine:
//!
//! - patterns match an anchored regex at the cursor
//! - composites walk their definitions in order, skipping optional ones and
//!   raising [`ErrorCode::E100`] when a required definition fails after the
//!   first
//! - blocks scan for the balancing end delimiter and re-parse the interior
//!   against their definitions
//! - lists alternate between the delimiter and one item
//!
//! A soft mismatch is `Ok(None)` and lets the caller try something else.
//! Hard errors abort the whole parse.

use log::{debug, trace};

use crate::{
    definition::{ElementDefinition, Target},
    element::{Block, Composite, Element, Leaf, List, Node},
    error::{ErrorCode, ParseError, Result},
    input::Input,
    kind::{BlockRule, ElementKind, ListRule, Pattern, Rule},
};

/// Nesting depth allowed when no explicit limit is configured.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Tunables for a [`Parser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    max_depth: usize,
}

impl ParseOptions {
    /// Limit how many composites, blocks, lists and groups may be open at
    /// once before the parse fails with [`ErrorCode::E103`].
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Entry point for parsing a text as an element kind.
///
/// ```
/// use weft_parser::{ElementKind, Parser, ParseOptions, error::ErrorCode};
///
/// static WORD: ElementKind = ElementKind::pattern("Word", r"\w+");
///
/// let parser = Parser::new(ParseOptions::default());
/// let node = parser.parse_complete(&WORD, "hello").unwrap();
/// assert!(node.is(&WORD));
///
/// let err = parser.parse_complete(&WORD, "hello world").unwrap_err();
/// assert_eq!(err.code(), ErrorCode::E102);
/// assert_eq!(err.span().start(), 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Parser {
    options: ParseOptions,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse the start of `source` as `kind`.
    ///
    /// Returns `Ok(None)` if the text does not start with `kind`. The matched
    /// node may cover only a prefix of `source`.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] once the text has committed to a kind and is
    /// then malformed, or when the nesting limit is exceeded.
    pub fn parse<'src>(
        &self,
        kind: &'static ElementKind,
        source: &'src str,
    ) -> Result<Option<Node<'src>>> {
        debug!(kind = kind.name(), len = source.len(); "Parsing source");
        let mut engine = Engine {
            source,
            max_depth: self.options.max_depth,
            depth: 0,
        };
        let node = engine.element(kind, Input::new(source))?;
        debug!(kind = kind.name(), matched = node.as_ref().map_or(0, |node| node.len()); "Parse finished");
        Ok(node)
    }

    /// Parse the whole of `source` as `kind`.
    ///
    /// An empty source parses as an empty node when `kind` is a composite,
    /// so an empty stylesheet is still a stylesheet.
    ///
    /// # Errors
    ///
    /// In addition to the errors of [`parse`](Self::parse), fails with
    /// [`ErrorCode::E104`] when nothing matches and with
    /// [`ErrorCode::E102`] when input is left over.
    pub fn parse_complete<'src>(
        &self,
        kind: &'static ElementKind,
        source: &'src str,
    ) -> Result<Node<'src>> {
        let node = match self.parse(kind, source)? {
            Some(node) => node,
            None if source.is_empty() && matches!(kind.rule(), Rule::Composite(_)) => {
                return Ok(Node::Composite(Composite::new(kind, source, Vec::new())));
            }
            None => {
                return Err(ParseError::new(
                    kind.name(),
                    ErrorCode::E104,
                    format!("input does not start with `{}`", kind.name()),
                    source,
                    0,
                ));
            }
        };

        if node.len() < source.len() {
            return Err(ParseError::new(
                kind.name(),
                ErrorCode::E102,
                "unexpected trailing input",
                source,
                node.len(),
            ));
        }
        Ok(node)
    }
}

/// Parse the start of `source` as `kind` with default options.
///
/// # Errors
///
/// See [`Parser::parse`].
pub fn parse<'src>(kind: &'static ElementKind, source: &'src str) -> Result<Option<Node<'src>>> {
    Parser::default().parse(kind, source)
}

/// Nodes matched by one definition and the cursor after them.
type Matched<'src> = Option<(Vec<Node<'src>>, Input<'src>)>;

/// State of a single parse.
struct Engine<'src> {
    source: &'src str,
    max_depth: usize,
    depth: usize,
}

impl<'src> Engine<'src> {
    fn element(&mut self, kind: &'static ElementKind, input: Input<'src>) -> Result<Option<Node<'src>>> {
        trace!(kind = kind.name(), offset = input.offset(); "Matching element");
        match kind.rule() {
            Rule::Pattern(pattern) => self.pattern(kind, pattern, input),
            Rule::Composite(definitions) => {
                self.enter(kind, input, |engine| engine.composite(kind, definitions, input))
            }
            Rule::Block(rule) => self.enter(kind, input, |engine| engine.block(kind, rule, input)),
            Rule::List(rule) => self.enter(kind, input, |engine| engine.list(kind, rule, input)),
        }
    }

    /// Run `f` one nesting level deeper, failing once the limit is exceeded.
    fn enter<T>(
        &mut self,
        kind: &'static ElementKind,
        input: Input<'src>,
        f: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        if self.depth >= self.max_depth {
            return Err(ParseError::new(
                kind.name(),
                ErrorCode::E103,
                format!("nesting exceeds the limit of {} levels", self.max_depth),
                self.source,
                input.offset(),
            ));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn pattern(
        &mut self,
        kind: &'static ElementKind,
        pattern: &Pattern,
        input: Input<'src>,
    ) -> Result<Option<Node<'src>>> {
        if input.is_empty() {
            return Ok(None);
        }
        let regex = pattern.regex().map_err(|err| {
            ParseError::new(
                kind.name(),
                ErrorCode::E105,
                format!("invalid pattern `{}`: {err}", pattern.as_str()),
                self.source,
                input.offset(),
            )
        })?;

        let text = input.remaining();
        Ok(regex
            .find(text)
            .filter(|m| m.end() > 0)
            .map(|m| Node::Leaf(Leaf::new(kind, &text[..m.end()]))))
    }

    fn composite(
        &mut self,
        kind: &'static ElementKind,
        definitions: &'static [ElementDefinition],
        input: Input<'src>,
    ) -> Result<Option<Node<'src>>> {
        Ok(self
            .definitions(kind, definitions, input)?
            .map(|(children, cursor)| {
                Node::Composite(Composite::new(kind, cursor.consumed_since(input), children))
            }))
    }

    /// Walk `definitions` in order from `input`.
    ///
    /// `owner` is the composite or block whose definitions these are, or
    /// the one enclosing a group; it is the element named in errors.
    fn definitions(
        &mut self,
        owner: &'static ElementKind,
        definitions: &'static [ElementDefinition],
        input: Input<'src>,
    ) -> Result<Matched<'src>> {
        if input.is_empty() {
            return Ok(None);
        }

        let mut children = Vec::new();
        let mut cursor = input;
        for (i, definition) in definitions.iter().enumerate() {
            match self.definition(owner, definition, cursor)? {
                Some((nodes, next)) => {
                    children.extend(nodes);
                    cursor = next;
                }
                None if i == 0 => {
                    if definition.is_required() {
                        return Ok(None);
                    }
                }
                None if definition.is_required() => {
                    return Err(ParseError::new(
                        owner.name(),
                        ErrorCode::E100,
                        format!("expected {definition}"),
                        self.source,
                        cursor.offset(),
                    ));
                }
                None => {}
            }
        }

        if children.is_empty() {
            return Ok(None);
        }
        Ok(Some((children, cursor)))
    }

    /// Match one definition, repeating greedily when it is repeatable.
    fn definition(
        &mut self,
        owner: &'static ElementKind,
        definition: &ElementDefinition,
        input: Input<'src>,
    ) -> Result<Matched<'src>> {
        let mut nodes = Vec::new();
        let mut cursor = input;
        while let Some((matched, next)) = self.target(owner, definition.target(), cursor)? {
            let progressed = next.offset() > cursor.offset();
            nodes.extend(matched);
            cursor = next;
            if !definition.is_repeatable() || !progressed {
                break;
            }
        }

        if nodes.is_empty() {
            return Ok(None);
        }
        Ok(Some((nodes, cursor)))
    }

    fn target(
        &mut self,
        owner: &'static ElementKind,
        target: Target,
        input: Input<'src>,
    ) -> Result<Matched<'src>> {
        match target {
            Target::Leaf(kind) => Ok(self.element(kind, input)?.map(|node| {
                let next = input.advance(node.len());
                (vec![node], next)
            })),
            Target::Group(definitions) => {
                self.enter(owner, input, |engine| engine.definitions(owner, definitions, input))
            }
        }
    }

    fn block(
        &mut self,
        kind: &'static ElementKind,
        rule: &BlockRule,
        input: Input<'src>,
    ) -> Result<Option<Node<'src>>> {
        if !input.starts_with(rule.start()) {
            return Ok(None);
        }

        let body = input.advance(rule.start().len());
        let Some(content_len) = find_block_end(rule, body.remaining()) else {
            return Err(ParseError::new(
                kind.name(),
                ErrorCode::E101,
                format!("unmatched `{}`, expected closing `{}`", rule.start(), rule.end()),
                self.source,
                input.span(rule.start().len()),
            ));
        };

        let interior = body.take(content_len);
        let children = if interior.is_empty() {
            Vec::new()
        } else {
            let (children, rest) = self
                .definitions(kind, rule.definitions(), interior)?
                .unwrap_or((Vec::new(), interior));
            if !rest.is_empty() {
                return Err(ParseError::new(
                    kind.name(),
                    ErrorCode::E102,
                    format!("unexpected content before closing `{}`", rule.end()),
                    self.source,
                    rest.offset(),
                ));
            }
            children
        };

        let next = body.advance(content_len + rule.end().len());
        Ok(Some(Node::Block(Block::new(
            kind,
            next.consumed_since(input),
            children,
        ))))
    }

    fn list(
        &mut self,
        kind: &'static ElementKind,
        rule: &ListRule,
        input: Input<'src>,
    ) -> Result<Option<Node<'src>>> {
        let mut items = Vec::new();
        let mut delimiter_positions = Vec::new();
        let mut cursor = input;

        loop {
            if cursor.starts_with(rule.delimiter()) {
                delimiter_positions.push(items.len());
                cursor = cursor.advance(rule.delimiter().len());
                continue;
            }
            let Some(item) = self.element(rule.item(), cursor)? else {
                break;
            };
            cursor = cursor.advance(item.len());
            items.push(item);
        }

        if items.is_empty() {
            return Ok(None);
        }
        Ok(Some(Node::List(List::new(
            kind,
            cursor.consumed_since(input),
            items,
            delimiter_positions,
        ))))
    }
}

/// Find the byte length of a block interior in `text`, which starts just
/// past the opening delimiter.
///
/// Returns `None` if the closing delimiter is never found at depth zero.
fn find_block_end(rule: &BlockRule, text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut pos = 0;
    while pos < text.len() {
        let rest = &text[pos..];
        let opaque = rule.opaque().iter().find(|(open, _)| rest.starts_with(*open));
        if let Some(&(open, close)) = opaque {
            pos += open.len();
            pos += opaque_len(&text[pos..], close, open == close);
        } else if rule.is_nested() && rest.starts_with(rule.start()) {
            depth += 1;
            pos += rule.start().len();
        } else if rest.starts_with(rule.end()) {
            if depth == 0 {
                return Some(pos);
            }
            depth -= 1;
            pos += rule.end().len();
        } else {
            pos += rest.chars().next().map_or(1, char::len_utf8);
        }
    }
    None
}

/// Length of the rest of an opaque region, up to and including `close`, or
/// all of `text` if the region is never closed.
fn opaque_len(text: &str, close: &str, escapes: bool) -> usize {
    let mut escaped = false;
    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
        } else if escapes && c == '\\' {
            escaped = true;
        } else if text[i..].starts_with(close) {
            return i + close.len();
        }
    }
    text.len()
}
