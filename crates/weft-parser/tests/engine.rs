//! Integration tests for the public engine API
//!
//! A small `key = value` section grammar exercises every rule kind through
//! the exported types only.

use weft_parser::{
    Element, ElementDefinition, ElementKind, Node, ParseOptions, Parser, error::ErrorCode,
};

static SPACE: ElementKind = ElementKind::pattern("Space", r"\s+");
static KEY: ElementKind = ElementKind::pattern("Key", r"[a-z_]+");
static EQUALS: ElementKind = ElementKind::pattern("Equals", r"=");
static VALUE: ElementKind = ElementKind::pattern("Value", r"[^;\]\s]+");
static NOTE_TEXT: ElementKind = ElementKind::pattern("NoteText", r"[^#]+");

static NOTE_DEFINITIONS: [ElementDefinition; 1] = [ElementDefinition::element(&NOTE_TEXT)];
static NOTE: ElementKind = ElementKind::flat_block("Note", "#", "#", &NOTE_DEFINITIONS);

static TRIVIA: [ElementDefinition; 2] = [
    ElementDefinition::element(&SPACE).optional(),
    ElementDefinition::element(&NOTE).optional(),
];

static ENTRY_DEFINITIONS: [ElementDefinition; 6] = [
    ElementDefinition::element(&KEY),
    ElementDefinition::element(&SPACE).optional(),
    ElementDefinition::element(&EQUALS),
    ElementDefinition::element(&SPACE).optional(),
    ElementDefinition::element(&VALUE),
    ElementDefinition::group(&TRIVIA).optional().repeated(),
];
static ENTRY: ElementKind = ElementKind::composite("Entry", &ENTRY_DEFINITIONS);

// Leading trivia lives outside `Entry` so that a slot holding only
// whitespace is not a half-matched entry.
static ENTRY_SLOT_DEFINITIONS: [ElementDefinition; 2] = [
    ElementDefinition::group(&TRIVIA).optional().repeated(),
    ElementDefinition::element(&ENTRY).optional(),
];
static ENTRY_SLOT: ElementKind = ElementKind::composite("EntrySlot", &ENTRY_SLOT_DEFINITIONS);
static ENTRIES: ElementKind = ElementKind::list("Entries", ";", &ENTRY_SLOT);

static SECTION_DEFINITIONS: [ElementDefinition; 1] =
    [ElementDefinition::element(&ENTRIES).optional()];
static SECTION: ElementKind = ElementKind::block("Section", "[", "]", &SECTION_DEFINITIONS);

static DOCUMENT_DEFINITIONS: [ElementDefinition; 1] = [ElementDefinition::group(&DOCUMENT_ITEM)
    .optional()
    .repeated()];
static DOCUMENT_ITEM: [ElementDefinition; 2] = [
    ElementDefinition::element(&SPACE).optional(),
    ElementDefinition::element(&SECTION).optional(),
];
static DOCUMENT: ElementKind = ElementKind::composite("Document", &DOCUMENT_DEFINITIONS);

fn parse_document(source: &str) -> Node<'_> {
    Parser::default()
        .parse_complete(&DOCUMENT, source)
        .unwrap_or_else(|err| panic!("Failed to parse `{source}`:\n{}", err.render()))
}

#[test]
fn test_document_round_trips() {
    let source = "[a = 1; b=2]\n[ #first# c = x ]\n";
    let document = parse_document(source);

    assert_eq!(document.source_text(), source);
    assert_eq!(document.find_all(&SECTION).len(), 2);

    let keys: Vec<&str> = document
        .find_all(&KEY)
        .into_iter()
        .map(|node| node.source_text())
        .collect();
    assert_eq!(keys, ["a", "b", "c"]);
}

#[test]
fn test_sections_keep_their_content() {
    let document = parse_document("[a=1;b=2]");
    let section = document
        .find(&SECTION)
        .and_then(|node| node.as_block())
        .expect("section block");

    assert_eq!(section.content(), "a=1;b=2");

    let entries = document
        .find(&ENTRIES)
        .and_then(|node| node.as_list())
        .expect("entry list");
    assert_eq!(entries.items().len(), 2);
    assert_eq!(entries.delimiter_positions(), [1]);
}

#[test]
fn test_flat_block_notes() {
    let document = parse_document("[#one# a=1]");
    let note = document
        .find(&NOTE)
        .and_then(|node| node.as_block())
        .expect("note block");

    assert_eq!(note.content(), "one");
    assert_eq!(note.source_text(), "#one#");
}

#[test]
fn test_empty_document() {
    let document = parse_document("");

    assert!(document.is_empty());
    assert!(document.children().is_empty());
}

#[test]
fn test_missing_equals_reports_position() {
    let source = "[a = 1; b 2]";
    let err = Parser::default().parse_complete(&DOCUMENT, source).unwrap_err();

    assert_eq!(err.code(), ErrorCode::E100);
    assert_eq!(err.element(), "Entry");
    assert_eq!(err.span().start(), 10);
    assert_eq!(err.src(), source);

    let rendered = err.render();
    assert!(rendered.starts_with("error[E100]"));
    assert!(rendered.contains("[a = 1; b 2]"));
}

#[test]
fn test_unclosed_section() {
    let err = Parser::default()
        .parse_complete(&DOCUMENT, "[a=1]\n[b=2")
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::E101);
    assert_eq!(err.element(), "Section");
    assert_eq!(err.span().start(), 6);
}

#[test]
fn test_unexpected_text_after_sections() {
    let err = Parser::default()
        .parse_complete(&DOCUMENT, "[a=1] junk")
        .unwrap_err();

    assert_eq!(err.code(), ErrorCode::E102);
    assert_eq!(err.span().start(), 6);
}

#[test]
fn test_depth_limit_is_configurable() {
    let parser = Parser::new(ParseOptions::default().with_max_depth(2));
    let err = parser.parse_complete(&DOCUMENT, "[a=1]").unwrap_err();

    assert_eq!(err.code(), ErrorCode::E103);
}

#[test]
fn test_tree_dump_is_indented() {
    let document = parse_document("[a=1]");
    let dump = document.to_string();

    assert!(dump.starts_with("Document: {\n\tSection: {\n\t\tEntries: {"));
    assert!(dump.contains("\t\t\t\t\tKey: { \"a\" }"));
    assert!(dump.ends_with("\n}"));
}
