//! Integration tests for the StylesheetBuilder API

use weft::{
    ErrorCode, StylesheetBuilder, WeftError,
    config::{AppConfig, ErrorStyle},
};

const NESTED: &str = "@media a { @media b { @media c { x { y: z } } } }";

#[test]
fn test_parse_simple_sheet() {
    let builder = StylesheetBuilder::default();
    let sheet = builder
        .parse("body { margin: 0 }\n.card, .panel { padding: 4px 8px }\n")
        .expect("Failed to parse stylesheet");

    let rules = sheet.rule_sets();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[1].selectors(), [".card", ".panel"]);
    assert_eq!(
        rules[1].get("padding").map(|declaration| declaration.value()),
        Some("4px 8px")
    );
}

#[test]
fn test_parse_invalid_sheet_returns_error() {
    let result = StylesheetBuilder::default().parse("a { color red }");

    match result {
        Err(WeftError::Parse { path, err }) => {
            assert!(path.is_none());
            assert_eq!(err.code(), ErrorCode::E100);
            assert_eq!(err.element(), "Declaration");
        }
        other => panic!("Expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_builder_reusability() {
    let builder = StylesheetBuilder::default();

    let first = builder.parse("a { b: c }").expect("Failed to parse first");
    let second = builder.parse("@import url(x.css);").expect("Failed to parse second");

    assert_eq!(first.rule_sets().len(), 1);
    assert_eq!(second.at_rules()[0].name(), "import");
}

#[test]
fn test_config_from_toml() {
    let config: AppConfig = toml::from_str(
        r#"
        [parser]
        max_depth = 6

        [output]
        error_style = "plain"

        [project]
        extensions = ["css", "pcss"]
        "#,
    )
    .expect("Failed to parse config");

    assert_eq!(config.parser().max_depth(), 6);
    assert_eq!(config.output().error_style(), ErrorStyle::Plain);
    assert!(config.project().accepts_extension("PCSS"));
    assert!(!config.project().accepts_extension("scss"));
}

#[test]
fn test_empty_config_uses_defaults() {
    let config: AppConfig = toml::from_str("").expect("Failed to parse config");

    assert_eq!(config.parser().max_depth(), 256);
    assert_eq!(config.output().error_style(), ErrorStyle::Fancy);
    assert_eq!(config.project().extensions(), ["css"]);
}

#[test]
fn test_configured_depth_limit() {
    let config: AppConfig = toml::from_str("[parser]\nmax_depth = 6\n").expect("Failed to parse config");
    let builder = StylesheetBuilder::new(config);

    let err = builder.parse(NESTED).unwrap_err();
    let WeftError::Parse { err, .. } = err else {
        panic!("Expected a parse error");
    };
    assert_eq!(err.code(), ErrorCode::E103);

    assert!(StylesheetBuilder::default().parse(NESTED).is_ok());
}
