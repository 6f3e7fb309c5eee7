use std::{fs, path::Path};

use tempfile::tempdir;

use weft::{ErrorCode, WeftError, config::AppConfig};
use weft_cli::{Args, load_config, run};

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create directory");
    }
    fs::write(path, contents).expect("Failed to write file");
}

fn run_to_string(args: &Args, config: AppConfig) -> Result<String, WeftError> {
    let mut out = Vec::new();
    run(args, config, &mut out)?;
    Ok(String::from_utf8(out).expect("output is UTF-8"))
}

#[test]
fn e2e_file_summary() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    write(
        temp_dir.path(),
        "site.css",
        "/* site */\n:root { --accent: teal }\na, b { color: var(--accent) }\n",
    );
    let input = temp_dir.path().join("site.css");

    let args = Args {
        input: Some(input.to_string_lossy().to_string()),
        log_level: "off".to_string(),
        ..Args::default()
    };
    let output = run_to_string(&args, AppConfig::default()).expect("File should parse");

    assert_eq!(
        output,
        format!(
            "{}: files: 1, rule sets: 2, declarations: 2, at-rules: 0, custom properties: 1, comments: 1\n",
            input.display()
        )
    );
}

#[test]
fn e2e_text_with_elements() {
    let args = Args {
        text: Some("a { b: c }".to_string()),
        print_elements: true,
        log_level: "off".to_string(),
        ..Args::default()
    };
    let output = run_to_string(&args, AppConfig::default()).expect("Text should parse");

    assert!(output.starts_with("<input>: files: 1, rule sets: 1"), "{output}");
    assert!(output.contains("Stylesheet: {"), "{output}");
    assert!(output.contains("SelectorItem: {"), "{output}");
    assert!(output.contains("SelectorText: { \"a\" }"), "{output}");
    assert!(output.contains("Property: { \"b\" }"), "{output}");
}

#[test]
fn e2e_project_totals() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    write(temp_dir.path(), "base.css", "html { margin: 0 }");
    write(temp_dir.path(), "parts/card.css", "@media print { .card { display: none } }");
    write(temp_dir.path(), "parts/readme.md", "# not css");

    let args = Args {
        project: Some(temp_dir.path().to_string_lossy().to_string()),
        log_level: "off".to_string(),
        ..Args::default()
    };
    let output = run_to_string(&args, AppConfig::default()).expect("Project should parse");
    let lines: Vec<&str> = output.lines().collect();

    assert_eq!(lines.len(), 3, "{output}");
    assert!(lines[0].starts_with("base.css: files: 1"), "{output}");
    assert!(
        lines[1].starts_with(&format!("{}: files: 1", Path::new("parts").join("card.css").display())),
        "{output}"
    );
    assert_eq!(
        lines[2],
        "total: files: 2, rule sets: 2, declarations: 2, at-rules: 1, custom properties: 0, comments: 0"
    );
}

#[test]
fn e2e_parse_error_names_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    write(temp_dir.path(), "broken.css", "a { color: red");
    let input = temp_dir.path().join("broken.css");

    let args = Args {
        input: Some(input.to_string_lossy().to_string()),
        log_level: "off".to_string(),
        ..Args::default()
    };

    match run_to_string(&args, AppConfig::default()) {
        Err(WeftError::Parse { path, err }) => {
            assert_eq!(path, Some(input));
            assert_eq!(err.code(), ErrorCode::E101);
        }
        other => panic!("Expected a parse error, got {other:?}"),
    }
}

#[test]
fn e2e_missing_input_file() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let args = Args {
        input: Some(temp_dir.path().join("nope.css").to_string_lossy().to_string()),
        log_level: "off".to_string(),
        ..Args::default()
    };

    assert!(matches!(
        run_to_string(&args, AppConfig::default()),
        Err(WeftError::Io(_))
    ));
}

#[test]
fn e2e_config_depth_limit() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    write(temp_dir.path(), "config.toml", "[parser]\nmax_depth = 6\n");
    let config = load_config(Some(temp_dir.path().join("config.toml"))).expect("Config should load");

    let args = Args {
        text: Some("@media a { @media b { @media c { x { y: z } } } }".to_string()),
        log_level: "off".to_string(),
        ..Args::default()
    };

    match run_to_string(&args, config) {
        Err(WeftError::Parse { err, .. }) => assert_eq!(err.code(), ErrorCode::E103),
        other => panic!("Expected a depth error, got {other:?}"),
    }
    assert!(run_to_string(&args, AppConfig::default()).is_ok());
}

#[test]
fn e2e_no_source() {
    let args = Args {
        log_level: "off".to_string(),
        ..Args::default()
    };

    assert!(matches!(
        run_to_string(&args, AppConfig::default()),
        Err(WeftError::Config(_))
    ));
}
