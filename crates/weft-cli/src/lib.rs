//! CLI logic for the Weft CSS parser.
//!
//! The binary reads one style sheet (from a file or the command line) or a
//! whole project directory, prints a summary of what it contains and,
//! optionally, the parsed element tree.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, Source};
pub use config::{ConfigError, load_config};

use std::{fs, io::Write, path::Path};

use log::info;

use weft::{Project, ProjectStats, Stylesheet, StylesheetBuilder, WeftError, config::AppConfig};

use error_adapter::INLINE_SOURCE_NAME;

/// Run the Weft CLI application
///
/// Parses the selected input with `config` and writes one summary line per
/// style sheet to `out`, followed by the element tree when
/// [`Args::print_elements`] is set. Projects end with a `total:` line.
///
/// # Errors
///
/// Returns `WeftError` for:
/// - A missing or ambiguous input source
/// - File I/O errors
/// - Parsing errors, tagged with the file they came from
pub fn run(args: &Args, config: AppConfig, out: &mut impl Write) -> Result<(), WeftError> {
    let source = args.source()?;
    info!(source:?, print_elements = args.print_elements; "Processing input");

    let builder = StylesheetBuilder::new(config);
    match source {
        Source::File(path) => {
            let path = Path::new(path);
            let text = fs::read_to_string(path)?;
            let sheet = builder.parse_with_path(path, &text)?;
            report(out, &path.display().to_string(), &sheet, args.print_elements)?;
        }
        Source::Text(text) => {
            let sheet = builder.parse(text)?;
            report(out, INLINE_SOURCE_NAME, &sheet, args.print_elements)?;
        }
        Source::Project(dir) => {
            let project = Project::discover(dir, builder.config().project())?;
            let sheets = project.parse_all(&builder)?;

            let mut total = ProjectStats::default();
            for (path, sheet) in &sheets {
                let name = path.strip_prefix(dir).unwrap_or(*path).display().to_string();
                total += report(out, &name, sheet, args.print_elements)?;
            }
            writeln!(out, "total: {total}")?;
            info!(files = total.files; "Project parsed");
        }
    }

    Ok(())
}

/// Write the summary line, and optionally the tree, for one style sheet.
fn report(
    out: &mut impl Write,
    name: &str,
    sheet: &Stylesheet<'_>,
    print_elements: bool,
) -> Result<ProjectStats, WeftError> {
    let stats = ProjectStats::of(sheet);
    writeln!(out, "{name}: {stats}")?;
    if print_elements {
        writeln!(out, "{}", sheet.root())?;
    }
    Ok(stats)
}
