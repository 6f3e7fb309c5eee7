//! Multi-file projects.
//!
//! A [`Project`] is an ordered set of style sheet sources keyed by path. It
//! is either discovered from a directory tree or built from in-memory
//! sources, and can be parsed as a whole.

use std::{
    fmt, fs, io,
    ops::AddAssign,
    path::{Path, PathBuf},
};

use indexmap::IndexMap;
use log::{debug, info};

use weft_css::Stylesheet;

use crate::{StylesheetBuilder, config::ProjectConfig, error::WeftError};

/// Style sheet sources keyed by path, in a deterministic order.
#[derive(Debug, Clone, Default)]
pub struct Project {
    root: Option<PathBuf>,
    sources: IndexMap<PathBuf, String>,
}

impl Project {
    /// Collect every file under `root` whose extension is accepted by
    /// `config`, recursing into subdirectories.
    ///
    /// Files are sorted by path. Hidden entries (names starting with `.`)
    /// are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`WeftError::Io`] if a directory cannot be listed or a file
    /// cannot be read as UTF-8.
    pub fn discover(root: impl AsRef<Path>, config: &ProjectConfig) -> Result<Self, WeftError> {
        let root = root.as_ref();
        info!(root = root.display().to_string(); "Discovering project files");

        let mut files = Vec::new();
        collect_files(root, config, &mut files)?;
        files.sort();

        let mut sources = IndexMap::with_capacity(files.len());
        for path in files {
            let source = fs::read_to_string(&path)?;
            debug!(path = path.display().to_string(), len = source.len(); "Loaded source file");
            sources.insert(path, source);
        }
        info!(files = sources.len(); "Project discovered");

        Ok(Self {
            root: Some(root.to_path_buf()),
            sources,
        })
    }

    /// Build a project from in-memory sources, keeping their order.
    pub fn from_sources<P, S>(sources: impl IntoIterator<Item = (P, S)>) -> Self
    where
        P: Into<PathBuf>,
        S: Into<String>,
    {
        Self {
            root: None,
            sources: sources
                .into_iter()
                .map(|(path, source)| (path.into(), source.into()))
                .collect(),
        }
    }

    /// The directory the project was discovered from, if any.
    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    pub fn sources(&self) -> &IndexMap<PathBuf, String> {
        &self.sources
    }

    pub fn source(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.sources.get(path.as_ref()).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Parse every source, in order.
    ///
    /// # Errors
    ///
    /// Stops at the first file that fails and returns its
    /// [`WeftError::Parse`] tagged with the file's path.
    pub fn parse_all(
        &self,
        builder: &StylesheetBuilder,
    ) -> Result<IndexMap<&Path, Stylesheet<'_>>, WeftError> {
        self.sources
            .iter()
            .map(|(path, source)| {
                builder
                    .parse_with_path(path, source)
                    .map(|sheet| (path.as_path(), sheet))
            })
            .collect()
    }

    /// Parse every source and total up what the files contain.
    ///
    /// # Errors
    ///
    /// See [`parse_all`](Self::parse_all).
    pub fn stats(&self, builder: &StylesheetBuilder) -> Result<ProjectStats, WeftError> {
        let mut stats = ProjectStats::default();
        for sheet in self.parse_all(builder)?.values() {
            stats += ProjectStats::of(sheet);
        }
        Ok(stats)
    }
}

fn collect_files(dir: &Path, config: &ProjectConfig, files: &mut Vec<PathBuf>) -> io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }

        let file_type = entry.file_type()?;
        if file_type.is_dir() {
            collect_files(&path, config, files)?;
        } else if file_type.is_file()
            && path
                .extension()
                .and_then(|extension| extension.to_str())
                .is_some_and(|extension| config.accepts_extension(extension))
        {
            files.push(path);
        }
    }
    Ok(())
}

/// Counts of the constructs found in one or more style sheets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectStats {
    pub files: usize,
    pub rule_sets: usize,
    pub declarations: usize,
    pub at_rules: usize,
    pub custom_properties: usize,
    pub comments: usize,
}

impl ProjectStats {
    /// Counts for a single style sheet.
    pub fn of(sheet: &Stylesheet<'_>) -> Self {
        let declarations = sheet.declarations();
        Self {
            files: 1,
            rule_sets: sheet.rule_sets().len(),
            custom_properties: declarations
                .iter()
                .filter(|declaration| declaration.is_custom_property())
                .count(),
            declarations: declarations.len(),
            at_rules: sheet.at_rules().len(),
            comments: sheet.comments().len(),
        }
    }
}

impl AddAssign for ProjectStats {
    fn add_assign(&mut self, other: Self) {
        self.files += other.files;
        self.rule_sets += other.rule_sets;
        self.declarations += other.declarations;
        self.at_rules += other.at_rules;
        self.custom_properties += other.custom_properties;
        self.comments += other.comments;
    }
}

impl fmt::Display for ProjectStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "files: {}, rule sets: {}, declarations: {}, at-rules: {}, custom properties: {}, comments: {}",
            self.files,
            self.rule_sets,
            self.declarations,
            self.at_rules,
            self.custom_properties,
            self.comments,
        )
    }
}
