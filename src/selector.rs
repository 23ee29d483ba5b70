//! Candidate file selection
//!
//! The selector produces the ordered set of files a run will check. Explicit
//! paths given on the command line are taken verbatim; otherwise the
//! version-controlled file listing is filtered by extension and exclusion
//! patterns.
//!
//! # Examples
//!
//! ```no_run
//! use docspell::config::SelectionConfig;
//! use docspell::selector;
//!
//! let cfg = SelectionConfig::default();
//! let candidates = selector::discover(std::path::Path::new("."), &cfg).unwrap();
//! ```

use std::path::{Path, PathBuf};
use std::process::Command;

use glob::{MatchOptions, Pattern};
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::{EnumerationPolicy, SelectionConfig};

/// Errors that can occur during candidate selection
#[derive(Debug, Error)]
pub enum SelectError {
    /// The version-controlled file listing could not be obtained
    #[error("failed to enumerate versioned files: {0}")]
    Enumeration(String),

    /// An exclusion pattern failed to compile
    #[error("invalid exclude pattern '{pattern}': {source}")]
    Pattern {
        /// The offending pattern
        pattern: String,
        /// The compile error
        source: glob::PatternError,
    },

    /// IO error during file operations
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Error walking directory tree
    #[error("walkdir error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

/// Format of a candidate file, deciding the pipeline shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Documentation markup, needs a render stage before checking
    Markup,
    /// Plain text, fed straight to the prefix stage
    Plain,
}

impl FileKind {
    /// Short lowercase label for display
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Markup => "markup",
            Self::Plain => "plain",
        }
    }
}

/// A file selected for spell-checking
#[derive(Debug, Clone)]
pub struct CandidateFile {
    /// Path to open (absolute or relative to the working directory)
    pub path: PathBuf,
    /// Name used in reports (as enumerated or as given on the command line)
    pub name: String,
    /// Detected format
    pub kind: FileKind,
}

impl CandidateFile {
    /// Build a candidate from a path string, deriving the format
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, cfg: &SelectionConfig) -> Self {
        let path = path.into();
        let kind = kind_of(&path, cfg);
        Self {
            path,
            name: name.into(),
            kind,
        }
    }
}

/// Derive the format of a path from its extension
#[must_use]
pub fn kind_of(path: &Path, cfg: &SelectionConfig) -> FileKind {
    match extension_of(path) {
        Some(ext) if cfg.markup_extensions.iter().any(|m| m.eq_ignore_ascii_case(&ext)) => {
            FileKind::Markup
        },
        _ => FileKind::Plain,
    }
}

/// Build candidates from explicit command-line paths.
///
/// Explicit paths are used verbatim: no extension filter, no exclusion list.
#[must_use]
pub fn explicit(paths: &[String], cfg: &SelectionConfig) -> Vec<CandidateFile> {
    paths.iter().map(|p| CandidateFile::new(p, p.clone(), cfg)).collect()
}

/// Discover candidates from the version-controlled file listing.
///
/// Keeps files whose extension is in the allow-list and which match none of
/// the exclusion patterns. Order is the enumeration order. When the listing
/// is unavailable the configured [`EnumerationPolicy`] decides between
/// aborting and falling back to a filesystem walk.
pub fn discover(root: &Path, cfg: &SelectionConfig) -> Result<Vec<CandidateFile>, SelectError> {
    let listed = match git_ls_files(root) {
        Ok(files) => files,
        Err(err) => match cfg.on_enumeration_error {
            EnumerationPolicy::Fail => return Err(err),
            EnumerationPolicy::Skip => {
                log::warn!("{err}; falling back to a filesystem walk");
                walk_files(root)?
            },
        },
    };

    let patterns = compile_excludes(&cfg.exclude)?;

    Ok(listed
        .into_iter()
        .filter(|rel| has_allowed_extension(Path::new(rel), cfg) && !is_excluded(rel, &patterns))
        .map(|rel| CandidateFile::new(root.join(&rel), rel, cfg))
        .collect())
}

/// List version-controlled files via `git ls-files`
fn git_ls_files(root: &Path) -> Result<Vec<String>, SelectError> {
    let output = Command::new("git")
        .arg("ls-files")
        .current_dir(root)
        .output()
        .map_err(|e| SelectError::Enumeration(format!("could not run git: {e}")))?;

    if !output.status.success() {
        return Err(SelectError::Enumeration(format!(
            "git ls-files exited with {}",
            output.status
        )));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    Ok(stdout.lines().filter(|l| !l.is_empty()).map(String::from).collect())
}

/// Enumerate files by walking the tree, skipping hidden entries
fn walk_files(root: &Path) -> Result<Vec<String>, SelectError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(true).into_iter().filter_entry(|e| {
        // Don't filter the root directory itself
        if e.path() == root {
            return true;
        }
        !is_hidden(e)
    }) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        files.push(relative.to_string_lossy().into_owned());
    }

    // Sort for deterministic output
    files.sort();
    Ok(files)
}

/// Compile exclusion globs up front so a bad pattern fails the whole run
fn compile_excludes(excludes: &[String]) -> Result<Vec<Pattern>, SelectError> {
    excludes
        .iter()
        .map(|p| {
            Pattern::new(p).map_err(|source| SelectError::Pattern {
                pattern: p.clone(),
                source,
            })
        })
        .collect()
}

fn is_excluded(rel: &str, patterns: &[Pattern]) -> bool {
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::default()
    };
    patterns.iter().any(|p| p.matches_with(rel, options))
}

fn has_allowed_extension(path: &Path, cfg: &SelectionConfig) -> bool {
    extension_of(path)
        .is_some_and(|ext| cfg.extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)))
}

fn extension_of(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().to_ascii_lowercase())
}

/// Check if an entry is hidden (starts with .)
fn is_hidden(entry: &walkdir::DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|s| s.starts_with('.'))
}
