//! Centralized path definitions for docspell
//!
//! This module provides a single source of truth for all filesystem paths
//! used by docspell.
//!
//! ## Storage Layout
//!
//! ### Per-Project (Repository Root)
//!
//! ```text
//! repo/
//! ├── .docspell.toml              # SHARED: Committed config
//! ├── words.pws                   # SHARED: General vocabulary exceptions
//! ├── code.pws                    # SHARED: Code-fragment exceptions
//! └── .docspell/                  # Local state (gitignored)
//!     └── session.pws             # Merged session dictionary, rebuilt per run
//! ```
//!
//! ### Global (User-Level)
//!
//! ```text
//! ~/.docspell/
//! └── words.pws                   # Optional personal exception list
//! ```
//!
//! The session dictionary is transient: it is overwritten on every run and
//! never cleaned up, so the last run's merged word list stays inspectable.

use std::path::{Path, PathBuf};

// =============================================================================
// Project-level paths (per-repository)
// =============================================================================

/// Directory name for local docspell state
pub const DOCSPELL_DIR: &str = ".docspell";

/// Project configuration filename
pub const DOCSPELL_TOML: &str = ".docspell.toml";

/// Merged session dictionary filename
const SESSION_DICT_FILE: &str = "session.pws";

/// Get the project root directory.
///
/// Walks up from the current directory until a `.docspell.toml` is found.
/// Falls back to the current directory when none exists.
#[must_use]
pub fn project_root() -> PathBuf {
    let start = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let mut dir: &Path = &start;
    loop {
        if dir.join(DOCSPELL_TOML).exists() {
            return dir.to_path_buf();
        }
        match dir.parent() {
            Some(parent) => dir = parent,
            None => return start,
        }
    }
}

/// Get path to the `.docspell.toml` config file.
///
/// This file is committed to the repository and contains:
/// - File selection rules (extensions, exclusions)
/// - Word-list fragment locations
/// - Engine and pipeline settings
#[must_use]
pub fn docspell_toml() -> PathBuf {
    project_root().join(DOCSPELL_TOML)
}

/// Get path to the `.docspell/` state directory.
///
/// This directory is gitignored and holds the transient session dictionary.
#[must_use]
pub fn docspell_dir() -> PathBuf {
    project_root().join(DOCSPELL_DIR)
}

/// Get path to `.docspell/session.pws`.
///
/// The merged session dictionary consumed by every per-file pipeline.
/// Rebuilt (overwritten) at the start of each run.
#[must_use]
pub fn session_dictionary() -> PathBuf {
    docspell_dir().join(SESSION_DICT_FILE)
}

// =============================================================================
// Global paths (user-level)
// =============================================================================

/// Global docspell directory name
const GLOBAL_DIR: &str = ".docspell";

/// Global personal word-list filename
const GLOBAL_WORDS_FILE: &str = "words.pws";

/// Get the global docspell directory.
///
/// Returns `~/.docspell/`.
#[must_use]
pub fn global_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~")).join(GLOBAL_DIR)
}

/// Get the global personal word-list path.
///
/// Returns `~/.docspell/words.pws`. When present, it is merged into the
/// session dictionary after the project fragments.
#[must_use]
pub fn global_words() -> PathBuf {
    global_dir().join(GLOBAL_WORDS_FILE)
}
