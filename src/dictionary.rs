//! Session dictionary builder
//!
//! Merges the configured word-list fragments into one dictionary file the
//! spelling engine can load as an extra word source. The output starts with
//! the personal-wordlist header (`personal_ws-1.1 <lang> 0 utf-8`) followed
//! by the fragments' tokens in order.
//!
//! The dictionary is rebuilt (overwritten) on every run before the first
//! pipeline starts; building twice from unchanged fragments is byte-identical.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while building the session dictionary
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// A configured word-list fragment does not exist
    #[error("word list fragment not found: {0}")]
    FragmentMissing(PathBuf),

    /// IO error while reading a fragment or writing the dictionary
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A built session dictionary
#[derive(Debug, Clone)]
pub struct SessionDictionary {
    /// Where the merged dictionary was written
    pub path: PathBuf,
    /// Number of word tokens merged from the fragments
    pub words: usize,
}

/// Render the merged dictionary content.
///
/// Separated from writing so idempotence is testable without touching disk.
pub fn merge(fragments: &[PathBuf], lang: &str) -> Result<(String, usize), DictionaryError> {
    // Word count stays a placeholder, as the engine's format permits
    let mut content = format!("personal_ws-1.1 {lang} 0 utf-8\n");
    let mut words = 0;

    for fragment in fragments {
        if !fragment.exists() {
            return Err(DictionaryError::FragmentMissing(fragment.clone()));
        }
        let tokens = fs::read_to_string(fragment)?;
        for line in tokens.lines() {
            if line.trim().is_empty() {
                continue;
            }
            content.push_str(line);
            content.push('\n');
            words += 1;
        }
    }

    Ok((content, words))
}

/// Build the session dictionary at `out`, overwriting any prior one.
///
/// Fragments are merged in configuration order. The optional global personal
/// word list (`~/.docspell/words.pws`) is appended when it exists. A missing
/// configured fragment is fatal: every pipeline depends on the merged
/// dictionary, so the run must abort before any check starts.
pub fn build(
    fragments: &[PathBuf],
    lang: &str,
    out: &Path,
) -> Result<SessionDictionary, DictionaryError> {
    let mut all = fragments.to_vec();
    let global = crate::paths::global_words();
    if global.exists() {
        log::debug!("including global word list {}", global.display());
        all.push(global);
    }

    let (content, words) = merge(&all, lang)?;

    if let Some(parent) = out.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(out, content)?;
    log::debug!("session dictionary written to {} ({words} words)", out.display());

    Ok(SessionDictionary {
        path: out.to_path_buf(),
        words,
    })
}
