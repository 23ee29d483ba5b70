//! Tests for candidate file selection

use std::fs;

use docspell::config::{EnumerationPolicy, SelectionConfig};
use docspell::selector::{self, FileKind};
use tempfile::TempDir;

fn skip_policy() -> SelectionConfig {
    SelectionConfig {
        on_enumeration_error: EnumerationPolicy::Skip,
        ..SelectionConfig::default()
    }
}

// =============================================================================
// Explicit selection
// =============================================================================

#[test]
fn explicit_paths_are_verbatim_and_unfiltered() {
    let cfg = SelectionConfig::default();
    // Excluded names and foreign extensions still pass through verbatim
    let args = vec!["contributors.pod6".to_string(), "notes.adoc".to_string()];
    let candidates = selector::explicit(&args, &cfg);

    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].name, "contributors.pod6");
    assert_eq!(candidates[0].kind, FileKind::Markup);
    assert_eq!(candidates[1].name, "notes.adoc");
    assert_eq!(candidates[1].kind, FileKind::Plain);
}

#[test]
fn explicit_preserves_argument_order() {
    let cfg = SelectionConfig::default();
    let args = vec!["z.md".to_string(), "a.md".to_string()];
    let candidates = selector::explicit(&args, &cfg);
    assert_eq!(candidates[0].name, "z.md");
    assert_eq!(candidates[1].name, "a.md");
}

// =============================================================================
// Auto-discovery (filesystem-walk fallback in a non-repository directory)
// =============================================================================

#[test]
fn discovery_filters_extension_and_exclusions() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("x.pod6"), "=begin pod\n=end pod\n").unwrap();
    fs::write(temp.path().join("y.md"), "# heading\n").unwrap();
    fs::write(temp.path().join("contributors.pod6"), "names\n").unwrap();
    fs::write(temp.path().join("build.rs"), "fn main() {}\n").unwrap();

    let candidates = selector::discover(temp.path(), &skip_policy()).unwrap();
    let names: Vec<_> = candidates.iter().map(|c| c.name.as_str()).collect();

    assert_eq!(names, vec!["x.pod6", "y.md"]);
}

#[test]
fn discovery_exclusion_is_case_insensitive() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("CONTRIBUTORS.pod6"), "names\n").unwrap();
    fs::write(temp.path().join("iterator.pod6"), "=begin pod\n=end pod\n").unwrap();

    let candidates = selector::discover(temp.path(), &skip_policy()).unwrap();
    let names: Vec<_> = candidates.iter().map(|c| c.name.as_str()).collect();

    assert_eq!(names, vec!["iterator.pod6"]);
}

#[test]
fn discovery_skips_hidden_directories_in_fallback_walk() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join(".cache")).unwrap();
    fs::write(temp.path().join(".cache/stale.md"), "hidden\n").unwrap();
    fs::write(temp.path().join("visible.md"), "# visible\n").unwrap();

    let candidates = selector::discover(temp.path(), &skip_policy()).unwrap();
    let names: Vec<_> = candidates.iter().map(|c| c.name.as_str()).collect();

    assert_eq!(names, vec!["visible.md"]);
}

#[test]
fn discovery_marks_plain_text_candidates() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("notes.txt"), "plain words\n").unwrap();

    let candidates = selector::discover(temp.path(), &skip_policy()).unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].kind, FileKind::Plain);
}

#[test]
fn fail_policy_surfaces_enumeration_error() {
    // A fresh temp dir is not a git checkout, so ls-files cannot succeed
    let temp = TempDir::new().unwrap();
    let cfg = SelectionConfig::default();

    let err = selector::discover(temp.path(), &cfg).unwrap_err();
    assert!(err.to_string().contains("failed to enumerate versioned files"));
}

#[test]
fn candidate_paths_resolve_against_root() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("doc.md"), "# doc\n").unwrap();

    let candidates = selector::discover(temp.path(), &skip_policy()).unwrap();
    assert_eq!(candidates[0].name, "doc.md");
    assert!(candidates[0].path.is_absolute() || candidates[0].path.exists());
}
