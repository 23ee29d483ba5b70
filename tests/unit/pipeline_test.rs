//! Tests for the per-file checker pipeline
//!
//! These tests exercise real subprocess chains, substituting small standard
//! utilities (`cat`, `false`, `sleep`) for the renderer and the spelling
//! engine so the pipe wiring and policies are observable without aspell.

#![cfg(unix)]

use std::fs;
use std::time::Duration;

use docspell::config::{PipelineConfig, RendererPolicy, SelectionConfig};
use docspell::engine::Engine;
use docspell::pipeline::{Pipeline, PipelineError};
use docspell::selector::CandidateFile;
use tempfile::TempDir;

/// An "engine" that echoes its input back: the transcript becomes the
/// prefixed stream itself, first line being the `!` banner.
fn echo_engine() -> Engine {
    Engine::new("cat".to_string(), vec![], vec!["--version".to_string()])
}

fn pipeline_cfg(renderer: &[&str], policy: RendererPolicy) -> PipelineConfig {
    PipelineConfig {
        renderer: renderer.iter().map(ToString::to_string).collect(),
        on_renderer_error: policy,
        timeout_secs: 30,
    }
}

fn candidate(dir: &TempDir, name: &str, content: &str) -> CandidateFile {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    CandidateFile::new(path, name, &SelectionConfig::default())
}

#[test]
fn plain_file_gets_banner_and_prefixed_lines() {
    let temp = TempDir::new().unwrap();
    let file = candidate(&temp, "notes.txt", "hello\nworld\n");

    let pipeline = Pipeline::new(echo_engine(), &pipeline_cfg(&["cat"], RendererPolicy::Fail), None);
    let transcript = pipeline.run(&file).unwrap();

    assert_eq!(transcript.lines().to_vec(), vec!["!", "^hello", "^world"]);
    // The `!` banner is the discarded first line, so the echo counts as flagged
    assert_eq!(transcript.flagged_lines().len(), 2);
}

#[test]
fn markup_file_is_rendered_first() {
    let temp = TempDir::new().unwrap();
    // `cat` as renderer passes the file through unchanged
    let file = candidate(&temp, "doc.md", "# title\nbody\n");

    let pipeline = Pipeline::new(echo_engine(), &pipeline_cfg(&["cat"], RendererPolicy::Fail), None);
    let transcript = pipeline.run(&file).unwrap();

    assert_eq!(transcript.lines().to_vec(), vec!["!", "^# title", "^body"]);
}

#[test]
fn empty_file_yields_banner_only_transcript() {
    let temp = TempDir::new().unwrap();
    let file = candidate(&temp, "empty.txt", "");

    let pipeline = Pipeline::new(echo_engine(), &pipeline_cfg(&["cat"], RendererPolicy::Fail), None);
    let transcript = pipeline.run(&file).unwrap();

    assert_eq!(transcript.lines().to_vec(), vec!["!"]);
    assert!(transcript.flagged_lines().is_empty());
}

#[test]
fn non_utf8_content_is_checked_to_the_end() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("notes.txt");
    fs::write(&path, b"good\n\xFFzz\nmisspeledword\n").unwrap();
    let file = CandidateFile::new(&path, "notes.txt", &SelectionConfig::default());

    let pipeline = Pipeline::new(echo_engine(), &pipeline_cfg(&["cat"], RendererPolicy::Fail), None);
    let transcript = pipeline.run(&file).unwrap();

    // The stray byte must not cut the stream short; everything after it
    // still reaches the engine
    assert_eq!(transcript.lines().len(), 4);
    assert_eq!(transcript.lines()[0], "!");
    assert_eq!(transcript.lines()[3], "^misspeledword");
}

#[test]
fn renderer_failure_is_loud_under_fail_policy() {
    let temp = TempDir::new().unwrap();
    let file = candidate(&temp, "doc.md", "# title\n");

    let pipeline =
        Pipeline::new(echo_engine(), &pipeline_cfg(&["false"], RendererPolicy::Fail), None);
    let err = pipeline.run(&file).unwrap_err();

    match err {
        PipelineError::Renderer { program, .. } => assert_eq!(program, "false"),
        other => panic!("expected renderer error, got {other}"),
    }
}

#[test]
fn renderer_failure_is_kept_under_ignore_policy() {
    let temp = TempDir::new().unwrap();
    let file = candidate(&temp, "doc.md", "# title\n");

    let pipeline =
        Pipeline::new(echo_engine(), &pipeline_cfg(&["false"], RendererPolicy::Ignore), None);
    let transcript = pipeline.run(&file).unwrap();

    // `false` produced no output, so only the injected banner remains
    assert_eq!(transcript.lines().to_vec(), vec!["!"]);
    assert!(transcript.flagged_lines().is_empty());
}

#[test]
fn unreadable_input_surfaces_as_io_error() {
    let cfg = SelectionConfig::default();
    let file = CandidateFile::new("/no/such/file.txt", "/no/such/file.txt", &cfg);

    let pipeline = Pipeline::new(echo_engine(), &pipeline_cfg(&["cat"], RendererPolicy::Fail), None);
    let err = pipeline.run(&file).unwrap_err();
    assert!(matches!(err, PipelineError::Io(_)));
}

#[test]
fn missing_engine_surfaces_as_spawn_error() {
    let temp = TempDir::new().unwrap();
    let file = candidate(&temp, "notes.txt", "hello\n");

    let engine =
        Engine::new("docspell-no-such-engine".to_string(), vec![], vec!["version".to_string()]);
    let pipeline = Pipeline::new(engine, &pipeline_cfg(&["cat"], RendererPolicy::Fail), None);

    let err = pipeline.run(&file).unwrap_err();
    match err {
        PipelineError::Spawn { program, .. } => assert_eq!(program, "docspell-no-such-engine"),
        other => panic!("expected spawn error, got {other}"),
    }
}

#[test]
fn stalled_pipeline_is_killed_and_reported() {
    let temp = TempDir::new().unwrap();
    let file = candidate(&temp, "notes.txt", "hello\n");

    // An "engine" that never reads nor exits within the deadline
    let engine = Engine::new("sleep".to_string(), vec!["30".to_string()], vec![]);
    let pipeline = Pipeline::new(engine, &pipeline_cfg(&["cat"], RendererPolicy::Fail), None)
        .with_timeout(Some(Duration::from_millis(100)));

    let err = pipeline.run(&file).unwrap_err();
    assert!(matches!(err, PipelineError::Stalled { .. }));
}
