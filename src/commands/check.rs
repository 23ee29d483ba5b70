//! Spell-check candidate files

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use anyhow::Context;

use docspell::config::{self, Config};
use docspell::dictionary;
use docspell::engine::Engine;
use docspell::paths;
use docspell::pipeline::Pipeline;
use docspell::report::{FileReport, OutputMode, SpellReport};
use docspell::selector::{self, CandidateFile};

/// Spell-check the candidate files (explicit list, or auto-discovery)
pub fn check(files: &[String], ci: bool, mode: OutputMode) -> anyhow::Result<()> {
    let root = paths::project_root();
    let cfg = Config::load_project();

    // Explicit paths are taken verbatim; discovery filters and excludes
    let candidates = if files.is_empty() {
        selector::discover(&root, &cfg.selection)?
    } else {
        selector::explicit(files, &cfg.selection)
    };

    let engine = Engine::from_config(&cfg.engine);

    if candidates.is_empty() {
        let report = SpellReport::from_results(engine.program(), Vec::new());
        report.render(mode);
        return Ok(());
    }

    // The engine is probed once; without it every file is skipped, not failed
    if !engine.probe() {
        let report = SpellReport::skipped(engine.program(), candidates.len());
        report.render(mode);
        return Ok(());
    }

    // Every pipeline reads the merged dictionary, so it must exist first
    let fragments: Vec<_> = cfg.dictionary.fragments.iter().map(|f| root.join(f)).collect();
    let session = dictionary::build(&fragments, &cfg.dictionary.lang, &paths::session_dictionary())
        .context("failed to build session dictionary")?;
    log::debug!("session dictionary: {} ({} words)", session.path.display(), session.words);

    let pipeline = Pipeline::new(engine.clone(), &cfg.pipeline, Some(session.path));
    let results = run_all(&pipeline, &candidates);

    let report = SpellReport::from_results(engine.program(), results);
    report.render(mode);

    if !report.passed {
        if !ci {
            std::process::exit(1);
        }
        anyhow::bail!("spelling issues found");
    }

    Ok(())
}

/// Run every candidate's pipeline, bounded by the parallelism hint.
///
/// Workers pull indices from a shared counter and each writes only its own
/// result slot, so per-file output stays isolated. The merged list keeps
/// enumeration order regardless of completion order.
fn run_all(pipeline: &Pipeline, candidates: &[CandidateFile]) -> Vec<FileReport> {
    let jobs = config::jobs_hint().min(candidates.len());
    log::debug!("running {} pipeline(s) with up to {jobs} job(s)", candidates.len());

    let next = AtomicUsize::new(0);
    let slots: Mutex<Vec<Option<FileReport>>> =
        Mutex::new((0..candidates.len()).map(|_| None).collect());

    thread::scope(|scope| {
        for _ in 0..jobs {
            scope.spawn(|| {
                loop {
                    let index = next.fetch_add(1, Ordering::SeqCst);
                    let Some(candidate) = candidates.get(index) else {
                        break;
                    };
                    let outcome = match pipeline.run(candidate) {
                        Ok(transcript) => {
                            FileReport::from_transcript(candidate.name.clone(), &transcript)
                        },
                        Err(err) => FileReport::from_error(candidate.name.clone(), err),
                    };
                    if let Ok(mut slots) = slots.lock() {
                        slots[index] = Some(outcome);
                    }
                }
            });
        }
    });

    slots
        .into_inner()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
        .into_iter()
        .zip(candidates)
        .map(|(slot, candidate)| {
            slot.unwrap_or_else(|| {
                FileReport::from_error(candidate.name.clone(), "no result produced")
            })
        })
        .collect()
}
