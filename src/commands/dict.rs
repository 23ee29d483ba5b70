//! Rebuild the session dictionary

use anyhow::Context;

use docspell::config::Config;
use docspell::dictionary;
use docspell::paths;
use docspell::report::{OperationResult, OutputMode};

/// Rebuild the session dictionary and report its location and word count
pub fn dict(mode: OutputMode) -> anyhow::Result<()> {
    let root = paths::project_root();
    let cfg = Config::load_project();

    let fragments: Vec<_> = cfg.dictionary.fragments.iter().map(|f| root.join(f)).collect();
    let session = dictionary::build(&fragments, &cfg.dictionary.lang, &paths::session_dictionary())
        .context("failed to build session dictionary")?;

    let result = OperationResult {
        success: true,
        message: format!(
            "Session dictionary written to {} ({} words)",
            session.path.display(),
            session.words
        ),
    };
    result.render(mode);

    Ok(())
}
