//! List candidate files without checking them

use docspell::config::Config;
use docspell::paths;
use docspell::report::OutputMode;
use docspell::selector;

/// List the files auto-discovery would check
pub fn list(mode: OutputMode) -> anyhow::Result<()> {
    let root = paths::project_root();
    let cfg = Config::load_project();

    let candidates = selector::discover(&root, &cfg.selection)?;

    if mode == OutputMode::Json {
        let entries: Vec<_> = candidates
            .iter()
            .map(|c| {
                serde_json::json!({
                    "file": c.name,
                    "kind": c.kind.as_str(),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries).unwrap_or_default());
        return Ok(());
    }

    if candidates.is_empty() {
        println!("No candidate files.");
        return Ok(());
    }

    for candidate in &candidates {
        println!("{} ({})", candidate.name, candidate.kind.as_str());
    }
    println!("\n{} candidate file(s).", candidates.len());

    Ok(())
}
