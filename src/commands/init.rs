//! Initialize docspell in a repository

use std::fs;
use std::path::Path;

use docspell::paths;
use docspell::report::OutputMode;

/// Initialize docspell in the current repository
pub fn init(force: bool, _mode: OutputMode) -> anyhow::Result<()> {
    let toml_path = Path::new(paths::DOCSPELL_TOML);

    if toml_path.exists() && !force {
        println!("Already initialized (.docspell.toml exists).");
        println!("Use --force to reinitialize.");
        return Ok(());
    }

    println!("Initializing docspell...\n");

    // Create .docspell.toml with commented defaults
    let docspell_toml = r#"# docspell configuration

[selection]
# extensions = ["pod6", "rakudoc", "md", "txt"]
# markup_extensions = ["pod6", "rakudoc", "md"]
# exclude = ["*contributors*", "*credits*"]
# on_enumeration_error = "fail"   # or "skip" to fall back to a tree walk

[dictionary]
# lang = "en"
# fragments = ["words.pws", "code.pws"]

[engine]
# program = "aspell"
# args = ["-a", "--ignore-case"]
# probe_args = ["version"]

[pipeline]
# renderer = ["raku", "--doc"]
# on_renderer_error = "fail"      # or "ignore" to keep partial output
# timeout_secs = 120              # 0 disables the timeout
"#;
    fs::write(toml_path, docspell_toml)?;
    println!("  Created .docspell.toml");

    // Seed the word-list fragments
    for fragment in ["words.pws", "code.pws"] {
        let path = Path::new(fragment);
        if !path.exists() {
            fs::write(path, "")?;
            println!("  Created {fragment}");
        }
    }

    // Create .docspell/ for the transient session dictionary
    fs::create_dir_all(paths::DOCSPELL_DIR)?;
    fs::write(Path::new(paths::DOCSPELL_DIR).join(".gitignore"), "session.pws\n")?;
    println!("  Created .docspell/ (session dictionary, gitignored)");

    println!("\ndocspell initialized!");
    println!("\nNext steps:");
    println!("  Add accepted words to words.pws (one token per line)");
    println!("  docspell list    # preview the candidate files");
    println!("  docspell check   # run the spell check");

    Ok(())
}
