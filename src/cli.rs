//! CLI definitions and entry point

use clap::{Parser, Subcommand};

use crate::commands;
use docspell::report::OutputMode;

/// docspell - Spell-check a documentation corpus
#[derive(Parser, Debug)]
#[command(
    name = "docspell",
    version,
    about = "Spell-check documentation through an external spelling engine",
    long_about = "Spell-check a repository's documentation corpus.\n\n\
                  Candidate files are discovered from version control, piped\n\
                  through an external renderer and spelling engine, and each\n\
                  file gets one pass/fail verdict with full diagnostics."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output in JSON format (machine-readable)
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize docspell in the current repository
    Init {
        /// Force re-initialization
        #[arg(short, long)]
        force: bool,
    },

    /// Spell-check candidate files
    Check {
        /// Explicit files to check (overrides auto-discovery, unfiltered)
        files: Vec<String>,

        /// Run in CI mode (return an error instead of exiting directly)
        #[arg(long)]
        ci: bool,
    },

    /// List candidate files without checking them
    List,

    /// Rebuild the session dictionary and show where it lives
    Dict,

    /// Show version
    Version,
}

/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Human
    };

    match cli.command {
        Some(Command::Init { force }) => commands::init(force, output_mode),
        Some(Command::Check { files, ci }) => commands::check(&files, ci, output_mode),
        Some(Command::List) => commands::list(output_mode),
        Some(Command::Dict) => commands::dict(output_mode),
        Some(Command::Version) => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION")
                    })
                );
            } else {
                println!("docspell v{}", env!("CARGO_PKG_VERSION"));
            }
            Ok(())
        },
        None => {
            if output_mode == OutputMode::Json {
                println!(
                    "{}",
                    serde_json::json!({
                        "version": env!("CARGO_PKG_VERSION"),
                        "hint": "Use --help for usage"
                    })
                );
            } else {
                println!("docspell v{}", env!("CARGO_PKG_VERSION"));
                println!("\nRun 'docspell --help' for usage");
                println!("Run 'docspell init' to get started");
            }
            Ok(())
        },
    }
}
