//! Spelling engine invocation
//!
//! The engine (aspell by default) is an external binary driven over its
//! line-oriented pipe protocol: a leading `!` line enables terse mode, input
//! lines prefixed with `^` are checked as content, and output is a banner
//! line followed by one report line per flagged token.

use std::path::Path;
use std::process::Command;

use crate::config::EngineConfig;

/// Handle on the external spelling engine
#[derive(Debug, Clone)]
pub struct Engine {
    program: String,
    args: Vec<String>,
    probe_args: Vec<String>,
}

impl Engine {
    /// Build an engine handle from explicit parts
    #[must_use]
    pub const fn new(program: String, args: Vec<String>, probe_args: Vec<String>) -> Self {
        Self {
            program,
            args,
            probe_args,
        }
    }

    /// Build an engine handle from configuration
    #[must_use]
    pub fn from_config(cfg: &EngineConfig) -> Self {
        Self::new(cfg.program.clone(), cfg.args.clone(), cfg.probe_args.clone())
    }

    /// The engine executable name or path
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Probe whether the engine is installed and runnable.
    ///
    /// Invokes the engine once with its version arguments; a spawn failure
    /// or non-zero exit means unavailable. Called once per run, before any
    /// per-file pipeline starts.
    #[must_use]
    pub fn probe(&self) -> bool {
        match Command::new(&self.program).args(&self.probe_args).output() {
            Ok(output) => {
                let available = output.status.success();
                log::debug!(
                    "engine probe '{} {}': {}",
                    self.program,
                    self.probe_args.join(" "),
                    if available { "ok" } else { "unavailable" }
                );
                available
            },
            Err(err) => {
                log::debug!("engine probe failed to spawn '{}': {err}", self.program);
                false
            },
        }
    }

    /// Build the per-file check invocation.
    ///
    /// Pipe mode with the configured flags; when a session dictionary is
    /// given it is loaded as an extra word source.
    #[must_use]
    pub fn check_command(&self, dictionary: Option<&Path>) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dict) = dictionary {
            cmd.arg(format!("--extra-dicts={}", dict.display()));
        }
        cmd
    }
}
