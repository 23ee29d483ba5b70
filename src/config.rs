//! Project configuration management
//!
//! Configuration lives in `.docspell.toml` at the repository root. Every
//! field carries a serde default so a partial (or absent) file still yields
//! a usable configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable holding the parallelism hint
pub const JOBS_ENV: &str = "DOCSPELL_JOBS";

/// Default number of simultaneously running per-file pipelines
pub const DEFAULT_JOBS: usize = 2;

/// Project docspell configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Candidate file selection rules
    #[serde(default)]
    pub selection: SelectionConfig,
    /// Session dictionary settings
    #[serde(default)]
    pub dictionary: DictionaryConfig,
    /// Spelling engine invocation settings
    #[serde(default)]
    pub engine: EngineConfig,
    /// Per-file pipeline settings
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

/// Candidate file selection rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Extensions eligible for checking (lowercase, without the dot)
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Extensions that need a render stage before checking
    #[serde(default = "default_markup_extensions")]
    pub markup_extensions: Vec<String>,
    /// Glob patterns excluding files from auto-discovery (case-insensitive)
    #[serde(default = "default_exclude")]
    pub exclude: Vec<String>,
    /// What to do when `git ls-files` is unavailable
    #[serde(default)]
    pub on_enumeration_error: EnumerationPolicy,
}

/// Session dictionary settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// Language tag written into the dictionary header
    #[serde(default = "default_lang")]
    pub lang: String,
    /// Word-list fragments merged into the session dictionary, in order
    #[serde(default = "default_fragments")]
    pub fragments: Vec<PathBuf>,
}

/// Spelling engine invocation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Engine executable name or path
    #[serde(default = "default_engine_program")]
    pub program: String,
    /// Arguments for the per-file check invocation (pipe mode)
    #[serde(default = "default_engine_args")]
    pub args: Vec<String>,
    /// Arguments for the availability probe
    #[serde(default = "default_probe_args")]
    pub probe_args: Vec<String>,
}

/// Per-file pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Renderer command for markup files (the file path is appended)
    #[serde(default = "default_renderer")]
    pub renderer: Vec<String>,
    /// What to do when the renderer exits non-zero
    #[serde(default)]
    pub on_renderer_error: RendererPolicy,
    /// Per-file timeout in seconds; `0` disables the timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Policy for a failed candidate-file enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnumerationPolicy {
    /// Abort the run (default)
    #[default]
    Fail,
    /// Fall back to a plain filesystem walk
    Skip,
}

/// Policy for a renderer subprocess that exits non-zero
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererPolicy {
    /// Report a per-file error (default)
    #[default]
    Fail,
    /// Keep whatever output the renderer produced
    Ignore,
}

fn default_extensions() -> Vec<String> {
    ["pod6", "rakudoc", "md", "txt"].iter().map(ToString::to_string).collect()
}

fn default_markup_extensions() -> Vec<String> {
    ["pod6", "rakudoc", "md"].iter().map(ToString::to_string).collect()
}

fn default_exclude() -> Vec<String> {
    ["*contributors*", "*credits*"].iter().map(ToString::to_string).collect()
}

fn default_lang() -> String {
    "en".to_string()
}

fn default_fragments() -> Vec<PathBuf> {
    vec![PathBuf::from("words.pws"), PathBuf::from("code.pws")]
}

fn default_engine_program() -> String {
    "aspell".to_string()
}

fn default_engine_args() -> Vec<String> {
    ["-a", "--ignore-case"].iter().map(ToString::to_string).collect()
}

fn default_probe_args() -> Vec<String> {
    vec!["version".to_string()]
}

fn default_renderer() -> Vec<String> {
    ["raku", "--doc"].iter().map(ToString::to_string).collect()
}

const fn default_timeout_secs() -> u64 {
    120
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            markup_extensions: default_markup_extensions(),
            exclude: default_exclude(),
            on_enumeration_error: EnumerationPolicy::default(),
        }
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            lang: default_lang(),
            fragments: default_fragments(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: default_engine_program(),
            args: default_engine_args(),
            probe_args: default_probe_args(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            renderer: default_renderer(),
            on_renderer_error: RendererPolicy::default(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load config from a `.docspell.toml`, or defaults if absent/invalid
    #[must_use]
    pub fn load(path: &Path) -> Self {
        if path.exists() {
            fs::read_to_string(path)
                .ok()
                .and_then(|content| toml::from_str(&content).ok())
                .unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Load config from the project root's `.docspell.toml`
    #[must_use]
    pub fn load_project() -> Self {
        Self::load(&crate::paths::docspell_toml())
    }
}

/// Read the parallelism hint from the environment.
///
/// Returns [`DEFAULT_JOBS`] when unset, unparseable, or zero.
#[must_use]
pub fn jobs_hint() -> usize {
    std::env::var(JOBS_ENV)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .filter(|&n| n >= 1)
        .unwrap_or(DEFAULT_JOBS)
}
