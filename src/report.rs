//! Result aggregation and output formatting
//!
//! Reduces each file's raw pipeline transcript to a flagged-line count and a
//! verdict, then renders the whole run either as human-readable text or as
//! machine-parseable JSON.

use std::sync::OnceLock;

use colored::Colorize;
use regex::Regex;
use serde::Serialize;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// Raw line-oriented output captured from one per-file pipeline
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    /// Build a transcript from captured engine stdout
    #[must_use]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            lines: String::from_utf8_lossy(bytes).lines().map(String::from).collect(),
        }
    }

    /// Build a transcript from explicit lines
    #[must_use]
    pub fn from_lines(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// All captured lines, in order
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The flagged lines of this transcript.
    ///
    /// The first line is always the engine's startup banner and is discarded
    /// unconditionally; blank lines separate checking units and are ignored.
    /// Everything else reports one spelling issue.
    #[must_use]
    pub fn flagged_lines(&self) -> Vec<&str> {
        self.lines
            .iter()
            .skip(1)
            .map(String::as_str)
            .filter(|l| !l.trim().is_empty())
            .collect()
    }
}

/// One flagged transcript line, with the engine's report parsed out when possible
#[derive(Debug, Clone, Serialize)]
pub struct Flagged {
    /// The raw transcript line
    pub line: String,
    /// The misspelled word, when the line parses as an engine report
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    /// Suggested replacements, when offered
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

/// Matches the engine's report lines: `& word n off: s1, s2` or `# word off`
fn report_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[&#]\s+(\S+)(?:\s+\d+)+(?::\s*(.+))?$").ok()).as_ref()
}

impl Flagged {
    /// Parse a flagged transcript line.
    ///
    /// Lines outside the engine's report grammar are carried raw.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let Some(pattern) = report_pattern() else {
            return Self {
                line: line.to_string(),
                word: None,
                suggestions: Vec::new(),
            };
        };
        pattern.captures(line).map_or_else(
            || Self {
                line: line.to_string(),
                word: None,
                suggestions: Vec::new(),
            },
            |caps| Self {
                line: line.to_string(),
                word: caps.get(1).map(|m| m.as_str().to_string()),
                suggestions: caps
                    .get(2)
                    .map(|m| m.as_str().split(", ").map(String::from).collect())
                    .unwrap_or_default(),
            },
        )
    }
}

/// Outcome category for one candidate file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    /// Zero flagged lines
    Pass,
    /// One or more flagged lines
    Fail,
    /// The pipeline itself failed (renderer error, stall, I/O)
    Error,
}

/// Result for a single candidate file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    /// The file name as enumerated or given
    pub file: String,
    /// Outcome category
    pub status: FileStatus,
    /// Number of flagged lines
    pub count: usize,
    /// The flagged lines, in transcript order
    pub flagged: Vec<Flagged>,
    /// Pipeline error description, for [`FileStatus::Error`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    /// Derive a report from a completed pipeline's transcript
    #[must_use]
    pub fn from_transcript(file: impl Into<String>, transcript: &Transcript) -> Self {
        let flagged: Vec<Flagged> =
            transcript.flagged_lines().into_iter().map(Flagged::parse).collect();
        let count = flagged.len();
        Self {
            file: file.into(),
            status: if count == 0 { FileStatus::Pass } else { FileStatus::Fail },
            count,
            flagged,
            error: None,
        }
    }

    /// Build a report for a pipeline that failed outright
    #[must_use]
    pub fn from_error(file: impl Into<String>, error: impl ToString) -> Self {
        Self {
            file: file.into(),
            status: FileStatus::Error,
            count: 0,
            flagged: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    /// Whether this file passed
    #[must_use]
    pub const fn passed(&self) -> bool {
        matches!(self.status, FileStatus::Pass)
    }

    /// The verdict message, using "no" in place of a zero count
    #[must_use]
    pub fn verdict(&self) -> String {
        if self.count == 0 {
            format!("{} has no spelling errors", self.file)
        } else {
            format!("{} has {} spelling errors", self.file, self.count)
        }
    }
}

/// Result of a whole spell-check run
#[derive(Debug, Serialize)]
pub struct SpellReport {
    /// Whether every file passed
    pub passed: bool,
    /// Number of files checked
    pub files_checked: usize,
    /// Whether the run was skipped (engine unavailable)
    pub skipped: bool,
    /// Skip notice, when the run was skipped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    /// Engine program the run used (or would have used)
    pub engine: String,
    /// When the run finished (RFC3339)
    pub checked_at: String,
    /// Per-file results, in enumeration order
    pub results: Vec<FileReport>,
}

impl SpellReport {
    /// Assemble a report from per-file results, in enumeration order
    #[must_use]
    pub fn from_results(engine: impl Into<String>, results: Vec<FileReport>) -> Self {
        Self {
            passed: results.iter().all(FileReport::passed),
            files_checked: results.len(),
            skipped: false,
            notice: None,
            engine: engine.into(),
            checked_at: chrono::Utc::now().to_rfc3339(),
            results,
        }
    }

    /// Assemble the skip report for an unavailable engine
    #[must_use]
    pub fn skipped(engine: impl Into<String>, files: usize) -> Self {
        let engine = engine.into();
        Self {
            passed: true,
            files_checked: 0,
            skipped: true,
            notice: Some(format!(
                "spell checking requires external tool '{engine}' ({files} file(s) skipped)"
            )),
            engine,
            checked_at: chrono::Utc::now().to_rfc3339(),
            results: Vec::new(),
        }
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    fn render_human(&self) {
        if self.skipped {
            if let Some(notice) = &self.notice {
                println!("{}", notice.yellow());
            }
            return;
        }

        if self.files_checked == 0 {
            println!("No candidate files.");
            return;
        }

        println!("Checking {} file(s)...\n", self.files_checked);

        for result in &self.results {
            // Diagnostics first, so the flagged tokens sit above the verdict
            for flagged in &result.flagged {
                println!("    {}", flagged.line);
            }
            match result.status {
                FileStatus::Pass => println!("{}", format!("ok - {}", result.verdict()).green()),
                FileStatus::Fail => {
                    println!("{}", format!("not ok - {}", result.verdict()).red());
                },
                FileStatus::Error => {
                    let detail = result.error.as_deref().unwrap_or("pipeline failed");
                    println!("{}", format!("error - {}: {detail}", result.file).red());
                },
            }
        }

        let failed = self.results.iter().filter(|r| !r.passed()).count();
        println!();
        if self.passed {
            println!("All {} file(s) passed.", self.files_checked);
        } else {
            println!("{failed} of {} file(s) failed.", self.files_checked);
        }
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}
