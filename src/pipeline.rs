//! Per-file checker pipeline
//!
//! Each candidate file is checked by a chain of stages, every stage
//! consuming an upstream byte stream and producing a downstream one:
//!
//! - Markup file: renderer subprocess → prefix stage → engine subprocess
//! - Plain file: prefix stage (fed from the file) → engine subprocess
//!
//! The prefix stage implements the engine's line protocol: it injects a
//! leading `!` line (terse mode) and prefixes every upstream line with `^`
//! so the engine treats each line as an independent checking unit. It runs
//! in-process on a copy thread between the pipes; no intermediate file is
//! ever written.
//!
//! All subprocesses for one file run concurrently. Engine stderr is drained
//! and discarded to keep benign engine diagnostics out of the transcript.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::config::{PipelineConfig, RendererPolicy};
use crate::engine::Engine;
use crate::report::Transcript;
use crate::selector::{CandidateFile, FileKind};

/// Interval between completion polls while waiting on the engine
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Errors that can occur while running a per-file pipeline
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A stage subprocess could not be started
    #[error("failed to run '{program}': {source}")]
    Spawn {
        /// The program that failed to start
        program: String,
        /// The spawn error
        source: io::Error,
    },

    /// The render stage exited non-zero (under the `fail` policy)
    #[error("renderer '{program}' exited with {code:?}")]
    Renderer {
        /// The renderer program
        program: String,
        /// Its exit code, if any
        code: Option<i32>,
    },

    /// The pipeline exceeded its timeout and was killed
    #[error("pipeline stalled: no completion within {secs}s")]
    Stalled {
        /// The configured timeout in seconds
        secs: u64,
    },

    /// IO error on the file or the pipes
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Runner for per-file pipelines.
///
/// Holds everything shared across files: the engine handle, the renderer
/// command, the session dictionary path, and the policies. Immutable once
/// built, so one runner can serve concurrent per-file jobs.
#[derive(Debug)]
pub struct Pipeline {
    engine: Engine,
    renderer: Vec<String>,
    dictionary: Option<PathBuf>,
    on_renderer_error: RendererPolicy,
    timeout: Option<Duration>,
}

impl Pipeline {
    /// Build a runner from configuration
    #[must_use]
    pub fn new(engine: Engine, cfg: &PipelineConfig, dictionary: Option<PathBuf>) -> Self {
        Self {
            engine,
            renderer: cfg.renderer.clone(),
            dictionary,
            on_renderer_error: cfg.on_renderer_error,
            timeout: match cfg.timeout_secs {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
        }
    }

    /// Override the per-file timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the pipeline for one candidate file and capture its transcript
    pub fn run(&self, candidate: &CandidateFile) -> Result<Transcript, PipelineError> {
        match candidate.kind {
            FileKind::Markup => {
                let mut renderer = self.spawn_renderer(&candidate.path)?;
                let upstream = renderer.stdout.take().ok_or_else(|| {
                    PipelineError::Io(io::Error::other("renderer stdout not captured"))
                })?;
                self.run_engine(Box::new(upstream), Some(renderer))
            },
            FileKind::Plain => {
                let file = File::open(&candidate.path)?;
                self.run_engine(Box::new(file), None)
            },
        }
    }

    /// Spawn the render stage for one markup file
    fn spawn_renderer(&self, file: &Path) -> Result<Child, PipelineError> {
        let program = self.renderer.first().cloned().unwrap_or_default();
        Command::new(&program)
            .args(self.renderer.get(1..).unwrap_or(&[]))
            .arg(file)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| PipelineError::Spawn { program, source })
    }

    /// Feed `upstream` through the prefix stage into the engine and collect
    /// the engine's stdout.
    fn run_engine(
        &self,
        upstream: Box<dyn Read + Send>,
        renderer: Option<Child>,
    ) -> Result<Transcript, PipelineError> {
        let mut renderer = renderer;
        let mut checker = self
            .engine
            .check_command(self.dictionary.as_deref())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| PipelineError::Spawn {
                program: self.engine.program().to_string(),
                source,
            })?;

        let mut stdin = checker
            .stdin
            .take()
            .ok_or_else(|| PipelineError::Io(io::Error::other("engine stdin not captured")))?;
        let mut stdout = checker
            .stdout
            .take()
            .ok_or_else(|| PipelineError::Io(io::Error::other("engine stdout not captured")))?;

        let prefix = thread::spawn(move || prefix_stream(upstream, &mut stdin));

        // Collector keeps the engine's stdout drained so it can't block
        let collector = thread::spawn(move || {
            let mut buf = Vec::new();
            let _ = stdout.read_to_end(&mut buf);
            buf
        });

        let deadline = self.timeout.map(|t| Instant::now() + t);
        loop {
            if checker.try_wait()?.is_some() {
                break;
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                let secs = self.timeout.map_or(0, |t| t.as_secs());
                log::warn!("killing stalled pipeline after {secs}s");
                let _ = checker.kill();
                let _ = checker.wait();
                if let Some(child) = renderer.as_mut() {
                    let _ = child.kill();
                    let _ = child.wait();
                }
                let _ = prefix.join();
                let _ = collector.join();
                return Err(PipelineError::Stalled { secs });
            }
            thread::sleep(POLL_INTERVAL);
        }

        let prefix_result = prefix
            .join()
            .unwrap_or_else(|_| Err(io::Error::other("prefix stage panicked")));
        let bytes = collector.join().unwrap_or_default();

        if let Some(mut child) = renderer {
            let status = child.wait()?;
            if self.on_renderer_error == RendererPolicy::Fail && !status.success() {
                return Err(PipelineError::Renderer {
                    program: self.renderer.first().cloned().unwrap_or_default(),
                    code: status.code(),
                });
            }
        }

        // The engine closing stdin early is not a read failure; its
        // transcript is the authority in that case
        if let Err(err) = prefix_result
            && err.kind() != io::ErrorKind::BrokenPipe
        {
            return Err(PipelineError::Io(err));
        }

        Ok(Transcript::from_bytes(&bytes))
    }
}

/// The prefix stage: `!` banner, then each line prefixed with `^`.
///
/// Operates on raw bytes so input that is not valid UTF-8 still reaches the
/// engine line by line instead of truncating the stream.
fn prefix_stream(upstream: impl Read, downstream: &mut impl Write) -> io::Result<()> {
    downstream.write_all(b"!\n")?;
    let mut reader = BufReader::new(upstream);
    let mut line = Vec::new();
    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        if line.last() == Some(&b'\n') {
            line.pop();
        }
        if line.last() == Some(&b'\r') {
            line.pop();
        }
        downstream.write_all(b"^")?;
        downstream.write_all(&line)?;
        downstream.write_all(b"\n")?;
    }
    downstream.flush()
}
