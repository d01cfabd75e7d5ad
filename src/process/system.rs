//! Invoker backed by `std::process::Command`.

use crate::error::{ProcessError, Result};
use crate::process::traits::Invoker;
use crate::process::{DEFAULT_BINARY, DEFAULT_TIMEOUT, DEFAULT_WORKING_DIR};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// Interval between exit-status polls while waiting on the child.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Where and how the external executable is run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokerConfig {
    /// Executable name or path.
    pub binary: PathBuf,
    /// Working directory of the child process.
    pub working_dir: PathBuf,
    /// Maximum wall-clock time per invocation.
    pub timeout: Duration,
}

impl Default for InvokerConfig {
    fn default() -> Self {
        Self {
            binary: PathBuf::from(DEFAULT_BINARY),
            working_dir: PathBuf::from(DEFAULT_WORKING_DIR),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl InvokerConfig {
    /// Sets the executable.
    #[must_use]
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Sets the working directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = dir.into();
        self
    }

    /// Sets the per-invocation timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Runs the external CLI as a child process.
///
/// Stdin is closed, stdout and stderr are drained on background threads so
/// a chatty child never blocks on a full pipe, and the child is killed once
/// the configured timeout elapses.
#[derive(Debug, Clone, Default)]
pub struct SystemInvoker {
    config: InvokerConfig,
}

impl SystemInvoker {
    /// Creates an invoker from its configuration.
    #[must_use]
    pub const fn new(config: InvokerConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &InvokerConfig {
        &self.config
    }

    fn program(&self) -> String {
        self.config.binary.display().to_string()
    }

    fn spawn(&self, args: &[String]) -> Result<Child> {
        Command::new(&self.config.binary)
            .args(args)
            .current_dir(&self.config.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                ProcessError::Spawn {
                    program: self.program(),
                    reason: spawn_reason(&e, &self.config.working_dir),
                }
                .into()
            })
    }

    /// Polls the child until it exits or the deadline passes.
    ///
    /// Returns `None` after killing the child on timeout. Without a deadline
    /// the child is waited on indefinitely.
    fn wait_with_deadline(
        &self,
        child: &mut Child,
        deadline: Option<Instant>,
    ) -> Result<Option<ExitStatus>> {
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(Some(status)),
                Ok(None) => {}
                Err(e) => {
                    reap(child);
                    return Err(ProcessError::Wait {
                        program: self.program(),
                        reason: e.to_string(),
                    }
                    .into());
                }
            }
            if deadline.is_some_and(|d| Instant::now() >= d) {
                reap(child);
                return Ok(None);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    fn timeout_error(&self, program: String, rendered: &str) -> crate::Error {
        tracing::warn!(program = %program, args = %rendered, "external CLI timed out");
        ProcessError::Timeout {
            program,
            timeout_secs: self.config.timeout.as_secs(),
        }
        .into()
    }
}

impl Invoker for SystemInvoker {
    fn invoke(&self, args: &[String]) -> Result<String> {
        let program = self.program();
        let rendered = args.join(" ");
        tracing::debug!(
            program = %program,
            args = %rendered,
            working_dir = %self.config.working_dir.display(),
            "invoking external CLI"
        );

        // An unrepresentable deadline means the timeout is effectively infinite.
        let deadline = Instant::now().checked_add(self.config.timeout);
        let mut child = self.spawn(args)?;
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        // On timeout the drain threads are left behind: a grandchild may still
        // hold the pipes open, and they finish once it exits.
        let Some(status) = self.wait_with_deadline(&mut child, deadline)? else {
            return Err(self.timeout_error(program, &rendered));
        };
        let (Some(stdout), Some(stderr)) = (collect(stdout, deadline), collect(stderr, deadline))
        else {
            return Err(self.timeout_error(program, &rendered));
        };

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr).into_owned();
            tracing::warn!(
                program = %program,
                args = %rendered,
                code = ?status.code(),
                stderr = %stderr.trim(),
                "external CLI failed"
            );
            return Err(ProcessError::Failed {
                program,
                args: rendered,
                code: status.code(),
                stderr,
            }
            .into());
        }

        let output = String::from_utf8_lossy(&stdout).into_owned();
        tracing::debug!(program = %program, bytes = output.len(), "external CLI finished");
        Ok(output)
    }
}

/// Kills and reaps a child whose outcome no longer matters.
fn reap(child: &mut Child) {
    // Already-exited races surface as an error here; either way it is gone.
    let _ = child.kill();
    let _ = child.wait();
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<Receiver<Vec<u8>>> {
    pipe.map(|mut pipe| {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = Vec::new();
            // A read error mid-stream keeps whatever arrived before it.
            let _ = pipe.read_to_end(&mut buf);
            let _ = tx.send(buf);
        });
        rx
    })
}

/// Waits for a drained pipe, giving up at the deadline.
///
/// Returns `None` if the pipe is still open when the deadline passes.
fn collect(rx: Option<Receiver<Vec<u8>>>, deadline: Option<Instant>) -> Option<Vec<u8>> {
    let Some(rx) = rx else {
        return Some(Vec::new());
    };
    let received = match deadline {
        None => rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        Some(d) => rx.recv_timeout(d.saturating_duration_since(Instant::now())),
    };
    match received {
        Ok(buf) => Some(buf),
        Err(RecvTimeoutError::Disconnected) => Some(Vec::new()),
        Err(RecvTimeoutError::Timeout) => None,
    }
}

fn spawn_reason(err: &std::io::Error, working_dir: &Path) -> String {
    if err.kind() == std::io::ErrorKind::NotFound && !working_dir.is_dir() {
        format!("working directory {} does not exist", working_dir.display())
    } else {
        err.to_string()
    }
}
