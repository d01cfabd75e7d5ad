//! Error types for Power BI wrapper operations.
//!
//! This module provides the error hierarchy using `thiserror`. Only two
//! failure classes reach library callers: configuration errors raised at
//! construction and process errors raised by the external tool. Response
//! parsing never fails.

use thiserror::Error;

/// Result type alias for wrapper operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for wrapper operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid construction-time configuration.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// The external CLI could not be run or exited unsuccessfully.
    #[error("process error: {0}")]
    Process(#[from] ProcessError),

    /// Binary front-end errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// I/O errors outside process execution.
    #[error("I/O error: {0}")]
    Io(String),
}

impl Error {
    /// Builds a configuration error from a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Short machine-readable name of the error class.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Config { .. } => "configuration",
            Self::Process(_) => "process",
            Self::Command(_) => "command",
            Self::Io(_) => "io",
        }
    }
}

/// Failures of a single external CLI invocation.
#[derive(Error, Debug)]
pub enum ProcessError {
    /// The executable could not be started.
    #[error("failed to start {program}: {reason}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying OS error.
        reason: String,
    },

    /// The process exited with a non-zero status or was killed by a signal.
    #[error("{program} {args} exited with {}: {}", exit_label(*code), stderr.trim())]
    Failed {
        /// Program that was run.
        program: String,
        /// Space-joined arguments, for diagnostics only.
        args: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },

    /// The process did not finish before the configured timeout.
    #[error("{program} timed out after {timeout_secs}s")]
    Timeout {
        /// Program that was run.
        program: String,
        /// Timeout that elapsed, in seconds.
        timeout_secs: u64,
    },

    /// Waiting on the running process failed; the child has been killed.
    #[error("failed waiting on {program}: {reason}")]
    Wait {
        /// Program that was run.
        program: String,
        /// Underlying OS error.
        reason: String,
    },
}

impl ProcessError {
    /// Exit code of a failed process, if it exited normally.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Failed { code, .. } => *code,
            _ => None,
        }
    }

    /// Captured stderr of a failed process, if any.
    #[must_use]
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::Failed { stderr, .. } => Some(stderr),
            _ => None,
        }
    }
}

fn exit_label(code: Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| format!("status {c}"))
}

/// Binary front-end errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Output format error.
    #[error("output format error: {0}")]
    OutputFormat(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        Self::OutputFormat(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Command(err.into())
    }
}
