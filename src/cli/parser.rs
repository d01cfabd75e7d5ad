//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::command::Options;
use crate::error::{CommandError, Result};
use crate::process::{DEFAULT_BINARY, DEFAULT_WORKING_DIR, InvokerConfig};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// powerbi-rs: typed front-end for the Power BI command-line tool.
///
/// Runs the external `powerbi` executable and prints its responses as
/// structured text or JSON.
#[derive(Parser, Debug)]
#[command(name = "powerbi-rs")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path or name of the external Power BI executable.
    #[arg(long, env = "POWERBI_CLI_BIN", default_value = DEFAULT_BINARY, global = true)]
    pub binary: PathBuf,

    /// Working directory for the external executable.
    #[arg(long, env = "POWERBI_WORKDIR", default_value = DEFAULT_WORKING_DIR, global = true)]
    pub working_dir: PathBuf,

    /// Per-invocation timeout in seconds.
    #[arg(long, env = "POWERBI_TIMEOUT_SECS", default_value = "6400", global = true)]
    pub timeout_secs: u64,

    /// Configuration option as NAME=VALUE (repeatable, order preserved).
    ///
    /// Example: --set=-c=acme --set=-k=secret --set=-w=ws-1
    #[arg(long = "set", value_name = "NAME=VALUE", allow_hyphen_values = true, global = true)]
    pub set: Vec<String>,

    /// Keep the historical workspace listing that drops the first entry.
    #[arg(long, global = true)]
    pub legacy_workspaces: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Per-call option pairs.
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// Per-call option as NAME=VALUE (repeatable, order preserved).
    #[arg(long = "param", value_name = "NAME=VALUE", allow_hyphen_values = true)]
    pub params: Vec<String>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the external tool's version.
    Version,

    /// Print every configured value.
    Config,

    /// List workspaces in the workspace collection.
    Workspaces,

    /// Create a workspace in the workspace collection.
    CreateWorkspace,

    /// List datasets in the workspace.
    Datasets,

    /// Delete a dataset and its linked reports.
    DeleteDataset {
        /// Dataset ID.
        id: String,
    },

    /// List reports in the workspace.
    Reports,

    /// Import a PBIX file.
    Import {
        /// Path to the PBIX file.
        file: String,

        /// Dataset name.
        #[arg(short, long)]
        name: String,

        /// Overwrite an existing dataset with the same name.
        #[arg(short, long)]
        overwrite: bool,

        /// Per-call options.
        #[command(flatten)]
        params: ParamArgs,
    },

    /// Create an embed token.
    CreateToken {
        /// Per-call options.
        #[command(flatten)]
        params: ParamArgs,
    },

    /// Run raw arguments against the external tool.
    Exec {
        /// Arguments passed through unchanged.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        args: Vec<String>,
    },
}

impl Cli {
    /// Returns the process configuration selected by the global arguments.
    #[must_use]
    pub fn invoker_config(&self) -> InvokerConfig {
        InvokerConfig::default()
            .with_binary(self.binary.clone())
            .with_working_dir(self.working_dir.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }

    /// Returns the configuration mapping from `--set` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if a pair has no `=`.
    pub fn options(&self) -> Result<Options> {
        parse_pairs(&self.set, "--set")
    }
}

impl ParamArgs {
    /// Returns the per-call mapping from `--param` pairs.
    ///
    /// # Errors
    ///
    /// Returns an error if a pair has no `=`.
    pub fn options(&self) -> Result<Options> {
        parse_pairs(&self.params, "--param")
    }
}

/// Splits `NAME=VALUE` strings at the first `=`.
fn parse_pairs(raw: &[String], flag: &str) -> Result<Options> {
    raw.iter()
        .map(|pair| -> Result<(String, String)> {
            let (name, value) = pair
                .split_once('=')
                .filter(|(name, _)| !name.is_empty())
                .ok_or_else(|| {
                    CommandError::InvalidArgument(format!(
                        "{flag} expects NAME=VALUE, got {pair:?}"
                    ))
                })?;
            Ok((name.to_string(), value.to_string()))
        })
        .collect()
}
