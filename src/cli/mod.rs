//! CLI layer for powerbi-rs.
//!
//! Provides the command-line interface using clap, with one subcommand per
//! wrapper operation.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::{execute, execute_with};
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
