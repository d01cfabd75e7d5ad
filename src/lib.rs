//! # powerbi-rs
//!
//! Typed wrapper around the Power BI command-line tool.
//!
//! The wrapper formats method calls into argument vectors, runs the external
//! executable, and scrapes its free-text output into records.
//!
//! ## Features
//!
//! - **Command formatting**: ordered option mappings rendered as CLI flags
//! - **Process invocation**: injectable [`Invoker`], with a timeout-aware
//!   [`SystemInvoker`] that never goes through a shell
//! - **Response parsing**: regex extraction keyed by [`ResponseKind`],
//!   degrading to empty results instead of failing

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod client;
pub mod command;
pub mod error;
pub mod process;
pub mod response;

// Re-export commonly used types at crate root
pub use error::{Error, ProcessError, Result};

pub use client::PowerBi;
pub use command::{CommandLine, Options, format_input};
pub use process::{Invoker, InvokerConfig, SystemInvoker};
pub use response::{
    ImportResult, MARKER, ParsedResponse, ResourceSummary, ResponseKind, WorkspaceListing,
    parse_response,
};
