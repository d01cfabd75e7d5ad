//! Command formatting for the external Power BI CLI.
//!
//! Turns option mappings into the flag strings and argument vectors the
//! external tool expects:
//!
//! - **Options**: ordered `name -> value` mapping supplied by callers
//! - **`format_input`**: the space-joined `name value` rendering
//! - **`CommandLine`**: discrete argument tokens handed to the process layer

pub mod line;
pub mod options;

pub use line::{CommandLine, split_command};
pub use options::{Options, format_input};
