//! Process invocation for the external Power BI CLI.
//!
//! The [`Invoker`] trait is the only way the wrapper reaches the outside
//! world. [`SystemInvoker`] spawns the real executable; tests substitute
//! their own implementations.

pub mod system;
pub mod traits;

pub use system::{InvokerConfig, SystemInvoker};
pub use traits::Invoker;

use std::time::Duration;

/// Default executable name.
pub const DEFAULT_BINARY: &str = "powerbi";

/// Default working directory of the child process.
pub const DEFAULT_WORKING_DIR: &str = "storage/powerbi";

/// Default per-invocation timeout; generous enough for large PBIX imports.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(6400);
