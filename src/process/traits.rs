//! Process invoker trait definition.
//!
//! Defines the seam between command formatting/parsing and actually running
//! the external executable, so the wrapper can be driven by a fake in tests.

use crate::error::Result;

/// Trait for running the external Power BI CLI.
///
/// Implementations receive the argument tokens that follow the executable
/// name and return its captured standard output, untrimmed.
pub trait Invoker: Send + Sync {
    /// Runs the external tool with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::ProcessError`] (wrapped in
    /// [`crate::Error::Process`]) when the process cannot be started, exits
    /// with a non-zero status, or exceeds its timeout.
    fn invoke(&self, args: &[String]) -> Result<String>;
}

impl<T: Invoker + ?Sized> Invoker for &T {
    fn invoke(&self, args: &[String]) -> Result<String> {
        (**self).invoke(args)
    }
}

impl<T: Invoker + ?Sized> Invoker for Box<T> {
    fn invoke(&self, args: &[String]) -> Result<String> {
        (**self).invoke(args)
    }
}
