//! Argument-vector construction for external CLI invocations.

use crate::command::Options;

/// An argument vector for one external CLI invocation.
///
/// Arguments are kept as discrete tokens and handed to the process layer
/// unchanged; nothing is ever interpreted by a shell. `Display` renders the
/// space-joined form for logs and diagnostics.
///
/// # Examples
///
/// ```
/// use powerbi_rs::command::{CommandLine, Options};
///
/// let line = CommandLine::new("delete-dataset")
///     .options(&Options::from([("-c", "coll")]))
///     .flag("-d", "42");
/// assert_eq!(line.to_string(), "delete-dataset -c coll -d 42");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    args: Vec<String>,
}

impl CommandLine {
    /// Starts an argument vector with a subcommand.
    #[must_use]
    pub fn new(subcommand: impl Into<String>) -> Self {
        Self {
            args: vec![subcommand.into()],
        }
    }

    /// Wraps an existing argument vector.
    #[must_use]
    pub const fn from_args(args: Vec<String>) -> Self {
        Self { args }
    }

    /// Appends a `name value` flag pair as two tokens.
    #[must_use]
    pub fn flag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.push(name.into());
        self.args.push(value.into());
        self
    }

    /// Appends every pair of an option mapping.
    #[must_use]
    pub fn options(mut self, options: &Options) -> Self {
        self.args.extend(options.to_args());
        self
    }

    /// Appends pre-tokenized arguments.
    #[must_use]
    pub fn extend<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// The argument tokens.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Consumes the builder, returning the argument tokens.
    #[must_use]
    pub fn into_args(self) -> Vec<String> {
        self.args
    }
}

impl std::fmt::Display for CommandLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.args.join(" "))
    }
}

/// Splits a raw command string on whitespace.
///
/// Used by the raw `execute` escape hatch. No quoting rules apply: a value
/// containing spaces must be passed through [`CommandLine`] instead.
#[must_use]
pub fn split_command(command: &str) -> Vec<String> {
    command.split_whitespace().map(str::to_string).collect()
}
