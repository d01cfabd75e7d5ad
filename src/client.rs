//! High-level Power BI operations.
//!
//! [`PowerBi`] holds the construction-time options and the command fragment
//! derived from them. Every operation is a fixed recipe: build the argument
//! vector, run it through the [`Invoker`], parse the output with the
//! operation's [`ResponseKind`].

use crate::command::{CommandLine, Options, format_input, split_command};
use crate::error::{Error, Result};
use crate::process::{Invoker, InvokerConfig, SystemInvoker};
use crate::response::{
    ImportResult, ParsedResponse, ResourceSummary, ResponseKind, WorkspaceListing,
    parse_response_with,
};

/// Wrapper around the external Power BI CLI.
///
/// # Examples
///
/// ```no_run
/// use powerbi_rs::{Options, PowerBi};
/// use powerbi_rs::process::InvokerConfig;
///
/// let options = Options::from([("-c", "acme"), ("-k", "secret"), ("-w", "ws-1")]);
/// let powerbi = PowerBi::with_config(options, InvokerConfig::default())?;
/// for report in powerbi.reports()? {
///     println!("{} {}", report.id, report.name);
/// }
/// # Ok::<(), powerbi_rs::Error>(())
/// ```
#[derive(Debug)]
pub struct PowerBi<I: Invoker = SystemInvoker> {
    invoker: I,
    options: Options,
    fragment: CommandLine,
    listing: WorkspaceListing,
}

impl PowerBi<SystemInvoker> {
    /// Creates a wrapper that spawns the real executable.
    ///
    /// # Errors
    ///
    /// See [`PowerBi::new`].
    pub fn with_config(options: impl Into<Options>, config: InvokerConfig) -> Result<Self> {
        Self::new(options, SystemInvoker::new(config))
    }
}

impl<I: Invoker> PowerBi<I> {
    /// Creates a wrapper and stores the options in the external tool's config.
    ///
    /// The option mapping is rendered once into the command fragment and
    /// pushed with `config <fragment>`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when `options` is empty, and
    /// [`Error::Process`] when the `config` call fails.
    pub fn new(options: impl Into<Options>, invoker: I) -> Result<Self> {
        let options = options.into();
        if options.is_empty() {
            return Err(Error::config(
                "nothing to set: the option mapping is empty",
            ));
        }

        let fragment = CommandLine::from_args(options.to_args());
        let powerbi = Self {
            invoker,
            options,
            fragment,
            listing: WorkspaceListing::default(),
        };

        let line = CommandLine::new("config").extend(powerbi.fragment.args().iter().cloned());
        powerbi.run(line)?;
        tracing::debug!(fragment = %powerbi.fragment, "configured external CLI");
        Ok(powerbi)
    }

    /// Sets how `workspaces()` treats banner separators.
    #[must_use]
    pub fn workspace_listing(mut self, listing: WorkspaceListing) -> Self {
        self.listing = listing;
        self
    }

    /// The command fragment derived from the construction-time options.
    #[must_use]
    pub fn fragment(&self) -> String {
        self.fragment.to_string()
    }

    /// The construction-time options.
    #[must_use]
    pub const fn options(&self) -> &Options {
        &self.options
    }

    /// The underlying invoker.
    #[must_use]
    pub const fn invoker(&self) -> &I {
        &self.invoker
    }

    /// Returns the external tool's version string.
    pub fn version(&self) -> Result<String> {
        let output = self.run(CommandLine::new("-V"))?;
        Ok(self.parse(&output, ResponseKind::None).into_text())
    }

    /// Returns every configured value, as printed by the tool.
    pub fn config(&self) -> Result<String> {
        self.run(CommandLine::new("config"))
    }

    /// Lists the workspaces of the configured workspace collection.
    pub fn workspaces(&self) -> Result<Vec<String>> {
        let output = self.run(CommandLine::new("get-workspaces"))?;
        Ok(self.parse(&output, ResponseKind::Workspaces).into_entries())
    }

    /// Creates a workspace in the configured workspace collection.
    pub fn create_workspace(&self) -> Result<Vec<String>> {
        let output = self.run(CommandLine::new("create-workspace"))?;
        Ok(self.parse(&output, ResponseKind::CreateWorkspace).into_entries())
    }

    /// Lists the datasets of the configured workspace.
    pub fn datasets(&self) -> Result<Vec<ResourceSummary>> {
        let output = self.run(self.with_fragment("get-datasets"))?;
        Ok(self.parse(&output, ResponseKind::ReportsOrDatasets).into_resources())
    }

    /// Deletes a dataset and any reports linked to it.
    pub fn delete_dataset(&self, dataset_id: &str) -> Result<String> {
        self.run(self.with_fragment("delete-dataset").flag("-d", dataset_id))
    }

    /// Lists the reports of the configured workspace.
    pub fn reports(&self) -> Result<Vec<ResourceSummary>> {
        let output = self.run(self.with_fragment("get-reports"))?;
        Ok(self.parse(&output, ResponseKind::ReportsOrDatasets).into_resources())
    }

    /// Imports a PBIX file under `name`.
    ///
    /// `params` carries the collection/workspace flags for this call; with
    /// `overwrite` an existing dataset of the same name is replaced.
    pub fn import(
        &self,
        params: &Options,
        filepath: &str,
        name: &str,
        overwrite: bool,
    ) -> Result<Vec<ImportResult>> {
        let mut line = CommandLine::new("import")
            .flag("-f", filepath)
            .flag("-n", name)
            .options(params);
        if overwrite {
            line = line.flag("-o", "true");
        }
        let output = self.run(line)?;
        Ok(self.parse(&output, ResponseKind::Import).into_imports())
    }

    /// Creates an embed token for the report described by `params`.
    pub fn create_token(&self, params: &Options) -> Result<String> {
        let output = self.run(CommandLine::new("create-embed-token").options(params))?;
        Ok(self.parse(&output, ResponseKind::CreateToken).into_text())
    }

    /// Runs a raw command string, split on whitespace. Output is untrimmed.
    pub fn execute(&self, command: &str) -> Result<String> {
        self.run(CommandLine::from_args(split_command(command)))
    }

    /// Runs an explicit argument vector. Output is untrimmed.
    pub fn execute_args<S: Into<String>>(
        &self,
        args: impl IntoIterator<Item = S>,
    ) -> Result<String> {
        self.run(CommandLine::from_args(
            args.into_iter().map(Into::into).collect(),
        ))
    }

    /// Formats an option mapping into the external CLI's flag string.
    #[must_use]
    pub fn format_input(&self, input: &Options) -> String {
        format_input(input)
    }

    fn with_fragment(&self, subcommand: &str) -> CommandLine {
        CommandLine::new(subcommand).extend(self.fragment.args().iter().cloned())
    }

    fn parse(&self, output: &str, kind: ResponseKind) -> ParsedResponse {
        parse_response_with(output, kind, self.listing)
    }

    fn run(&self, line: CommandLine) -> Result<String> {
        tracing::debug!(command = %line, "running operation");
        self.invoker.invoke(line.args())
    }
}
