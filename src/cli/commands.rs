//! CLI command implementations.
//!
//! Each subcommand maps onto one [`PowerBi`] operation; the result is wrapped
//! in a [`ParsedResponse`] and rendered in the selected output format.

use crate::cli::output::{OutputFormat, format_response};
use crate::cli::parser::{Cli, Commands};
use crate::client::PowerBi;
use crate::error::Result;
use crate::process::{Invoker, SystemInvoker};
use crate::response::{ParsedResponse, WorkspaceListing};

/// Executes the CLI command against the real executable.
///
/// # Errors
///
/// Returns an error if the options are invalid or the external tool fails.
pub fn execute(cli: &Cli) -> Result<String> {
    execute_with(cli, SystemInvoker::new(cli.invoker_config()))
}

/// Executes the CLI command with the given invoker.
///
/// # Errors
///
/// Returns an error if the options are invalid or the external tool fails.
pub fn execute_with<I: Invoker>(cli: &Cli, invoker: I) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);
    let listing = if cli.legacy_workspaces {
        WorkspaceListing::Legacy
    } else {
        WorkspaceListing::Corrected
    };
    let powerbi = PowerBi::new(cli.options()?, invoker)?.workspace_listing(listing);

    let response = run_command(&powerbi, &cli.command)?;
    Ok(format_response(&response, format))
}

fn run_command<I: Invoker>(powerbi: &PowerBi<I>, command: &Commands) -> Result<ParsedResponse> {
    tracing::debug!(?command, "dispatching command");
    let response = match command {
        Commands::Version => ParsedResponse::Raw(powerbi.version()?),
        Commands::Config => ParsedResponse::Raw(powerbi.config()?),
        Commands::Workspaces => ParsedResponse::Workspaces(powerbi.workspaces()?),
        Commands::CreateWorkspace => {
            ParsedResponse::CreatedWorkspaces(powerbi.create_workspace()?)
        }
        Commands::Datasets => ParsedResponse::Resources(powerbi.datasets()?),
        Commands::DeleteDataset { id } => ParsedResponse::Raw(powerbi.delete_dataset(id)?),
        Commands::Reports => ParsedResponse::Resources(powerbi.reports()?),
        Commands::Import {
            file,
            name,
            overwrite,
            params,
        } => ParsedResponse::Import(powerbi.import(&params.options()?, file, name, *overwrite)?),
        Commands::CreateToken { params } => {
            ParsedResponse::Token(powerbi.create_token(&params.options()?)?)
        }
        Commands::Exec { args } => ParsedResponse::Raw(powerbi.execute_args(args.iter().cloned())?),
    };
    Ok(response)
}
