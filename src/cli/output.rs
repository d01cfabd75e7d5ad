//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::error::Error;
use crate::response::{ImportResult, ParsedResponse, ResourceSummary};
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Formats a parsed response.
#[must_use]
pub fn format_response(response: &ParsedResponse, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_response_text(response),
        OutputFormat::Json => format_json(response),
    }
}

fn format_response_text(response: &ParsedResponse) -> String {
    match response {
        ParsedResponse::Raw(text) | ParsedResponse::Token(text) => with_newline(text),
        ParsedResponse::Resources(resources) => format_resources_text(resources),
        ParsedResponse::Import(imports) => format_imports_text(imports),
        ParsedResponse::CreatedWorkspaces(items) => format_lines("No workspace created.", items),
        ParsedResponse::Workspaces(items) => format_lines("No workspaces found.", items),
    }
}

fn format_resources_text(resources: &[ResourceSummary]) -> String {
    if resources.is_empty() {
        return "No resources found.\n".to_string();
    }

    let width = resources
        .iter()
        .map(|r| r.id.len())
        .max()
        .unwrap_or(0)
        .max("ID".len());

    let mut output = String::new();
    let _ = writeln!(output, "{:<width$}  Name", "ID");
    output.push_str(&"-".repeat(width + 20));
    output.push('\n');
    for resource in resources {
        let _ = writeln!(output, "{:<width$}  {}", resource.id, resource.name);
    }
    output
}

fn format_imports_text(imports: &[ImportResult]) -> String {
    imports.first().map_or_else(
        || "No import ID reported.\n".to_string(),
        |import| format!("Import ID: {}\n", import.id),
    )
}

fn format_lines(empty: &str, items: &[String]) -> String {
    if items.is_empty() {
        return format!("{empty}\n");
    }
    let mut output = String::new();
    for item in items {
        let _ = writeln!(output, "{}", item.trim());
    }
    output
}

fn with_newline(text: &str) -> String {
    if text.is_empty() || text.ends_with('\n') {
        text.to_string()
    } else {
        format!("{text}\n")
    }
}

/// Formats an error for the selected output format.
#[must_use]
pub fn format_error(error: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => error.to_string(),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct ErrorOutput<'a> {
                error: String,
                #[serde(rename = "type")]
                kind: &'a str,
                #[serde(skip_serializing_if = "Option::is_none")]
                exit_code: Option<i32>,
            }
            let exit_code = match error {
                Error::Process(process) => process.exit_code(),
                _ => None,
            };
            format_json(&ErrorOutput {
                error: error.to_string(),
                kind: error.kind(),
                exit_code,
            })
        }
    }
}

/// Formats a value as JSON.
fn format_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}
