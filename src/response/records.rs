//! Structured records extracted from CLI output.

use serde::{Deserialize, Serialize};

/// A report or dataset listed by the external tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSummary {
    /// Resource identifier.
    pub id: String,
    /// Display name.
    pub name: String,
}

impl ResourceSummary {
    /// Creates a summary.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Identifier of a completed PBIX import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    /// Import identifier.
    pub id: String,
}

impl ImportResult {
    /// Creates an import result.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Result of parsing one CLI response.
///
/// Serializes untagged, so JSON consumers see the bare payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParsedResponse {
    /// Trimmed full text.
    Raw(String),
    /// Report or dataset summaries.
    Resources(Vec<ResourceSummary>),
    /// Zero or one import result.
    Import(Vec<ImportResult>),
    /// Raw `Workspace created:` captures.
    CreatedWorkspaces(Vec<String>),
    /// Workspace listing entries.
    Workspaces(Vec<String>),
    /// Embed token, empty when absent.
    Token(String),
}

impl ParsedResponse {
    /// Returns `true` when no structured data was extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Raw(s) | Self::Token(s) => s.is_empty(),
            Self::Resources(v) => v.is_empty(),
            Self::Import(v) => v.is_empty(),
            Self::CreatedWorkspaces(v) | Self::Workspaces(v) => v.is_empty(),
        }
    }

    /// The text payload of `Raw` and `Token`; empty for every other shape.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Raw(s) | Self::Token(s) => s,
            _ => String::new(),
        }
    }

    /// The summaries of a `Resources` response; empty otherwise.
    #[must_use]
    pub fn into_resources(self) -> Vec<ResourceSummary> {
        match self {
            Self::Resources(v) => v,
            _ => Vec::new(),
        }
    }

    /// The results of an `Import` response; empty otherwise.
    #[must_use]
    pub fn into_imports(self) -> Vec<ImportResult> {
        match self {
            Self::Import(v) => v,
            _ => Vec::new(),
        }
    }

    /// The entries of a workspace listing or creation response; empty otherwise.
    #[must_use]
    pub fn into_entries(self) -> Vec<String> {
        match self {
            Self::CreatedWorkspaces(v) | Self::Workspaces(v) => v,
            _ => Vec::new(),
        }
    }
}
