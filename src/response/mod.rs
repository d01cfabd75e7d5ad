//! Response parsing for the external Power BI CLI.
//!
//! The external tool prints human-readable text, every informational line
//! prefixed with the [`MARKER`] token. This module scrapes that text into
//! records, one pure function per [`ResponseKind`]. Parsing never fails:
//! output that does not match degrades to an empty or default result, since
//! the tool's wording evolves independently of this crate.

pub mod patterns;
pub mod records;
pub mod workspaces;

pub use records::{ImportResult, ParsedResponse, ResourceSummary};
pub use workspaces::{WorkspaceListing, parse_workspaces_with};

use patterns::Pattern;

/// Prefix of every informational line printed by the external tool.
pub const MARKER: &str = "[ powerbi ]";

/// Which extraction algorithm applies to a response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseKind {
    /// No structure: the trimmed text.
    #[default]
    None,
    /// `get-reports` / `get-datasets` listings.
    ReportsOrDatasets,
    /// `import` result.
    Import,
    /// `create-workspace` result.
    CreateWorkspace,
    /// `get-workspaces` listing.
    Workspaces,
    /// `create-embed-token` result.
    CreateToken,
}

impl ResponseKind {
    /// Maps an operation name to its response kind.
    ///
    /// Unknown names map to [`ResponseKind::None`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "reports" | "datasets" => Self::ReportsOrDatasets,
            "import" => Self::Import,
            "createWorkspace" => Self::CreateWorkspace,
            "workspaces" => Self::Workspaces,
            "createToken" => Self::CreateToken,
            _ => Self::None,
        }
    }
}

/// Parses raw CLI output according to `kind`.
///
/// # Examples
///
/// ```
/// use powerbi_rs::response::{ParsedResponse, ResponseKind, parse_response};
///
/// let parsed = parse_response("[ powerbi ] Embed Token: XYZ \n", ResponseKind::CreateToken);
/// assert_eq!(parsed, ParsedResponse::Token("XYZ".to_string()));
/// ```
#[must_use]
pub fn parse_response(text: &str, kind: ResponseKind) -> ParsedResponse {
    parse_response_with(text, kind, WorkspaceListing::default())
}

/// Parses raw CLI output, choosing how workspace banners are handled.
#[must_use]
pub fn parse_response_with(
    text: &str,
    kind: ResponseKind,
    listing: WorkspaceListing,
) -> ParsedResponse {
    let parsed = match kind {
        ResponseKind::None => ParsedResponse::Raw(parse_raw(text)),
        ResponseKind::ReportsOrDatasets => ParsedResponse::Resources(parse_resources(text)),
        ResponseKind::Import => ParsedResponse::Import(parse_import(text)),
        ResponseKind::CreateWorkspace => {
            ParsedResponse::CreatedWorkspaces(parse_created_workspaces(text))
        }
        ResponseKind::Workspaces => ParsedResponse::Workspaces(parse_workspaces_with(text, listing)),
        ResponseKind::CreateToken => ParsedResponse::Token(parse_token(text)),
    };
    if kind != ResponseKind::None && parsed.is_empty() {
        tracing::debug!(?kind, bytes = text.len(), "no structured data in CLI output");
    }
    parsed
}

/// Trims leading and trailing whitespace.
#[must_use]
pub fn parse_raw(text: &str) -> String {
    text.trim().to_string()
}

/// Extracts report or dataset summaries.
///
/// Ids and names are collected separately and paired by position. An id or
/// name without a partner at the same position is dropped.
#[must_use]
pub fn parse_resources(text: &str) -> Vec<ResourceSummary> {
    let ids = Pattern::ResourceId.captures_all(text);
    let names = Pattern::ResourceName.captures_all(text);
    ids.into_iter()
        .zip(names)
        .map(|(id, name)| ResourceSummary { id, name })
        .collect()
}

/// Extracts the first import id, as a zero- or one-element list.
#[must_use]
pub fn parse_import(text: &str) -> Vec<ImportResult> {
    Pattern::ImportId
        .capture_first(text)
        .map(|id| ImportResult { id })
        .into_iter()
        .collect()
}

/// Extracts every `Workspace created:` capture, untrimmed.
#[must_use]
pub fn parse_created_workspaces(text: &str) -> Vec<String> {
    Pattern::WorkspaceCreated.captures_all(text)
}

/// Extracts workspace entries, keeping the first entry after a banner.
#[must_use]
pub fn parse_workspaces(text: &str) -> Vec<String> {
    parse_workspaces_with(text, WorkspaceListing::Corrected)
}

/// Extracts the first embed token, trimmed. Empty when absent.
#[must_use]
pub fn parse_token(text: &str) -> String {
    Pattern::EmbedToken
        .capture_first(text)
        .map(|token| token.trim().to_string())
        .unwrap_or_default()
}
