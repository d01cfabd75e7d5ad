//! Compiled output patterns.
//!
//! Every regular expression the parser applies lives here, compiled once on
//! first use.

use regex::Regex;
use std::sync::OnceLock;

/// A line-level pattern in the external tool's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// `[ powerbi ] ID: <id> |`
    ResourceId,
    /// `Name: <name>`
    ResourceName,
    /// `[ powerbi ] Import ID: <id>`
    ImportId,
    /// `[ powerbi ] Workspace created:<raw>`
    WorkspaceCreated,
    /// `[ powerbi ] Embed Token: <token>`
    EmbedToken,
    /// `[ powerbi ] <remainder>`
    MarkerLine,
    /// `[ powerbi ] =====`
    Separator,
    /// A separator line plus the line after it, as one match.
    SeparatorWithNextLine,
}

impl Pattern {
    /// Returns the compiled regex for this pattern.
    #[allow(clippy::expect_used)]
    pub fn regex(self) -> &'static Regex {
        macro_rules! static_regex {
            ($name:ident, $pattern:expr) => {{
                static $name: OnceLock<Regex> = OnceLock::new();
                $name.get_or_init(|| Regex::new($pattern).expect("valid regex"))
            }};
        }

        match self {
            Self::ResourceId => static_regex!(RESOURCE_ID, r"\[ powerbi \] ID: (.*) \|"),
            Self::ResourceName => static_regex!(RESOURCE_NAME, r"Name: (.*)"),
            Self::ImportId => static_regex!(IMPORT_ID, r"\[ powerbi \] Import ID: (.*)"),
            Self::WorkspaceCreated => {
                static_regex!(WORKSPACE_CREATED, r"\[ powerbi \] Workspace created:(.*)")
            }
            Self::EmbedToken => static_regex!(EMBED_TOKEN, r"\[ powerbi \] Embed Token: (.*)"),
            Self::MarkerLine => static_regex!(MARKER_LINE, r"\[ powerbi \] (.*)"),
            Self::Separator => static_regex!(SEPARATOR, r"^\s*\[ powerbi \] =+\s*$"),
            Self::SeparatorWithNextLine => {
                static_regex!(SEPARATOR_WITH_NEXT, r"\[ powerbi \] =+\n.*")
            }
        }
    }

    /// First capture group of every match, in order of appearance.
    pub fn captures_all(self, text: &str) -> Vec<String> {
        self.regex()
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| clean(m.as_str()))
            .collect()
    }

    /// First capture group of the first match.
    pub fn capture_first(self, text: &str) -> Option<String> {
        self.regex()
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| clean(m.as_str()))
    }

    /// Whether the pattern matches anywhere in `text`.
    pub fn is_match(self, text: &str) -> bool {
        self.regex().is_match(text)
    }
}

/// Strips the carriage return left behind by CRLF output.
fn clean(capture: &str) -> String {
    capture.strip_suffix('\r').unwrap_or(capture).to_string()
}
