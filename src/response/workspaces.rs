//! Workspace listing extraction.
//!
//! `get-workspaces` prints a banner before the listing:
//!
//! ```text
//! [ powerbi ] =====================================
//! [ powerbi ] Gettting workspaces for Collection: acme
//! [ powerbi ] =====================================
//! [ powerbi ] 6d2f7a1e-...
//! [ powerbi ] 9b0c33aa-...
//! ```

use crate::response::patterns::Pattern;

/// How banner separators are handled when listing workspaces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WorkspaceListing {
    /// Drop banner blocks (separator, title, separator) and keep every entry.
    #[default]
    Corrected,
    /// Drop every separator line together with the line after it.
    ///
    /// This loses the first workspace after a closing separator, matching
    /// the output historically returned by the PHP wrapper.
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Banner {
    Outside,
    Opened,
    Titled,
}

/// Extracts workspace entries with the given separator handling.
pub fn parse_workspaces_with(text: &str, listing: WorkspaceListing) -> Vec<String> {
    match listing {
        WorkspaceListing::Corrected => corrected(text),
        WorkspaceListing::Legacy => legacy(text),
    }
}

fn legacy(text: &str) -> Vec<String> {
    let stripped = Pattern::SeparatorWithNextLine.regex().replace_all(text, "");
    Pattern::MarkerLine.captures_all(&stripped)
}

fn corrected(text: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut banner = Banner::Outside;

    for line in text.lines() {
        if Pattern::Separator.is_match(line) {
            banner = match banner {
                Banner::Outside => Banner::Opened,
                Banner::Opened | Banner::Titled => Banner::Outside,
            };
            continue;
        }
        let Some(entry) = Pattern::MarkerLine.capture_first(line) else {
            continue;
        };
        match banner {
            Banner::Opened => banner = Banner::Titled,
            // Banner without a closing separator: the title was the only header line.
            Banner::Titled => {
                banner = Banner::Outside;
                entries.push(entry);
            }
            Banner::Outside => entries.push(entry),
        }
    }

    entries
}
