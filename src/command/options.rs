//! Ordered option mappings and their flag-string rendering.

use serde::{Deserialize, Serialize};

/// Ordered mapping of option name to option value.
///
/// Insertion order is the rendering order. Duplicate names are kept as-is;
/// the external tool decides what a repeated flag means.
///
/// # Examples
///
/// ```
/// use powerbi_rs::command::Options;
///
/// let options = Options::from([("-c", "collection"), ("-k", "key")]);
/// assert_eq!(options.to_string(), "-c collection -k key");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    pairs: Vec<(String, String)>,
}

impl Options {
    /// Creates an empty mapping.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Appends a pair, returning the mapping for chaining.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Appends a pair.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Returns `true` if no pairs are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Number of pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Value of the first pair with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Renders the mapping as discrete argument tokens.
    ///
    /// Each name and each value is exactly one token. Values containing
    /// whitespace or shell metacharacters are never re-split or interpreted.
    #[must_use]
    pub fn to_args(&self) -> Vec<String> {
        self.pairs
            .iter()
            .flat_map(|(k, v)| [k.clone(), v.clone()])
            .collect()
    }
}

/// Renders `name value` pairs joined by a single space.
///
/// Values are inserted verbatim. An empty mapping yields an empty string.
impl std::fmt::Display for Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (name, value)) in self.pairs.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{name} {value}")?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Options {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Options {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for Options {
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

/// Formats an option mapping into the flag string the external CLI expects.
///
/// Each pair renders as `<name> <value>`, pairs are separated by a single
/// space, in insertion order.
///
/// # Examples
///
/// ```
/// use powerbi_rs::command::{Options, format_input};
///
/// assert_eq!(format_input(&Options::from([("a", "1"), ("b", "2")])), "a 1 b 2");
/// assert_eq!(format_input(&Options::new()), "");
/// ```
#[must_use]
pub fn format_input(options: &Options) -> String {
    options.to_string()
}
