//! Path selectors: which containers get an index entry.

use std::collections::HashSet;

use regex::Regex;

/// The set of container paths to index, as exact strings and/or compiled
/// patterns.
///
/// Paths are compared in their rendered dotted form (see
/// [`path_string`](crate::path_string)). Matching is always against the
/// entire path string: patterns are anchored at compile time, so the pattern
/// `geometry\.[^.]+` matches `geometry.coordinates` but neither `geometry`
/// nor `geometry.coordinates.0`.
///
/// A `Selectors` value holds its patterns precompiled and can be reused
/// across any number of indexing passes.
///
/// # Examples
///
/// ```
/// use jsonindex::Selectors;
///
/// let selectors = Selectors::new()
///     .exact("geometry.coordinates")
///     .pattern(r"properties\.[^.]+")?;
///
/// assert!(selectors.matches("geometry.coordinates"));
/// assert!(selectors.matches("properties.name"));
/// assert!(!selectors.matches("geometry"));
/// assert!(!selectors.matches("properties.name.0"));
/// # Ok::<(), regex::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Selectors {
    exact: HashSet<String>,
    patterns: Vec<Regex>,
}

impl Selectors {
    /// Creates an empty selector set, which matches nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an exact path to match. The empty string selects the document
    /// root.
    #[must_use]
    pub fn exact(mut self, path: impl Into<String>) -> Self {
        self.exact.insert(path.into());
        self
    }

    /// Compiles and adds a pattern. The pattern must match the entire path
    /// string; it is anchored as `^(?:pattern)$` before compilation.
    ///
    /// # Errors
    ///
    /// Returns the [`regex::Error`] if the pattern does not compile.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        let anchored = Regex::new(&format!("^(?:{pattern})$"))?;
        self.patterns.push(anchored);
        Ok(self)
    }

    /// Returns `true` if `path` is in the exact set or fully matches one of
    /// the compiled patterns.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        self.exact.contains(path) || self.patterns.iter().any(|re| re.is_match(path))
    }

    /// Returns `true` if no exact paths and no patterns were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.patterns.is_empty()
    }
}
