//! Exclude filters: glob patterns that veto paths from a project's scope.

use std::path::Path;

use globset::{Glob, GlobMatcher};

use crate::matcher;
use crate::{Error, Result};

/// A single compiled exclude pattern.
///
/// Patterns are globs matched against the whole (canonical) path:
/// - `*` matches any run of characters, separators included, so
///   `*/b.cpp` matches `/proj/b.cpp`
/// - `**` matches any number of directories
/// - `?`, `[abc]` and `{a,b}` behave as usual
/// - a trailing `/` stands for everything below that directory
#[derive(Debug, Clone)]
pub struct PathFilter {
    pattern: String,
    matcher: GlobMatcher,
}

impl PathFilter {
    /// Compile a pattern. Malformed patterns are rejected here, never at match time.
    pub fn new(pattern: &str) -> Result<Self> {
        let trimmed = pattern.trim();
        if trimmed.is_empty() {
            return Err(Error::Pattern("empty pattern".to_string()));
        }

        let source = if trimmed.ends_with('/') {
            format!("{trimmed}**")
        } else {
            trimmed.to_string()
        };

        let glob = Glob::new(&source).map_err(|e| Error::Pattern(format!("{pattern}: {e}")))?;
        Ok(Self {
            pattern: pattern.to_string(),
            matcher: glob.compile_matcher(),
        })
    }

    /// The pattern as it was configured.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Return `true` if the pattern matches the whole of `path`.
    pub fn is_match(&self, path: &Path) -> bool {
        self.matcher.is_match(path)
    }
}

/// Ordered set of exclude filters. Any single match vetoes a path.
#[derive(Debug, Clone, Default)]
pub struct ExcludeFilters {
    filters: Vec<PathFilter>,
}

impl ExcludeFilters {
    /// Compile all patterns, failing on the first malformed one.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let filters = patterns
            .iter()
            .map(|p| PathFilter::new(p.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { filters })
    }

    /// Return `true` if any filter matches `path`.
    pub fn is_excluded(&self, path: &Path) -> bool {
        matcher::matches_any(&self.filters, path)
    }

    /// Number of compiled filters.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether no filters are configured.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
