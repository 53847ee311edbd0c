//! Ancestor lookup over a set of project roots.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use srcscope_core::matcher;

/// Set of canonical roots answering "is this path at or below any root?".
///
/// A lookup walks the candidate's ancestors and probes the set, so it
/// costs one hash probe per path component regardless of how many roots
/// there are.
#[derive(Debug, Clone, Default)]
pub struct ContainmentIndex {
    roots: HashSet<PathBuf>,
}

impl ContainmentIndex {
    /// Build from arbitrary paths; each one is canonicalized.
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self::from_canonical(
            roots
                .into_iter()
                .map(|root| matcher::canonicalize_lossy(root.as_ref())),
        )
    }

    /// Build from paths that are already canonical.
    pub fn from_canonical<I>(roots: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        Self {
            roots: roots.into_iter().collect(),
        }
    }

    /// Return `true` if `candidate`, once canonicalized, is a root or lies below one.
    pub fn contains(&self, candidate: &Path) -> bool {
        self.contains_canonical(&matcher::canonicalize_lossy(candidate))
    }

    /// Same as [`Self::contains`] for an already canonical candidate.
    pub fn contains_canonical(&self, candidate: &Path) -> bool {
        candidate
            .ancestors()
            .any(|ancestor| self.roots.contains(ancestor))
    }

    /// Number of distinct roots.
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}
