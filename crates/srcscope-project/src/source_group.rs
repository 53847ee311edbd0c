//! Project membership: which files are in scope, and which jobs to run.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use srcscope_core::{matcher, Error, ExcludeFilters, Result, SourceGroupSettings};
use tracing::{debug, info, warn};

use crate::containment::ContainmentIndex;
use crate::project::{IndexingJob, ProjectHandle, ProjectLoader};
use crate::report::{ScopeEvent, StatusReporter, TracingReporter};

/// A project descriptor together with the settings that decide which of
/// its files are indexed.
///
/// Nothing is cached between calls: every query reloads the descriptor
/// and re-checks the filesystem.
pub struct SourceGroup<L> {
    settings: SourceGroupSettings,
    excludes: ExcludeFilters,
    loader: L,
    reporter: Box<dyn StatusReporter + Send + Sync>,
}

impl<L: ProjectLoader> SourceGroup<L> {
    /// Create a source group. Fails if an exclude pattern is malformed.
    pub fn new(settings: SourceGroupSettings, loader: L) -> Result<Self> {
        let excludes = settings.exclude_filter_set()?;
        Ok(Self {
            settings,
            excludes,
            loader,
            reporter: Box::new(TracingReporter),
        })
    }

    /// Replace the default log-line reporter.
    pub fn with_reporter<R>(mut self, reporter: R) -> Self
    where
        R: StatusReporter + Send + Sync + 'static,
    {
        self.reporter = Box::new(reporter);
        self
    }

    /// Settings this group was built from.
    pub fn settings(&self) -> &SourceGroupSettings {
        &self.settings
    }

    /// Check that the configured descriptor, if any, exists.
    pub fn check_descriptor(&self) -> Result<()> {
        let path = &self.settings.project_path;
        if self.settings.has_project_path() && !path.exists() {
            return Err(Error::ProjectDescriptorMissing(path.clone()));
        }
        Ok(())
    }

    /// Readiness gate run before indexing.
    ///
    /// Returns `true` when no descriptor is configured or it exists.
    /// Otherwise reports [`ScopeEvent::ProjectDescriptorMissing`] and
    /// returns `false`. Descriptor contents are not validated here.
    pub fn prepare(&self) -> bool {
        match self.check_descriptor() {
            Ok(()) => true,
            Err(e) => {
                debug!("Source group not ready: {e}");
                self.reporter.report(&ScopeEvent::ProjectDescriptorMissing {
                    path: self.settings.project_path.clone(),
                });
                false
            }
        }
    }

    /// Compute the scope: declared sources that are not excluded and
    /// exist as files, in canonical form.
    pub fn all_source_paths(&self) -> BTreeSet<PathBuf> {
        let mut scope = BTreeSet::new();
        let Some(project) = self.load_project() else {
            return scope;
        };

        for declared in project.declared_source_paths(&self.settings.source_extensions) {
            let canonical = matcher::canonicalize_lossy(&declared);
            if self.is_excluded(&declared, &canonical) {
                debug!("Excluded: {}", declared.display());
            } else if canonical.is_file() {
                scope.insert(canonical);
            } else {
                debug!("Declared source missing on disk: {}", declared.display());
            }
        }

        info!("Project scope resolved: {} source files", scope.len());
        scope
    }

    /// Keep the candidates that lie inside the project and are not excluded.
    ///
    /// "Inside" means equal to or below a scope file or a header search
    /// root. Header roots widen containment only: they are neither
    /// existence-checked nor part of [`Self::all_source_paths`].
    /// Candidates are returned as given.
    pub fn filter_to_contained_paths(&self, candidates: &BTreeSet<PathBuf>) -> BTreeSet<PathBuf> {
        let header_roots = self
            .settings
            .indexed_header_paths
            .iter()
            .map(|root| matcher::canonicalize_lossy(root));
        let index =
            ContainmentIndex::from_canonical(self.all_source_paths().into_iter().chain(header_roots));

        let contained: BTreeSet<PathBuf> = candidates
            .iter()
            .filter(|candidate| {
                let canonical = matcher::canonicalize_lossy(candidate);
                index.contains_canonical(&canonical) && !self.is_excluded(candidate, &canonical)
            })
            .cloned()
            .collect();

        debug!(
            "{} of {} candidate paths are inside the project",
            contained.len(),
            candidates.len()
        );
        contained
    }

    /// Jobs whose source file is in `files_to_index`, in generation order.
    ///
    /// A missing or unreadable descriptor yields no jobs; the missing case
    /// has already been reported by [`Self::prepare`].
    pub fn indexer_jobs(
        &self,
        files_to_index: &BTreeSet<PathBuf>,
    ) -> Vec<<L::Handle as ProjectHandle>::Job> {
        let Some(project) = self.load_project() else {
            return Vec::new();
        };

        let jobs: Vec<_> = project
            .generate_indexing_jobs(&self.settings)
            .into_iter()
            .filter(|job| is_member(files_to_index, job.source_path()))
            .collect();

        info!("Selected {} indexing jobs", jobs.len());
        jobs
    }

    fn load_project(&self) -> Option<L::Handle> {
        if !self.settings.has_project_path() {
            debug!("No project descriptor configured");
            return None;
        }
        if let Err(e) = self.check_descriptor() {
            warn!("{e}");
            return None;
        }

        match self.loader.load(&self.settings.project_path) {
            Ok(project) => Some(project),
            Err(e) => {
                warn!(
                    "Failed to load project {}: {e}",
                    self.settings.project_path.display()
                );
                None
            }
        }
    }

    fn is_excluded(&self, original: &Path, canonical: &Path) -> bool {
        self.excludes.is_excluded(original) || self.excludes.is_excluded(canonical)
    }
}

fn is_member(files: &BTreeSet<PathBuf>, path: &Path) -> bool {
    files.contains(path) || files.contains(&matcher::canonicalize_lossy(path))
}
