//! Interfaces to the project descriptor parser.
//!
//! srcscope never reads descriptor syntax itself. A [`ProjectLoader`]
//! turns a descriptor location into a [`ProjectHandle`], which lists the
//! declared sources and produces one [`IndexingJob`] per source file.

use std::path::{Path, PathBuf};

use srcscope_core::{Result, SourceGroupSettings};

/// A unit of indexing work for exactly one source file.
///
/// Everything except the source path is opaque to srcscope.
pub trait IndexingJob {
    /// The source file this job indexes; used as the join key.
    fn source_path(&self) -> &Path;
}

/// Read-only snapshot of a loaded project descriptor.
pub trait ProjectHandle {
    type Job: IndexingJob;

    /// Declared source files whose extension is in `extensions`.
    fn declared_source_paths(&self, extensions: &[String]) -> Vec<PathBuf>;

    /// Jobs for every declared source, in the descriptor's own order.
    fn generate_indexing_jobs(&self, settings: &SourceGroupSettings) -> Vec<Self::Job>;
}

/// Parses a project descriptor.
///
/// Called once per request; implementations should not cache, so each
/// result reflects the descriptor as it is on disk right now.
pub trait ProjectLoader {
    type Handle: ProjectHandle;

    fn load(&self, descriptor: &Path) -> Result<Self::Handle>;
}

/// Return `true` if `path` has one of `extensions`.
///
/// Extensions match case-insensitively and may be written with or
/// without the leading dot.
pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().map(|e| e.to_string_lossy()) else {
        return false;
    };

    extensions
        .iter()
        .map(|wanted| wanted.trim_start_matches('.'))
        .any(|wanted| wanted.eq_ignore_ascii_case(&ext))
}
