//! JSON project manifest: a small descriptor format for demos and tests.
//!
//! ```json
//! {
//!   "sources": ["src/main.cpp", "src/util.cpp"],
//!   "include_paths": ["include"],
//!   "defines": ["NDEBUG"]
//! }
//! ```
//!
//! Relative entries are resolved against the manifest's directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use srcscope_core::{matcher, Error, Result, SourceGroupSettings};
use tracing::debug;

use crate::project::{has_extension, IndexingJob, ProjectHandle, ProjectLoader};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct Manifest {
    sources: Vec<PathBuf>,
    include_paths: Vec<PathBuf>,
    defines: Vec<String>,
}

/// Loads [`ManifestProject`]s from JSON files.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestLoader;

impl ProjectLoader for ManifestLoader {
    type Handle = ManifestProject;

    fn load(&self, descriptor: &Path) -> Result<ManifestProject> {
        let content = std::fs::read_to_string(descriptor)
            .map_err(|e| Error::ProjectLoad(format!("{}: {e}", descriptor.display())))?;
        let manifest: Manifest = serde_json::from_str(&content)
            .map_err(|e| Error::ProjectLoad(format!("{}: {e}", descriptor.display())))?;

        let base_dir = descriptor.parent().unwrap_or_else(|| Path::new("/"));
        let resolve = |path: &PathBuf| {
            if path.is_absolute() {
                matcher::normalize_lexically(path)
            } else {
                matcher::normalize_lexically(&base_dir.join(path))
            }
        };

        let project = ManifestProject {
            sources: manifest.sources.iter().map(resolve).collect(),
            include_paths: manifest.include_paths.iter().map(resolve).collect(),
            defines: manifest.defines,
        };
        debug!(
            "Loaded manifest {} with {} sources",
            descriptor.display(),
            project.sources.len()
        );
        Ok(project)
    }
}

/// A loaded manifest.
#[derive(Debug, Clone)]
pub struct ManifestProject {
    sources: Vec<PathBuf>,
    include_paths: Vec<PathBuf>,
    defines: Vec<String>,
}

impl ProjectHandle for ManifestProject {
    type Job = CompileJob;

    fn declared_source_paths(&self, extensions: &[String]) -> Vec<PathBuf> {
        self.sources
            .iter()
            .filter(|source| has_extension(source, extensions))
            .cloned()
            .collect()
    }

    fn generate_indexing_jobs(&self, settings: &SourceGroupSettings) -> Vec<CompileJob> {
        self.declared_source_paths(&settings.source_extensions)
            .into_iter()
            .map(|source_path| CompileJob {
                source_path,
                include_paths: self.include_paths.clone(),
                defines: self.defines.clone(),
                language_standard: settings.indexer.language_standard.clone(),
                compiler_flags: settings.indexer.compiler_flags.clone(),
            })
            .collect()
    }
}

/// Compilation context for one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileJob {
    pub source_path: PathBuf,
    pub include_paths: Vec<PathBuf>,
    pub defines: Vec<String>,
    pub language_standard: String,
    pub compiler_flags: Vec<String>,
}

impl IndexingJob for CompileJob {
    fn source_path(&self) -> &Path {
        &self.source_path
    }
}
