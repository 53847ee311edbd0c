//! Source group configuration.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::filter::ExcludeFilters;
use crate::matcher;

/// Settings for one source group: where the project descriptor lives and
/// which of its files count as part of the project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceGroupSettings {
    /// Location of the project descriptor. Empty means none is configured.
    pub project_path: PathBuf,

    /// Extensions of source files taken from the descriptor.
    pub source_extensions: Vec<String>,

    /// Glob patterns that veto paths from the scope.
    pub exclude_filters: Vec<String>,

    /// Header search roots. Files below them count as inside the project
    /// without being declared as sources.
    pub indexed_header_paths: Vec<PathBuf>,

    /// Compilation context handed to job generation.
    pub indexer: IndexerSettings,
}

/// Compilation settings forwarded untouched to the downstream indexer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerSettings {
    pub language_standard: String,
    pub compiler_flags: Vec<String>,
}

impl Default for IndexerSettings {
    fn default() -> Self {
        Self {
            language_standard: "c++17".to_string(),
            compiler_flags: Vec::new(),
        }
    }
}

impl Default for SourceGroupSettings {
    fn default() -> Self {
        Self {
            project_path: PathBuf::new(),
            source_extensions: [".c", ".cc", ".cpp", ".cxx", ".c++"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
            exclude_filters: Vec::new(),
            indexed_header_paths: Vec::new(),
            indexer: IndexerSettings::default(),
        }
    }
}

impl SourceGroupSettings {
    /// Load settings from a TOML file.
    ///
    /// Paths and patterns come back expanded (`~`, `$VAR`) and absolute;
    /// relative entries are resolved against the config file's directory.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut settings: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;

        let base_dir = matcher::canonicalize_lossy(path)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("/"));
        settings.expand_and_absolutize(&base_dir)?;
        debug!("Loaded source group settings from {}", path.display());

        Ok(settings)
    }

    /// Save settings to a TOML file.
    pub fn save(&self, path: &Path) -> crate::Result<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Whether a project descriptor is configured at all.
    pub fn has_project_path(&self) -> bool {
        !self.project_path.as_os_str().is_empty()
    }

    /// Compile the configured exclude patterns.
    pub fn exclude_filter_set(&self) -> crate::Result<ExcludeFilters> {
        ExcludeFilters::new(&self.exclude_filters)
    }

    /// Expand and absolutize every path-like field against `base_dir`.
    pub fn expand_and_absolutize(&mut self, base_dir: &Path) -> crate::Result<()> {
        if self.has_project_path() {
            self.project_path = expand_path(&self.project_path, base_dir)?;
        }

        self.indexed_header_paths = self
            .indexed_header_paths
            .iter()
            .map(|p| expand_path(p, base_dir))
            .collect::<crate::Result<_>>()?;

        self.exclude_filters = self
            .exclude_filters
            .iter()
            .map(|pattern| expand_pattern(pattern, base_dir))
            .collect::<crate::Result<_>>()?;

        Ok(())
    }
}

fn expand(value: &str) -> crate::Result<Cow<'_, str>> {
    shellexpand::full(value).map_err(|e| crate::Error::Config(e.to_string()))
}

fn expand_path(path: &Path, base_dir: &Path) -> crate::Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = PathBuf::from(expand(&raw)?.as_ref());
    if expanded.is_absolute() {
        Ok(expanded)
    } else {
        Ok(matcher::normalize_lexically(&base_dir.join(expanded)))
    }
}

/// Patterns starting with a wildcard apply anywhere and stay relative.
fn expand_pattern(pattern: &str, base_dir: &Path) -> crate::Result<String> {
    let expanded = expand(pattern)?;
    let starts_with_wildcard = expanded.starts_with(|c: char| matches!(c, '*' | '?' | '[' | '{'));
    if starts_with_wildcard || Path::new(expanded.as_ref()).is_absolute() {
        Ok(expanded.into_owned())
    } else {
        Ok(base_dir.join(expanded.as_ref()).to_string_lossy().into_owned())
    }
}
