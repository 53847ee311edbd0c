//! srcscope-project: Decides which files belong to a project and which
//! indexing jobs to run for them.

pub mod containment;
pub mod manifest;
pub mod project;
pub mod report;
pub mod source_group;

pub use containment::ContainmentIndex;
pub use manifest::{CompileJob, ManifestLoader, ManifestProject};
pub use project::{IndexingJob, ProjectHandle, ProjectLoader};
pub use report::{RecordingReporter, ScopeEvent, StatusReporter, TracingReporter};
pub use source_group::SourceGroup;
