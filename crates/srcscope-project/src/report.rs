//! Operator-facing status events.
//!
//! The resolver never renders anything itself. It hands a [`ScopeEvent`]
//! to whatever [`StatusReporter`] the caller injected, which may log it,
//! show a dialog, or just keep it.

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::warn;

/// Something an operator should hear about while resolving a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeEvent {
    /// A descriptor location is configured but nothing exists there.
    ProjectDescriptorMissing { path: PathBuf },
}

impl ScopeEvent {
    /// Short status line.
    pub fn status(&self) -> &'static str {
        match self {
            ScopeEvent::ProjectDescriptorMissing { .. } => "Can't refresh project",
        }
    }

    /// Detailed text for an acknowledgement prompt.
    pub fn message(&self) -> String {
        match self {
            ScopeEvent::ProjectDescriptorMissing { path } => format!(
                "Can't refresh. The referenced project does not exist anymore: {}",
                path.display()
            ),
        }
    }

    /// Choices offered when the event is shown interactively.
    pub fn acknowledgements(&self) -> &'static [&'static str] {
        &["Ok"]
    }
}

impl fmt::Display for ScopeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Receives status events.
pub trait StatusReporter {
    fn report(&self, event: &ScopeEvent);
}

impl<R: StatusReporter + ?Sized> StatusReporter for Arc<R> {
    fn report(&self, event: &ScopeEvent) {
        (**self).report(event);
    }
}

/// Reports events as log lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl StatusReporter for TracingReporter {
    fn report(&self, event: &ScopeEvent) {
        warn!("{}: {}", event.status(), event.message());
    }
}

/// Keeps every reported event for later inspection.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<ScopeEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ScopeEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl StatusReporter for RecordingReporter {
    fn report(&self, event: &ScopeEvent) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event.clone());
    }
}
