//! srcscope-watcher: Collects paths touched on disk since the last poll.

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use srcscope_core::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use tracing::{debug, info, warn};

/// File system watcher over a set of directories.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<Event>>,
}

impl FileWatcher {
    /// Watch every path in `roots` recursively.
    pub fn new<P: AsRef<Path>>(roots: &[P]) -> Result<Self> {
        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(tx, Config::default())
            .map_err(|e| srcscope_core::Error::Watcher(e.to_string()))?;

        for root in roots {
            info!("Watching path: {}", root.as_ref().display());
            watcher
                .watch(root.as_ref(), RecursiveMode::Recursive)
                .map_err(|e| srcscope_core::Error::Watcher(e.to_string()))?;
        }

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
        })
    }

    /// Drain pending events into the set of touched paths (non-blocking).
    pub fn poll_changed_paths(&self) -> BTreeSet<PathBuf> {
        let mut changed = BTreeSet::new();

        while let Ok(result) = self.receiver.try_recv() {
            match result {
                Ok(event) => {
                    debug!("File event: {:?}", event);
                    changed.extend(changed_paths(event));
                }
                Err(e) => warn!("Watch error: {e}"),
            }
        }

        changed
    }
}

/// Paths an event touched. Renames report both ends.
fn changed_paths(event: Event) -> Vec<PathBuf> {
    if matches!(event.kind, EventKind::Access(_) | EventKind::Other) {
        Vec::new()
    } else {
        event.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind, RemoveKind, RenameMode};

    fn event(kind: EventKind, paths: &[&str]) -> Event {
        paths
            .iter()
            .fold(Event::new(kind), |event, path| event.add_path(PathBuf::from(path)))
    }

    #[test]
    fn test_create_and_modify_report_path() {
        assert_eq!(
            changed_paths(event(EventKind::Create(CreateKind::File), &["/proj/a.cpp"])),
            vec![PathBuf::from("/proj/a.cpp")]
        );
        assert_eq!(
            changed_paths(event(EventKind::Modify(ModifyKind::Any), &["/proj/b.cpp"])),
            vec![PathBuf::from("/proj/b.cpp")]
        );
    }

    #[test]
    fn test_remove_reports_path() {
        let removed = event(EventKind::Remove(RemoveKind::File), &["/proj/gone.cpp"]);
        assert_eq!(changed_paths(removed), vec![PathBuf::from("/proj/gone.cpp")]);
    }

    #[test]
    fn test_rename_reports_both_ends() {
        let rename = event(
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)),
            &["/proj/old.cpp", "/proj/new.cpp"],
        );
        assert_eq!(
            changed_paths(rename),
            vec![PathBuf::from("/proj/old.cpp"), PathBuf::from("/proj/new.cpp")]
        );
    }

    #[test]
    fn test_access_events_ignored() {
        let access = event(EventKind::Access(AccessKind::Any), &["/proj/a.cpp"]);
        assert!(changed_paths(access).is_empty());
    }
}
