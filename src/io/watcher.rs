use crate::error::Result;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};

/// Watches one directory (non-recursively) for changes to its listing.
pub struct DirectoryWatcher {
    path: PathBuf,
    events: Receiver<()>,
    _watcher: RecommendedWatcher,
}

impl DirectoryWatcher {
    pub fn watch<F>(path: &Path, wake: F) -> Result<Self>
    where
        F: Fn() + Send + 'static,
    {
        let (tx, rx) = channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            if let Ok(event) = res {
                if !event.kind.is_access() {
                    let _ = tx.send(());
                    wake();
                }
            }
        })?;
        watcher.watch(path, RecursiveMode::NonRecursive)?;

        Ok(Self {
            path: path.to_path_buf(),
            events: rx,
            _watcher: watcher,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drains pending notifications; true if anything changed.
    pub fn changed(&self) -> bool {
        let mut changed = false;
        while self.events.try_recv().is_ok() {
            changed = true;
        }
        changed
    }
}
