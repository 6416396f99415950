// Selection state - ordered multi-selection tracking
use crate::entry::FileEntry;
use std::collections::HashSet;
use std::path::PathBuf;

/// Entries picked in multi-select mode, oldest first.
#[derive(Clone, Debug, Default)]
pub struct SelectionSet {
    order: Vec<FileEntry>,
    members: HashSet<PathBuf>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `entry` unless it is already selected.
    pub fn add(&mut self, entry: FileEntry) -> bool {
        if self.members.insert(entry.path.clone()) {
            self.order.push(entry);
            true
        } else {
            false
        }
    }

    pub fn remove(&mut self, entry: &FileEntry) -> bool {
        if self.members.remove(&entry.path) {
            self.order.retain(|e| e.path != entry.path);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }

    pub fn contains(&self, entry: &FileEntry) -> bool {
        self.members.contains(&entry.path)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> {
        self.order.iter()
    }

    pub fn snapshot(&self) -> Vec<FileEntry> {
        self.order.clone()
    }

    /// Replaces the contents, keeping the given order. A repeated entry
    /// keeps its first position.
    pub fn restore(&mut self, entries: Vec<FileEntry>) {
        self.clear();
        for entry in entries {
            self.add(entry);
        }
    }
}
