// Entry state - the listing currently shown and the load that fills it
use crate::entry::FileEntry;
use std::path::{Path, PathBuf};

/// Identifies one directory load. Only the most recently issued ticket
/// may deliver its result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    pub generation: u64,
    pub path: PathBuf,
}

pub struct EntryState {
    pub entries: Vec<FileEntry>,
    pub is_loading: bool,
    generation: u64,
}

impl EntryState {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            is_loading: false,
            generation: 0,
        }
    }

    /// Supersedes any pending load and hands out the ticket for a new one.
    pub fn begin_load(&mut self, path: &Path) -> LoadTicket {
        self.generation += 1;
        self.is_loading = true;
        LoadTicket {
            generation: self.generation,
            path: path.to_path_buf(),
        }
    }

    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        self.is_loading && ticket.generation == self.generation
    }

    pub fn finish_load(&mut self, ticket: &LoadTicket, entries: Vec<FileEntry>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.entries = entries;
        self.is_loading = false;
        true
    }

    /// Drops the listing and invalidates every outstanding ticket.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.is_loading = false;
        self.entries.clear();
    }

    pub fn find(&self, entry: &FileEntry) -> Option<&FileEntry> {
        self.entries.iter().find(|e| e.path == entry.path)
    }
}

impl Default for EntryState {
    fn default() -> Self {
        Self::new()
    }
}
