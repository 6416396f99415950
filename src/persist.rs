//! Saved selection, carried across a pause/resume cycle.
//!
//! The selection is stored as an ordered list of `file://` URIs. Restoring
//! is best effort: identifiers that no longer resolve are skipped and the
//! rest come back in their original order.

use crate::entry::FileEntry;
use crate::error::{ChooserError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use url::Url;

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct SavedSelection {
    pub selection: Vec<String>,
}

/// Outcome of resolving a [`SavedSelection`].
#[derive(Debug, Default)]
pub struct RestoreReport {
    pub entries: Vec<FileEntry>,
    pub skipped: Vec<String>,
}

impl SavedSelection {
    pub fn from_entries<'a>(entries: impl IntoIterator<Item = &'a FileEntry>) -> Self {
        let selection = entries
            .into_iter()
            .filter_map(|entry| match Url::from_file_path(&entry.path) {
                Ok(uri) => Some(uri.to_string()),
                Err(()) => {
                    warn!("Not saving relative path {}", entry.path.display());
                    None
                }
            })
            .collect();
        Self { selection }
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    /// Re-hydrates entries from the filesystem, in saved order.
    pub fn resolve(&self) -> RestoreReport {
        self.resolve_with(|path| FileEntry::from_path(path.to_path_buf()))
    }

    pub fn resolve_with<F>(&self, mut lookup: F) -> RestoreReport
    where
        F: FnMut(&Path) -> Option<FileEntry>,
    {
        let mut report = RestoreReport::default();
        for raw in &self.selection {
            let entry = uri_to_path(raw).ok().and_then(|path| lookup(&path));
            match entry {
                Some(entry) => report.entries.push(entry),
                None => {
                    warn!("Skipping unresolvable saved entry {}", raw);
                    report.skipped.push(raw.clone());
                }
            }
        }
        report
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ChooserError::io(parent, e))?;
        }
        fs::write(path, self.to_toml()?).map_err(|e| ChooserError::io(path, e))
    }

    /// Reads a saved selection; a missing file is an empty selection.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(|e| ChooserError::io(path, e))?;
        Self::from_toml(&contents)
    }
}

/// Parses a saved `file://` URI back into a path.
fn uri_to_path(raw: &str) -> Result<PathBuf> {
    let uri = Url::parse(raw).map_err(|_| ChooserError::InvalidUri(raw.to_string()))?;
    if uri.scheme() != "file" {
        return Err(ChooserError::InvalidUri(raw.to_string()));
    }
    uri.to_file_path()
        .map_err(|()| ChooserError::InvalidUri(raw.to_string()))
}
