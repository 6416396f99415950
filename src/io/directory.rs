use crate::entry::FileEntry;
use std::fs;
use std::path::Path;

/// How a directory is turned into a listing.
#[derive(Clone, Copy, Debug)]
pub struct ListingOptions {
    pub show_hidden: bool,
    pub dirs_first: bool,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self {
            show_hidden: false,
            dirs_first: true,
        }
    }
}

/// Lists the immediate children of `path`, directories first when asked,
/// then by case-insensitive name.
pub fn read_directory(path: &Path, options: ListingOptions) -> Result<Vec<FileEntry>, std::io::Error> {
    let mut entries = Vec::new();
    let read_dir = fs::read_dir(path)?;

    for entry in read_dir.flatten() {
        let path = entry.path();
        if !options.show_hidden && is_hidden(&path) {
            continue;
        }
        if let Some(file_entry) = FileEntry::from_path(path) {
            entries.push(file_entry);
        }
    }
    entries.sort_by(|a, b| {
        if options.dirs_first && a.is_dir != b.is_dir {
            return b.is_dir.cmp(&a.is_dir);
        }
        a.name.to_lowercase().cmp(&b.name.to_lowercase())
    });
    Ok(entries)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}
