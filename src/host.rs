use crate::entry::FileEntry;
use crate::state::SelectionMode;

/// What the embedding application must handle.
pub trait FileChooserHost {
    /// A directory was opened from single-select mode.
    fn on_file_selected(&mut self, entry: &FileEntry);

    /// The user finished choosing: either one file tapped in single-select
    /// mode or the whole selection uploaded from multi-select mode.
    fn on_files_selected(&mut self, entries: Vec<FileEntry>);

    /// Called after every transition that changes the mode or the number of
    /// selected entries.
    fn on_selection_changed(&mut self, _mode: SelectionMode, _count: usize) {}
}

/// Per-row gesture handling, handed to whatever renders the rows.
pub trait EntryActions {
    fn on_select(&mut self, entry: &FileEntry);

    /// Returns whether the long press was consumed.
    fn on_long_select(&mut self, entry: &FileEntry) -> bool;
}
