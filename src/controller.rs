//! Turns row gestures and action-bar commands into selection changes.

use crate::entry::FileEntry;
use crate::host::{EntryActions, FileChooserHost};
use crate::persist::{RestoreReport, SavedSelection};
use crate::state::{EntryState, LoadTicket, NavigationState, SelectionMode, SelectionSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub struct FileListController<H: FileChooserHost> {
    host: H,
    navigation: NavigationState,
    listing: EntryState,
    selection: SelectionSet,
    mode: SelectionMode,
    pending_load: Option<LoadTicket>,
    last_reported: (SelectionMode, usize),
}

impl<H: FileChooserHost> FileListController<H> {
    /// Creates a controller showing `start_path`. A load for it is queued
    /// immediately; see [`Self::take_load_request`].
    pub fn new(host: H, start_path: PathBuf) -> Self {
        let mut controller = Self {
            host,
            navigation: NavigationState::new(start_path),
            listing: EntryState::new(),
            selection: SelectionSet::new(),
            mode: SelectionMode::Single,
            pending_load: None,
            last_reported: (SelectionMode::Single, 0),
        };
        controller.queue_load();
        controller
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn is_selected(&self, entry: &FileEntry) -> bool {
        self.selection.contains(entry)
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.listing.entries
    }

    pub fn is_loading(&self) -> bool {
        self.listing.is_loading
    }

    pub fn current_path(&self) -> &Path {
        self.navigation.current()
    }

    // --- Loader lifecycle ---

    /// Hands out the load the view should run next, if any.
    pub fn take_load_request(&mut self) -> Option<LoadTicket> {
        self.pending_load.take()
    }

    /// Queues a fresh listing of the current directory.
    pub fn refresh(&mut self) {
        self.queue_load();
    }

    /// Applies a finished listing. Results for superseded tickets are
    /// dropped and `false` is returned.
    pub fn finish_load(&mut self, ticket: &LoadTicket, entries: Vec<FileEntry>) -> bool {
        if ticket.path != self.navigation.current() {
            debug!("Dropping listing for {}", ticket.path.display());
            return false;
        }
        let applied = self.listing.finish_load(ticket, entries);
        if !applied {
            debug!("Dropping superseded load #{}", ticket.generation);
        }
        applied
    }

    /// Clears the listing and cancels any load in flight.
    pub fn reset_loader(&mut self) {
        self.listing.reset();
        self.pending_load = None;
    }

    fn queue_load(&mut self) {
        let ticket = self.listing.begin_load(self.navigation.current());
        debug!(
            "Queued load #{} for {}",
            ticket.generation,
            ticket.path.display()
        );
        self.pending_load = Some(ticket);
    }

    // --- Navigation ---

    fn enter_directory(&mut self, path: PathBuf) {
        self.navigation.enter(path);
        self.listing.reset();
        self.queue_load();
    }

    pub fn navigate_up(&mut self) -> bool {
        if self.mode.is_multi() {
            return false;
        }
        match self.navigation.parent() {
            Some(parent) => {
                self.enter_directory(parent);
                true
            }
            None => false,
        }
    }

    pub fn navigate_back(&mut self) -> bool {
        if self.mode.is_multi() {
            return false;
        }
        if self.navigation.back() {
            self.listing.reset();
            self.queue_load();
            true
        } else {
            false
        }
    }

    pub fn navigate_forward(&mut self) -> bool {
        if self.mode.is_multi() {
            return false;
        }
        if self.navigation.forward() {
            self.listing.reset();
            self.queue_load();
            true
        } else {
            false
        }
    }

    // --- Gestures ---

    /// A tap on a row.
    pub fn tap(&mut self, entry: &FileEntry) {
        let Some(entry) = self.listing.find(entry).cloned() else {
            debug!("Ignoring tap on stale entry {}", entry.path.display());
            return;
        };

        match self.mode {
            SelectionMode::Single if entry.is_dir => {
                self.enter_directory(entry.path.clone());
                info!("Entered directory {}", entry.path.display());
                self.host.on_file_selected(&entry);
            }
            SelectionMode::Single => {
                self.selection.add(entry);
                self.deliver_selection();
            }
            SelectionMode::Multi => {
                if self.selection.contains(&entry) {
                    self.selection.remove(&entry);
                } else {
                    self.selection.add(entry);
                }
                self.sync_mode();
            }
        }
    }

    /// A long press on a row. Starts multi-select with `entry` as the first
    /// member; ignored once multi-select is already running.
    pub fn long_press(&mut self, entry: &FileEntry) -> bool {
        if self.mode.is_multi() {
            return false;
        }
        let Some(entry) = self.listing.find(entry).cloned() else {
            debug!("Ignoring long press on stale entry {}", entry.path.display());
            return false;
        };
        self.selection.add(entry);
        self.sync_mode();
        true
    }

    // --- Action mode commands ---

    /// Reports the whole selection to the host and leaves multi-select.
    pub fn upload(&mut self) {
        if !self.mode.is_multi() {
            return;
        }
        self.deliver_selection();
    }

    /// Selects every listed entry, or clears the selection when every
    /// listed entry is already selected.
    pub fn toggle_select_all(&mut self) {
        if !self.mode.is_multi() {
            return;
        }
        if self.listing.is_loading {
            debug!("Ignoring select-all while the listing is loading");
            return;
        }

        let all_selected = self
            .listing
            .entries
            .iter()
            .all(|e| self.selection.contains(e));

        if all_selected {
            self.selection.clear();
        } else {
            for entry in &self.listing.entries {
                if !self.selection.contains(entry) {
                    self.selection.add(entry.clone());
                }
            }
        }
        self.sync_mode();
    }

    /// Leaves multi-select without reporting anything.
    pub fn dismiss(&mut self) {
        if !self.mode.is_multi() {
            return;
        }
        self.selection.clear();
        self.sync_mode();
    }

    // --- Persistence ---

    pub fn save_state(&self) -> SavedSelection {
        SavedSelection::from_entries(self.selection.iter())
    }

    /// Restores a saved selection after the view was recreated. Any load in
    /// flight belongs to the old view, so it is reset and queued again.
    pub fn restore_state(&mut self, saved: &SavedSelection) -> RestoreReport {
        let mut report = saved.resolve();
        self.restore_entries(std::mem::take(&mut report.entries));
        report.entries = self.selection.snapshot();
        report
    }

    pub fn restore_entries(&mut self, entries: Vec<FileEntry>) {
        self.reset_loader();
        self.selection.restore(entries);
        self.sync_mode();
        self.queue_load();
    }

    // --- Internals ---

    fn deliver_selection(&mut self) {
        let files = self.selection.snapshot();
        info!("Reporting {} selected file(s)", files.len());
        self.host.on_files_selected(files);
        self.selection.clear();
        self.sync_mode();
    }

    /// The mode follows the selection: multi-select exactly while something
    /// is selected.
    fn sync_mode(&mut self) {
        self.mode = if self.selection.is_empty() {
            SelectionMode::Single
        } else {
            SelectionMode::Multi
        };

        let current = (self.mode, self.selection.len());
        if current != self.last_reported {
            self.last_reported = current;
            self.host.on_selection_changed(current.0, current.1);
        }
    }
}

impl<H: FileChooserHost> EntryActions for FileListController<H> {
    fn on_select(&mut self, entry: &FileEntry) {
        self.tap(entry);
    }

    fn on_long_select(&mut self, entry: &FileEntry) -> bool {
        self.long_press(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingHost {
        opened: Vec<PathBuf>,
        chosen: Vec<Vec<PathBuf>>,
        changes: Vec<(SelectionMode, usize)>,
    }

    impl FileChooserHost for RecordingHost {
        fn on_file_selected(&mut self, entry: &FileEntry) {
            self.opened.push(entry.path.clone());
        }

        fn on_files_selected(&mut self, entries: Vec<FileEntry>) {
            self.chosen
                .push(entries.into_iter().map(|e| e.path).collect());
        }

        fn on_selection_changed(&mut self, mode: SelectionMode, count: usize) {
            self.changes.push((mode, count));
        }
    }

    fn file(name: &str) -> FileEntry {
        FileEntry::new(Path::new("/sdcard").join(name), false)
    }

    fn dir(name: &str) -> FileEntry {
        FileEntry::new(Path::new("/sdcard").join(name), true)
    }

    fn listing() -> Vec<FileEntry> {
        vec![
            dir("Photos"),
            file("a.txt"),
            file("b.txt"),
            file("c.txt"),
            file("d.txt"),
        ]
    }

    fn loaded(entries: Vec<FileEntry>) -> FileListController<RecordingHost> {
        let mut controller = FileListController::new(RecordingHost::default(), "/sdcard".into());
        let ticket = controller.take_load_request().expect("initial load");
        assert!(controller.finish_load(&ticket, entries));
        controller
    }

    fn selected(controller: &FileListController<RecordingHost>) -> Vec<String> {
        controller
            .selection()
            .iter()
            .map(|e| e.name.clone())
            .collect()
    }

    fn assert_mode_invariant(controller: &FileListController<RecordingHost>) {
        assert_eq!(
            controller.mode().is_multi(),
            !controller.selection().is_empty()
        );
    }

    #[test]
    fn test_tap_directory_in_single_mode() {
        let mut c = loaded(listing());
        c.tap(&dir("Photos"));

        assert_eq!(c.host().opened, vec![PathBuf::from("/sdcard/Photos")]);
        assert!(c.selection().is_empty());
        assert_eq!(c.mode(), SelectionMode::Single);
        assert_eq!(c.current_path(), Path::new("/sdcard/Photos"));

        let ticket = c.take_load_request().expect("navigation queues a load");
        assert_eq!(ticket.path, PathBuf::from("/sdcard/Photos"));
        assert!(c.entries().is_empty());
    }

    #[test]
    fn test_tap_file_in_single_mode_reports_it() {
        let mut c = loaded(listing());
        c.tap(&file("a.txt"));

        assert_eq!(c.host().chosen, vec![vec![PathBuf::from("/sdcard/a.txt")]]);
        assert!(c.selection().is_empty());
        assert_eq!(c.mode(), SelectionMode::Single);
    }

    #[test]
    fn test_long_press_enters_multi() {
        let mut c = loaded(listing());
        assert!(c.long_press(&file("a.txt")));

        assert_eq!(c.mode(), SelectionMode::Multi);
        assert_eq!(selected(&c), vec!["a.txt"]);
        assert_eq!(c.host().changes, vec![(SelectionMode::Multi, 1)]);
    }

    #[test]
    fn test_long_press_ignored_in_multi() {
        let mut c = loaded(listing());
        c.long_press(&file("a.txt"));
        assert!(!c.long_press(&file("b.txt")));
        assert_eq!(selected(&c), vec!["a.txt"]);
    }

    #[test]
    fn test_untoggling_last_entry_returns_to_single() {
        let mut c = loaded(listing());
        c.long_press(&file("a.txt"));
        c.tap(&file("a.txt"));

        assert!(c.selection().is_empty());
        assert_eq!(c.mode(), SelectionMode::Single);
        assert!(c.host().chosen.is_empty());
    }

    #[test]
    fn test_taps_toggle_in_multi() {
        let mut c = loaded(listing());
        c.long_press(&file("a.txt"));
        c.tap(&file("c.txt"));
        c.tap(&dir("Photos"));
        assert_eq!(selected(&c), vec!["a.txt", "c.txt", "Photos"]);
        assert_eq!(c.current_path(), Path::new("/sdcard"));

        c.tap(&file("c.txt"));
        assert_eq!(selected(&c), vec!["a.txt", "Photos"]);
        assert_mode_invariant(&c);
    }

    #[test]
    fn test_select_all_appends_in_listing_order() {
        let mut c = loaded(listing());
        c.long_press(&file("b.txt"));
        c.tap(&file("a.txt"));
        c.toggle_select_all();

        assert_eq!(
            selected(&c),
            vec!["b.txt", "a.txt", "Photos", "c.txt", "d.txt"]
        );
        assert_eq!(c.mode(), SelectionMode::Multi);
    }

    #[test]
    fn test_select_all_twice_unselects_everything() {
        let mut c = loaded(listing());
        c.long_press(&file("a.txt"));
        c.toggle_select_all();
        c.toggle_select_all();

        assert!(c.selection().is_empty());
        assert_eq!(c.mode(), SelectionMode::Single);
    }

    #[test]
    fn test_upload_reports_snapshot_and_exits() {
        let mut c = loaded(listing());
        c.long_press(&file("c.txt"));
        c.tap(&file("a.txt"));
        c.upload();

        assert_eq!(
            c.host().chosen,
            vec![vec![
                PathBuf::from("/sdcard/c.txt"),
                PathBuf::from("/sdcard/a.txt"),
            ]]
        );
        assert!(c.selection().is_empty());
        assert_eq!(c.mode(), SelectionMode::Single);
    }

    #[test]
    fn test_dismiss_clears_without_reporting() {
        let mut c = loaded(listing());
        c.long_press(&file("a.txt"));
        c.tap(&file("b.txt"));
        c.dismiss();

        assert!(c.selection().is_empty());
        assert_eq!(c.mode(), SelectionMode::Single);
        assert!(c.host().chosen.is_empty());
    }

    #[test]
    fn test_actions_outside_multi_are_noops() {
        let mut c = loaded(listing());
        c.upload();
        c.toggle_select_all();
        c.dismiss();
        assert!(c.host().chosen.is_empty());
        assert!(c.selection().is_empty());
        assert!(c.host().changes.is_empty());
    }

    #[test]
    fn test_stale_entries_are_ignored() {
        let mut c = loaded(listing());
        c.tap(&file("gone.txt"));
        assert!(!c.long_press(&file("gone.txt")));
        assert!(c.host().chosen.is_empty());
        assert_eq!(c.mode(), SelectionMode::Single);

        c.long_press(&file("a.txt"));
        c.tap(&file("gone.txt"));
        assert_eq!(selected(&c), vec!["a.txt"]);
    }

    #[test]
    fn test_navigation_blocked_in_multi() {
        let mut c = loaded(listing());
        c.long_press(&file("a.txt"));
        assert!(!c.navigate_up());
        assert!(!c.navigate_back());
        assert_eq!(c.current_path(), Path::new("/sdcard"));
    }

    #[test]
    fn test_navigate_up_and_back() {
        let mut c = loaded(listing());
        assert!(c.navigate_up());
        assert_eq!(c.current_path(), Path::new("/"));
        assert!(c.navigate_back());
        assert_eq!(c.current_path(), Path::new("/sdcard"));
        assert!(c.navigate_forward());
        assert_eq!(c.current_path(), Path::new("/"));
        assert!(!c.navigate_forward());
    }

    #[test]
    fn test_superseded_listing_is_dropped() {
        let mut c = loaded(listing());
        c.refresh();
        let stale = c.take_load_request().expect("refresh queued");
        c.refresh();
        let fresh = c.take_load_request().expect("refresh queued");

        assert!(!c.finish_load(&stale, vec![file("x.txt")]));
        assert!(c.finish_load(&fresh, vec![file("y.txt")]));
        assert_eq!(c.entries(), &[file("y.txt")]);
    }

    #[test]
    fn test_listing_for_old_directory_is_dropped() {
        let mut c = FileListController::new(RecordingHost::default(), "/sdcard".into());
        let ticket = c.take_load_request().expect("initial load");
        c.finish_load(&ticket, listing());
        c.refresh();
        let old = c.take_load_request().expect("refresh queued");
        c.tap(&dir("Photos"));
        assert!(!c.finish_load(&old, listing()));
        assert!(c.entries().is_empty());
    }

    #[test]
    fn test_select_all_ignored_while_loading() {
        let mut c = loaded(listing());
        c.long_press(&file("a.txt"));
        c.refresh();
        c.toggle_select_all();
        assert_eq!(selected(&c), vec!["a.txt"]);
    }

    #[test]
    fn test_restore_reenters_multi() {
        let mut c = loaded(listing());
        c.long_press(&file("a.txt"));
        c.tap(&file("b.txt"));
        let snapshot = c.selection().snapshot();

        let mut resumed = FileListController::new(RecordingHost::default(), "/sdcard".into());
        resumed.restore_entries(snapshot);
        assert_eq!(selected(&resumed), vec!["a.txt", "b.txt"]);
        assert_eq!(resumed.mode(), SelectionMode::Multi);
        assert!(resumed.take_load_request().is_some());
    }

    #[test]
    fn test_restore_empty_stays_single() {
        let mut c = FileListController::new(RecordingHost::default(), "/sdcard".into());
        c.restore_entries(Vec::new());
        assert_eq!(c.mode(), SelectionMode::Single);
    }

    #[test]
    fn test_save_state_keeps_order() {
        let mut c = loaded(listing());
        c.long_press(&file("b.txt"));
        c.tap(&file("a.txt"));
        assert_eq!(
            c.save_state().selection,
            vec![
                "file:///sdcard/b.txt".to_string(),
                "file:///sdcard/a.txt".to_string(),
            ]
        );
    }

    #[test]
    fn test_mode_invariant_over_gestures() {
        enum Step {
            Tap(&'static str),
            LongPress(&'static str),
            SelectAll,
            Upload,
            Dismiss,
        }

        let mut c = loaded(listing());
        let steps = [
            Step::LongPress("a.txt"),
            Step::Tap("b.txt"),
            Step::SelectAll,
            Step::Tap("a.txt"),
            Step::SelectAll,
            Step::SelectAll,
            Step::LongPress("d.txt"),
            Step::Tap("c.txt"),
            Step::Upload,
            Step::LongPress("b.txt"),
            Step::Dismiss,
        ];
        for step in steps {
            match step {
                Step::Tap(name) => c.tap(&file(name)),
                Step::LongPress(name) => {
                    c.long_press(&file(name));
                }
                Step::SelectAll => c.toggle_select_all(),
                Step::Upload => c.upload(),
                Step::Dismiss => c.dismiss(),
            }
            assert_mode_invariant(&c);
        }
        assert_eq!(c.host().chosen, vec![vec![
            PathBuf::from("/sdcard/d.txt"),
            PathBuf::from("/sdcard/c.txt"),
        ]]);
    }
}
