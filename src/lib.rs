//! A file chooser: a directory listing with single- and multi-select modes
//! that reports the chosen files to its host.

pub mod app;
pub mod config;
pub mod controller;
pub mod entry;
pub mod error;
pub mod host;
pub mod io;
pub mod persist;
pub mod state;
pub mod style;

pub use controller::FileListController;
pub use entry::FileEntry;
pub use error::{ChooserError, Result};
pub use host::{EntryActions, FileChooserHost};
pub use persist::{RestoreReport, SavedSelection};
pub use state::{SelectionMode, SelectionSet};
