mod directory;
mod watcher;
pub mod worker;

pub use directory::{read_directory, ListingOptions};
pub use watcher::DirectoryWatcher;
pub use worker::{spawn_worker, IoCommand, IoResult};
