use crate::entry::FileEntry;
use crate::state::LoadTicket;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use tracing::{debug, warn};

use super::directory::{read_directory, ListingOptions};

pub enum IoCommand {
    LoadDirectory {
        ticket: LoadTicket,
        options: ListingOptions,
    },
}

pub enum IoResult {
    DirectoryLoaded {
        ticket: LoadTicket,
        entries: Vec<FileEntry>,
    },
    Error {
        ticket: LoadTicket,
        message: String,
    },
}

/// Starts the listing thread. `wake` runs after every result so the UI can
/// schedule a repaint. The thread exits once the command sender is dropped.
pub fn spawn_worker<F>(wake: F) -> (Sender<IoCommand>, Receiver<IoResult>)
where
    F: Fn() + Send + 'static,
{
    let (cmd_tx, cmd_rx) = channel();
    let (res_tx, res_rx) = channel();

    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                IoCommand::LoadDirectory { ticket, options } => {
                    debug!("Listing {} (#{})", ticket.path.display(), ticket.generation);
                    let result = match read_directory(&ticket.path, options) {
                        Ok(entries) => IoResult::DirectoryLoaded { ticket, entries },
                        Err(e) => {
                            warn!("Failed to list {}: {}", ticket.path.display(), e);
                            IoResult::Error {
                                message: format!("Error reading {}: {}", ticket.path.display(), e),
                                ticket,
                            }
                        }
                    };
                    if res_tx.send(result).is_err() {
                        break;
                    }
                }
            }
            wake();
        }
    });

    (cmd_tx, res_rx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::time::Duration;

    #[test]
    fn test_worker_lists_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("b.txt"), "b").expect("write");
        fs::create_dir(dir.path().join("sub")).expect("mkdir");

        let (tx, rx) = spawn_worker(|| {});
        let ticket = LoadTicket {
            generation: 7,
            path: dir.path().to_path_buf(),
        };
        tx.send(IoCommand::LoadDirectory {
            ticket: ticket.clone(),
            options: ListingOptions::default(),
        })
        .expect("send");

        match rx.recv_timeout(Duration::from_secs(5)).expect("result") {
            IoResult::DirectoryLoaded { ticket: got, entries } => {
                assert_eq!(got, ticket);
                let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
                assert_eq!(names, vec!["sub", "b.txt"]);
            }
            IoResult::Error { message, .. } => panic!("unexpected error: {}", message),
        }
    }

    #[test]
    fn test_worker_reports_missing_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (tx, rx) = spawn_worker(|| {});
        tx.send(IoCommand::LoadDirectory {
            ticket: LoadTicket {
                generation: 1,
                path: dir.path().join("missing"),
            },
            options: ListingOptions::default(),
        })
        .expect("send");

        assert!(matches!(
            rx.recv_timeout(Duration::from_secs(5)).expect("result"),
            IoResult::Error { .. }
        ));
    }
}
