// Navigation state - the directory being shown and how we got there
use std::path::{Path, PathBuf};

/// Directories are kept absolute so that everything listed under them,
/// and everything saved from that listing, is absolute too.
pub struct NavigationState {
    current: PathBuf,
    back: Vec<PathBuf>,
    forward: Vec<PathBuf>,
}

impl NavigationState {
    pub fn new(start_path: PathBuf) -> Self {
        Self {
            current: absolutize(start_path),
            back: Vec::new(),
            forward: Vec::new(),
        }
    }

    pub fn current(&self) -> &Path {
        &self.current
    }

    /// Moves to `path`; whatever was ahead of us is forgotten.
    pub fn enter(&mut self, path: PathBuf) {
        let previous = std::mem::replace(&mut self.current, absolutize(path));
        self.back.push(previous);
        self.forward.clear();
    }

    pub fn back(&mut self) -> bool {
        match self.back.pop() {
            Some(path) => {
                let left = std::mem::replace(&mut self.current, path);
                self.forward.push(left);
                true
            }
            None => false,
        }
    }

    pub fn forward(&mut self) -> bool {
        match self.forward.pop() {
            Some(path) => {
                let left = std::mem::replace(&mut self.current, path);
                self.back.push(left);
                true
            }
            None => false,
        }
    }

    pub fn parent(&self) -> Option<PathBuf> {
        self.current.parent().map(|p| p.to_path_buf())
    }
}

fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    std::path::absolute(&path).unwrap_or(path)
}
