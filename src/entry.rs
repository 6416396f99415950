use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// One row of a directory listing.
///
/// Two entries are the same entry when they name the same path; the
/// metadata is only there for display.
#[derive(Clone, Debug)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    pub is_symlink: bool,
    pub size: u64,
    pub modified: SystemTime,
    pub extension: String,
}

impl FileEntry {
    /// Builds an entry without touching the filesystem.
    pub fn new(path: impl Into<PathBuf>, is_dir: bool) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        let extension = extension_of(&path);

        Self {
            path,
            name,
            is_dir,
            is_symlink: false,
            size: 0,
            modified: SystemTime::UNIX_EPOCH,
            extension,
        }
    }

    pub fn from_path(path: PathBuf) -> Option<Self> {
        let symlink_meta = fs::symlink_metadata(&path).ok()?;
        let is_symlink = symlink_meta.is_symlink();

        let name = path.file_name()?.to_string_lossy().to_string();
        let extension = extension_of(&path);

        let metadata = fs::metadata(&path).ok();
        let is_dir = metadata.as_ref().map(|m| m.is_dir()).unwrap_or(false);
        let size = metadata.as_ref().map(|m| m.len()).unwrap_or(0);
        let modified = metadata
            .as_ref()
            .and_then(|m| m.modified().ok())
            .or_else(|| symlink_meta.modified().ok())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        Some(Self {
            path,
            name,
            is_dir,
            is_symlink,
            size,
            modified,
            extension,
        })
    }

    pub fn get_icon(&self) -> &str {
        if self.is_dir {
            return "\u{1F4C1}";
        }
        match self.extension.as_str() {
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp" | "svg" => "\u{1F5BC}",
            "mp4" | "mkv" | "mov" | "avi" | "webm" => "\u{1F39E}",
            "mp3" | "wav" | "flac" | "ogg" | "m4a" => "\u{1F3B5}",
            "zip" | "tar" | "gz" | "7z" | "rar" | "xz" | "bz2" => "\u{1F4E6}",
            "pdf" | "doc" | "docx" | "odt" => "\u{1F4D5}",
            "xls" | "xlsx" | "ods" | "csv" => "\u{1F4CA}",
            _ => "\u{1F4C4}",
        }
    }

    pub fn display_name(&self) -> String {
        if self.is_symlink {
            format!("{} \u{2192}", self.name)
        } else {
            self.name.clone()
        }
    }
}

impl PartialEq for FileEntry {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for FileEntry {}

impl Hash for FileEntry {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
