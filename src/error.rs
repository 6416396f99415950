use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ChooserError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize TOML: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to watch directory: {0}")]
    Watch(#[from] notify::Error),

    #[error("Not a file URI: {0}")]
    InvalidUri(String),
}

impl ChooserError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChooserError>;
