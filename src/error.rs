use std::path::PathBuf;

/// Errors raised while reading, writing or displaying the recent files list.
#[derive(Debug, thiserror::Error)]
pub enum RecentFilesError {
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed recent files data in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not determine the user home directory")]
    NoHomeDirectory,

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(f64),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidSetting { name: String, value: String },
}

impl RecentFilesError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, RecentFilesError>;
