use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum MergeError {
    FileNotFound(PathBuf),
    MalformedData { path: PathBuf, reason: String },
    Io { path: PathBuf, source: io::Error },
}

impl MergeError {
    pub fn malformed(path: &Path, reason: impl Into<String>) -> Self {
        Self::MalformedData {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Classifies a read failure: a missing file and undecodable bytes get
    /// their own variants, everything else stays an I/O error.
    pub fn from_read(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => Self::FileNotFound(path.to_path_buf()),
            io::ErrorKind::InvalidData => Self::malformed(path, err.to_string()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source: err,
            },
        }
    }

    /// A dataset that cannot be encoded is a data problem, not an I/O one.
    pub fn encode(path: &Path, err: serde_json::Error) -> Self {
        Self::malformed(path, format!("cannot encode: {err}"))
    }

    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl std::fmt::Display for MergeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileNotFound(path) => write!(f, "file not found: {}", path.display()),
            Self::MalformedData { path, reason } => {
                write!(f, "malformed data in {}: {reason}", path.display())
            }
            Self::Io { path, source } => write!(f, "io error on {}: {source}", path.display()),
        }
    }
}

impl std::error::Error for MergeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}
