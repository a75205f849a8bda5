use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LockError {
    #[error("lock file already held: {path}")]
    AlreadyLocked { path: PathBuf },

    #[error("failed to create lock file {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to commit lock file {path}: {source}")]
    Commit {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum UtilError {
    #[error(transparent)]
    Lock(#[from] LockError),

    #[error("failed to parse date: {0}")]
    DateParse(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
