use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("invalid index header: {0}")]
    InvalidHeader(String),

    #[error("unsupported index version: {0}")]
    UnsupportedVersion(u32),

    #[error("invalid index entry at offset {offset}: {reason}")]
    InvalidEntry { offset: usize, reason: String },

    #[error("path outside worktree: {0}")]
    OutsideWorktree(PathBuf),

    #[error("path not in index: {0}")]
    PathNotInIndex(PathBuf),

    #[error("absolute path not allowed: {0}")]
    AbsolutePathNotAllowed(PathBuf),

    #[error("lock failed: {path}")]
    LockFailed { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Odb(#[from] vrz_odb::OdbError),

    #[error(transparent)]
    Object(#[from] vrz_object::ObjectError),

    #[error(transparent)]
    Lock(#[from] vrz_utils::UtilError),
}
