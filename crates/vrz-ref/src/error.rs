use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RefError {
    #[error("invalid ref name: {0}")]
    InvalidName(String),

    #[error("symbolic ref cycle detected resolving {0}")]
    RefCycle(String),

    #[error("ambiguous reference {name}, candidates: {candidates:?}")]
    AmbiguousReference {
        name: String,
        candidates: Vec<String>,
    },

    #[error("no such reference: {0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Lock(#[from] vrz_utils::UtilError),

    #[error(transparent)]
    Odb(#[from] vrz_odb::OdbError),

    #[error(transparent)]
    Object(#[from] vrz_object::ObjectError),

    #[error(transparent)]
    Hash(#[from] vrz_hash::HashError),

    #[error("I/O error on {path}: {source}")]
    IoPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
