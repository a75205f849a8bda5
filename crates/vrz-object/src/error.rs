use bstr::BString;
use vrz_hash::HashError;

#[derive(Debug, thiserror::Error)]
pub enum ObjectError {
    #[error("malformed object: {0}")]
    Malformed(String),

    #[error("unknown object kind: {0}")]
    UnknownKind(BString),

    #[error("invalid commit: missing '{field}' header")]
    MissingCommitField { field: &'static str },

    #[error("invalid tag: missing '{field}' header")]
    MissingTagField { field: &'static str },

    #[error("invalid file mode: {0}")]
    InvalidFileMode(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error(transparent)]
    Hash(#[from] HashError),
}
