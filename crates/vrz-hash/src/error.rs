use thiserror::Error;

/// Errors raised while decoding or validating object identifiers.
#[derive(Debug, Error)]
pub enum HashError {
    #[error("invalid hex digit in object id")]
    InvalidHex,

    #[error("object id must be exactly 40 hex characters, got {0}")]
    InvalidLength(usize),
}
