#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("user identity is not configured: set user.name and user.email")]
    MissingUserIdentity,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
