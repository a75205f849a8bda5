use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error("not a verizon directory")]
    NotARepository,

    #[error("{0} is not empty")]
    RepositoryExists(PathBuf),

    #[error(transparent)]
    Config(#[from] vrz_config::ConfigError),

    #[error(transparent)]
    Odb(#[from] vrz_odb::OdbError),

    #[error(transparent)]
    Ref(#[from] vrz_ref::RefError),

    #[error(transparent)]
    Index(#[from] vrz_index::IndexError),

    #[error(transparent)]
    Object(#[from] vrz_object::ObjectError),

    #[error(transparent)]
    Hash(#[from] vrz_hash::HashError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
