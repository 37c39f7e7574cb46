use std::io::Error as IoError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,

    #[error("username already taken")]
    UsernameTaken,

    #[error(transparent)]
    Io(#[from] IoError),

    #[error("failed to lock the database file: {0}")]
    LockingFailed(IoError),

    #[error("invalid database file contents: {0}")]
    Parsing(#[from] toml::de::Error),

    #[error("failed to serialize the database: {0}")]
    Serialization(#[from] toml::ser::Error),
}
