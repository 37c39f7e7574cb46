use jotter::hasher::HasherError;
use jotter::store::StoreError;
use jotter::username_string::UsernameParseError;
use thiserror::Error;
use tokio::task::JoinError;

#[derive(Debug, Error)]
pub enum AccessGranterError {
    #[error("invalid username: {0}")]
    InvalidUsername(#[from] UsernameParseError),

    #[error("password must not be empty")]
    EmptyPassword,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Hasher(#[from] HasherError),

    #[error("hashing task failed: {0}")]
    HashingTask(#[from] JoinError),
}
