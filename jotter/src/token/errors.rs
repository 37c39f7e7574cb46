use thiserror::Error;

/// Reasons a token is rejected.
///
/// These are kept apart for logging only; callers over HTTP see a single
/// `401 Unauthorized` for all of them.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum TokenError {
    #[error("malformed token")]
    MalformedToken,

    #[error("invalid token signature")]
    InvalidSignature,

    #[error("token expired")]
    Expired,

    #[error("session not found")]
    SessionNotFound,
}
