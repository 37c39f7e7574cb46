use jotter::store::StoreError;
use log::error;
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::{catch, Request};
use serde::Serialize;
use thiserror::Error;
use crate::access_granter::AccessGranterError;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        ErrorBody { error: error.into() }
    }
}

/// Everything a handler can fail with, as the client sees it.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("internal server error")]
    Internal,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn status(&self) -> Status {
        match self {
            ApiError::BadRequest(_) => Status::BadRequest,
            ApiError::Unauthorized => Status::Unauthorized,
            ApiError::NotFound => Status::NotFound,
            ApiError::Conflict(_) => Status::Conflict,
            ApiError::Internal => Status::InternalServerError,
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        (self.status(), Json(ErrorBody::new(self.to_string())))
            .respond_to(request)
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => ApiError::NotFound,
            StoreError::UsernameTaken => ApiError::Conflict(e.to_string()),
            e => {
                error!("storage failure: {e}");
                ApiError::Internal
            },
        }
    }
}

impl From<AccessGranterError> for ApiError {
    fn from(e: AccessGranterError) -> Self {
        match e {
            AccessGranterError::InvalidUsername(_) |
            AccessGranterError::EmptyPassword
            => ApiError::BadRequest(e.to_string()),

            AccessGranterError::InvalidCredentials => ApiError::Unauthorized,

            AccessGranterError::Store(e) => e.into(),

            AccessGranterError::Hasher(e) => {
                error!("password hashing failed: {e}");
                ApiError::Internal
            },

            AccessGranterError::HashingTask(e) => {
                error!("password hashing task failed: {e}");
                ApiError::Internal
            },
        }
    }
}

#[catch(default)]
pub fn default_catcher(status: Status, _request: &Request<'_>) -> (Status, Json<ErrorBody>) {
    (
        status,
        Json(ErrorBody::new(status.reason_lossy().to_lowercase())),
    )
}
