
use std::io::Cursor;
use async_trait::async_trait;
use jotter::identity::UserId;
use log::{error, info, trace};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{ContentType, Status};
use rocket::serde::json;
use rocket::{Data, Request, Response};
use crate::access_granter::AccessGranter;
use crate::app_constants::{PUBLIC_PATHS, PUBLIC_PATH_PREFIXES};
use crate::http::ErrorBody;

/// What the gate decided about a request, kept in the request-local cache.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum IdentityOutcome {
    Public,
    Authenticated(UserId),
    Rejected,
    /// The gate never ran or the server is not set up.
    Unresolved,
}

/// Authenticates every request outside of the public allow-list.
///
/// Rejected requests get `401 Unauthorized` whatever route they would have
/// reached; protected handlers never see them because their
/// `Authenticated` guard fails first.
pub struct IdentityGate;

pub fn is_public_path(path: &str) -> bool {
    if path.split('/').any(|segment| segment == "..") {
        return false;
    }
    PUBLIC_PATHS.contains(&path)
        || PUBLIC_PATH_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}

impl IdentityGate {
    async fn check(request: &Request<'_>) -> IdentityOutcome {
        let path = request.uri().path();
        if is_public_path(path.as_str()) {
            return IdentityOutcome::Public;
        }
        let Some(access_granter) = request.rocket().state::<AccessGranter>() else {
            error!("access granter is not set up");
            return IdentityOutcome::Unresolved;
        };
        let Some(cookie) = request.cookies().get(access_granter.cookie_name()) else {
            info!("rejected request to {path}: no token");
            return IdentityOutcome::Rejected;
        };
        match access_granter.authenticate(cookie.value()).await {
            Ok(user) => {
                trace!("request to {path} authenticated as user {user}");
                IdentityOutcome::Authenticated(user)
            },
            Err(e) => {
                info!("rejected request to {path}: {e}");
                IdentityOutcome::Rejected
            },
        }
    }
}

pub fn identity_outcome(request: &Request<'_>) -> IdentityOutcome {
    *request.local_cache(|| IdentityOutcome::Unresolved)
}

#[async_trait]
impl Fairing for IdentityGate {
    fn info(&self) -> Info {
        Info {
            name: "identity gate",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, request: &mut Request<'_>, _data: &mut Data<'_>) {
        let outcome = Self::check(request).await;
        request.local_cache(|| outcome);
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let status = match identity_outcome(request) {
            IdentityOutcome::Public | IdentityOutcome::Authenticated(_) => return,
            IdentityOutcome::Rejected => Status::Unauthorized,
            IdentityOutcome::Unresolved => Status::InternalServerError,
        };
        let body = json::to_string(&ErrorBody::new(status.reason_lossy().to_lowercase()))
            .unwrap_or_default();
        response.set_status(status);
        response.set_header(ContentType::JSON);
        response.set_sized_body(body.len(), Cursor::new(body));
    }
}
