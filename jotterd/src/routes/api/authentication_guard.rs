use async_trait::async_trait;
use jotter::identity::UserId;
use log::error;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome};
use rocket::Request;
use crate::identity_gate::{identity_outcome, IdentityOutcome};

/// The user the identity gate authenticated the request as.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Authenticated(pub UserId);

#[async_trait]
impl<'r> FromRequest<'r> for Authenticated {
    type Error = ();

    async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        match identity_outcome(request) {
            IdentityOutcome::Authenticated(user) => Outcome::Success(Authenticated(user)),
            IdentityOutcome::Rejected => Outcome::Error((Status::Unauthorized, ())),
            IdentityOutcome::Public => {
                error!("identity requested on public path {}", request.uri());
                Outcome::Error((Status::InternalServerError, ()))
            },
            IdentityOutcome::Unresolved => {
                error!("identity gate did not run for {}", request.uri());
                Outcome::Error((Status::InternalServerError, ()))
            },
        }
    }
}
