mod auth;
mod authentication_guard;
mod images;
mod model;
mod notebooks;
mod notes;

use rocket::request::FromParam;
use rocket::response::content::RawText;
use rocket::serde::json::Json;
use rocket::serde::json::Error as JsonError;
use rocket::{catchers, get, routes, Build, Rocket};
use crate::app_constants::{API_PREFIX, API_VERSION, UPLOADS_PREFIX};
use crate::http::{default_catcher, ApiError};

#[get("/version")]
fn version() -> RawText<&'static str> {
    RawText(API_VERSION)
}

/// Unwraps a JSON body, reporting any malformation as `400 Bad Request`.
fn json_body<T>(body: Result<Json<T>, JsonError<'_>>) -> Result<T, ApiError> {
    body
        .map(Json::into_inner)
        .map_err(|e| ApiError::bad_request(format!("invalid request body: {e}")))
}

type PathId<'a> = Result<i64, <i64 as FromParam<'a>>::Error>;

/// Unwraps a numeric path id, reporting garbage as `400 Bad Request`.
fn path_id(id: PathId<'_>, what: &str) -> Result<i64, ApiError> {
    id.map_err(|_| ApiError::bad_request(format!("invalid {what} id")))
}

pub trait ApiRocketBuildExt {
    fn install_jotter_api(self) -> Self;
}

impl ApiRocketBuildExt for Rocket<Build> {
    fn install_jotter_api(self) -> Self {
        self
            .mount(
                API_PREFIX,
                routes![
                    version,
                    auth::signup,
                    auth::login,
                    auth::logout,
                    auth::me,
                    notebooks::list_notebooks,
                    notebooks::create_notebook,
                    notebooks::delete_notebook,
                    notes::list_notes,
                    notes::create_note,
                    notes::update_note,
                    notes::delete_note,
                    images::upload_image,
                    images::delete_image,
                ]
            )
            .mount(
                UPLOADS_PREFIX,
                routes![
                    images::serve_image,
                ]
            )
            .register("/", catchers![default_catcher])
    }
}
