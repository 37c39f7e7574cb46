use log::info;
use rocket::http::{Cookie, CookieJar, SameSite, Status};
use rocket::serde::json::Json;
use rocket::{get, post, State};
use crate::access_granter::{AccessGranter, LoginResult};
use crate::http::{ApiError, ApiResult};
use crate::routes::api::authentication_guard::Authenticated;
use crate::routes::api::json_body;
use crate::routes::api::model::{Credentials, UserInfo};
use super::JsonError;

fn token_cookie(access_granter: &AccessGranter, token: String) -> Cookie<'static> {
    let cookie = Cookie::build((access_granter.cookie_name(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    match access_granter.token_lifetime() {
        Some(lifetime) => cookie.max_age(lifetime).build(),
        None => cookie.build(),
    }
}

#[post("/signup", data = "<credentials>")]
pub async fn signup(
    access_granter: &State<AccessGranter>,
    credentials: Result<Json<Credentials>, JsonError<'_>>,
) -> ApiResult<(Status, Json<UserInfo>)> {
    let credentials = json_body(credentials)?;
    let id = access_granter
        .signup(&credentials.username, &credentials.password)
        .await?;
    Ok(
        (
            Status::Created,
            Json(UserInfo { id, username: credentials.username }),
        )
    )
}

#[post("/login", data = "<credentials>")]
pub async fn login(
    access_granter: &State<AccessGranter>,
    cookies: &CookieJar<'_>,
    credentials: Result<Json<Credentials>, JsonError<'_>>,
) -> ApiResult<Json<UserInfo>> {
    let credentials = json_body(credentials)?;
    let LoginResult { user, username, token } = access_granter
        .login(&credentials.username, &credentials.password)
        .await?;
    cookies.add(token_cookie(access_granter, token));
    info!("user \"{username}\" logged in");
    Ok(Json(UserInfo { id: user, username: username.to_string() }))
}

#[post("/logout")]
pub async fn logout(
    user: Authenticated,
    access_granter: &State<AccessGranter>,
    cookies: &CookieJar<'_>,
) -> Status {
    let name = access_granter.cookie_name();
    if let Some(cookie) = cookies.get(name) {
        access_granter.logout(cookie.value()).await;
    }
    cookies.remove(Cookie::build(name).path("/"));
    info!("user {} logged out", user.0);
    Status::Ok
}

#[get("/me")]
pub async fn me(
    user: Authenticated,
    access_granter: &State<AccessGranter>,
) -> ApiResult<Json<UserInfo>> {
    let username = access_granter.username_of(user.0)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(UserInfo { id: user.0, username: username.to_string() }))
}
