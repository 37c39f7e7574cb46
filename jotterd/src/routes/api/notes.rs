use std::sync::Arc;
use jotter::config::app_config::AppConfig;
use jotter::data::{NoteId, NotebookId, TimeRange};
use jotter::store::NoteStore;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{delete, get, post, put, State};
use time::OffsetDateTime;
use crate::http::{ApiError, ApiResult};
use crate::routes::api::authentication_guard::Authenticated;
use crate::routes::api::images::remove_image_files;
use crate::routes::api::{json_body, path_id, PathId};
use crate::routes::api::model::{Created, NoteContent, NoteResponse};
use super::JsonError;

fn timestamp(seconds: Option<&str>) -> Result<Option<OffsetDateTime>, ApiError> {
    let Some(seconds) = seconds else {
        return Ok(None);
    };
    seconds.parse()
        .ok()
        .and_then(|s| OffsetDateTime::from_unix_timestamp(s).ok())
        .map(Some)
        .ok_or_else(|| ApiError::bad_request(format!("invalid timestamp {seconds:?}")))
}

/// Newest first; `from` and `to` are inclusive unix timestamps.
#[get("/notebooks/<id>/notes?<from>&<to>")]
pub async fn list_notes(
    user: Authenticated,
    id: PathId<'_>,
    from: Option<&str>,
    to: Option<&str>,
    store: &State<Arc<dyn NoteStore>>,
) -> ApiResult<Json<Vec<NoteResponse>>> {
    let notebook = NotebookId(path_id(id, "notebook")?);
    let range = TimeRange {
        from: timestamp(from)?,
        to: timestamp(to)?,
    };
    Ok(
        Json(
            store.list_notes(notebook, user.0, range)
                .await?
                .into_iter()
                .map(Into::into)
                .collect()
        )
    )
}

#[post("/notebooks/<id>/notes", data = "<note>")]
pub async fn create_note(
    user: Authenticated,
    id: PathId<'_>,
    store: &State<Arc<dyn NoteStore>>,
    note: Result<Json<NoteContent>, JsonError<'_>>,
) -> ApiResult<(Status, Json<Created<NoteId>>)> {
    let note = json_body(note)?;
    let created = store.create_note(NotebookId(path_id(id, "notebook")?), user.0, &note.content).await?;
    Ok((Status::Created, Json(Created { id: created.id })))
}

#[put("/notes/<id>", data = "<note>")]
pub async fn update_note(
    user: Authenticated,
    id: PathId<'_>,
    store: &State<Arc<dyn NoteStore>>,
    note: Result<Json<NoteContent>, JsonError<'_>>,
) -> ApiResult<Status> {
    let note = json_body(note)?;
    store.update_note(NoteId(path_id(id, "note")?), user.0, &note.content).await?;
    Ok(Status::Ok)
}

#[delete("/notes/<id>")]
pub async fn delete_note(
    user: Authenticated,
    id: PathId<'_>,
    store: &State<Arc<dyn NoteStore>>,
    app_config: &State<AppConfig>,
) -> ApiResult<Status> {
    let removed = store.delete_note(NoteId(path_id(id, "note")?), user.0).await?;
    remove_image_files(&app_config.uploads_directory, &removed).await;
    Ok(Status::Ok)
}
