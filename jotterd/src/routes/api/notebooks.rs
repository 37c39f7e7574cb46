use std::sync::Arc;
use jotter::config::app_config::AppConfig;
use jotter::data::NotebookId;
use jotter::store::NoteStore;
use jotter::util::StrExt;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{delete, get, post, State};
use crate::http::{ApiError, ApiResult};
use crate::routes::api::authentication_guard::Authenticated;
use crate::routes::api::images::remove_image_files;
use crate::routes::api::{json_body, path_id, PathId};
use crate::routes::api::model::{Created, NewNotebook, NotebookResponse};
use super::JsonError;

#[get("/notebooks")]
pub async fn list_notebooks(
    user: Authenticated,
    store: &State<Arc<dyn NoteStore>>,
) -> ApiResult<Json<Vec<NotebookResponse>>> {
    Ok(
        Json(
            store.list_notebooks(user.0)
                .await?
                .into_iter()
                .map(Into::into)
                .collect()
        )
    )
}

#[post("/notebooks", data = "<notebook>")]
pub async fn create_notebook(
    user: Authenticated,
    store: &State<Arc<dyn NoteStore>>,
    notebook: Result<Json<NewNotebook>, JsonError<'_>>,
) -> ApiResult<(Status, Json<Created<NotebookId>>)> {
    let notebook = json_body(notebook)?;
    let name = notebook.name.nonblank_to_some()
        .ok_or_else(|| ApiError::bad_request("notebook name must not be blank"))?;
    let created = store.create_notebook(user.0, &name).await?;
    Ok((Status::Created, Json(Created { id: created.id })))
}

#[delete("/notebooks/<id>")]
pub async fn delete_notebook(
    user: Authenticated,
    id: PathId<'_>,
    store: &State<Arc<dyn NoteStore>>,
    app_config: &State<AppConfig>,
) -> ApiResult<Status> {
    let removed = store.delete_notebook(NotebookId(path_id(id, "notebook")?), user.0).await?;
    remove_image_files(&app_config.uploads_directory, &removed).await;
    Ok(Status::Ok)
}
