use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use jotter::config::app_config::AppConfig;
use jotter::data::{ImageId, NoteId};
use jotter::store::NoteStore;
use log::{debug, error, warn};
use rocket::form::{Errors, Form};
use rocket::fs::{NamedFile, TempFile};
use rocket::http::{ContentType, Status};
use rocket::serde::json::Json;
use rocket::{delete, get, post, FromForm, State};
use time::OffsetDateTime;
use crate::http::{ApiError, ApiResult};
use crate::routes::api::authentication_guard::Authenticated;
use crate::routes::api::model::ImageResponse;
use crate::routes::api::{path_id, PathId};

#[derive(FromForm)]
pub struct ImageUpload<'r> {
    note_id: i64,
    image: TempFile<'r>,
}

fn image_extension(content_type: Option<&ContentType>) -> Option<&'static str> {
    let content_type = content_type?;
    if content_type.is_jpeg() {
        Some("jpg")
    } else if content_type.is_png() {
        Some("png")
    } else if content_type.is_gif() {
        Some("gif")
    } else if content_type.is_webp() {
        Some("webp")
    } else {
        None
    }
}

pub(super) async fn remove_image_files(uploads_directory: &Path, filenames: &[String]) {
    for filename in filenames {
        remove_image_file(&uploads_directory.join(filename)).await;
    }
}

async fn remove_image_file(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!("removed {}", path.display()),
        Err(e) if e.kind() == ErrorKind::NotFound =>
            warn!("image file {} was already gone", path.display()),
        Err(e) => error!("failed to remove {}: {e}", path.display()),
    }
}

/// Stores the image unmodified under `<user>_<note>_<nanos>.<ext>`.
#[post("/images", data = "<upload>")]
pub async fn upload_image(
    user: Authenticated,
    store: &State<Arc<dyn NoteStore>>,
    app_config: &State<AppConfig>,
    upload: Result<Form<ImageUpload<'_>>, Errors<'_>>,
) -> ApiResult<(Status, Json<ImageResponse>)> {
    let mut upload = upload
        .map_err(|e| ApiError::bad_request(format!("invalid upload: {e}")))?
        .into_inner();
    let extension = image_extension(upload.image.content_type())
        .ok_or_else(|| ApiError::bad_request("unsupported image type"))?;
    let note = NoteId(upload.note_id);
    let filename = format!(
        "{}_{}_{}.{}",
        user.0,
        note,
        OffsetDateTime::now_utc().unix_timestamp_nanos(),
        extension,
    );
    let path = app_config.uploads_directory.join(&filename);
    upload.image.move_copy_to(&path)
        .await
        .map_err(|e| {
            error!("failed to save upload to {}: {e}", path.display());
            ApiError::Internal
        })?;
    match store.add_image(note, user.0, &filename).await {
        Ok(image) => Ok((Status::Created, Json(image.into()))),
        Err(e) => {
            remove_image_file(&path).await;
            Err(e.into())
        },
    }
}

#[delete("/images/<id>")]
pub async fn delete_image(
    user: Authenticated,
    id: PathId<'_>,
    store: &State<Arc<dyn NoteStore>>,
    app_config: &State<AppConfig>,
) -> ApiResult<Status> {
    let image = store.delete_image(ImageId(path_id(id, "image")?), user.0).await?;
    remove_image_file(&app_config.uploads_directory.join(&image.filename)).await;
    Ok(Status::Ok)
}

/// Mounted under the uploads prefix.
#[get("/<id>")]
pub async fn serve_image(
    user: Authenticated,
    id: PathId<'_>,
    store: &State<Arc<dyn NoteStore>>,
    app_config: &State<AppConfig>,
) -> ApiResult<NamedFile> {
    let id = ImageId(path_id(id, "image")?);
    let image = store.find_image(id, user.0).await?;
    let path = app_config.uploads_directory.join(&image.filename);
    NamedFile::open(&path)
        .await
        .map_err(|e| {
            warn!("image {id} has no file at {}: {e}", path.display());
            ApiError::NotFound
        })
}
