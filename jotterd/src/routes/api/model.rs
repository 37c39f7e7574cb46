use jotter::data::{ImageId, NoteId, NoteImage, NoteWithImages, Notebook, NotebookId};
use jotter::identity::UserId;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use crate::app_constants::UPLOADS_PREFIX;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: UserId,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct Created<Id> {
    pub id: Id,
}

#[derive(Debug, Deserialize)]
pub struct NewNotebook {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct NotebookResponse {
    pub id: NotebookId,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Notebook> for NotebookResponse {
    fn from(value: Notebook) -> Self {
        NotebookResponse {
            id: value.id,
            name: value.name,
            created_at: value.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NoteContent {
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub id: NoteId,
    pub notebook_id: NotebookId,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub images: Vec<ImageResponse>,
}

impl From<NoteWithImages> for NoteResponse {
    fn from(value: NoteWithImages) -> Self {
        NoteResponse {
            id: value.note.id,
            notebook_id: value.note.notebook,
            content: value.note.content,
            created_at: value.note.created_at,
            images: value.images.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    pub id: ImageId,
    pub note_id: NoteId,
    pub filename: String,
    pub url: String,
}

impl From<NoteImage> for ImageResponse {
    fn from(value: NoteImage) -> Self {
        ImageResponse {
            id: value.id,
            note_id: value.note,
            url: format!("{UPLOADS_PREFIX}/{}", value.id),
            filename: value.filename,
        }
    }
}
