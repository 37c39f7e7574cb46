use argon2::password_hash::PasswordHashString;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use crate::data::{ImageId, Note, NoteId, NoteImage, Notebook, NotebookId, UserRecord};
use crate::identity::UserId;
use crate::username_string::UsernameString;

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub(super) struct StoreData {
    #[serde(default)]
    pub next_user_id: i64,
    #[serde(default)]
    pub next_notebook_id: i64,
    #[serde(default)]
    pub next_note_id: i64,
    #[serde(default)]
    pub next_image_id: i64,

    #[serde(default, rename = "user", skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<UserData>,

    #[serde(default, rename = "notebook", skip_serializing_if = "Vec::is_empty")]
    pub notebooks: Vec<NotebookData>,

    #[serde(default, rename = "note", skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<NoteData>,

    #[serde(default, rename = "image", skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageData>,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub(super) struct UserData {
    pub id: UserId,
    pub username: UsernameString,
    #[serde(with = "crate::serde::password_hash_string")]
    pub password_hash: PasswordHashString,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub(super) struct NotebookData {
    pub id: NotebookId,
    pub owner: UserId,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub(super) struct NoteData {
    pub id: NoteId,
    pub owner: UserId,
    pub notebook: NotebookId,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub(super) struct ImageData {
    pub id: ImageId,
    pub note: NoteId,
    pub filename: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<UserData> for UserRecord {
    fn from(value: UserData) -> Self {
        UserRecord {
            id: value.id,
            username: value.username,
            password_hash: value.password_hash,
        }
    }
}

impl From<&UserRecord> for UserData {
    fn from(value: &UserRecord) -> Self {
        UserData {
            id: value.id,
            username: value.username.clone(),
            password_hash: value.password_hash.clone(),
        }
    }
}

impl From<NotebookData> for Notebook {
    fn from(value: NotebookData) -> Self {
        Notebook {
            id: value.id,
            owner: value.owner,
            name: value.name,
            created_at: value.created_at,
        }
    }
}

impl From<&Notebook> for NotebookData {
    fn from(value: &Notebook) -> Self {
        NotebookData {
            id: value.id,
            owner: value.owner,
            name: value.name.clone(),
            created_at: value.created_at,
        }
    }
}

impl From<NoteData> for Note {
    fn from(value: NoteData) -> Self {
        Note {
            id: value.id,
            owner: value.owner,
            notebook: value.notebook,
            content: value.content,
            created_at: value.created_at,
        }
    }
}

impl From<&Note> for NoteData {
    fn from(value: &Note) -> Self {
        NoteData {
            id: value.id,
            owner: value.owner,
            notebook: value.notebook,
            content: value.content.clone(),
            created_at: value.created_at,
        }
    }
}

impl From<ImageData> for NoteImage {
    fn from(value: ImageData) -> Self {
        NoteImage {
            id: value.id,
            note: value.note,
            filename: value.filename,
            created_at: value.created_at,
        }
    }
}

impl From<&NoteImage> for ImageData {
    fn from(value: &NoteImage) -> Self {
        ImageData {
            id: value.id,
            note: value.note,
            filename: value.filename.clone(),
            created_at: value.created_at,
        }
    }
}
