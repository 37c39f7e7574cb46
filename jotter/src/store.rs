//! Users, notebooks, notes and image records.
//!
//! Every resource operation takes the requesting user and only ever touches
//! rows that user owns. A row owned by somebody else is indistinguishable
//! from a missing one: both are [`StoreError::NotFound`].

mod errors;
mod internal;

use async_trait::async_trait;
use argon2::password_hash::PasswordHashString;
use crate::data::{ImageId, NoteId, NoteImage, NoteWithImages, Note, Notebook, NotebookId, TimeRange, UserRecord};
use crate::identity::UserId;
use crate::username_string::UsernameString;

pub use errors::StoreError;
pub use internal::{ProductionStore, StoreImpl};

#[async_trait]
pub trait UserDb: Send + Sync {
    /// Fails with [`StoreError::UsernameTaken`] without changing anything
    /// if the name is in use.
    async fn create_user(
        &self,
        username: &UsernameString,
        password_hash: PasswordHashString,
    ) -> Result<UserId, StoreError>;

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, StoreError>;

    async fn username_of(
        &self,
        user: UserId,
    ) -> Result<Option<UsernameString>, StoreError>;
}

#[async_trait]
pub trait NoteStore: Send + Sync {
    async fn create_notebook(
        &self,
        owner: UserId,
        name: &str,
    ) -> Result<Notebook, StoreError>;

    /// Ordered by creation.
    async fn list_notebooks(
        &self,
        owner: UserId,
    ) -> Result<Vec<Notebook>, StoreError>;

    async fn find_notebook_by_name(
        &self,
        owner: UserId,
        name: &str,
    ) -> Result<Option<Notebook>, StoreError>;

    /// Removes the notebook with its notes and image records, returning the
    /// filenames of the removed images.
    async fn delete_notebook(
        &self,
        id: NotebookId,
        owner: UserId,
    ) -> Result<Vec<String>, StoreError>;

    async fn create_note(
        &self,
        notebook: NotebookId,
        owner: UserId,
        content: &str,
    ) -> Result<Note, StoreError>;

    /// Newest first.
    async fn list_notes(
        &self,
        notebook: NotebookId,
        owner: UserId,
        range: TimeRange,
    ) -> Result<Vec<NoteWithImages>, StoreError>;

    async fn update_note(
        &self,
        id: NoteId,
        owner: UserId,
        content: &str,
    ) -> Result<(), StoreError>;

    /// Returns the filenames of the images the note had.
    async fn delete_note(
        &self,
        id: NoteId,
        owner: UserId,
    ) -> Result<Vec<String>, StoreError>;

    async fn add_image(
        &self,
        note: NoteId,
        owner: UserId,
        filename: &str,
    ) -> Result<NoteImage, StoreError>;

    async fn find_image(
        &self,
        id: ImageId,
        owner: UserId,
    ) -> Result<NoteImage, StoreError>;

    async fn delete_image(
        &self,
        id: ImageId,
        owner: UserId,
    ) -> Result<NoteImage, StoreError>;
}
