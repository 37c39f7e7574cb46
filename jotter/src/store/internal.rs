use std::collections::{BTreeMap, HashMap};
use async_trait::async_trait;
use argon2::password_hash::PasswordHashString;
use log::{debug, error, info, trace};
use tokio::sync::RwLock;
use crate::config::app_config::AppConfig;
use crate::data::{ImageId, Note, NoteId, NoteImage, NoteWithImages, Notebook, NotebookId, TimeRange, UserRecord};
use crate::identity::UserId;
use crate::store::{NoteStore, StoreError, UserDb};
use crate::username_string::UsernameString;
use data::StoreData;
use io_trait::{ProductionStoreIo, StoreIo};

mod data;
mod io_trait;

pub type ProductionStore = StoreImpl<ProductionStoreIo>;

/// The whole database lives in memory and is written back to a TOML file
/// after every change. A change that fails to persist is not applied.
#[allow(private_bounds)]
pub struct StoreImpl<Io: StoreIo> {
    state: RwLock<State>,
    io: Io,
}

#[derive(Clone, Debug, Default)]
struct State {
    next_user_id: i64,
    next_notebook_id: i64,
    next_note_id: i64,
    next_image_id: i64,
    users: BTreeMap<UserId, UserRecord>,
    user_by_name: HashMap<String, UserId>,
    notebooks: BTreeMap<NotebookId, Notebook>,
    notes: BTreeMap<NoteId, Note>,
    images: BTreeMap<ImageId, NoteImage>,
}

fn next_id(persisted: i64, max_existing: Option<i64>) -> i64 {
    persisted
        .max(max_existing.map_or(1, |id| id + 1))
        .max(1)
}

fn take_id(counter: &mut i64) -> i64 {
    let id = *counter;
    *counter += 1;
    id
}

impl From<StoreData> for State {
    fn from(value: StoreData) -> Self {
        let users: BTreeMap<_, UserRecord> = value.users
            .into_iter()
            .map(|u| (u.id, u.into()))
            .collect();
        let notebooks: BTreeMap<_, Notebook> = value.notebooks
            .into_iter()
            .map(|n| (n.id, n.into()))
            .collect();
        let notes: BTreeMap<_, Note> = value.notes
            .into_iter()
            .map(|n| (n.id, n.into()))
            .collect();
        let images: BTreeMap<_, NoteImage> = value.images
            .into_iter()
            .map(|i| (i.id, i.into()))
            .collect();
        State {
            next_user_id: next_id(
                value.next_user_id,
                users.last_key_value().map(|(id, _)| id.get()),
            ),
            next_notebook_id: next_id(
                value.next_notebook_id,
                notebooks.last_key_value().map(|(id, _)| id.0),
            ),
            next_note_id: next_id(
                value.next_note_id,
                notes.last_key_value().map(|(id, _)| id.0),
            ),
            next_image_id: next_id(
                value.next_image_id,
                images.last_key_value().map(|(id, _)| id.0),
            ),
            user_by_name: users
                .values()
                .map(|u| (u.username.as_str().to_owned(), u.id))
                .collect(),
            users,
            notebooks,
            notes,
            images,
        }
    }
}

impl From<&State> for StoreData {
    fn from(value: &State) -> Self {
        StoreData {
            next_user_id: value.next_user_id,
            next_notebook_id: value.next_notebook_id,
            next_note_id: value.next_note_id,
            next_image_id: value.next_image_id,
            users: value.users.values().map(Into::into).collect(),
            notebooks: value.notebooks.values().map(Into::into).collect(),
            notes: value.notes.values().map(Into::into).collect(),
            images: value.images.values().map(Into::into).collect(),
        }
    }
}

impl State {
    fn owned_notebook(
        &self,
        id: NotebookId,
        owner: UserId,
    ) -> Result<&Notebook, StoreError> {
        self.notebooks
            .get(&id)
            .filter(|n| n.owner == owner)
            .ok_or(StoreError::NotFound)
    }

    fn owned_note(
        &self,
        id: NoteId,
        owner: UserId,
    ) -> Result<&Note, StoreError> {
        self.notes
            .get(&id)
            .filter(|n| n.owner == owner)
            .ok_or(StoreError::NotFound)
    }

    fn owned_image(
        &self,
        id: ImageId,
        owner: UserId,
    ) -> Result<&NoteImage, StoreError> {
        let image = self.images
            .get(&id)
            .ok_or(StoreError::NotFound)?;
        self.owned_note(image.note, owner)?;
        Ok(image)
    }

    fn images_of(&self, note: NoteId) -> impl Iterator<Item=&NoteImage> {
        self.images
            .values()
            .filter(move |i| i.note == note)
    }

    fn remove_notes(&mut self, doomed: &[NoteId]) -> Vec<String> {
        let doomed_images: Vec<ImageId> = self.images
            .values()
            .filter(|i| doomed.contains(&i.note))
            .map(|i| i.id)
            .collect();
        for note in doomed {
            self.notes.remove(note);
        }
        doomed_images
            .into_iter()
            .filter_map(|id| self.images.remove(&id))
            .map(|i| i.filename)
            .collect()
    }
}

impl ProductionStore {
    pub async fn new(
        app_config: &AppConfig,
    ) -> Result<ProductionStore, StoreError> {
        Self::new_internal(
            ProductionStoreIo::new(&app_config.database)?,
        ).await
    }
}

#[allow(private_bounds)]
impl<Io: StoreIo> StoreImpl<Io> {
    async fn new_internal(io: Io) -> Result<Self, StoreError> {
        let state: State = io.read_store_file()
            .await
            .inspect_err(|e| error!("failed to read the database: {e}"))?
            .into();
        info!(
            "loaded database: {} users, {} notebooks, {} notes, {} images",
            state.users.len(),
            state.notebooks.len(),
            state.notes.len(),
            state.images.len(),
        );
        Ok(
            StoreImpl {
                state: RwLock::new(state),
                io,
            }
        )
    }

    async fn mutate<T: Send>(
        &self,
        change: impl FnOnce(&mut State, &Io) -> Result<T, StoreError> + Send,
    ) -> Result<T, StoreError> {
        let mut state = self.state.write().await;
        let mut updated = state.clone();
        let result = change(&mut updated, &self.io)?;
        self.io.write_store_file(&StoreData::from(&updated))
            .await
            .inspect_err(|e| error!("failed to write the database: {e}"))?;
        *state = updated;
        Ok(result)
    }
}

#[async_trait]
impl<Io: StoreIo> UserDb for StoreImpl<Io> {
    async fn create_user(
        &self,
        username: &UsernameString,
        password_hash: PasswordHashString,
    ) -> Result<UserId, StoreError> {
        self.mutate(|state, _| {
            if state.user_by_name.contains_key(username.as_str()) {
                return Err(StoreError::UsernameTaken);
            }
            let id = UserId::new(take_id(&mut state.next_user_id));
            state.user_by_name.insert(username.as_str().to_owned(), id);
            state.users.insert(
                id,
                UserRecord {
                    id,
                    username: username.clone(),
                    password_hash,
                },
            );
            debug!("created user {id}");
            Ok(id)
        }).await
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        let state = self.state.read().await;
        Ok(
            state.user_by_name
                .get(username)
                .and_then(|id| state.users.get(id))
                .cloned()
        )
    }

    async fn username_of(
        &self,
        user: UserId,
    ) -> Result<Option<UsernameString>, StoreError> {
        Ok(
            self.state.read().await
                .users
                .get(&user)
                .map(|u| u.username.clone())
        )
    }
}

#[async_trait]
impl<Io: StoreIo> NoteStore for StoreImpl<Io> {
    async fn create_notebook(
        &self,
        owner: UserId,
        name: &str,
    ) -> Result<Notebook, StoreError> {
        self.mutate(|state, io| {
            let notebook = Notebook {
                id: NotebookId(take_id(&mut state.next_notebook_id)),
                owner,
                name: name.to_owned(),
                created_at: io.get_time(),
            };
            state.notebooks.insert(notebook.id, notebook.clone());
            trace!("created notebook {} for user {owner}", notebook.id);
            Ok(notebook)
        }).await
    }

    async fn list_notebooks(
        &self,
        owner: UserId,
    ) -> Result<Vec<Notebook>, StoreError> {
        Ok(
            self.state.read().await
                .notebooks
                .values()
                .filter(|n| n.owner == owner)
                .cloned()
                .collect()
        )
    }

    async fn find_notebook_by_name(
        &self,
        owner: UserId,
        name: &str,
    ) -> Result<Option<Notebook>, StoreError> {
        Ok(
            self.state.read().await
                .notebooks
                .values()
                .find(|n| n.owner == owner && n.name == name)
                .cloned()
        )
    }

    async fn delete_notebook(
        &self,
        id: NotebookId,
        owner: UserId,
    ) -> Result<Vec<String>, StoreError> {
        self.mutate(|state, _| {
            state.owned_notebook(id, owner)?;
            state.notebooks.remove(&id);
            let doomed: Vec<NoteId> = state.notes
                .values()
                .filter(|n| n.notebook == id)
                .map(|n| n.id)
                .collect();
            trace!("deleting notebook {id} with {} notes", doomed.len());
            Ok(state.remove_notes(&doomed))
        }).await
    }

    async fn create_note(
        &self,
        notebook: NotebookId,
        owner: UserId,
        content: &str,
    ) -> Result<Note, StoreError> {
        self.mutate(|state, io| {
            state.owned_notebook(notebook, owner)?;
            let note = Note {
                id: NoteId(take_id(&mut state.next_note_id)),
                owner,
                notebook,
                content: content.to_owned(),
                created_at: io.get_time(),
            };
            state.notes.insert(note.id, note.clone());
            Ok(note)
        }).await
    }

    async fn list_notes(
        &self,
        notebook: NotebookId,
        owner: UserId,
        range: TimeRange,
    ) -> Result<Vec<NoteWithImages>, StoreError> {
        let state = self.state.read().await;
        state.owned_notebook(notebook, owner)?;
        let mut notes: Vec<NoteWithImages> = state.notes
            .values()
            .filter(|n| n.notebook == notebook && n.owner == owner)
            .filter(|n| range.contains(n.created_at))
            .map(|n| NoteWithImages {
                note: n.clone(),
                images: state.images_of(n.id).cloned().collect(),
            })
            .collect();
        notes.sort_by(|a, b| {
            b.note.created_at
                .cmp(&a.note.created_at)
                .then(b.note.id.cmp(&a.note.id))
        });
        Ok(notes)
    }

    async fn update_note(
        &self,
        id: NoteId,
        owner: UserId,
        content: &str,
    ) -> Result<(), StoreError> {
        self.mutate(|state, _| {
            state.owned_note(id, owner)?;
            if let Some(note) = state.notes.get_mut(&id) {
                note.content = content.to_owned();
            }
            Ok(())
        }).await
    }

    async fn delete_note(
        &self,
        id: NoteId,
        owner: UserId,
    ) -> Result<Vec<String>, StoreError> {
        self.mutate(|state, _| {
            state.owned_note(id, owner)?;
            Ok(state.remove_notes(&[id]))
        }).await
    }

    async fn add_image(
        &self,
        note: NoteId,
        owner: UserId,
        filename: &str,
    ) -> Result<NoteImage, StoreError> {
        self.mutate(|state, io| {
            state.owned_note(note, owner)?;
            let image = NoteImage {
                id: ImageId(take_id(&mut state.next_image_id)),
                note,
                filename: filename.to_owned(),
                created_at: io.get_time(),
            };
            state.images.insert(image.id, image.clone());
            Ok(image)
        }).await
    }

    async fn find_image(
        &self,
        id: ImageId,
        owner: UserId,
    ) -> Result<NoteImage, StoreError> {
        self.state.read().await
            .owned_image(id, owner)
            .cloned()
    }

    async fn delete_image(
        &self,
        id: ImageId,
        owner: UserId,
    ) -> Result<NoteImage, StoreError> {
        self.mutate(|state, _| {
            state.owned_image(id, owner)?;
            state.images
                .remove(&id)
                .ok_or(StoreError::NotFound)
        }).await
    }
}
