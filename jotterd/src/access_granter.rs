use std::sync::Arc;
use argon2::password_hash::PasswordHashString;
use jotter::hasher::Hasher;
use jotter::identity::UserId;
use jotter::lib_constants::DEFAULT_NOTEBOOK_NAME;
use jotter::store::{NoteStore, StoreError, UserDb};
use jotter::token::{IdentityVerifier, TokenError};
use jotter::username_string::UsernameString;
use log::{debug, info, trace, warn};
use time::Duration;
use tokio::sync::OnceCell;
use tokio::task::spawn_blocking;

mod errors;
mod model;

pub use errors::AccessGranterError;
pub use model::LoginResult;

// hashed once, checked against on logins for unknown usernames
const DUMMY_PASSWORD: &str = "jotter-dummy-password";

/// Accounts and the tokens that prove them.
pub struct AccessGranter {
    user_db: Arc<dyn UserDb>,
    note_store: Arc<dyn NoteStore>,
    hasher: Arc<dyn Hasher>,
    verifier: Box<dyn IdentityVerifier>,
    dummy_hash: OnceCell<PasswordHashString>,
}

impl AccessGranter {
    pub fn new(
        user_db: Arc<dyn UserDb>,
        note_store: Arc<dyn NoteStore>,
        hasher: Arc<dyn Hasher>,
        verifier: Box<dyn IdentityVerifier>,
    ) -> Self {
        AccessGranter {
            user_db,
            note_store,
            hasher,
            verifier,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Computes the hash unknown-user logins are checked against, so the
    /// first such login costs the same as the rest.
    pub async fn prepare(&self) -> Result<(), AccessGranterError> {
        self.dummy_hash().await.map(|_| ())
    }

    pub fn cookie_name(&self) -> &'static str {
        self.verifier.cookie_name()
    }

    pub fn token_lifetime(&self) -> Option<Duration> {
        self.verifier.token_lifetime()
    }

    /// Creates the account along with its default notebook.
    pub async fn signup(
        &self,
        username: &str,
        password: &str,
    ) -> Result<UserId, AccessGranterError> {
        let username: UsernameString = username.parse()?;
        if password.is_empty() {
            return Err(AccessGranterError::EmptyPassword);
        }
        debug!("signing up user \"{username}\"");
        let hash = self.generate_hash(password).await?;
        let user = self.user_db.create_user(&username, hash)
            .await
            .inspect_err(|e| if let StoreError::UsernameTaken = e {
                info!("signup for taken username \"{username}\"");
            })?;
        self.note_store.create_notebook(user, DEFAULT_NOTEBOOK_NAME).await?;
        info!("user \"{username}\" signed up as {user}");
        Ok(user)
    }

    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<LoginResult, AccessGranterError> {
        debug!("logging user {username:?} in");
        let Some(record) = self.user_db.find_user_by_username(username).await? else {
            // same cost as a wrong password
            let dummy_hash = self.dummy_hash().await?.clone();
            self.check_hash(dummy_hash, password).await?;
            warn!("login attempt for unknown user {username:?}");
            return Err(AccessGranterError::InvalidCredentials);
        };
        if !self.check_hash(record.password_hash.clone(), password).await? {
            warn!("wrong password for user {username:?}");
            return Err(AccessGranterError::InvalidCredentials);
        }
        self.ensure_notebook(record.id).await?;
        let token = self.verifier.issue(record.id).await;
        trace!("issued token for user {}", record.id);
        Ok(
            LoginResult {
                user: record.id,
                username: record.username,
                token,
            }
        )
    }

    pub async fn authenticate(&self, token: &str) -> Result<UserId, TokenError> {
        self.verifier.verify(token).await
    }

    pub async fn logout(&self, token: &str) {
        self.verifier.revoke(token).await
    }

    pub async fn username_of(
        &self,
        user: UserId,
    ) -> Result<Option<UsernameString>, AccessGranterError> {
        Ok(self.user_db.username_of(user).await?)
    }

    async fn generate_hash(
        &self,
        password: &str,
    ) -> Result<PasswordHashString, AccessGranterError> {
        let hasher = self.hasher.clone();
        let password = password.to_string();
        Ok(spawn_blocking(move || hasher.generate_hash(&password)).await??)
    }

    async fn check_hash(
        &self,
        hash: PasswordHashString,
        password: &str,
    ) -> Result<bool, AccessGranterError> {
        let hasher = self.hasher.clone();
        let password = password.to_string();
        Ok(
            spawn_blocking(move ||
                hasher.check_hash(hash.password_hash(), &password)
            ).await??
        )
    }

    async fn dummy_hash(&self) -> Result<&PasswordHashString, AccessGranterError> {
        self.dummy_hash
            .get_or_try_init(|| self.generate_hash(DUMMY_PASSWORD))
            .await
    }

    // accounts created before notebooks existed have none
    async fn ensure_notebook(&self, user: UserId) -> Result<(), AccessGranterError> {
        if self.note_store.list_notebooks(user).await?.is_empty() {
            info!("creating the default notebook for user {user}");
            self.note_store.create_notebook(user, DEFAULT_NOTEBOOK_NAME).await?;
        }
        Ok(())
    }
}
