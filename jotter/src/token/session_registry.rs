
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use log::{trace, warn};
use tokio::sync::RwLock;
use crate::identity::UserId;
use crate::lib_constants::SESSION_TOKEN_SIZE;
use crate::rng::random_token;
use crate::token::TokenError;

pub(super) trait SessionRegistryIo: Send + Sync {
    fn gen_session_token(&self) -> String;
}

pub struct ProductionSessionRegistryIo;

impl SessionRegistryIo for ProductionSessionRegistryIo {
    fn gen_session_token(&self) -> String {
        random_token(&mut rand::rng(), SESSION_TOKEN_SIZE)
    }
}

pub type SessionRegistry = SessionRegistryImpl<ProductionSessionRegistryIo>;

/// Opaque session tokens mapped to their owners.
///
/// Kept in memory only: restarting the process logs everybody out.
/// Sessions never expire on their own, only [`delete`](Self::delete) ends one.
#[allow(private_bounds)]
pub struct SessionRegistryImpl<Io: SessionRegistryIo> {
    sessions: RwLock<HashMap<String, UserId>>,
    io: Io,
}

impl SessionRegistry {
    pub fn new() -> Self {
        SessionRegistryImpl::new_internal(ProductionSessionRegistryIo)
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(private_bounds)]
impl<Io: SessionRegistryIo> SessionRegistryImpl<Io> {
    fn new_internal(io: Io) -> Self {
        SessionRegistryImpl {
            sessions: RwLock::new(HashMap::new()),
            io,
        }
    }

    pub async fn create(&self, user: UserId) -> String {
        let mut sessions = self.sessions.write().await;
        loop {
            let token = self.io.gen_session_token();
            match sessions.entry(token) {
                Entry::Vacant(entry) => {
                    trace!("created session for user {user}");
                    let token = entry.key().clone();
                    entry.insert(user);
                    return token;
                },
                Entry::Occupied(_) => {
                    warn!("session token collision, regenerating");
                },
            }
        }
    }

    pub async fn resolve(&self, token: &str) -> Result<UserId, TokenError> {
        self.sessions.read().await
            .get(token)
            .copied()
            .ok_or(TokenError::SessionNotFound)
    }

    /// Returns whether a session was actually removed.
    pub async fn delete(&self, token: &str) -> bool {
        let removed = self.sessions.write().await
            .remove(token)
            .is_some();
        if removed {
            trace!("session deleted");
        }
        removed
    }

    #[cfg(test)]
    pub(crate) async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    #[cfg(test)]
    pub(crate) async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
