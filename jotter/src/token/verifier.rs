
use async_trait::async_trait;
use log::{info, warn};
use time::Duration;
use crate::config::app_config::{AppConfig, AuthScheme};
use crate::identity::UserId;
use crate::lib_constants::{AUTH_TOKEN_COOKIE, SESSION_TOKEN_COOKIE, SIGNED_TOKEN_LIFETIME};
use crate::token::session_registry::SessionRegistryIo;
use crate::token::{SessionRegistry, SessionRegistryImpl, SignedTokenCodec, TokenError};

/// Turns a user id into a cookie value and back.
#[async_trait]
pub trait IdentityVerifier: Send + Sync + 'static {
    fn cookie_name(&self) -> &'static str;

    /// `None` means the cookie lives for the browser session.
    fn token_lifetime(&self) -> Option<Duration>;

    async fn issue(&self, user: UserId) -> String;

    async fn verify(&self, token: &str) -> Result<UserId, TokenError>;

    /// Makes `token` unusable, where the strategy is able to.
    async fn revoke(&self, token: &str);
}

#[async_trait]
impl IdentityVerifier for SignedTokenCodec {
    fn cookie_name(&self) -> &'static str {
        AUTH_TOKEN_COOKIE
    }

    fn token_lifetime(&self) -> Option<Duration> {
        Some(SIGNED_TOKEN_LIFETIME)
    }

    async fn issue(&self, user: UserId) -> String {
        SignedTokenCodec::issue(self, user)
    }

    async fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        self.validate(token)
    }

    // stateless: a copied token stays valid until it expires
    async fn revoke(&self, _token: &str) {}
}

#[allow(private_bounds)]
#[async_trait]
impl<Io: SessionRegistryIo + 'static> IdentityVerifier for SessionRegistryImpl<Io> {
    fn cookie_name(&self) -> &'static str {
        SESSION_TOKEN_COOKIE
    }

    fn token_lifetime(&self) -> Option<Duration> {
        None
    }

    async fn issue(&self, user: UserId) -> String {
        self.create(user).await
    }

    async fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        self.resolve(token).await
    }

    async fn revoke(&self, token: &str) {
        self.delete(token).await;
    }
}

pub fn make_verifier(app_config: &AppConfig) -> Box<dyn IdentityVerifier> {
    match app_config.auth_scheme {
        AuthScheme::Signed => {
            let (secret, configured) = app_config.cookie_secret_or_dev_default();
            if !configured {
                warn!("no cookie secret configured, using the insecure development secret");
            }
            info!("using signed token authentication");
            Box::new(SignedTokenCodec::new(&secret))
        },
        AuthScheme::Session => {
            info!("using session registry authentication");
            Box::new(SessionRegistry::new())
        },
    }
}
