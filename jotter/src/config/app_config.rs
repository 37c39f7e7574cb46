use std::fmt;
use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::bin_constants::INSECURE_DEV_COOKIE_SECRET;
use crate::config::hasher_config::ProductionHasherConfigData;
use crate::lib_constants::{DEFAULT_DATABASE, DEFAULT_STATIC_DIR, DEFAULT_UPLOADS_DIR};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AppConfig {
    #[serde(default = "app_config_default_database")]
    pub database: PathBuf,

    #[serde(default = "app_config_default_uploads_directory")]
    pub uploads_directory: PathBuf,

    #[serde(default = "app_config_default_static_directory")]
    pub static_directory: PathBuf,

    #[serde(default)]
    pub auth_scheme: AuthScheme,

    #[serde(default)]
    pub cookie_secret: Option<CookieSecret>,

    #[serde(default)]
    pub hasher_config: ProductionHasherConfigData,
}

/// Which kind of token the deployment hands out. Exactly one is active.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthScheme {
    /// Stateless HMAC-signed `auth_token` cookie.
    #[default]
    Signed,

    /// Opaque `session_token` cookie looked up in an in-memory registry.
    Session,
}

#[derive(Clone, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CookieSecret(String);

impl CookieSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        CookieSecret(secret.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for CookieSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CookieSecret(..)")
    }
}

impl AppConfig {
    /// The configured signing secret, or the insecure development fallback
    /// with `false` as the second element.
    pub fn cookie_secret_or_dev_default(&self) -> (CookieSecret, bool) {
        match self.cookie_secret {
            Some(ref secret) if !secret.0.is_empty() => (secret.clone(), true),
            _ => (CookieSecret::new(INSECURE_DEV_COOKIE_SECRET), false),
        }
    }
}

pub fn app_config_default_database() -> PathBuf {
    DEFAULT_DATABASE.into()
}

pub fn app_config_default_uploads_directory() -> PathBuf {
    DEFAULT_UPLOADS_DIR.into()
}

pub fn app_config_default_static_directory() -> PathBuf {
    DEFAULT_STATIC_DIR.into()
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database: app_config_default_database(),
            uploads_directory: app_config_default_uploads_directory(),
            static_directory: app_config_default_static_directory(),
            auth_scheme: AuthScheme::default(),
            cookie_secret: None,
            hasher_config: ProductionHasherConfigData::default(),
        }
    }
}
