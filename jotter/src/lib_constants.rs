use time::Duration;

pub const DEFAULT_DATABASE: &str = "/var/jotter/jotter.toml";
pub const DEFAULT_UPLOADS_DIR: &str = "/var/jotter/uploads";
pub const DEFAULT_STATIC_DIR: &str = "/usr/share/jotter/static";

pub const DEFAULT_MAX_IMAGE_SIZE: u64 = 10 * 1024 * 1024;

pub const DEFAULT_NOTEBOOK_NAME: &str = "Default";

pub const SIGNED_TOKEN_LIFETIME: Duration = Duration::days(7);
pub const SIGNED_TOKEN_SEPARATOR: char = '.';

// 128 bits
pub const SESSION_TOKEN_SIZE: usize = 128 / 8;

pub const STORE_READ_BUF_SIZE: usize = 1024 * 128;

pub const AUTH_TOKEN_COOKIE: &str = "auth_token";
pub const SESSION_TOKEN_COOKIE: &str = "session_token";
