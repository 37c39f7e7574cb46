pub const DEFAULT_CONFIG_FILE: &str = "/etc/jotter/jotter.toml";
pub const APP_CONFIG_ENV_PREFIX: &str = "JOTTER_";
pub const COOKIE_SECRET_ENV: &str = "COOKIE_SECRET";

/// Signing secret used when none is configured.
///
/// It is public knowledge, so anyone can forge `auth_token` cookies for a
/// deployment that runs with it. Development only: set `COOKIE_SECRET`
/// (or `cookie_secret` in the config file) in production.
pub const INSECURE_DEV_COOKIE_SECRET: &str = "jotter-dev-secret-key-change-in-prod";

// the defaults are taken from the argon2 crate itself
pub const DEFAULT_ARGON2_M_COST: u32 = 19 * 1024;
pub const DEFAULT_ARGON2_T_COST: u32 = 2;
pub const DEFAULT_ARGON2_P_COST: u32 = 1;
pub const DEFAULT_ARGON2_OUTPUT_LEN: Option<usize> = Some(32);
