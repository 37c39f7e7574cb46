pub const API_PREFIX: &str = "/api";
pub const WEB_PREFIX: &str = "/";
pub const UPLOADS_PREFIX: &str = "/uploads";
pub const STATIC_PREFIX: &str = "/static";

pub const API_VERSION: &str = "1";

/// Reachable without a token.
pub const PUBLIC_PATHS: &[&str] = &[
    "/",
    "/api/version",
    "/api/signup",
    "/api/login",
];
pub const PUBLIC_PATH_PREFIXES: &[&str] = &[
    "/static/",
];
