use std::path::Path;
use rocket::figment::Figment;
use rocket::figment::providers::{Env, Format, Serialized, Toml};
use crate::bin_constants::{APP_CONFIG_ENV_PREFIX, COOKIE_SECRET_ENV};
use crate::config::app_config::AppConfig;
use crate::lib_constants::DEFAULT_MAX_IMAGE_SIZE;

// multipart framing around the image itself
const DATA_FORM_OVERHEAD: u64 = 64 * 1024;

pub trait FigmentExt {
    fn setup_app_config(
        self,
        config_file: impl AsRef<Path>,
    ) -> Figment;

    fn setup_app_defaults(self) -> Figment;
}

impl FigmentExt for Figment {
    fn setup_app_config(self, config_file: impl AsRef<Path>) -> Figment {
        self.setup_app_defaults()
            .merge(Toml::file_exact(config_file))
            .merge(Env::prefixed(APP_CONFIG_ENV_PREFIX).global())
            .merge(Env::raw().only(&[COOKIE_SECRET_ENV]).global())
    }

    fn setup_app_defaults(self) -> Figment {
        self.merge(Serialized::defaults(AppConfig::default()))
            .merge(Serialized::default("limits.file", DEFAULT_MAX_IMAGE_SIZE))
            .merge(
                Serialized::default(
                    "limits.data-form",
                    DEFAULT_MAX_IMAGE_SIZE + DATA_FORM_OVERHEAD,
                )
            )
    }
}
