use std::sync::Arc;
use async_trait::async_trait;
use jotter::config::app_config::AppConfig;
use jotter::hasher::{ProductionHasher, ProductionHasherConfig};
use jotter::store::{NoteStore, ProductionStore};
use jotter::token::make_verifier;
use log::{error, info};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Build, Rocket};
use crate::access_granter::AccessGranter;
use crate::routes::{ApiRocketBuildExt, WebRocketBuildExt};

pub struct AppSetupFairing;

impl AppSetupFairing {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        AppSetupFairing
    }
}

macro_rules! ok_or_bail {
    ($rocket:ident, $expr:expr, |$e:ident| $error_logger:expr) => ({
        match $expr {
            std::result::Result::Ok(ok) => ok,
            std::result::Result::Err(e) => {
                let $e = e;
                $error_logger;
                return std::result::Result::Err($rocket);
            },
        }
    });
}

#[async_trait]
impl Fairing for AppSetupFairing {
    fn info(&self) -> Info {
        Info {
            name: "app setup",
            kind: Kind::Ignite,
        }
    }

    async fn on_ignite(
        &self,
        rocket: Rocket<Build>,
    ) -> rocket::fairing::Result {
        let app_config = rocket.figment().extract::<AppConfig>();
        let app_config = ok_or_bail!(
            rocket,
            app_config,
            |e| error!("invalid configuration: {e}")
        );

        let hasher_config = ok_or_bail!(
            rocket,
            ProductionHasherConfig::try_from(app_config.hasher_config.clone()),
            |e| error!("invalid hasher configuration: {e}")
        );

        ok_or_bail!(
            rocket,
            tokio::fs::create_dir_all(&app_config.uploads_directory).await,
            |e| error!(
                "failed to create uploads directory {}: {e}",
                app_config.uploads_directory.display(),
            )
        );

        let store = Arc::new(
            ok_or_bail!(
                rocket,
                ProductionStore::new(&app_config).await,
                |e| error!("store initialization failed: {e}")
            )
        );

        let access_granter = AccessGranter::new(
            store.clone(),
            store.clone(),
            Arc::new(ProductionHasher::new(hasher_config)),
            make_verifier(&app_config),
        );
        ok_or_bail!(
            rocket,
            access_granter.prepare().await,
            |e| error!("failed to prepare the access granter: {e}")
        );
        let note_store: Arc<dyn NoteStore> = store;

        info!(
            "serving uploads from {}",
            app_config.uploads_directory.display(),
        );
        let static_directory = app_config.static_directory.clone();
        Ok(
            rocket
                .manage(note_store)
                .manage(access_granter)
                .manage(app_config)
                .install_jotter_api()
                .install_jotter_web(&static_directory)
        )
    }
}
