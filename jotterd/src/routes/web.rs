use std::path::Path;
use log::info;
use rocket::fs::FileServer;
use rocket::response::content::RawHtml;
use rocket::{get, routes, Build, Rocket};
use crate::app_constants::{STATIC_PREFIX, WEB_PREFIX};

const INDEX_HTML: &str = include_str!("web/index.html");

#[get("/")]
fn index() -> RawHtml<&'static str> {
    RawHtml(INDEX_HTML)
}

pub trait WebRocketBuildExt {
    fn install_jotter_web(self, static_directory: &Path) -> Self;
}

impl WebRocketBuildExt for Rocket<Build> {
    fn install_jotter_web(self, static_directory: &Path) -> Self {
        let rocket = self.mount(WEB_PREFIX, routes![index]);
        if static_directory.is_dir() {
            rocket.mount(STATIC_PREFIX, FileServer::from(static_directory))
        } else {
            info!(
                "static directory {} does not exist, not serving static files",
                static_directory.display(),
            );
            rocket
        }
    }
}
