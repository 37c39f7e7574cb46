pub mod access_granter;
pub mod app_constants;
mod app_setup;
pub mod http;
pub mod identity_gate;
mod routes;

use rocket::figment::Figment;
use rocket::{Build, Rocket};

pub use app_setup::AppSetupFairing;
pub use identity_gate::IdentityGate;

/// A fully configured server instance; state and routes are installed when
/// it ignites.
pub fn build_rocket(figment: Figment) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(AppSetupFairing::new())
        .attach(IdentityGate)
}
