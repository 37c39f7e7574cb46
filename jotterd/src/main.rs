mod cli;

use clap::{crate_name, Parser};
use jotter::config::figment::FigmentExt;
use jotter::error_exit;
use jotter::logging::{init_daemon_logging, LogTarget};
use log::info;
use rocket::figment::Figment;
use crate::cli::CliConfig;

fn main() {
    let cli_config = CliConfig::parse();
    init_daemon_logging(
        if cli_config.syslog {
            LogTarget::Syslog
        } else {
            LogTarget::Stderr
        }
    );

    info!("{} starting up", crate_name!());

    if !cli_config.config_file.exists() {
        error_exit!(
            "configuration file at {} does not exist",
            cli_config.config_file.display()
        )
    }
    let figment = Figment::from(rocket::Config::default())
        .setup_app_config(&cli_config.config_file);

    let result = rocket::execute(
        jotterd::build_rocket(figment).launch()
    );
    if let Err(e) = result {
        error_exit!("failed to launch rocket: {}", e);
    }
}
