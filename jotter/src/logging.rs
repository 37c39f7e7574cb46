use std::ffi::OsStr;
use std::path::PathBuf;
use syslog::{BasicLogger, Facility};

/// Logs an error and terminates the process.
#[macro_export]
macro_rules! error_exit {
    ($($arg:tt)+) => ({
        ::log::error!($($arg)+);
        ::std::process::exit(1)
    });
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LogTarget {
    Stderr,
    Syslog,
}

pub fn init_daemon_logging(target: LogTarget) {
    match target {
        LogTarget::Syslog => init_logging_syslog(),
        LogTarget::Stderr => init_logging_env(),
    }
}

fn init_logging_syslog() {
    log
        ::set_boxed_logger(
            Box::new(
                BasicLogger::new(
                    syslog::unix(
                        syslog::Formatter3164 {
                            facility: Facility::LOG_USER,
                            hostname: None,
                            process: std::env::args()
                                .next()
                                .and_then(|name|
                                    PathBuf::from(name)
                                        .file_name()
                                        .map(|n|
                                            OsStr::to_string_lossy(n)
                                                .into_owned()
                                        )
                                )
                                .unwrap_or("".into()),
                            pid: std::process::id(),
                        }
                    ).expect("syslog initialization failed")
                )
            )
        )
        .map(|()| log::set_max_level(log::STATIC_MAX_LEVEL))
        .expect("syslog initialization failed");
}

fn init_logging_env() {
    env_logger::builder()
        .filter_level(
            if cfg!(debug_assertions) {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            }
        )
        .parse_default_env()
        .init()
}
