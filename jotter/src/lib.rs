pub mod config;
pub mod store;
pub mod data;
pub mod identity;
pub mod util;
pub mod lib_constants;
pub mod rng;
pub mod bin_constants;
pub mod hasher;
pub mod serde;
pub mod username_string;
pub mod logging;
pub mod token;
