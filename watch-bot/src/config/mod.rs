//! Watcher configuration: TOML file + environment + CLI overrides.

mod env;
mod file;
mod watch_config;


pub use env::EnvConfig;
pub use file::{FileConfig, DEFAULT_CONFIG_PATH};
pub use watch_config::{
    Overrides, WatchConfig, DEFAULT_HISTORY_LENGTH, DEFAULT_POLL_TIMEOUT_SECS,
};
