//! # watch-bot
//!
//! Wires config, the Telegram event source and the reconciler into the `msgwatch` binary.

pub mod cli;
pub mod config;
pub mod runner;

pub use cli::{load_config, Cli, Commands, RunArgs};
pub use config::{Overrides, WatchConfig};
pub use runner::{already_reported, build_bot, build_dispatcher, run_watcher};
