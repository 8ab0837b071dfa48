//! CLI parser and config loading.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{Overrides, WatchConfig};

#[derive(Parser)]
#[command(name = "msgwatch")]
#[command(about = "Reports edited and deleted chat messages", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Watch the chat stream (config from file and env; flags override both).
    Run(RunArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Path of the TOML config file (default: config.tml, optional).
    #[arg(short = 'f', long = "config")]
    pub config: Option<PathBuf>,
    /// Bot token; overrides the config file and BOT_TOKEN.
    #[arg(short, long)]
    pub token: Option<String>,
    /// Number of messages to retain.
    #[arg(short, long)]
    pub length: Option<usize>,
    /// Also append log output to this file.
    #[arg(long)]
    pub log_file: Option<String>,
    /// Colour diffs with ANSI escapes instead of [-deleted-]{+inserted+} markers.
    #[arg(long)]
    pub color: bool,
}

impl RunArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            config_path: self.config.clone(),
            token: self.token.clone(),
            length: self.length,
            log_file: self.log_file.clone(),
            color: self.color,
        }
    }
}

/// Load WatchConfig from file and environment, with CLI flags on top.
pub fn load_config(args: &RunArgs) -> Result<WatchConfig> {
    WatchConfig::load(args.overrides())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_flags() {
        let cli = Cli::try_parse_from([
            "msgwatch", "run", "-f", "watch.toml", "-t", "tok", "-l", "25", "--color",
        ])
        .unwrap();

        let Commands::Run(args) = cli.command;
        assert_eq!(args.config, Some(PathBuf::from("watch.toml")));
        assert_eq!(args.token.as_deref(), Some("tok"));
        assert_eq!(args.length, Some(25));
        assert!(args.color);
        assert!(args.log_file.is_none());

        let overrides = args.overrides();
        assert_eq!(overrides.length, Some(25));
        assert!(overrides.color);
    }

    #[test]
    fn test_parse_rejects_negative_length() {
        assert!(Cli::try_parse_from(["msgwatch", "run", "-l", "-3"]).is_err());
    }
}
