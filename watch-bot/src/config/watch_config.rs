//! WatchConfig: CLI overrides over the TOML file over the environment over defaults.

use anyhow::Result;
use std::path::{Path, PathBuf};
use watch_core::DiffStyle;

use super::{EnvConfig, FileConfig, DEFAULT_CONFIG_PATH};

pub const DEFAULT_HISTORY_LENGTH: usize = 1000;
pub const DEFAULT_POLL_TIMEOUT_SECS: u32 = 30;

/// Values given on the command line. `length == Some(0)` counts as unset.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_path: Option<PathBuf>,
    pub token: Option<String>,
    pub length: Option<usize>,
    pub log_file: Option<String>,
    pub color: bool,
}

/// Resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    pub bot_token: String,
    /// Capacity of the message history; always ≥ 1.
    pub history_length: usize,
    pub log_file: Option<String>,
    pub telegram_api_url: Option<String>,
    pub diff_style: DiffStyle,
    pub poll_timeout_secs: u32,
}

impl WatchConfig {
    /// Loads the config file (explicit path must exist; the default path may be absent) and the
    /// environment, then applies `overrides`. Call validate() before use.
    pub fn load(overrides: Overrides) -> Result<Self> {
        let file = match &overrides.config_path {
            Some(path) => FileConfig::load(path, true)?,
            None => FileConfig::load(Path::new(DEFAULT_CONFIG_PATH), false)?,
        };
        Self::resolve(overrides, file, EnvConfig::from_env())
    }

    /// Merges the layers. Fails with "No credential" when no layer supplies a token.
    pub fn resolve(overrides: Overrides, file: FileConfig, env: EnvConfig) -> Result<Self> {
        let bot_token = [overrides.token, file.token, env.bot_token]
            .into_iter()
            .flatten()
            .find(|t| !t.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("No credential"))?;

        let history_length = [overrides.length, file.length, env.history_length]
            .into_iter()
            .flatten()
            .find(|&n| n > 0)
            .unwrap_or(DEFAULT_HISTORY_LENGTH);

        let log_file = overrides.log_file.or(file.log_file).or(env.log_file);
        let telegram_api_url = file.telegram_api_url.or(env.telegram_api_url);

        let diff_style = if overrides.color || file.color.unwrap_or(false) {
            DiffStyle::Ansi
        } else {
            DiffStyle::Markers
        };

        let poll_timeout_secs = file
            .poll_timeout_secs
            .unwrap_or(DEFAULT_POLL_TIMEOUT_SECS);

        Ok(Self {
            bot_token,
            history_length,
            log_file,
            telegram_api_url,
            diff_style,
            poll_timeout_secs,
        })
    }

    /// Validate config (e.g. telegram_api_url must be a valid URL if set).
    pub fn validate(&self) -> Result<()> {
        if self.history_length == 0 {
            anyhow::bail!("history length must be at least 1");
        }
        if let Some(ref url_str) = self.telegram_api_url {
            if reqwest::Url::parse(url_str).is_err() {
                anyhow::bail!(
                    "TELEGRAM_API_URL (or telegram_api_url) is set but not a valid URL: {}",
                    url_str
                );
            }
        }
        Ok(())
    }
}
