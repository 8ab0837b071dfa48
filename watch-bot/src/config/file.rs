//! TOML config file: every key optional.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Default config file path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.tml";

/// Contents of the TOML config file.
///
/// ```toml
/// token = "123456:ABC"
/// length = 500
/// log_file = "logs/msgwatch.log"
/// color = true
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub token: Option<String>,
    pub length: Option<usize>,
    pub log_file: Option<String>,
    pub telegram_api_url: Option<String>,
    pub color: Option<bool>,
    pub poll_timeout_secs: Option<u32>,
}

impl FileConfig {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Invalid config file")
    }

    /// Reads `path`. A missing file is an error only when `required`; otherwise it yields defaults.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        if !required && !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Load config error: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Load config error: {}", path.display()))
    }
}
