//! Environment layer: BOT_TOKEN, HISTORY_LENGTH, LOG_FILE, TELEGRAM_API_URL (or TELOXIDE_API_URL).

use std::env;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvConfig {
    pub bot_token: Option<String>,
    pub history_length: Option<usize>,
    pub log_file: Option<String>,
    pub telegram_api_url: Option<String>,
}

impl EnvConfig {
    /// Reads the process environment. Unparsable HISTORY_LENGTH is treated as unset.
    pub fn from_env() -> Self {
        let bot_token = env::var("BOT_TOKEN").ok().filter(|s| !s.is_empty());
        let history_length = env::var("HISTORY_LENGTH")
            .ok()
            .and_then(|s| s.trim().parse().ok());
        let log_file = env::var("LOG_FILE").ok().filter(|s| !s.is_empty());
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();

        Self {
            bot_token,
            history_length,
            log_file,
            telegram_api_url,
        }
    }
}
