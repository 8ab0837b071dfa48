use anyhow::{Context, Result};
use reconciler::{Dispatcher, Reconciler};
use std::path::Path;
use std::sync::Arc;
use teloxide::Bot;
use tracing::{info, instrument};
use watch_core::{
    init_tracing, DiffStyle, HistoryStore, TracingSink, UserDirectory, WatchError,
};
use watch_telegram::{spawn_event_source, SourceOptions, TelegramUserDirectory};

use crate::config::WatchConfig;

/// Creates the teloxide Bot, pointed at `telegram_api_url` when set.
pub fn build_bot(config: &WatchConfig) -> Result<Bot> {
    let bot = Bot::new(config.bot_token.clone());
    match &config.telegram_api_url {
        Some(url) => {
            let url = reqwest::Url::parse(url)
                .with_context(|| format!("Invalid telegram_api_url: {}", url))?;
            Ok(bot.set_api_url(url))
        }
        None => Ok(bot),
    }
}

/// Builds the history, reconciler and dispatcher; notifications go to tracing.
pub fn build_dispatcher(
    config: &WatchConfig,
    directory: Arc<dyn UserDirectory>,
) -> Result<Dispatcher> {
    let history = HistoryStore::new(config.history_length)?;
    let sink = Arc::new(TracingSink::new(config.diff_style));
    Ok(Dispatcher::new(Reconciler::new(history, directory, sink)))
}

/// True for errors the dispatcher already logged as its terminal diagnostic (auth failure); the
/// binary exits non-zero without printing them again.
pub fn already_reported(err: &anyhow::Error) -> bool {
    matches!(err.downcast_ref::<WatchError>(), Some(WatchError::AuthFailed))
}

/// Main entry: validate config, init logging, start the event source, run the dispatcher until
/// the source closes, Ctrl-C, or an authentication failure (returned as an error).
#[instrument(skip(config))]
pub async fn run_watcher(config: WatchConfig) -> Result<()> {
    config.validate()?;
    if let Some(parent) = config
        .log_file
        .as_deref()
        .and_then(|p| Path::new(p).parent())
        .filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent).context("Failed to create log directory")?;
    }
    init_tracing(
        config.log_file.as_deref(),
        config.diff_style == DiffStyle::Ansi,
    )?;

    info!(
        history_length = config.history_length,
        diff_style = ?config.diff_style,
        "Initializing watcher"
    );

    let bot = build_bot(&config)?;
    let directory = TelegramUserDirectory::new();
    let mut dispatcher = build_dispatcher(&config, Arc::new(directory.clone()))?;
    let (events, poller) = spawn_event_source(
        bot,
        directory,
        SourceOptions {
            poll_timeout_secs: config.poll_timeout_secs,
            ..SourceOptions::default()
        },
    );

    let result = tokio::select! {
        result = dispatcher.run(events) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown requested");
            Ok(())
        }
    };
    poller.abort();

    result?;
    info!("Watcher stopped");
    Ok(())
}
