//! # watch-telegram
//!
//! Telegram event source for the message watcher: teloxide's polling listener with backoff,
//! adapters from teloxide updates to [`watch_core::ChatEvent`], and a
//! [`watch_core::UserDirectory`] learned from observed senders. No history or reconciliation logic lives here.

mod adapters;
mod directory;
mod source;

pub use adapters::{author_id, display_name, message_text, update_sender, update_to_events};
pub use directory::{TelegramUserDirectory, DEFAULT_DIRECTORY_CAPACITY};
pub use source::{
    allowed_updates, classify_error, retry_delay, spawn_event_source, SourceOptions,
};
