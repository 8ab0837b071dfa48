//! # watch-core
//!
//! Core types and traits for the message watcher: [`HistoryStore`], [`ChatEvent`], [`Notification`],
//! the character-level [`diff`], the [`UserDirectory`] and [`NotificationSink`] seams, and tracing
//! initialization. Transport-agnostic; used by reconciler and watch-telegram.

pub mod diff;
pub mod directory;
pub mod error;
pub mod history;
pub mod logger;
pub mod sink;
pub mod types;

pub use diff::{diff_chars, DiffKind, DiffOp, DiffStyle, TextDiff};
pub use directory::UserDirectory;
pub use error::{LookupError, Result, WatchError};
pub use history::HistoryStore;
pub use logger::init_tracing;
pub use sink::{NotificationSink, TracingSink};
pub use types::{ChatEvent, Notification, StoredMessage};
