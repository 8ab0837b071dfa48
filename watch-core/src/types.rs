//! Core types: retained message, incoming chat event, outgoing notification.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::diff::{DiffStyle, TextDiff};

/// One retained chat message. Identity is the (channel, timestamp) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    pub text: String,
    /// Opaque user id, resolved to a display name only when a notification is emitted.
    pub author: String,
    pub channel: String,
    /// Per-channel unique ordering key. Telegram transports put the message id here.
    pub timestamp: String,
}

impl StoredMessage {
    pub fn new(
        text: impl Into<String>,
        author: impl Into<String>,
        channel: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            channel: channel.into(),
            timestamp: timestamp.into(),
        }
    }

    /// True when this message has the given (channel, timestamp) key.
    pub fn has_key(&self, channel: &str, timestamp: &str) -> bool {
        self.channel == channel && self.timestamp == timestamp
    }
}

/// Ordered event produced by an event source.
///
/// Edits and deletions reference the *original* message's timestamp, not a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    NewMessage(StoredMessage),
    MessageChanged {
        channel: String,
        original_timestamp: String,
        new_text: String,
        /// Used only when the edited message is no longer retained and gets appended.
        author: String,
    },
    MessageDeleted {
        channel: String,
        original_timestamp: String,
    },
    TransportError {
        detail: String,
    },
    AuthFailure,
}

impl ChatEvent {
    /// Short kind label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ChatEvent::NewMessage(_) => "new_message",
            ChatEvent::MessageChanged { .. } => "message_changed",
            ChatEvent::MessageDeleted { .. } => "message_deleted",
            ChatEvent::TransportError { .. } => "transport_error",
            ChatEvent::AuthFailure => "auth_failure",
        }
    }
}

/// Log-worthy result of reconciling an edit or a deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Edited { author_name: String, diff: TextDiff },
    Deleted { author_name: String, text: String },
}

impl Notification {
    pub fn author_name(&self) -> &str {
        match self {
            Notification::Edited { author_name, .. } => author_name,
            Notification::Deleted { author_name, .. } => author_name,
        }
    }

    /// Formats the notification as one line: `[Edited] <name> ...` or `[Deleted] <name> ...`.
    pub fn render(&self, style: DiffStyle) -> String {
        match self {
            Notification::Edited { author_name, diff } => {
                format!("[Edited] <{}> {}", author_name, diff.render(style))
            }
            Notification::Deleted { author_name, text } => {
                format!("[Deleted] <{}> {}", author_name, style.deleted(text))
            }
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DiffStyle::Markers))
    }
}
