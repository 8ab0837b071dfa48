//! Adapters from Telegram (teloxide) updates to watch_core events.
//!
//! Telegram reports edits and deletions against the original message id, so the message id is
//! used as the per-chat key (`timestamp`) of a [`StoredMessage`].

use teloxide::types::{Message, Update, UpdateKind, User};
use watch_core::{ChatEvent, StoredMessage};

/// Maps one update to zero or more chat events. Update kinds other than post/edit/delete yield none.
pub fn update_to_events(update: &Update) -> Vec<ChatEvent> {
    match &update.kind {
        UpdateKind::Message(msg)
        | UpdateKind::ChannelPost(msg)
        | UpdateKind::BusinessMessage(msg) => vec![new_message(msg)],
        UpdateKind::EditedMessage(msg)
        | UpdateKind::EditedChannelPost(msg)
        | UpdateKind::EditedBusinessMessage(msg) => vec![changed_message(msg)],
        UpdateKind::DeletedBusinessMessages(deleted) => {
            let channel = deleted.chat.id.0.to_string();
            deleted
                .message_ids
                .iter()
                .map(|id| ChatEvent::MessageDeleted {
                    channel: channel.clone(),
                    original_timestamp: id.0.to_string(),
                })
                .collect()
        }
        _ => Vec::new(),
    }
}

/// Sender id and display name carried by the update, if any.
pub fn update_sender(update: &Update) -> Option<(String, String)> {
    match &update.kind {
        UpdateKind::Message(msg)
        | UpdateKind::ChannelPost(msg)
        | UpdateKind::BusinessMessage(msg)
        | UpdateKind::EditedMessage(msg)
        | UpdateKind::EditedChannelPost(msg)
        | UpdateKind::EditedBusinessMessage(msg) => message_sender(msg),
        _ => None,
    }
}

fn new_message(msg: &Message) -> ChatEvent {
    ChatEvent::NewMessage(StoredMessage::new(
        message_text(msg),
        author_id(msg),
        msg.chat.id.0.to_string(),
        msg.id.0.to_string(),
    ))
}

fn changed_message(msg: &Message) -> ChatEvent {
    ChatEvent::MessageChanged {
        channel: msg.chat.id.0.to_string(),
        original_timestamp: msg.id.0.to_string(),
        new_text: message_text(msg),
        author: author_id(msg),
    }
}

/// Text or caption; empty for content without either.
pub fn message_text(msg: &Message) -> String {
    msg.text().or_else(|| msg.caption()).unwrap_or("").to_string()
}

/// Sender user id, else the sender chat id (anonymous admins, channel posts), else empty.
pub fn author_id(msg: &Message) -> String {
    if let Some(user) = msg.from.as_ref() {
        return user.id.0.to_string();
    }
    msg.sender_chat
        .as_ref()
        .map(|chat| chat.id.0.to_string())
        .unwrap_or_default()
}

fn message_sender(msg: &Message) -> Option<(String, String)> {
    if let Some(user) = msg.from.as_ref() {
        return Some((user.id.0.to_string(), display_name(user)));
    }
    msg.sender_chat.as_ref().and_then(|chat| {
        chat.title()
            .map(|title| (chat.id.0.to_string(), title.to_string()))
    })
}

/// Username when set, otherwise the full name.
pub fn display_name(user: &User) -> String {
    user.username.clone().unwrap_or_else(|| user.full_name())
}
