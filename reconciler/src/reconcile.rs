//! Matches change and delete events against retained messages.

use std::sync::Arc;

use tracing::{debug, info, instrument};
use watch_core::{
    diff_chars, HistoryStore, Notification, NotificationSink, StoredMessage, UserDirectory,
};

/// What the reconciler decided for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// New message stored.
    Appended,
    /// Stored text replaced and an edit notification emitted.
    Edited,
    /// Edit matched a stored message whose text was already identical; nothing changed.
    Unchanged,
    /// Edit for a message outside the retained window; stored as new, no diff.
    EditAppended,
    /// Stored message removed and a delete notification emitted.
    Deleted,
    /// Delete for a message outside the retained window; nothing happened.
    DeleteIgnored,
}

/// Owns the [`HistoryStore`] and applies one event at a time to it.
pub struct Reconciler {
    history: HistoryStore,
    directory: Arc<dyn UserDirectory>,
    sink: Arc<dyn NotificationSink>,
}

impl Reconciler {
    pub fn new(
        history: HistoryStore,
        directory: Arc<dyn UserDirectory>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            history,
            directory,
            sink,
        }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Appends unconditionally.
    pub fn on_new_message(&mut self, message: StoredMessage) -> Disposition {
        debug!(
            channel = %message.channel,
            timestamp = %message.timestamp,
            author = %message.author,
            "Storing new message"
        );
        if let Some(evicted) = self.history.append(message) {
            debug!(
                channel = %evicted.channel,
                timestamp = %evicted.timestamp,
                "Evicted oldest message"
            );
        }
        Disposition::Appended
    }

    /// Diffs against the stored text; unknown keys are stored as new messages.
    #[instrument(skip(self, new_text, author))]
    pub async fn on_message_changed(
        &mut self,
        channel: &str,
        original_timestamp: &str,
        new_text: &str,
        author: &str,
    ) -> Disposition {
        let Some((position, stored)) = self.history.find_by_key(channel, original_timestamp)
        else {
            debug!("Edited message not retained, storing as new");
            self.history.append(StoredMessage::new(
                new_text,
                author,
                channel,
                original_timestamp,
            ));
            return Disposition::EditAppended;
        };

        let diff = diff_chars(&stored.text, new_text);
        if !diff.has_changes() {
            debug!("Edit left text unchanged");
            return Disposition::Unchanged;
        }

        let author_id = stored.author.clone();
        self.history.update_text_at(position, new_text);
        let author_name = self.resolve_author(&author_id).await;
        self.sink.notify(&Notification::Edited { author_name, diff });
        info!(author = %author_id, "step: edit reported");
        Disposition::Edited
    }

    /// Removes and reports a retained message; unknown keys are ignored.
    #[instrument(skip(self))]
    pub async fn on_message_deleted(
        &mut self,
        channel: &str,
        original_timestamp: &str,
    ) -> Disposition {
        let Some((position, _)) = self.history.find_by_key(channel, original_timestamp) else {
            debug!("Deleted message not retained, ignoring");
            return Disposition::DeleteIgnored;
        };

        let Some(removed) = self.history.remove_at(position) else {
            return Disposition::DeleteIgnored;
        };
        let author_name = self.resolve_author(&removed.author).await;
        self.sink.notify(&Notification::Deleted {
            author_name,
            text: removed.text,
        });
        info!(author = %removed.author, "step: deletion reported");
        Disposition::Deleted
    }

    /// Best effort: a failed lookup yields an empty name.
    async fn resolve_author(&self, user_id: &str) -> String {
        match self.directory.display_name(user_id).await {
            Ok(name) => name,
            Err(e) => {
                debug!(user_id = %user_id, error = %e, "Author lookup failed");
                String::new()
            }
        }
    }
}
