//! Shared test helpers: recording sink, mocked user directory, reconciler builder.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockall::mock;
use reconciler::Reconciler;
use watch_core::{
    HistoryStore, LookupError, Notification, NotificationSink, StoredMessage, UserDirectory,
};

mock! {
    pub Directory {}

    #[async_trait]
    impl UserDirectory for Directory {
        async fn display_name(&self, user_id: &str) -> Result<String, LookupError>;
    }
}

/// Sink that keeps every notification for later assertions.
#[derive(Default)]
pub struct RecordingSink {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingSink {
    pub fn taken(&self) -> Vec<Notification> {
        self.notifications.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notification: &Notification) {
        self.notifications.lock().unwrap().push(notification.clone());
    }
}

/// Directory that maps `U<n>` to `user<n>` and fails for anything else.
pub fn lenient_directory() -> MockDirectory {
    let mut directory = MockDirectory::new();
    directory.expect_display_name().returning(|id| {
        id.strip_prefix('U')
            .map(|n| format!("user{}", n))
            .ok_or_else(|| LookupError::Unknown(id.to_string()))
    });
    directory
}

pub fn build_reconciler(
    capacity: usize,
    directory: MockDirectory,
) -> (Reconciler, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let reconciler = Reconciler::new(
        HistoryStore::new(capacity).unwrap(),
        Arc::new(directory),
        sink.clone(),
    );
    (reconciler, sink)
}

pub fn msg(channel: &str, ts: &str, text: &str) -> StoredMessage {
    StoredMessage::new(text, "U1", channel, ts)
}

pub fn snapshot(reconciler: &Reconciler) -> Vec<StoredMessage> {
    reconciler.history().iter().cloned().collect()
}
