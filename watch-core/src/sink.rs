//! Outbound notification channel.

use crate::diff::DiffStyle;
use crate::types::Notification;

/// Accepts edit and delete notifications produced by the reconciler.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: &Notification);
}

/// Writes each notification as one `info` line under the `msgwatch::notify` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink {
    style: DiffStyle,
}

impl TracingSink {
    pub fn new(style: DiffStyle) -> Self {
        Self { style }
    }
}

impl NotificationSink for TracingSink {
    fn notify(&self, notification: &Notification) {
        tracing::info!(target: "msgwatch::notify", "{}", notification.render(self.style));
    }
}
