//! Long-polling event source: drives teloxide's [`Polling`] listener in its own task and forwards
//! [`ChatEvent`]s over a channel.

use std::time::Duration;

use futures::StreamExt;
use teloxide::prelude::*;
use teloxide::types::AllowedUpdate;
use teloxide::update_listeners::{AsUpdateStream, Polling};
use teloxide::{ApiError, RequestError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use watch_core::ChatEvent;

use crate::adapters::{update_sender, update_to_events};
use crate::directory::TelegramUserDirectory;

const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(60);

/// Polling parameters.
#[derive(Debug, Clone, Copy)]
pub struct SourceOptions {
    /// Long-poll timeout passed to getUpdates, in seconds.
    pub poll_timeout_secs: u32,
    /// Capacity of the event channel.
    pub buffer: usize,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            poll_timeout_secs: 30,
            buffer: 256,
        }
    }
}

/// Update kinds that can carry a post, an edit or a deletion.
pub fn allowed_updates() -> Vec<AllowedUpdate> {
    vec![
        AllowedUpdate::Message,
        AllowedUpdate::EditedMessage,
        AllowedUpdate::ChannelPost,
        AllowedUpdate::EditedChannelPost,
        AllowedUpdate::BusinessMessage,
        AllowedUpdate::EditedBusinessMessage,
        AllowedUpdate::DeletedBusinessMessages,
    ]
}

/// Invalid token is fatal; every other request error is transient.
pub fn classify_error(err: &RequestError) -> ChatEvent {
    match err {
        RequestError::Api(ApiError::InvalidToken) => ChatEvent::AuthFailure,
        other => ChatEvent::TransportError {
            detail: other.to_string(),
        },
    }
}

/// Delay before retry number `error_count`: 1s doubling up to 60s. Also handed to teloxide's
/// polling listener as its backoff strategy.
pub fn retry_delay(error_count: u32) -> Duration {
    let doublings = error_count.saturating_sub(1).min(6);
    (INITIAL_BACKOFF * (1u32 << doublings)).min(MAX_BACKOFF)
}

/// Spawns the polling task. The receiver yields events in arrival order; the task ends after an
/// [`ChatEvent::AuthFailure`] or once the receiver is dropped.
pub fn spawn_event_source(
    bot: Bot,
    directory: TelegramUserDirectory,
    options: SourceOptions,
) -> (mpsc::Receiver<ChatEvent>, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(options.buffer.max(1));
    let handle = tokio::spawn(poll_updates(bot, directory, options, tx));
    (rx, handle)
}

/// Sends the classified error on; false when polling must stop.
async fn report_error(tx: &mpsc::Sender<ChatEvent>, err: &RequestError) -> bool {
    let event = classify_error(err);
    let fatal = event == ChatEvent::AuthFailure;
    tx.send(event).await.is_ok() && !fatal
}

#[instrument(skip_all)]
async fn poll_updates(
    bot: Bot,
    directory: TelegramUserDirectory,
    options: SourceOptions,
    tx: mpsc::Sender<ChatEvent>,
) {
    // Connect: retry transient failures, stop on a rejected token.
    let mut attempts = 0u32;
    loop {
        match bot.get_me().await {
            Ok(me) => {
                info!(
                    bot_id = me.user.id.0,
                    username = ?me.user.username,
                    "[Ready]"
                );
                break;
            }
            Err(e) => {
                if !report_error(&tx, &e).await {
                    return;
                }
                attempts = attempts.saturating_add(1);
                tokio::time::sleep(retry_delay(attempts)).await;
            }
        }
    }

    let mut polling = Polling::builder(bot)
        .timeout(Duration::from_secs(u64::from(options.poll_timeout_secs)))
        .allowed_updates(allowed_updates())
        .backoff_strategy(retry_delay)
        .build();
    let stream = polling.as_stream();
    tokio::pin!(stream);

    while let Some(result) = stream.next().await {
        match result {
            Ok(update) => {
                if let Some((id, name)) = update_sender(&update) {
                    directory.remember(id, name).await;
                }
                for event in update_to_events(&update) {
                    debug!(kind = event.kind(), "Forwarding event");
                    if tx.send(event).await.is_err() {
                        info!("Event receiver dropped, polling stopped");
                        return;
                    }
                }
            }
            Err(e) => {
                warn!(error = %e, "Polling failed, retrying");
                if !report_error(&tx, &e).await {
                    return;
                }
            }
        }
    }
    info!("Update stream ended");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_delay_doubles_and_caps() {
        let delays: Vec<u64> = (1..=9).map(|n| retry_delay(n).as_secs()).collect();
        assert_eq!(delays, vec![1, 2, 4, 8, 16, 32, 60, 60, 60]);
        assert_eq!(retry_delay(0), Duration::from_secs(1));
        assert_eq!(retry_delay(u32::MAX), MAX_BACKOFF);
    }

    #[test]
    fn test_classify_invalid_token_is_auth_failure() {
        let err = RequestError::Api(ApiError::InvalidToken);
        assert_eq!(classify_error(&err), ChatEvent::AuthFailure);
    }

    #[test]
    fn test_classify_other_errors_are_transient() {
        let err = RequestError::Api(ApiError::Unknown("Bad Gateway".to_string()));
        match classify_error(&err) {
            ChatEvent::TransportError { detail } => assert!(detail.contains("Bad Gateway")),
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[test]
    fn test_allowed_updates_cover_deletions() {
        let updates = allowed_updates();
        assert!(updates.contains(&AllowedUpdate::DeletedBusinessMessages));
        assert!(updates.contains(&AllowedUpdate::EditedMessage));
    }
}
