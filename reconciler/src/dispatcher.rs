//! Sequential control loop: one event at a time, in arrival order.

use tokio::sync::mpsc;
use tracing::{error, info, instrument};
use watch_core::{ChatEvent, Result, WatchError};

use crate::reconcile::{Disposition, Reconciler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Running,
    Terminated,
}

/// Outcome of handling one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Reconciled(Disposition),
    TransportError,
    Terminated,
}

/// Routes [`ChatEvent`]s to the [`Reconciler`]. Stops for good on an authentication failure.
pub struct Dispatcher {
    reconciler: Reconciler,
    state: DispatchState,
}

impl Dispatcher {
    pub fn new(reconciler: Reconciler) -> Self {
        Self {
            reconciler,
            state: DispatchState::Running,
        }
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    pub fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    /// Processes one event to completion. Events after termination are dropped.
    pub async fn dispatch(&mut self, event: ChatEvent) -> Step {
        if self.state == DispatchState::Terminated {
            return Step::Terminated;
        }

        match event {
            ChatEvent::NewMessage(message) => {
                Step::Reconciled(self.reconciler.on_new_message(message))
            }
            ChatEvent::MessageChanged {
                channel,
                original_timestamp,
                new_text,
                author,
            } => Step::Reconciled(
                self.reconciler
                    .on_message_changed(&channel, &original_timestamp, &new_text, &author)
                    .await,
            ),
            ChatEvent::MessageDeleted {
                channel,
                original_timestamp,
            } => Step::Reconciled(
                self.reconciler
                    .on_message_deleted(&channel, &original_timestamp)
                    .await,
            ),
            ChatEvent::TransportError { detail } => {
                error!(detail = %detail, "Error: transport");
                Step::TransportError
            }
            ChatEvent::AuthFailure => {
                error!("Invalid credentials");
                self.state = DispatchState::Terminated;
                Step::Terminated
            }
        }
    }

    /// Consumes events until the source closes (`Ok`) or reports an auth failure
    /// ([`WatchError::AuthFailed`]).
    #[instrument(skip_all)]
    pub async fn run(&mut self, mut events: mpsc::Receiver<ChatEvent>) -> Result<()> {
        info!(
            history_length = self.reconciler.history().capacity(),
            "step: dispatcher started"
        );
        while let Some(event) = events.recv().await {
            if self.dispatch(event).await == Step::Terminated {
                return Err(WatchError::AuthFailed);
            }
        }
        info!("Event source closed, dispatcher stopping");
        Ok(())
    }
}
