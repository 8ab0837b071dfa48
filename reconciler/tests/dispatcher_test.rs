//! Integration tests for [`reconciler::Dispatcher`].
//!
//! Covers: routing by event kind, transport errors leaving history untouched, auth failure
//! terminating the loop, and normal shutdown when the event source closes.

mod common;

use common::{build_reconciler, lenient_directory, msg, snapshot};
use reconciler::{DispatchState, Dispatcher, Disposition, Step};
use tokio::sync::mpsc;
use watch_core::{ChatEvent, Notification, WatchError};

fn changed(channel: &str, ts: &str, text: &str) -> ChatEvent {
    ChatEvent::MessageChanged {
        channel: channel.to_string(),
        original_timestamp: ts.to_string(),
        new_text: text.to_string(),
        author: "U1".to_string(),
    }
}

fn deleted(channel: &str, ts: &str) -> ChatEvent {
    ChatEvent::MessageDeleted {
        channel: channel.to_string(),
        original_timestamp: ts.to_string(),
    }
}

/// **Test: each event kind is routed to the matching reconciler operation.**
#[tokio::test]
async fn test_dispatch_routes_by_kind() {
    let (reconciler, sink) = build_reconciler(10, lenient_directory());
    let mut dispatcher = Dispatcher::new(reconciler);

    let steps = vec![
        dispatcher.dispatch(ChatEvent::NewMessage(msg("ch1", "t1", "hello"))).await,
        dispatcher.dispatch(changed("ch1", "t1", "hallo")).await,
        dispatcher.dispatch(changed("ch1", "t1", "hallo")).await,
        dispatcher.dispatch(deleted("ch1", "t1")).await,
        dispatcher.dispatch(deleted("ch1", "t1")).await,
    ];

    assert_eq!(
        steps,
        vec![
            Step::Reconciled(Disposition::Appended),
            Step::Reconciled(Disposition::Edited),
            Step::Reconciled(Disposition::Unchanged),
            Step::Reconciled(Disposition::Deleted),
            Step::Reconciled(Disposition::DeleteIgnored),
        ]
    );
    assert_eq!(dispatcher.state(), DispatchState::Running);
    assert_eq!(sink.taken().len(), 2);
    assert_eq!(
        sink.taken()[1],
        Notification::Deleted {
            author_name: "user1".to_string(),
            text: "hallo".to_string(),
        }
    );
}

/// **Test: a transport error is logged only; history is unchanged and the loop keeps running.**
#[tokio::test]
async fn test_transport_error_keeps_running() {
    let (reconciler, sink) = build_reconciler(10, lenient_directory());
    let mut dispatcher = Dispatcher::new(reconciler);
    dispatcher.dispatch(ChatEvent::NewMessage(msg("ch1", "t1", "a"))).await;
    let before = snapshot(dispatcher.reconciler());

    let step = dispatcher
        .dispatch(ChatEvent::TransportError {
            detail: "connection reset".to_string(),
        })
        .await;

    assert_eq!(step, Step::TransportError);
    assert_eq!(dispatcher.state(), DispatchState::Running);
    assert_eq!(snapshot(dispatcher.reconciler()), before);
    assert!(sink.taken().is_empty());
}

/// **Test: auth failure terminates; later events are dropped.**
#[tokio::test]
async fn test_auth_failure_terminates() {
    let (reconciler, _sink) = build_reconciler(10, lenient_directory());
    let mut dispatcher = Dispatcher::new(reconciler);

    assert_eq!(dispatcher.dispatch(ChatEvent::AuthFailure).await, Step::Terminated);
    assert_eq!(dispatcher.state(), DispatchState::Terminated);

    let step = dispatcher
        .dispatch(ChatEvent::NewMessage(msg("ch1", "t1", "late")))
        .await;
    assert_eq!(step, Step::Terminated);
    assert!(dispatcher.reconciler().history().is_empty());
}

/// **Test: run() processes queued events in order and returns AuthFailed on auth failure.**
#[tokio::test]
async fn test_run_stops_on_auth_failure() {
    let (reconciler, sink) = build_reconciler(10, lenient_directory());
    let mut dispatcher = Dispatcher::new(reconciler);
    let (tx, rx) = mpsc::channel(16);

    tx.send(ChatEvent::NewMessage(msg("ch1", "t1", "hi"))).await.unwrap();
    tx.send(deleted("ch1", "t1")).await.unwrap();
    tx.send(ChatEvent::AuthFailure).await.unwrap();
    tx.send(ChatEvent::NewMessage(msg("ch1", "t2", "never stored"))).await.unwrap();

    let result = dispatcher.run(rx).await;

    assert!(matches!(result, Err(WatchError::AuthFailed)));
    assert_eq!(dispatcher.state(), DispatchState::Terminated);
    assert!(dispatcher.reconciler().history().is_empty());
    assert_eq!(sink.taken().len(), 1);
}

/// **Test: run() returns Ok once every sender is dropped.**
#[tokio::test]
async fn test_run_ends_when_source_closes() {
    let (reconciler, _sink) = build_reconciler(3, lenient_directory());
    let mut dispatcher = Dispatcher::new(reconciler);
    let (tx, rx) = mpsc::channel(16);

    let producer = tokio::spawn(async move {
        for i in 0..5 {
            let ts = format!("t{}", i);
            tx.send(ChatEvent::NewMessage(msg("ch1", &ts, "x"))).await.unwrap();
        }
        tx.send(ChatEvent::TransportError {
            detail: "timeout".to_string(),
        })
        .await
        .unwrap();
    });

    dispatcher.run(rx).await.unwrap();
    producer.await.unwrap();

    let keys: Vec<String> = snapshot(dispatcher.reconciler())
        .into_iter()
        .map(|m| m.timestamp)
        .collect();
    assert_eq!(keys, vec!["t2", "t3", "t4"]);
    assert_eq!(dispatcher.state(), DispatchState::Running);
}
