//! # reconciler
//!
//! Applies chat events to the bounded message history: new messages are stored, edits of retained
//! messages are diffed and reported, deletions of retained messages are reported with the lost
//! text. [`Dispatcher`] drives a [`Reconciler`] from an event channel, strictly in arrival order.

mod dispatcher;
mod reconcile;

pub use dispatcher::{DispatchState, Dispatcher, Step};
pub use reconcile::{Disposition, Reconciler};

// Integration tests live in tests/reconciler_test.rs and tests/dispatcher_test.rs
