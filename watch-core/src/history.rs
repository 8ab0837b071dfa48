//! Bounded, insertion-ordered retention of recently observed messages.

use std::collections::VecDeque;

use crate::error::{Result, WatchError};
use crate::types::StoredMessage;

/// Drop-oldest FIFO buffer of [`StoredMessage`]s.
///
/// Lookup is a linear scan from oldest to newest; at a few thousand entries that is cheaper than
/// keeping an index consistent through eviction and removal.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    entries: VecDeque<StoredMessage>,
    capacity: usize,
}

impl HistoryStore {
    /// Creates an empty store. `capacity` must be at least 1.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(WatchError::Config(
                "history length must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            entries: VecDeque::with_capacity(capacity.min(4096)),
            capacity,
        })
    }

    /// Appends at the tail, evicting the oldest entry first when full. Returns the evicted entry.
    pub fn append(&mut self, message: StoredMessage) -> Option<StoredMessage> {
        let evicted = if self.entries.len() >= self.capacity {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(message);
        evicted
    }

    /// First entry (oldest first) with the given key, with its position.
    pub fn find_by_key(&self, channel: &str, timestamp: &str) -> Option<(usize, &StoredMessage)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, m)| m.has_key(channel, timestamp))
    }

    /// Removes the entry at `position`, keeping the relative order of the rest.
    pub fn remove_at(&mut self, position: usize) -> Option<StoredMessage> {
        self.entries.remove(position)
    }

    /// Replaces the text of the entry at `position`. Returns false if there is no such entry.
    pub fn update_text_at(&mut self, position: usize, new_text: impl Into<String>) -> bool {
        match self.entries.get_mut(position) {
            Some(entry) => {
                entry.text = new_text.into();
                true
            }
            None => false,
        }
    }

    pub fn get(&self, position: usize) -> Option<&StoredMessage> {
        self.entries.get(position)
    }

    /// Iterates oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &StoredMessage> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
