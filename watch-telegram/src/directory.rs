//! [`UserDirectory`] backed by the senders observed in updates.
//!
//! The Bot API has no general user-by-id lookup, so names are learned from incoming updates.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use watch_core::{LookupError, UserDirectory};

/// Default number of senders remembered before the oldest is forgotten.
pub const DEFAULT_DIRECTORY_CAPACITY: usize = 10_000;

#[derive(Debug, Default)]
struct Names {
    by_id: HashMap<String, String>,
    /// First-seen order, oldest at the front.
    order: VecDeque<String>,
}

/// Shared id → display name map; clones share the same map. Bounded: once `capacity` distinct
/// senders are known, remembering a new one forgets the one seen first.
#[derive(Debug, Clone)]
pub struct TelegramUserDirectory {
    names: Arc<RwLock<Names>>,
    capacity: usize,
}

impl Default for TelegramUserDirectory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_DIRECTORY_CAPACITY)
    }
}

impl TelegramUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// A capacity of 0 is treated as 1.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            names: Arc::new(RwLock::new(Names::default())),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Records (or refreshes) the display name for `user_id`.
    pub async fn remember(&self, user_id: impl Into<String>, name: impl Into<String>) {
        let user_id = user_id.into();
        let mut names = self.names.write().await;
        if let Some(existing) = names.by_id.get_mut(&user_id) {
            *existing = name.into();
            return;
        }
        if names.order.len() >= self.capacity {
            if let Some(oldest) = names.order.pop_front() {
                names.by_id.remove(&oldest);
            }
        }
        names.order.push_back(user_id.clone());
        names.by_id.insert(user_id, name.into());
    }

    pub async fn len(&self) -> usize {
        self.names.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserDirectory for TelegramUserDirectory {
    async fn display_name(&self, user_id: &str) -> Result<String, LookupError> {
        self.names
            .read()
            .await
            .by_id
            .get(user_id)
            .cloned()
            .ok_or_else(|| LookupError::Unknown(user_id.to_string()))
    }
}
