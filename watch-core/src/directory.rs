//! Author resolution: opaque user id to display name.

use async_trait::async_trait;

use crate::error::LookupError;

/// Resolves user ids to display names. Implementations map to a transport (e.g. Telegram).
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Returns the display name for `user_id`, or a [`LookupError`] when unknown or unreachable.
    async fn display_name(&self, user_id: &str) -> Result<String, LookupError>;
}
