//! Port interface for the team-chat service

use async_trait::async_trait;
use timebot_domain::{ChatUser, Result};

/// Team-chat operations the notifier needs
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Every member of the chat workspace
    async fn list_users(&self) -> Result<Vec<ChatUser>>;

    /// Post `text` to a channel, or to a user when `channel` is a user id
    async fn post_message(&self, channel: &str, text: &str) -> Result<()>;
}
