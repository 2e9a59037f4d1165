use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use timebot_core::ChatClient;
use timebot_domain::{ChatUser, Result as DomainResult, TimebotError};

/// In-memory mock for `ChatClient` recording every posted message.
#[derive(Default, Clone)]
pub struct MockChat {
    users: Arc<Mutex<Vec<ChatUser>>>,
    failing_channels: Arc<Mutex<HashSet<String>>>,
    pub posts: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockChat {
    pub fn new(users: Vec<ChatUser>) -> Self {
        Self { users: Arc::new(Mutex::new(users)), ..Self::default() }
    }

    /// Posting to `channel` fails
    pub fn failing_channel(self, channel: &str) -> Self {
        self.failing_channels.lock().unwrap().insert(channel.to_string());
        self
    }

    pub fn posts(&self) -> Vec<(String, String)> {
        self.posts.lock().unwrap().clone()
    }

    pub fn posts_to(&self, channel: &str) -> Vec<String> {
        self.posts()
            .into_iter()
            .filter(|(target, _)| target == channel)
            .map(|(_, text)| text)
            .collect()
    }
}

pub fn chat_user(id: &str, email: &str) -> ChatUser {
    ChatUser { id: id.to_string(), email: Some(email.to_string()) }
}

#[async_trait]
impl ChatClient for MockChat {
    async fn list_users(&self) -> DomainResult<Vec<ChatUser>> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn post_message(&self, channel: &str, text: &str) -> DomainResult<()> {
        if self.failing_channels.lock().unwrap().contains(channel) {
            return Err(TimebotError::Network(format!("channel_not_found: {channel}")));
        }
        self.posts.lock().unwrap().push((channel.to_string(), text.to_string()));
        Ok(())
    }
}
