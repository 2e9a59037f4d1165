//! Slack Web API client
//!
//! Slack answers most failures with HTTP 200 and `{"ok": false, "error": ..}`,
//! so the envelope is checked on every response.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use timebot_common::resilience::RateLimiter;
use timebot_core::ChatClient;
use timebot_domain::{ChatUser, Result, SlackConfig, TimebotError};
use tracing::{debug, instrument};

use super::types::{Envelope, UsersListResponse};
use crate::http::{base_url, HttpClient};

/// Map a failed envelope to the domain taxonomy
fn envelope_error(method: &str, envelope: &Envelope) -> Option<TimebotError> {
    if envelope.ok {
        return None;
    }
    let code = envelope.error.as_deref().unwrap_or("unknown_error");
    let message = format!("Slack {method} failed: {code}");
    Some(match code {
        "not_authed" | "invalid_auth" | "account_inactive" | "token_revoked" | "missing_scope" => {
            TimebotError::Auth(message)
        }
        "ratelimited" => TimebotError::RateLimit(message),
        "channel_not_found" | "user_not_found" => TimebotError::NotFound(message),
        _ => TimebotError::Network(message),
    })
}

/// Bot-token client for one Slack workspace
#[derive(Clone)]
pub struct SlackClient {
    http: HttpClient,
    base_url: Url,
    bot_token: String,
    limiter: RateLimiter,
}

impl SlackClient {
    pub fn new(http: HttpClient, config: &SlackConfig, limiter: RateLimiter) -> Result<Self> {
        Ok(Self {
            http,
            base_url: base_url(&config.api_url)?,
            bot_token: config.bot_token.clone(),
            limiter,
        })
    }

    fn request(&self, method: Method, api_method: &str) -> Result<RequestBuilder> {
        let url = self
            .base_url
            .join(api_method)
            .map_err(|e| TimebotError::Internal(format!("Invalid Slack method {api_method:?}: {e}")))?;
        Ok(self.http.request(method, url))
    }

    async fn execute<T>(&self, builder: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.limiter.acquire().await;
        self.http.send_json(builder).await
    }
}

#[async_trait]
impl ChatClient for SlackClient {
    async fn list_users(&self) -> Result<Vec<ChatUser>> {
        let builder =
            self.request(Method::GET, "users.list")?.query(&[("token", self.bot_token.as_str())]);
        let response: UsersListResponse = self.execute(builder).await?;
        if let Some(err) = envelope_error("users.list", &response.envelope) {
            return Err(err);
        }

        debug!(members = response.members.len(), "listed chat users");
        Ok(response.members.into_iter().map(ChatUser::from).collect())
    }

    #[instrument(skip(self, text))]
    async fn post_message(&self, channel: &str, text: &str) -> Result<()> {
        let builder = self.request(Method::POST, "chat.postMessage")?.form(&[
            ("token", self.bot_token.as_str()),
            ("channel", channel),
            ("text", text),
            ("as_user", "true"),
        ]);
        let envelope: Envelope = self.execute(builder).await?;
        match envelope_error("chat.postMessage", &envelope) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
