//! WakaTime API client
//!
//! Data endpoints live under the versioned `api/v1/` prefix; the OAuth
//! endpoints sit at the API root.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use timebot_common::resilience::RateLimiter;
use timebot_core::CodingActivitySource;
use timebot_domain::{CodingAccount, CodingDuration, Result, TimebotError, WakaTimeConfig};
use tracing::{debug, instrument};

use crate::http::{base_url, HttpClient};

const CURRENT_USER_PATH: &str = "api/v1/users/current";
const DURATIONS_PATH: &str = "api/v1/users/current/durations";

/// Reason carried by a WakaTime body that lacks the expected payload
fn failure_reason(message: Option<String>, error_description: Option<String>, fallback: &str) -> String {
    message.or(error_description).unwrap_or_else(|| fallback.to_string())
}

/// `GET users/current`; a body without `data.id` is a failure
#[derive(Debug, Deserialize)]
struct CurrentUserResponse {
    #[serde(default)]
    data: Option<RawAccount>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawAccount {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    username: Option<String>,
}

/// `GET users/current/durations`; a body without `data` is a failure
#[derive(Debug, Deserialize)]
struct DurationsResponse {
    #[serde(default)]
    data: Option<Vec<RawDuration>>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawDuration {
    #[serde(default)]
    project: Option<String>,
    #[serde(default)]
    duration: f64,
}

#[derive(Clone)]
pub struct WakaTimeClient {
    pub(super) http: HttpClient,
    base_url: Url,
    pub(super) client_id: Option<String>,
    pub(super) client_secret: Option<String>,
    limiter: RateLimiter,
}

impl WakaTimeClient {
    pub fn new(http: HttpClient, config: &WakaTimeConfig, limiter: RateLimiter) -> Result<Self> {
        Ok(Self {
            http,
            base_url: base_url(&config.api_url)?,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            limiter,
        })
    }

    pub(super) fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| TimebotError::Internal(format!("Invalid WakaTime path {path:?}: {e}")))
    }

    /// Wait for admission, then send and decode
    pub(super) async fn execute<T>(&self, builder: RequestBuilder) -> Result<T>
    where
        T: DeserializeOwned,
    {
        self.limiter.acquire().await;
        self.http.send_json(builder).await
    }
}

#[async_trait]
impl CodingActivitySource for WakaTimeClient {
    #[instrument(skip(self, access_token))]
    async fn current_user(&self, access_token: &str) -> Result<CodingAccount> {
        let builder = self
            .http
            .request(Method::GET, self.endpoint(CURRENT_USER_PATH)?)
            .query(&[("access_token", access_token)]);
        let response: CurrentUserResponse = self.execute(builder).await?;

        match response.data {
            Some(RawAccount { id: Some(id), username }) => {
                debug!(account = %id, "resolved coding-activity account");
                Ok(CodingAccount { id, username })
            }
            _ => {
                let reason =
                    failure_reason(response.message, response.error_description, "response has no user");
                Err(TimebotError::Auth(format!("WakaTime user: {reason}")))
            }
        }
    }

    #[instrument(skip(self, access_token))]
    async fn fetch_durations(&self, day: NaiveDate, access_token: &str) -> Result<Vec<CodingDuration>> {
        let date = day.format("%Y-%m-%d").to_string();
        let builder = self
            .http
            .request(Method::GET, self.endpoint(DURATIONS_PATH)?)
            .query(&[("date", date.as_str()), ("access_token", access_token)]);
        let response: DurationsResponse = self.execute(builder).await?;

        let Some(data) = response.data else {
            let reason =
                failure_reason(response.message, response.error_description, "response has no data");
            return Err(TimebotError::Network(format!("WakaTime durations: {reason}")));
        };

        debug!(sessions = data.len(), "fetched coding durations");
        Ok(data
            .into_iter()
            .filter_map(|raw| {
                raw.project.map(|project| CodingDuration { project, seconds: raw.duration })
            })
            .collect())
    }
}
