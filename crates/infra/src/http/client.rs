use std::time::Duration;

use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use timebot_domain::TimebotError;
use tracing::debug;

use crate::errors::{status_error, InfraError};

/// HTTP client with a request timeout and redacted request logging.
///
/// Every request is sent exactly once. Admission is the caller's rate
/// limiter's job, and re-sending a create could log time twice.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, TimebotError> {
        Self::builder().build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the request once, mapping transport failures onto the domain
    /// error taxonomy. Non-success statuses are returned as responses.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, TimebotError> {
        let request = builder.build().map_err(|err| TimebotError::from(InfraError::from(err)))?;
        let method = request.method().clone();
        let url = redact(request.url());
        debug!(%method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(TimebotError::from(InfraError::from(err)))
            }
        }
    }

    /// Send the request and decode a JSON body from a successful response.
    ///
    /// Non-success statuses are mapped with [`status_error`].
    pub async fn send_json<T>(&self, builder: RequestBuilder) -> Result<T, TimebotError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(builder).await?;
        let status = response.status();
        let url = redact(response.url());
        let body = response.text().await.map_err(|err| TimebotError::from(InfraError::from(err)))?;

        if !status.is_success() {
            return Err(status_error(status, &url, &body));
        }

        serde_json::from_str(&body)
            .map_err(|err| TimebotError::Network(format!("unexpected response from {url}: {err}")))
    }
}

/// URL without its query string, which may carry tokens
fn redact(url: &reqwest::Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: Some(concat!("timebot/", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient, TimebotError> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| TimebotError::from(InfraError::from(err)))?;

        Ok(HttpClient { client })
    }
}
