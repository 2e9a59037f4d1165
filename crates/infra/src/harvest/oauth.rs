//! Harvest OAuth token contract
//!
//! Only URL building and the token exchange live here; redirects, cookies and
//! sessions belong to whatever front end drives the flow.

use reqwest::Method;
use timebot_domain::{Result, TimebotError, TokenPair};
use tracing::{info, instrument, warn};

use super::client::HarvestClient;
use crate::oauth::{GrantType, TokenResponse};

impl HarvestClient {
    fn client_credentials(&self) -> Result<(&str, &str)> {
        match (self.client_id.as_deref(), self.client_secret.as_deref()) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => Ok((id, secret)),
            _ => Err(TimebotError::Config("Harvest OAuth client id/secret are not configured".into())),
        }
    }

    /// URL the user is sent to in order to grant access
    pub fn authorize_url(&self, redirect_to: &str, state: &str) -> Result<String> {
        let (client_id, _) = self.client_credentials()?;
        let mut url = self.endpoint("oauth2/authorize")?;
        url.query_pairs_mut()
            .append_pair("client_id", client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", redirect_to)
            .append_pair("state", state);
        Ok(url.into())
    }

    /// Exchange an authorization code or refresh token for a token pair
    #[instrument(skip(self, payload, redirect_to), fields(grant = grant.as_str()))]
    pub async fn exchange_token(
        &self,
        grant: GrantType,
        payload: &str,
        redirect_to: Option<&str>,
    ) -> Result<TokenPair> {
        let (client_id, client_secret) = self.client_credentials()?;

        let form = grant.form(client_id, client_secret, payload, redirect_to);
        let builder = self
            .http
            .request(Method::POST, self.endpoint("oauth2/token")?)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&form);
        let response: TokenResponse = self.execute(builder).await?;

        match response.into_token_pair("Harvest auth error.") {
            Ok(tokens) => {
                info!("token exchange succeeded");
                Ok(tokens)
            }
            Err(err) => {
                warn!(error = %err, "token exchange rejected");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use timebot_common::resilience::{RateLimiter, RateLimiterConfig};
    use timebot_domain::HarvestConfig;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::http::HttpClient;

    fn client(api_url: &str, client_id: Option<&str>) -> HarvestClient {
        let config = HarvestConfig {
            api_url: api_url.into(),
            client_id: client_id.map(Into::into),
            client_secret: Some("shh".into()),
            email_domain: "acme.com".into(),
        };
        let limiter =
            RateLimiter::new("harvest", RateLimiterConfig::new(100, Duration::from_secs(20))).unwrap();
        HarvestClient::new(HttpClient::new().unwrap(), &config, limiter).unwrap()
    }

    #[test]
    fn authorize_url_carries_client_and_state() {
        let harvest = client("https://acme.harvestapp.com", Some("abc"));

        let url = harvest.authorize_url("http://localhost:3000/harvest-auth", "copy").unwrap();

        assert_eq!(
            url,
            "https://acme.harvestapp.com/oauth2/authorize?client_id=abc&response_type=code\
             &redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fharvest-auth&state=copy"
        );
    }

    #[test]
    fn missing_client_id_is_a_config_error() {
        let harvest = client("https://acme.harvestapp.com", None);
        assert!(matches!(harvest.authorize_url("x", "y"), Err(TimebotError::Config(_))));
    }

    #[tokio::test]
    async fn authorization_code_is_sent_as_code() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains("code=the-code"))
            .and(body_string_contains("redirect_uri="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "at", "refresh_token": "rt"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tokens = client(&server.uri(), Some("abc"))
            .exchange_token(GrantType::AuthorizationCode, "the-code", Some("http://localhost/cb"))
            .await
            .unwrap();

        assert_eq!(tokens, TokenPair { access_token: "at".into(), refresh_token: Some("rt".into()) });
    }

    #[tokio::test]
    async fn refresh_token_is_sent_as_refresh_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .and(body_string_contains("grant_type=refresh_token"))
            .and(body_string_contains("refresh_token=old"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"access_token": "new"})))
            .expect(1)
            .mount(&server)
            .await;

        let tokens = client(&server.uri(), Some("abc"))
            .exchange_token(GrantType::RefreshToken, "old", None)
            .await
            .unwrap();

        assert_eq!(tokens.access_token, "new");
        assert_eq!(tokens.refresh_token, None);
    }

    #[tokio::test]
    async fn error_body_is_an_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": "invalid_grant", "error_description": "Code expired"
            })))
            .mount(&server)
            .await;

        let result = client(&server.uri(), Some("abc"))
            .exchange_token(GrantType::AuthorizationCode, "stale", None)
            .await;

        assert_eq!(result, Err(TimebotError::Auth("Code expired".into())));
    }
}
