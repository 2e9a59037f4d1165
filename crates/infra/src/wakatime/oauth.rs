//! WakaTime OAuth token contract

use reqwest::Method;
use timebot_domain::{Result, TimebotError, TokenPair};
use tracing::{info, instrument, warn};

use super::client::WakaTimeClient;
use crate::oauth::{GrantType, TokenResponse};

/// Read access to logged coding time is all the bridge needs
const SCOPE: &str = "read_logged_time";

impl WakaTimeClient {
    fn client_credentials(&self) -> Result<(&str, &str)> {
        match (self.client_id.as_deref(), self.client_secret.as_deref()) {
            (Some(id), Some(secret)) if !id.is_empty() && !secret.is_empty() => Ok((id, secret)),
            _ => Err(TimebotError::Config("WakaTime OAuth client id/secret are not configured".into())),
        }
    }

    /// URL the user is sent to in order to grant read access to coding time
    pub fn authorize_url(&self, redirect_to: &str, state: &str) -> Result<String> {
        let (client_id, _) = self.client_credentials()?;
        let mut url = self.endpoint("oauth/authorize")?;
        url.query_pairs_mut()
            .append_pair("client_id", client_id)
            .append_pair("response_type", "code")
            .append_pair("redirect_uri", redirect_to)
            .append_pair("state", state)
            .append_pair("scope", SCOPE);
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
            .request(Method::POST, self.endpoint("oauth/token")?)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&form);
        let response: TokenResponse = self.execute(builder).await?;

        match response.into_token_pair("WakaTime auth error.") {
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
