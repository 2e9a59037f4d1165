//! OAuth 2 token-exchange pieces shared by the Harvest and WakaTime clients

use serde::Deserialize;
use timebot_domain::{Result, TimebotError, TokenPair};

/// OAuth grant used in a token exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantType {
    AuthorizationCode,
    RefreshToken,
}

impl GrantType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AuthorizationCode => "authorization_code",
            Self::RefreshToken => "refresh_token",
        }
    }

    /// Form field carrying the grant's payload
    pub(crate) fn payload_key(self) -> &'static str {
        match self {
            Self::AuthorizationCode => "code",
            Self::RefreshToken => "refresh_token",
        }
    }

    /// Token request form; `redirect_uri` only accompanies an authorization code
    pub(crate) fn form<'a>(
        self,
        client_id: &'a str,
        client_secret: &'a str,
        payload: &'a str,
        redirect_to: Option<&'a str>,
    ) -> Vec<(&'static str, &'a str)> {
        let mut form = vec![
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("grant_type", self.as_str()),
            (self.payload_key(), payload),
        ];
        if let (Self::AuthorizationCode, Some(redirect)) = (self, redirect_to) {
            form.push(("redirect_uri", redirect));
        }
        form
    }
}

/// Token endpoint response; errors arrive in the body
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl TokenResponse {
    /// Token pair, or `Auth` with the provider's reason
    pub(crate) fn into_token_pair(self, fallback: &str) -> Result<TokenPair> {
        match self {
            Self { access_token: Some(access_token), error: None, refresh_token, .. } => {
                Ok(TokenPair { access_token, refresh_token })
            }
            Self { error, error_description, message, .. } => Err(TimebotError::Auth(
                message.or(error_description).or(error).unwrap_or_else(|| fallback.to_string()),
            )),
        }
    }
}
