//! Credentials and request scoping for the time-tracking API

use serde::{Deserialize, Serialize};

use super::user::UserId;

/// How a request to the time-tracking API authenticates
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Credentials {
    /// Admin email/password pair (HTTP basic auth)
    Basic { email: String, password: String },
    /// OAuth access token of the calling user
    Bearer { access_token: String },
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Basic { email, .. } => {
                f.debug_struct("Basic").field("email", email).field("password", &"***").finish()
            }
            Self::Bearer { .. } => f.debug_struct("Bearer").field("access_token", &"***").finish(),
        }
    }
}

/// Credentials plus the user the request acts on.
///
/// `of_user == None` means "the caller's own timesheet".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthScope {
    pub credentials: Credentials,
    pub of_user: Option<UserId>,
}

impl AuthScope {
    pub fn basic(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::Basic { email: email.into(), password: password.into() },
            of_user: None,
        }
    }

    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self { credentials: Credentials::Bearer { access_token: access_token.into() }, of_user: None }
    }

    /// Same credentials, narrowed to another user's timesheet
    pub fn for_user(&self, user_id: UserId) -> Self {
        Self { credentials: self.credentials.clone(), of_user: Some(user_id) }
    }
}

/// OAuth token pair returned by a token exchange
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_secrets() {
        let basic = format!("{:?}", Credentials::Basic { email: "a@b.c".into(), password: "hunter2".into() });
        let bearer = format!("{:?}", Credentials::Bearer { access_token: "tok".into() });

        assert!(basic.contains("a@b.c"));
        assert!(!basic.contains("hunter2"));
        assert!(!bearer.contains("tok\""));
    }

    #[test]
    fn for_user_keeps_credentials() {
        let admin = AuthScope::basic("admin@example.com", "secret");
        let scoped = admin.for_user(42);

        assert_eq!(scoped.of_user, Some(42));
        assert_eq!(scoped.credentials, admin.credentials);
        assert_eq!(admin.of_user, None);
    }
}
