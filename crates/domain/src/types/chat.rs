//! Chat-side types

use serde::{Deserialize, Serialize};

/// A chat workspace member
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatUser {
    pub id: String,
    pub email: Option<String>,
}

impl ChatUser {
    /// Case-insensitive exact email match; empty emails never match
    pub fn has_email(&self, email: &str) -> bool {
        let wanted = email.trim().to_lowercase();
        if wanted.is_empty() {
            return false;
        }
        self.email.as_deref().is_some_and(|own| own.trim().to_lowercase() == wanted)
    }
}

/// Outcome of publicly calling out delinquent team members
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallOutReport {
    /// Display names of everyone below the threshold
    pub delinquents: Vec<String>,
    /// Direct messages delivered
    pub notified: usize,
    /// Delinquents with no chat account matching their email
    pub unmatched: usize,
    /// Direct messages that failed to send
    pub failed: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_match_is_case_insensitive() {
        let user = ChatUser { id: "U1".into(), email: Some("Ada@Example.com".into()) };
        assert!(user.has_email("ada@example.com"));
        assert!(!user.has_email("ada@example.org"));
    }

    #[test]
    fn email_match_folds_non_ascii_case() {
        let user = ChatUser { id: "U1".into(), email: Some("ÉLODIE@acme.com".into()) };
        assert!(user.has_email("élodie@acme.com"));
        assert!(user.has_email(" Élodie@ACME.com "));
    }

    #[test]
    fn empty_email_never_matches() {
        let user = ChatUser { id: "U1".into(), email: Some(String::new()) };
        assert!(!user.has_email(""));
        assert!(!ChatUser::default().has_email("  "));
    }
}
