//! Automatically tracked coding time

use serde::{Deserialize, Serialize};

/// One coding session reported by the coding-activity tracker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodingDuration {
    /// Project name as reported by the editor plugin
    pub project: String,
    pub seconds: f64,
}

/// Account behind a coding-activity access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodingAccount {
    pub id: String,
    #[serde(default)]
    pub username: Option<String>,
}
