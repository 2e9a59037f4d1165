use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use timebot_core::CodingActivitySource;
use timebot_domain::{CodingAccount, CodingDuration, Result as DomainResult, TimebotError};

/// In-memory mock for `CodingActivitySource` keyed by day.
///
/// Empty tokens and tokens registered with `rejecting_token` are refused.
#[derive(Default, Clone)]
pub struct MockCoding {
    durations: Arc<Mutex<HashMap<NaiveDate, Vec<CodingDuration>>>>,
    rejected: Arc<Mutex<HashSet<String>>>,
    failing_days: Arc<Mutex<HashSet<NaiveDate>>>,
    /// Tokens passed to `fetch_durations`, in call order
    pub tokens: Arc<Mutex<Vec<String>>>,
    /// Tokens passed to `current_user`, in call order
    pub account_checks: Arc<Mutex<Vec<String>>>,
}

impl MockCoding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(self, day: NaiveDate, project: &str, seconds: f64) -> Self {
        self.durations
            .lock()
            .unwrap()
            .entry(day)
            .or_default()
            .push(CodingDuration { project: project.to_string(), seconds });
        self
    }

    pub fn rejecting_token(self, token: &str) -> Self {
        self.rejected.lock().unwrap().insert(token.to_string());
        self
    }

    pub fn failing_on_day(self, day: NaiveDate) -> Self {
        self.failing_days.lock().unwrap().insert(day);
        self
    }

    fn accepts(&self, token: &str) -> bool {
        !token.is_empty() && !self.rejected.lock().unwrap().contains(token)
    }
}

#[async_trait]
impl CodingActivitySource for MockCoding {
    async fn current_user(&self, access_token: &str) -> DomainResult<CodingAccount> {
        self.account_checks.lock().unwrap().push(access_token.to_string());
        if !self.accepts(access_token) {
            return Err(TimebotError::Auth("Unauthorized".into()));
        }
        Ok(CodingAccount { id: "w-1".into(), username: Some("coder".into()) })
    }

    async fn fetch_durations(&self, day: NaiveDate, access_token: &str) -> DomainResult<Vec<CodingDuration>> {
        if !self.accepts(access_token) {
            return Err(TimebotError::Auth("Unauthorized".into()));
        }
        self.tokens.lock().unwrap().push(access_token.to_string());
        if self.failing_days.lock().unwrap().contains(&day) {
            return Err(TimebotError::Network(format!("durations failed for {day}")));
        }
        Ok(self.durations.lock().unwrap().get(&day).cloned().unwrap_or_default())
    }
}
