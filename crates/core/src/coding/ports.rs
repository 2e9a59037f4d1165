//! Port interface for the coding-activity tracker

use async_trait::async_trait;
use chrono::NaiveDate;
use timebot_domain::{CodingAccount, CodingDuration, Result};

#[async_trait]
pub trait CodingActivitySource: Send + Sync {
    /// Account owning `access_token`; fails when the token is not accepted
    async fn current_user(&self, access_token: &str) -> Result<CodingAccount>;

    /// Coding sessions recorded on `day` for the owner of `access_token`
    async fn fetch_durations(&self, day: NaiveDate, access_token: &str) -> Result<Vec<CodingDuration>>;
}
