//! Port interfaces for the time-tracking service
//!
//! Implementations are expected to pass every call through the service's
//! rate limiter before issuing it.

use async_trait::async_trait;
use chrono::NaiveDate;
use timebot_domain::{AuthScope, NewTimeEntry, Project, Result, TeamMember, TimeEntry};

/// Access to timesheets, the roster and projects
#[async_trait]
pub trait TimesheetSource: Send + Sync {
    /// Entries logged on `day` by `scope.of_user` (or the caller)
    async fn fetch_day_entries(&self, day: NaiveDate, scope: &AuthScope) -> Result<Vec<TimeEntry>>;

    /// Every team member, active or not
    async fn list_roster(&self, scope: &AuthScope) -> Result<Vec<TeamMember>>;

    /// Create an entry on `entry.spent_date` for `scope.of_user` (or the caller)
    async fn create_entry(&self, entry: &NewTimeEntry, scope: &AuthScope) -> Result<TimeEntry>;

    /// The account the credentials belong to
    async fn who_am_i(&self, scope: &AuthScope) -> Result<TeamMember>;

    /// Projects the caller may log time against
    async fn list_projects(&self, scope: &AuthScope) -> Result<Vec<Project>>;
}
