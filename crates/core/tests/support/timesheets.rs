use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use timebot_common::resilience::RateLimiter;
use timebot_core::TimesheetSource;
use timebot_domain::{
    AuthScope, NewTimeEntry, Project, Result as DomainResult, TeamMember, TimeEntry, TimebotError,
    UserId,
};

/// In-memory mock for `TimesheetSource`.
///
/// Entries are keyed by (user, day); `None` is the caller's own timesheet.
/// Every fetch and create is recorded so tests can assert on call order.
#[derive(Default, Clone)]
pub struct MockTimesheets {
    entries: Arc<Mutex<HashMap<(Option<UserId>, NaiveDate), Vec<TimeEntry>>>>,
    roster: Arc<Mutex<Vec<TeamMember>>>,
    projects: Arc<Mutex<Vec<Project>>>,
    account: Arc<Mutex<Option<TeamMember>>>,
    failing_users: Arc<Mutex<HashSet<UserId>>>,
    failing_days: Arc<Mutex<HashSet<NaiveDate>>>,
    delays: Arc<Mutex<HashMap<UserId, Duration>>>,
    create_budget: Arc<Mutex<Option<usize>>>,
    pub fetched: Arc<Mutex<Vec<(Option<UserId>, NaiveDate)>>>,
    pub created: Arc<Mutex<Vec<(Option<UserId>, NewTimeEntry)>>>,
}

impl MockTimesheets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed entries for `user` on `day`
    pub fn with_entries(self, user: Option<UserId>, day: NaiveDate, entries: Vec<TimeEntry>) -> Self {
        self.entries.lock().unwrap().entry((user, day)).or_default().extend(entries);
        self
    }

    pub fn with_roster(self, roster: Vec<TeamMember>) -> Self {
        *self.roster.lock().unwrap() = roster;
        self
    }

    pub fn with_projects(self, projects: Vec<Project>) -> Self {
        *self.projects.lock().unwrap() = projects;
        self
    }

    pub fn with_account(self, account: TeamMember) -> Self {
        *self.account.lock().unwrap() = Some(account);
        self
    }

    /// Every fetch scoped to `user` fails
    pub fn failing_for_user(self, user: UserId) -> Self {
        self.failing_users.lock().unwrap().insert(user);
        self
    }

    /// Every fetch of `day` fails
    pub fn failing_on_day(self, day: NaiveDate) -> Self {
        self.failing_days.lock().unwrap().insert(day);
        self
    }

    /// Every fetch scoped to `user` takes `delay` to answer
    pub fn slow_for_user(self, user: UserId, delay: Duration) -> Self {
        self.delays.lock().unwrap().insert(user, delay);
        self
    }

    /// Allow `count` creations, then fail every further one
    pub fn failing_creates_after(self, count: usize) -> Self {
        *self.create_budget.lock().unwrap() = Some(count);
        self
    }

    pub fn created_entries(&self) -> Vec<NewTimeEntry> {
        self.created.lock().unwrap().iter().map(|(_, entry)| entry.clone()).collect()
    }

    pub fn fetched_days(&self) -> Vec<NaiveDate> {
        self.fetched.lock().unwrap().iter().map(|(_, day)| *day).collect()
    }
}

#[async_trait]
impl TimesheetSource for MockTimesheets {
    async fn fetch_day_entries(&self, day: NaiveDate, scope: &AuthScope) -> DomainResult<Vec<TimeEntry>> {
        let delay = scope.of_user.and_then(|user| self.delays.lock().unwrap().get(&user).copied());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.fetched.lock().unwrap().push((scope.of_user, day));

        if scope.of_user.is_some_and(|user| self.failing_users.lock().unwrap().contains(&user)) {
            return Err(TimebotError::Network("user fetch failed".into()));
        }
        if self.failing_days.lock().unwrap().contains(&day) {
            return Err(TimebotError::Network(format!("fetch failed for {day}")));
        }

        Ok(self.entries.lock().unwrap().get(&(scope.of_user, day)).cloned().unwrap_or_default())
    }

    async fn list_roster(&self, _scope: &AuthScope) -> DomainResult<Vec<TeamMember>> {
        Ok(self.roster.lock().unwrap().clone())
    }

    async fn create_entry(&self, entry: &NewTimeEntry, scope: &AuthScope) -> DomainResult<TimeEntry> {
        let mut budget = self.create_budget.lock().unwrap();
        if let Some(remaining) = budget.as_mut() {
            if *remaining == 0 {
                return Err(TimebotError::Network("create failed".into()));
            }
            *remaining -= 1;
        }

        self.created.lock().unwrap().push((scope.of_user, entry.clone()));
        Ok(TimeEntry {
            id: Some(self.created.lock().unwrap().len() as u64),
            spent_date: Some(entry.spent_date),
            project_id: Some(entry.project_id),
            task_id: Some(entry.task_id),
            hours: Some(entry.hours),
            notes: entry.notes.clone(),
        })
    }

    async fn who_am_i(&self, _scope: &AuthScope) -> DomainResult<TeamMember> {
        self.account
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| TimebotError::Auth("invalid credentials".into()))
    }

    async fn list_projects(&self, _scope: &AuthScope) -> DomainResult<Vec<Project>> {
        Ok(self.projects.lock().unwrap().clone())
    }
}

/// [`MockTimesheets`] behind a shared rate limiter, the way the HTTP adapters
/// gate every outbound call
#[derive(Clone)]
pub struct RateLimitedTimesheets {
    pub inner: MockTimesheets,
    limiter: RateLimiter,
}

impl RateLimitedTimesheets {
    pub fn new(inner: MockTimesheets, limiter: RateLimiter) -> Self {
        Self { inner, limiter }
    }
}

#[async_trait]
impl TimesheetSource for RateLimitedTimesheets {
    async fn fetch_day_entries(&self, day: NaiveDate, scope: &AuthScope) -> DomainResult<Vec<TimeEntry>> {
        self.limiter.acquire().await;
        self.inner.fetch_day_entries(day, scope).await
    }

    async fn list_roster(&self, scope: &AuthScope) -> DomainResult<Vec<TeamMember>> {
        self.limiter.acquire().await;
        self.inner.list_roster(scope).await
    }

    async fn create_entry(&self, entry: &NewTimeEntry, scope: &AuthScope) -> DomainResult<TimeEntry> {
        self.limiter.acquire().await;
        self.inner.create_entry(entry, scope).await
    }

    async fn who_am_i(&self, scope: &AuthScope) -> DomainResult<TeamMember> {
        self.limiter.acquire().await;
        self.inner.who_am_i(scope).await
    }

    async fn list_projects(&self, scope: &AuthScope) -> DomainResult<Vec<Project>> {
        self.limiter.acquire().await;
        self.inner.list_projects(scope).await
    }
}
