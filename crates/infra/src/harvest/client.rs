//! Harvest (classic API) client
//!
//! Implements [`TimesheetSource`]. Every request waits for admission from the
//! client's rate limiter before it is sent, so all logical operations sharing
//! one client share the account's quota.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};
use reqwest::{Method, RequestBuilder, Url};
use timebot_common::resilience::RateLimiter;
use timebot_core::TimesheetSource;
use timebot_domain::{
    AuthScope, Credentials, HarvestConfig, NewTimeEntry, Project, Result, TeamMember, TimeEntry,
    TimebotError,
};
use tracing::{debug, instrument};

use super::types::{
    CreateEntryRequest, DailyResponse, DayEntry, PersonWrapper, WhoAmIResponse,
};
use crate::http::{base_url, HttpClient};

/// Client for one Harvest account
#[derive(Clone)]
pub struct HarvestClient {
    pub(super) http: HttpClient,
    base_url: Url,
    pub(super) client_id: Option<String>,
    pub(super) client_secret: Option<String>,
    limiter: RateLimiter,
}

impl HarvestClient {
    pub fn new(http: HttpClient, config: &HarvestConfig, limiter: RateLimiter) -> Result<Self> {
        Ok(Self {
            http,
            base_url: base_url(&config.api_url)?,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            limiter,
        })
    }

    /// Account base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Link to the weekly timesheet view
    pub fn weekly_url(&self) -> String {
        format!("{}/time/week", self.base_url.as_str().trim_end_matches('/'))
    }

    pub(super) fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| TimebotError::Internal(format!("Invalid Harvest path {path:?}: {e}")))
    }

    /// Wait for admission, then send and decode
    pub(super) async fn execute<T>(&self, builder: RequestBuilder) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.limiter.acquire().await;
        self.http.send_json(builder).await
    }

    fn request(&self, method: Method, path: &str, scope: &AuthScope) -> Result<RequestBuilder> {
        let mut builder = self
            .http
            .request(method, self.endpoint(path)?)
            .header(reqwest::header::ACCEPT, "application/json");

        builder = match &scope.credentials {
            Credentials::Basic { email, password } => builder.basic_auth(email, Some(password)),
            Credentials::Bearer { access_token } => {
                builder.query(&[("access_token", access_token.as_str())])
            }
        };

        if let Some(user_id) = scope.of_user {
            builder = builder.query(&[("of_user", user_id)]);
        }
        Ok(builder)
    }
}

/// `daily/{day_of_year}/{year}`
fn daily_path(day: NaiveDate) -> String {
    format!("daily/{}/{}", day.ordinal(), day.year())
}

#[async_trait]
impl TimesheetSource for HarvestClient {
    #[instrument(skip(self, scope), fields(of_user = ?scope.of_user))]
    async fn fetch_day_entries(&self, day: NaiveDate, scope: &AuthScope) -> Result<Vec<TimeEntry>> {
        let builder = self.request(Method::GET, &daily_path(day), scope)?.query(&[("slim", "1")]);
        let daily: DailyResponse = self.execute(builder).await?;

        debug!(entries = daily.day_entries.len(), "fetched day entries");
        Ok(daily.day_entries.into_iter().map(TimeEntry::from).collect())
    }

    async fn list_roster(&self, scope: &AuthScope) -> Result<Vec<TeamMember>> {
        let people: Vec<PersonWrapper> = self.execute(self.request(Method::GET, "people", scope)?).await?;
        Ok(people.into_iter().map(|person| person.user.into()).collect())
    }

    #[instrument(skip(self, entry, scope), fields(day = %entry.spent_date, of_user = ?scope.of_user))]
    async fn create_entry(&self, entry: &NewTimeEntry, scope: &AuthScope) -> Result<TimeEntry> {
        let body = CreateEntryRequest {
            project_id: entry.project_id,
            task_id: entry.task_id,
            hours: entry.hours,
            spent_at: entry.spent_date,
            notes: entry.notes.clone().unwrap_or_default(),
        };
        let builder = self.request(Method::POST, "daily/add", scope)?.json(&body);
        let created: DayEntry = self.execute(builder).await?;

        let mut created = TimeEntry::from(created);
        created.spent_date.get_or_insert(entry.spent_date);
        Ok(created)
    }

    async fn who_am_i(&self, scope: &AuthScope) -> Result<TeamMember> {
        let response: WhoAmIResponse =
            self.execute(self.request(Method::GET, "account/who_am_i", scope)?).await?;
        Ok(response.user.into())
    }

    async fn list_projects(&self, scope: &AuthScope) -> Result<Vec<Project>> {
        let daily: DailyResponse = self.execute(self.request(Method::GET, "daily", scope)?).await?;
        Ok(daily.projects.into_iter().map(Project::from).collect())
    }
}
