//! Harvest wire types
//!
//! The classic Harvest API is loose about types: ids arrive as numbers or as
//! numeric strings and most fields may be missing. Everything is parsed
//! leniently here and converted to domain types at the edge.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use timebot_domain::{Project, TeamMember, TimeEntry};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

fn parse_id<E: serde::de::Error>(raw: RawId) -> Result<u64, E> {
    match raw {
        RawId::Number(id) => Ok(id),
        RawId::Text(text) => {
            text.trim().parse().map_err(|_| E::custom(format!("invalid id {text:?}")))
        }
    }
}

/// Id that may be a number or a numeric string
pub(crate) fn de_id<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    parse_id(RawId::deserialize(deserializer)?)
}

/// Optional id; `null`, missing and empty strings are `None`
pub(crate) fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(raw) => parse_id(raw).map(Some),
    }
}

/// `GET /account/who_am_i`
#[derive(Debug, Clone, Deserialize)]
pub struct WhoAmIResponse {
    pub user: HarvestUser,
}

/// A Harvest user as returned by `who_am_i` and `/people`
#[derive(Debug, Clone, Deserialize)]
pub struct HarvestUser {
    #[serde(deserialize_with = "de_id")]
    pub id: u64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    /// `who_am_i` reports `admin`, `/people` reports `is_admin`
    #[serde(default, alias = "is_admin")]
    pub admin: Option<bool>,
}

impl From<HarvestUser> for TeamMember {
    fn from(user: HarvestUser) -> Self {
        TeamMember {
            id: user.id,
            email: user.email.unwrap_or_default(),
            first_name: user.first_name.unwrap_or_default(),
            last_name: user.last_name.unwrap_or_default(),
            is_active: user.is_active.unwrap_or(false),
            is_admin: user.admin.unwrap_or(false),
        }
    }
}

/// One element of `GET /people`
#[derive(Debug, Clone, Deserialize)]
pub struct PersonWrapper {
    pub user: HarvestUser,
}

/// `GET /daily[/{day}/{year}]`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyResponse {
    #[serde(default)]
    pub day_entries: Vec<DayEntry>,
    #[serde(default)]
    pub projects: Vec<HarvestProject>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DayEntry {
    #[serde(default, deserialize_with = "de_opt_id")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub project_id: Option<u64>,
    #[serde(default, deserialize_with = "de_opt_id")]
    pub task_id: Option<u64>,
    #[serde(default)]
    pub hours: Option<f64>,
    #[serde(default)]
    pub spent_at: Option<NaiveDate>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<DayEntry> for TimeEntry {
    fn from(entry: DayEntry) -> Self {
        TimeEntry {
            id: entry.id,
            spent_date: entry.spent_at,
            project_id: entry.project_id,
            task_id: entry.task_id,
            hours: entry.hours,
            notes: entry.notes,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HarvestProject {
    #[serde(deserialize_with = "de_id")]
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<HarvestTask>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HarvestTask {
    #[serde(deserialize_with = "de_id")]
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<HarvestProject> for Project {
    fn from(project: HarvestProject) -> Self {
        Project {
            id: project.id,
            name: project.name,
            task_ids: project.tasks.into_iter().map(|task| task.id).collect(),
        }
    }
}

/// `POST /daily/add` body
#[derive(Debug, Clone, Serialize)]
pub struct CreateEntryRequest {
    pub project_id: u64,
    pub task_id: u64,
    pub hours: f64,
    pub spent_at: NaiveDate,
    pub notes: String,
}
