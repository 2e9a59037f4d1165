//! Timesheet types
//!
//! Entries come from a loosely shaped external API, so every field the API
//! may omit is optional here. Defaults are substituted explicitly through
//! the accessor methods rather than at each call site.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub type ProjectId = u64;
pub type TaskId = u64;

/// One logged time record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: Option<u64>,
    pub spent_date: Option<NaiveDate>,
    pub project_id: Option<ProjectId>,
    pub task_id: Option<TaskId>,
    /// Duration in hours; absent durations count as zero
    pub hours: Option<f64>,
    pub notes: Option<String>,
}

impl TimeEntry {
    /// Logged hours, with a missing duration treated as `0.0`
    pub fn hours_or_zero(&self) -> f64 {
        self.hours.unwrap_or(0.0)
    }

    /// Identity used when comparing entries across weeks.
    ///
    /// `None` when either the project or the task is unknown.
    pub fn project_task(&self) -> Option<ProjectTask> {
        match (self.project_id, self.task_id) {
            (Some(project_id), Some(task_id)) => Some(ProjectTask { project_id, task_id }),
            _ => None,
        }
    }
}

/// Composite (project, task) key; duration and day are not part of it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectTask {
    pub project_id: ProjectId,
    pub task_id: TaskId,
}

/// Payload for creating a timesheet entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTimeEntry {
    pub spent_date: NaiveDate,
    pub project_id: ProjectId,
    pub task_id: TaskId,
    pub hours: f64,
    pub notes: Option<String>,
}

impl NewTimeEntry {
    pub fn new(spent_date: NaiveDate, key: ProjectTask, hours: f64) -> Self {
        Self {
            spent_date,
            project_id: key.project_id,
            task_id: key.task_id,
            hours,
            notes: None,
        }
    }
}

/// A time-tracking project the caller can log time against
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// Tasks assigned to the project, in the order the API lists them
    pub task_ids: Vec<TaskId>,
}

impl Project {
    /// Task new entries should be logged against, if any
    pub fn default_task(&self) -> Option<TaskId> {
        self.task_ids.first().copied()
    }
}
