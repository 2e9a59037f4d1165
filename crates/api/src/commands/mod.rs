//! Bot tasks - one per command-line verb

mod chat;
mod coding;
mod timesheet;

use std::fmt;
use std::str::FromStr;

use timebot_domain::{CallOutReport, Result, TimebotError};

pub use chat::{destroy, warn};
pub use coding::reconcile;
pub use timesheet::{copy, hours};

use crate::context::AppContext;
use crate::utils::command_helpers::execute_logged;

/// A task the binary can run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Post the weekly reminder
    Warn,
    /// Call out everyone under the weekly minimum
    Destroy,
    /// Report this week's hours for one user
    Hours,
    /// Copy last week's entries into this week
    Copy,
    /// Log tracked coding time missing from the timesheet
    Reconcile,
}

impl Task {
    pub const ALL: [Task; 5] = [Task::Warn, Task::Destroy, Task::Hours, Task::Copy, Task::Reconcile];

    pub fn as_str(self) -> &'static str {
        match self {
            Task::Warn => "warn",
            Task::Destroy => "destroy",
            Task::Hours => "hours",
            Task::Copy => "copy",
            Task::Reconcile => "reconcile",
        }
    }
}

impl FromStr for Task {
    type Err = TimebotError;

    fn from_str(value: &str) -> Result<Self> {
        Task::ALL
            .into_iter()
            .find(|task| task.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| TimebotError::InvalidInput(format!("Unknown task {value:?}")))
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Secrets a task may need, read from the environment
#[derive(Clone, Default, PartialEq, Eq)]
pub struct TaskCredentials {
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub harvest_access_token: Option<String>,
    pub harvest_refresh_token: Option<String>,
    pub wakatime_access_token: Option<String>,
}

impl fmt::Debug for TaskCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskCredentials")
            .field("admin_email", &self.admin_email)
            .field("admin_password", &self.admin_password.as_ref().map(|_| "<redacted>"))
            .field("harvest_access_token", &self.harvest_access_token.as_ref().map(|_| "<redacted>"))
            .field("harvest_refresh_token", &self.harvest_refresh_token.as_ref().map(|_| "<redacted>"))
            .field("wakatime_access_token", &self.wakatime_access_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl TaskCredentials {
    pub fn from_env() -> Self {
        Self {
            admin_email: env_secret("TIMEBOT_ADMIN_EMAIL"),
            admin_password: env_secret("TIMEBOT_ADMIN_PASSWORD"),
            harvest_access_token: env_secret("TIMEBOT_HARVEST_ACCESS_TOKEN"),
            harvest_refresh_token: env_secret("TIMEBOT_HARVEST_REFRESH_TOKEN"),
            wakatime_access_token: env_secret("TIMEBOT_WAKATIME_ACCESS_TOKEN"),
        }
    }
}

fn env_secret(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Value that must be present for the task at hand
fn require<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str> {
    value.as_deref().ok_or_else(|| TimebotError::Config(format!("{name} is not set")))
}

/// What a finished task produced
#[derive(Debug, Clone, PartialEq)]
pub enum TaskOutcome {
    Warned,
    CalledOut(CallOutReport),
    Hours(f64),
    Copied(usize),
    Reconciled(usize),
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskOutcome::Warned => f.write_str("reminder posted"),
            TaskOutcome::CalledOut(report) if report.delinquents.is_empty() => {
                f.write_str("everyone submitted")
            }
            TaskOutcome::CalledOut(report) => write!(
                f,
                "{} delinquent ({} notified, {} unmatched, {} failed)",
                report.delinquents.len(),
                report.notified,
                report.unmatched,
                report.failed
            ),
            TaskOutcome::Hours(hours) => write!(f, "{hours:.2} hours this week"),
            TaskOutcome::Copied(created) => write!(f, "{created} entries copied"),
            TaskOutcome::Reconciled(created) => write!(f, "{created} entries logged"),
        }
    }
}

/// Run `task`, logging its duration and outcome
pub async fn run_task(
    ctx: &AppContext,
    task: Task,
    credentials: &TaskCredentials,
) -> Result<TaskOutcome> {
    let name = format!("task::{task}");
    execute_logged(&name, move || async move {
        match task {
            Task::Warn => warn(ctx, credentials).await,
            Task::Destroy => destroy(ctx, credentials).await,
            Task::Hours => hours(ctx, credentials).await,
            Task::Copy => copy(ctx, credentials).await,
            Task::Reconcile => reconcile(ctx, credentials).await,
        }
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_task_names() {
        assert_eq!("warn".parse::<Task>(), Ok(Task::Warn));
        assert_eq!(" Destroy ".parse::<Task>(), Ok(Task::Destroy));
        assert!(matches!("nap".parse::<Task>(), Err(TimebotError::InvalidInput(_))));
        for task in Task::ALL {
            assert_eq!(task.to_string().parse::<Task>(), Ok(task));
        }
    }

    #[test]
    fn credentials_debug_hides_secrets() {
        let credentials = TaskCredentials {
            admin_email: Some("boss@acme.com".into()),
            admin_password: Some("hunter2".into()),
            harvest_access_token: Some("tok".into()),
            harvest_refresh_token: Some("refresh-me".into()),
            wakatime_access_token: None,
        };

        let debug = format!("{credentials:?}");

        assert!(debug.contains("boss@acme.com"));
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("tok\""));
        assert!(!debug.contains("refresh-me"));
    }

    #[test]
    fn outcome_summaries() {
        assert_eq!(TaskOutcome::Hours(37.456).to_string(), "37.46 hours this week");
        assert_eq!(TaskOutcome::CalledOut(CallOutReport::default()).to_string(), "everyone submitted");
        let report = CallOutReport {
            delinquents: vec!["Ada L".into(), "Bob M".into()],
            notified: 1,
            unmatched: 1,
            failed: 0,
        };
        assert_eq!(
            TaskOutcome::CalledOut(report).to_string(),
            "2 delinquent (1 notified, 1 unmatched, 0 failed)"
        );
    }
}
