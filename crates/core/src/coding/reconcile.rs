//! Fill timesheet gaps from tracked coding time
//!
//! For each day of the current week, coding time is grouped by project name.
//! Projects that exist in the time-tracking service under the same name and
//! have nothing logged that day get one entry with the coded hours.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use timebot_domain::constants::SECONDS_PER_HOUR;
use timebot_domain::{
    AuthScope, CodingDuration, NewTimeEntry, Project, ProjectTask, Result, TimebotError,
};
use tracing::{debug, info, instrument, warn};

use super::ports::CodingActivitySource;
use crate::timesheet::ports::TimesheetSource;
use crate::timesheet::walker::{walk_days, DayVisitor};
use crate::timesheet::week::WeekWindow;

/// Hours rounded to two decimals
fn round_hours(hours: f64) -> f64 {
    (hours * 100.0).round() / 100.0
}

/// Coded hours per tracked project name, restricted to `known` names
fn hours_by_project(
    durations: &[CodingDuration],
    known: &HashMap<&str, &Project>,
) -> BTreeMap<String, f64> {
    let mut hours = BTreeMap::new();
    for duration in durations.iter().filter(|d| known.contains_key(d.project.as_str())) {
        *hours.entry(duration.project.clone()).or_insert(0.0) += duration.seconds / SECONDS_PER_HOUR;
    }
    hours
}

struct GapFiller<'a> {
    timesheets: &'a dyn TimesheetSource,
    scope: &'a AuthScope,
    projects: HashMap<&'a str, &'a Project>,
    created: usize,
}

#[async_trait]
impl<'a> DayVisitor<CodingDuration> for GapFiller<'a> {
    async fn visit(&mut self, day: NaiveDate, durations: Vec<CodingDuration>) -> Result<()> {
        let coded = hours_by_project(&durations, &self.projects);
        if coded.is_empty() {
            return Ok(());
        }

        let logged: HashSet<_> = self
            .timesheets
            .fetch_day_entries(day, self.scope)
            .await?
            .into_iter()
            .filter_map(|entry| entry.project_id)
            .collect();

        for (name, hours) in coded {
            let Some(project) = self.projects.get(name.as_str()).copied() else {
                continue;
            };
            if logged.contains(&project.id) {
                continue;
            }
            let Some(task_id) = project.default_task() else {
                warn!(project_id = project.id, project = %name, "project has no task, skipping");
                continue;
            };
            let hours = round_hours(hours);
            if hours <= 0.0 {
                continue;
            }

            let key = ProjectTask { project_id: project.id, task_id };
            self.timesheets.create_entry(&NewTimeEntry::new(day, key, hours), self.scope).await?;
            self.created += 1;
            debug!(day = %day, project = %name, hours, "logged coding time");
        }
        Ok(())
    }
}

/// Logs tracked coding time on days the timesheet has no entry for
pub struct CodingTimeReconciler {
    timesheets: Arc<dyn TimesheetSource>,
    coding: Arc<dyn CodingActivitySource>,
}

impl CodingTimeReconciler {
    pub fn new(timesheets: Arc<dyn TimesheetSource>, coding: Arc<dyn CodingActivitySource>) -> Self {
        Self { timesheets, coding }
    }

    /// Reconcile the current week; returns the number of entries created.
    ///
    /// The coding token is checked before anything is read. A rejected token
    /// is reported as `Auth`, whatever the tracker answered.
    #[instrument(skip(self, scope, coding_token), fields(of_user = ?scope.of_user))]
    pub async fn reconcile_week(
        &self,
        scope: &AuthScope,
        coding_token: &str,
        today: NaiveDate,
    ) -> Result<usize> {
        let account = self.coding.current_user(coding_token).await.map_err(|err| {
            warn!(error = %err, "coding-activity token rejected");
            TimebotError::Auth(format!("WakaTime authentication failed: {err}"))
        })?;
        debug!(account = %account.id, "coding-activity account verified");

        let projects = self.timesheets.list_projects(scope).await?;
        let week = WeekWindow::current_week(today);
        let coding = self.coding.as_ref();

        let mut filler = GapFiller {
            timesheets: self.timesheets.as_ref(),
            scope,
            projects: projects.iter().map(|project| (project.name.as_str(), project)).collect(),
            created: 0,
        };

        let walked = walk_days(
            week.earliest,
            week.latest,
            move |day| coding.fetch_durations(day, coding_token),
            &mut filler,
        )
        .await;

        match walked {
            Ok(_) => {
                info!(created = filler.created, "reconciled coding time");
                Ok(filler.created)
            }
            Err(err) => {
                warn!(created = filler.created, error = %err, "coding time reconciliation aborted");
                Err(err)
            }
        }
    }
}
