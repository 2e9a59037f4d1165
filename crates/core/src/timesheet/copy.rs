//! Copying last week's timesheet into the current week
//!
//! Both weeks are walked newest-first in a single pass. Current-week days come
//! first and are indexed by weekday; each previous-week day is then compared
//! against the index for the same weekday. Entries match on (project, task)
//! only, so hours and notes never prevent or trigger a copy.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use timebot_domain::{AuthScope, NewTimeEntry, ProjectTask, Result, TimeEntry};
use tracing::{debug, info, instrument, warn};

use super::ports::TimesheetSource;
use super::walker::{walk_days, DayVisitor};
use super::week::WeekWindow;

struct CopyPlanner<'a> {
    source: &'a dyn TimesheetSource,
    scope: &'a AuthScope,
    current: WeekWindow,
    /// (project, task) pairs already logged this week, per weekday
    logged: HashMap<Weekday, HashSet<ProjectTask>>,
    created: usize,
}

impl<'a> CopyPlanner<'a> {
    fn new(source: &'a dyn TimesheetSource, scope: &'a AuthScope, current: WeekWindow) -> Self {
        Self { source, scope, current, logged: HashMap::new(), created: 0 }
    }

    fn index_current_day(&mut self, day: NaiveDate, entries: &[TimeEntry]) {
        let keys = self.logged.entry(day.weekday()).or_default();
        keys.extend(entries.iter().filter_map(TimeEntry::project_task));
    }

    /// Previous-week entries with no (project, task) match on the same weekday
    fn missing_entries(&self, day: NaiveDate, entries: Vec<TimeEntry>) -> Vec<(ProjectTask, f64)> {
        let logged = self.logged.get(&day.weekday());
        entries
            .into_iter()
            .filter_map(|entry| entry.project_task().map(|key| (key, entry.hours_or_zero())))
            .filter(|(key, _)| logged.map_or(true, |keys| !keys.contains(key)))
            .collect()
    }
}

#[async_trait]
impl<'a> DayVisitor<TimeEntry> for CopyPlanner<'a> {
    async fn visit(&mut self, day: NaiveDate, entries: Vec<TimeEntry>) -> Result<()> {
        if day >= self.current.earliest {
            self.index_current_day(day, &entries);
            return Ok(());
        }

        let target = day + Days::new(7);
        if target > self.current.latest {
            // No counterpart yet this week
            return Ok(());
        }

        for (key, hours) in self.missing_entries(day, entries) {
            let entry = NewTimeEntry::new(target, key, hours);
            self.source.create_entry(&entry, self.scope).await?;
            self.created += 1;
            debug!(
                day = %target,
                project_id = key.project_id,
                task_id = key.task_id,
                hours,
                "copied entry"
            );
        }
        Ok(())
    }
}

/// Recreates last week's entries that are missing from this week
#[derive(Clone)]
pub struct WeekCopyEngine {
    source: Arc<dyn TimesheetSource>,
}

impl WeekCopyEngine {
    pub fn new(source: Arc<dyn TimesheetSource>) -> Self {
        Self { source }
    }

    /// Copy missing entries for the user `scope` points at.
    ///
    /// Returns the number of entries created. A failed creation stops the copy
    /// and is returned; entries created before it are kept.
    #[instrument(skip(self, scope), fields(of_user = ?scope.of_user))]
    pub async fn copy(&self, scope: &AuthScope, today: NaiveDate) -> Result<usize> {
        let current = WeekWindow::current_week(today);
        let previous = WeekWindow::previous_week(today);
        let source = self.source.as_ref();
        let mut planner = CopyPlanner::new(source, scope, current);

        let walked = walk_days(
            previous.earliest,
            current.latest,
            move |day| source.fetch_day_entries(day, scope),
            &mut planner,
        )
        .await;

        match walked {
            Ok(days) => {
                info!(days, created = planner.created, "copied previous week");
                Ok(planner.created)
            }
            Err(err) => {
                warn!(created = planner.created, error = %err, "week copy aborted");
                Err(err)
            }
        }
    }
}
