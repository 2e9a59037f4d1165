//! Weekly hours aggregation

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use timebot_domain::{AuthScope, Result, TimeEntry};
use tracing::{debug, instrument};

use super::ports::TimesheetSource;
use super::walker::{walk_days, DayVisitor};
use super::week::{OrgCalendar, WeekWindow};

/// Total hours of `entries`; missing durations count as zero
pub fn sum_hours(entries: &[TimeEntry]) -> f64 {
    entries.iter().map(TimeEntry::hours_or_zero).sum()
}

#[derive(Debug, Default)]
struct HoursTally {
    total: f64,
}

#[async_trait]
impl DayVisitor<TimeEntry> for HoursTally {
    async fn visit(&mut self, _day: NaiveDate, entries: Vec<TimeEntry>) -> Result<()> {
        self.total += sum_hours(&entries);
        Ok(())
    }
}

/// Sums the hours logged during the current business week
#[derive(Clone)]
pub struct HoursAggregator {
    source: Arc<dyn TimesheetSource>,
    calendar: OrgCalendar,
}

impl HoursAggregator {
    pub fn new(source: Arc<dyn TimesheetSource>, calendar: OrgCalendar) -> Self {
        Self { source, calendar }
    }

    /// Hours logged so far this week by the user `scope` points at
    pub async fn aggregate_week(&self, scope: &AuthScope) -> Result<f64> {
        self.aggregate_week_of(scope, self.calendar.today()).await
    }

    /// Same as [`HoursAggregator::aggregate_week`] with an explicit "today".
    ///
    /// Fails with the first fetch error; no partial total is returned.
    #[instrument(skip(self, scope), fields(of_user = ?scope.of_user))]
    pub async fn aggregate_week_of(&self, scope: &AuthScope, today: NaiveDate) -> Result<f64> {
        let week = WeekWindow::current_week(today);
        let source = &self.source;
        let mut tally = HoursTally::default();

        walk_days(
            week.earliest,
            week.latest,
            move |day| source.fetch_day_entries(day, scope),
            &mut tally,
        )
        .await?;

        debug!(hours = tally.total, "aggregated week");
        Ok(tally.total)
    }

    pub fn calendar(&self) -> OrgCalendar {
        self.calendar
    }

    pub(crate) fn source(&self) -> &Arc<dyn TimesheetSource> {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_hours_count_as_zero() {
        let entries = vec![
            TimeEntry { hours: Some(3.0), ..Default::default() },
            TimeEntry { hours: None, ..Default::default() },
            TimeEntry { hours: Some(5.0), ..Default::default() },
        ];
        assert_eq!(sum_hours(&entries), 8.0);
    }

    #[test]
    fn empty_day_sums_to_zero() {
        assert_eq!(sum_hours(&[]), 0.0);
    }
}
