//! Business-week boundaries
//!
//! Weeks run Monday through Sunday in the organisation's timezone. On a
//! Monday the new week has nothing logged yet, so "this week" still means
//! the week that just ended.

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use timebot_domain::{Result, TimebotError};

/// Inclusive `[earliest, latest]` range of calendar days.
///
/// `earliest` is always a Monday and `latest >= earliest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekWindow {
    pub earliest: NaiveDate,
    pub latest: NaiveDate,
}

impl WeekWindow {
    /// The business week containing `today`, up to and including `today`.
    ///
    /// When `today` is a Monday the window is the whole previous week.
    pub fn current_week(today: NaiveDate) -> Self {
        let latest = if today.weekday() == Weekday::Mon { today - Days::new(1) } else { today };
        let back_to_monday = u64::from(latest.weekday().num_days_from_monday());
        Self { earliest: latest - Days::new(back_to_monday), latest }
    }

    /// [`WeekWindow::current_week`] shifted back exactly seven days
    pub fn previous_week(today: NaiveDate) -> Self {
        Self::current_week(today).shifted_back(7)
    }

    fn shifted_back(self, days: u64) -> Self {
        Self { earliest: self.earliest - Days::new(days), latest: self.latest - Days::new(days) }
    }

    /// Whether `day` falls inside the window
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.earliest && day <= self.latest
    }

    /// Number of days covered
    pub fn day_count(&self) -> usize {
        usize::try_from((self.latest - self.earliest).num_days() + 1).unwrap_or(0)
    }
}

/// Source of "today" in the organisation's timezone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrgCalendar {
    tz: Tz,
}

impl OrgCalendar {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Parse an IANA timezone name such as `America/New_York`
    pub fn from_name(name: &str) -> Result<Self> {
        name.parse::<Tz>()
            .map(Self::new)
            .map_err(|e| TimebotError::Config(format!("Invalid timezone {name:?}: {e}")))
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Calendar day `now` falls on in the organisation's timezone
    pub fn today_at(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.tz).date_naive()
    }

    pub fn today(&self) -> NaiveDate {
        self.today_at(Utc::now())
    }
}

impl Default for OrgCalendar {
    fn default() -> Self {
        Self::new(chrono_tz::America::New_York)
    }
}
