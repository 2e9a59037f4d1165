//! Week-windowed timesheet logic

pub mod copy;
pub mod delinquency;
pub mod hours;
pub mod ports;
pub mod walker;
pub mod week;

pub use copy::WeekCopyEngine;
pub use delinquency::DelinquencyScanner;
pub use hours::{sum_hours, HoursAggregator};
pub use walker::{walk_days, DayVisitor};
pub use week::{OrgCalendar, WeekWindow};
