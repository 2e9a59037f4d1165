//! # Timebot Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for the time-tracking, chat and
//!   coding-activity services
//! - Week arithmetic and the day-by-day walk over a week
//! - Hours aggregation, delinquency scanning and week copying
//! - Admin gating, chat notifications and coding-time reconciliation
//!
//! ## Architecture Principles
//! - Only depends on `timebot-domain`
//! - No HTTP or platform code
//! - All external dependencies via traits
//! - Rate limiting is the adapters' concern; services never sleep

pub mod access;
pub mod coding;
pub mod notify;
pub mod timesheet;

pub use access::authorize_admin;
pub use coding::ports::CodingActivitySource;
pub use coding::CodingTimeReconciler;
pub use notify::ports::ChatClient;
pub use notify::{find_chat_user_by_email, NotificationService, NotifierSettings};
pub use timesheet::ports::TimesheetSource;
pub use timesheet::{
    sum_hours, walk_days, DayVisitor, DelinquencyScanner, HoursAggregator, OrgCalendar,
    WeekCopyEngine, WeekWindow,
};
