//! Application constants
//!
//! Centralized location for the domain-level defaults.

/// Weekly hours below which an active team member is delinquent
pub const DEFAULT_MIN_HOURS: f64 = 40.0;

/// Organisational timezone every week boundary is computed in
pub const DEFAULT_TIMEZONE: &str = "America/New_York";

pub const DEFAULT_APP_URL: &str = "http://localhost:3000/";
pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api/";
pub const DEFAULT_WAKATIME_API_URL: &str = "https://wakatime.com/";

// Outbound quotas (operations per window)
pub const HARVEST_MAX_OPERATIONS: u32 = 100;
pub const HARVEST_WINDOW_MS: u64 = 20_000;
pub const SLACK_MAX_OPERATIONS: u32 = 1;
pub const SLACK_WINDOW_MS: u64 = 1_000;
pub const WAKATIME_MAX_OPERATIONS: u32 = 1;
pub const WAKATIME_WINDOW_MS: u64 = 200;

pub const SECONDS_PER_HOUR: f64 = 3600.0;
