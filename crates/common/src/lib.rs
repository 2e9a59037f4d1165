//! Shared, domain-free building blocks for the timebot crates.
//!
//! Currently this is the rate limiting used to stay inside the quotas of the
//! external APIs (Harvest, Slack, WakaTime).

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod resilience;

pub use resilience::{ConfigError, RateLimiter, RateLimiterConfig, RateLimiterConfigBuilder};
