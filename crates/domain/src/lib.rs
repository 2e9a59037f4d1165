//! # Timebot Domain
//!
//! Business domain types for the timesheet bot.
//!
//! This crate contains:
//! - Time-tracking data (entries, projects, team members)
//! - Chat and coding-activity data used by the notification and WakaTime
//!   bridges
//! - Domain error types and Result definitions
//! - Configuration structures and defaults
//!
//! ## Architecture
//! - No dependencies on other timebot crates
//! - Only external dependencies allowed
//! - Pure data, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
