//! Shared test helpers for `timebot-core` integration tests.
//!
//! In-memory fakes for every port, so the services can be exercised without
//! HTTP.

#![allow(dead_code)]

pub mod chat;
pub mod coding;
pub mod timesheets;

use chrono::NaiveDate;
use timebot_domain::{TeamMember, TimeEntry};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Entry with a project, task and hours
pub fn entry(project_id: u64, task_id: u64, hours: f64) -> TimeEntry {
    TimeEntry {
        project_id: Some(project_id),
        task_id: Some(task_id),
        hours: Some(hours),
        ..TimeEntry::default()
    }
}

pub fn member(id: u64, email: &str, is_active: bool) -> TeamMember {
    TeamMember {
        id,
        email: email.to_string(),
        first_name: format!("User{id}"),
        last_name: "Test".to_string(),
        is_active,
        is_admin: false,
    }
}
