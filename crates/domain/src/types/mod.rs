//! Domain types and models

pub mod auth;
pub mod chat;
pub mod coding;
pub mod timesheet;
pub mod user;

pub use auth::{AuthScope, Credentials, TokenPair};
pub use chat::{CallOutReport, ChatUser};
pub use coding::{CodingAccount, CodingDuration};
pub use timesheet::{NewTimeEntry, Project, ProjectId, ProjectTask, TaskId, TimeEntry};
pub use user::{DelinquentRecord, TeamMember, UserId};
