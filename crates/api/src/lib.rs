//! # Timebot App
//!
//! Command-line layer - task dispatch and main entry point.
//!
//! This crate contains:
//! - Tasks (command-line verb → core service)
//! - Application context (dependency injection)
//! - Logging setup
//!
//! ## Architecture
//! - Depends on `common`, `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture

pub mod commands;
pub mod context;
pub mod utils;

pub use commands::{run_task, Task, TaskCredentials, TaskOutcome};
pub use context::AppContext;
