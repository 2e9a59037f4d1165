//! Slack Web API integration

pub mod client;
pub mod types;

pub use client::SlackClient;
