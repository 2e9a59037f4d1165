//! # Timebot Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - The shared HTTP transport and error conversions
//! - The Harvest, Slack and WakaTime clients, with their OAuth token helpers
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `timebot-core`
//! - Every client gates its requests through a
//!   [`RateLimiter`](timebot_common::resilience::RateLimiter) shared by all
//!   callers of that external API

pub mod config;
pub mod errors;
pub mod harvest;
pub mod http;
pub mod links;
pub mod oauth;
pub mod slack;
pub mod wakatime;

pub use errors::InfraError;
pub use harvest::HarvestClient;
pub use http::{HttpClient, HttpClientBuilder};
pub use links::AppUrl;
pub use oauth::GrantType;
pub use slack::SlackClient;
pub use wakatime::WakaTimeClient;
