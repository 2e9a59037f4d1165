//! Resilience primitives for talking to rate-limited external APIs
//!
//! - **Rate limiter**: rolling-window admission control with strict FIFO
//!   ordering and back-pressure instead of rejection.
//!
//! Retries live with the caller; nothing in here re-issues an operation.

pub mod rate_limiter;

use thiserror::Error;

pub use rate_limiter::{RateLimiter, RateLimiterConfig, RateLimiterConfigBuilder};

/// Invalid resilience configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid configuration: {message}")]
pub struct ConfigError {
    message: String,
}

impl ConfigError {
    /// Create a configuration error with the given message
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// Human readable description of the problem
    pub fn message(&self) -> &str {
        &self.message
    }
}
