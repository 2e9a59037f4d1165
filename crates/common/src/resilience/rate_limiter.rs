//! Rolling-window rate limiting with FIFO admission
//!
//! A [`RateLimiter`] admits at most `max_operations` within any rolling
//! `window`. Callers that arrive while the window is saturated are parked in
//! arrival order and released on a timer once capacity frees up. Nothing is
//! ever rejected: saturation turns into back-pressure.
//!
//! One limiter instance is meant to gate all outbound calls against a single
//! external API and is shared (cheaply cloned) by every client that talks to
//! it.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace};

use super::ConfigError;

/// Configuration for [`RateLimiter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimiterConfig {
    /// Maximum number of admissions inside any rolling window
    pub max_operations: u32,
    /// Length of the rolling window
    pub window: Duration,
    /// Whether the first operation of a fresh window proceeds immediately.
    ///
    /// When `false`, admissions are spread evenly across the window
    /// (`window / max_operations` apart) and even the first one waits one
    /// spacing interval.
    pub burst_first: bool,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self { max_operations: 100, window: Duration::from_secs(20), burst_first: true }
    }
}

impl RateLimiterConfig {
    /// Create a burst-first configuration
    pub fn new(max_operations: u32, window: Duration) -> Self {
        Self { max_operations, window, burst_first: true }
    }

    /// Create a new configuration builder
    pub fn builder() -> RateLimiterConfigBuilder {
        RateLimiterConfigBuilder::new()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_operations == 0 {
            return Err(ConfigError::new("max_operations must be greater than 0"));
        }
        if self.window.is_zero() {
            return Err(ConfigError::new("window must be greater than zero"));
        }
        Ok(())
    }

    /// Minimum gap between two admissions when admissions are evenly spaced
    pub fn spacing(&self) -> Duration {
        self.window / self.max_operations.max(1)
    }
}

/// Builder for [`RateLimiterConfig`]
#[derive(Debug)]
pub struct RateLimiterConfigBuilder {
    config: RateLimiterConfig,
}

impl Default for RateLimiterConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiterConfigBuilder {
    pub fn new() -> Self {
        Self { config: RateLimiterConfig::default() }
    }

    pub fn max_operations(mut self, max_operations: u32) -> Self {
        self.config.max_operations = max_operations;
        self
    }

    pub fn window(mut self, window: Duration) -> Self {
        self.config.window = window;
        self
    }

    pub fn burst_first(mut self, burst_first: bool) -> Self {
        self.config.burst_first = burst_first;
        self
    }

    pub fn build(self) -> Result<RateLimiterConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Admission history for the current rolling window
#[derive(Debug, Default)]
struct WindowState {
    /// Admission instants still inside the window, oldest first
    admitted: VecDeque<Instant>,
}

impl WindowState {
    fn prune(&mut self, now: Instant, window: Duration) {
        while let Some(oldest) = self.admitted.front() {
            if *oldest + window <= now {
                self.admitted.pop_front();
            } else {
                break;
            }
        }
    }

    /// Earliest instant at which the next admission may happen
    fn next_slot(&mut self, config: &RateLimiterConfig, now: Instant) -> Instant {
        self.prune(now, config.window);

        let mut ready = now;
        if self.admitted.len() >= config.max_operations as usize {
            if let Some(oldest) = self.admitted.front() {
                ready = ready.max(*oldest + config.window);
            }
        }

        if !config.burst_first {
            let base = self.admitted.back().copied().unwrap_or(now);
            ready = ready.max(base + config.spacing());
        }

        ready
    }

    fn record(&mut self, at: Instant, max_operations: u32) {
        self.admitted.push_back(at);
        while self.admitted.len() > max_operations as usize {
            self.admitted.pop_front();
        }
    }
}

/// FIFO rolling-window rate limiter
///
/// Admission decisions are serialized behind a fair async mutex, so callers
/// are admitted strictly in the order they called [`RateLimiter::acquire`].
/// A caller waiting for capacity holds its place in line while it sleeps.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
///
/// use timebot_common::resilience::{RateLimiter, RateLimiterConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let limiter = RateLimiter::new("harvest", RateLimiterConfig::new(100, Duration::from_secs(20)))?;
///
/// limiter.acquire().await;
/// // issue the request
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct RateLimiter {
    name: Arc<str>,
    config: RateLimiterConfig,
    state: Arc<Mutex<WindowState>>,
}

impl RateLimiter {
    /// Create a new limiter; `name` only appears in log output
    pub fn new(name: impl Into<Arc<str>>, config: RateLimiterConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { name: name.into(), config, state: Arc::new(Mutex::new(WindowState::default())) })
    }

    /// Wait until this caller is admitted
    ///
    /// Never fails and never drops a caller. Returns the instant at which the
    /// admission was granted.
    pub async fn acquire(&self) -> Instant {
        let mut state = self.state.lock().await;

        let now = Instant::now();
        let ready = state.next_slot(&self.config, now);
        if ready > now {
            debug!(
                limiter = %self.name,
                wait_ms = (ready - now).as_millis() as u64,
                "rate limit saturated, waiting for capacity"
            );
            sleep_until(ready).await;
        }

        let admitted_at = Instant::now();
        state.record(admitted_at, self.config.max_operations);
        trace!(limiter = %self.name, in_window = state.admitted.len(), "admitted");
        admitted_at
    }

    /// Number of admissions still counted against the current window
    pub async fn in_window(&self) -> usize {
        let mut state = self.state.lock().await;
        state.prune(Instant::now(), self.config.window);
        state.admitted.len()
    }

    /// Limiter name used in logs
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Active configuration
    pub fn config(&self) -> &RateLimiterConfig {
        &self.config
    }
}

impl Clone for RateLimiter {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            config: self.config.clone(),
            state: Arc::clone(&self.state),
        }
    }
}
