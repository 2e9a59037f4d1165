use std::time::Duration;

use timebot_domain::TimebotError;
use timebot_infra::config::env_bool;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG` selects the filter (default `info`); a truthy
/// `TIMEBOT_LOG_JSON` switches to one JSON object per line. Calling this
/// twice leaves the first subscriber in place.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env_bool("TIMEBOT_LOG_JSON", false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| fmt::layer().json().with_current_span(false)))
        .with((!json).then(|| fmt::layer().with_target(false)))
        .try_init();
}

/// Log the outcome of a task execution with structured fields.
///
/// `task` should be a stable identifier without sensitive data.
#[inline]
pub fn log_task_execution(task: &str, elapsed: Duration, error: Option<&TimebotError>) {
    let duration_ms = elapsed.as_millis() as u64;

    match error {
        None => info!(task, duration_ms, "task_execution_success"),
        Some(err) => warn!(task, duration_ms, error_type = err.label(), error = %err, "task_execution_failure"),
    }
}
