//! Task execution helpers

use std::future::Future;
use std::time::Instant;

use timebot_domain::Result;

use crate::utils::logging::log_task_execution;

/// Run one task, timing it and logging the outcome.
///
/// The result is passed through untouched.
pub async fn execute_logged<F, Fut, T>(task: &str, task_fn: F) -> Result<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let start = Instant::now();
    let result = task_fn().await;
    log_task_execution(task, start.elapsed(), result.as_ref().err());
    result
}
