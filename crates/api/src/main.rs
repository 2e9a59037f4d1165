//! Timebot - timesheet reminders and housekeeping for Harvest and Slack
//!
//! Usage: `timebot <warn|destroy|hours|copy|reconcile>`

use std::process::ExitCode;

use anyhow::Context;
use timebot_app::utils::logging::init_logging;
use timebot_app::{run_task, AppContext, Task, TaskCredentials};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before the subscriber reads RUST_LOG
    let dotenv = dotenvy::dotenv();
    init_logging();
    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(err) => tracing::debug!(error = %err, "no .env file loaded"),
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = format!("{err:#}"), "timebot failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let task: Task = std::env::args()
        .nth(1)
        .context("missing task; expected one of warn, destroy, hours, copy, reconcile")?
        .parse()?;

    let ctx = AppContext::new().context("failed to initialize application context")?;
    let outcome = run_task(&ctx, task, &TaskCredentials::from_env())
        .await
        .with_context(|| format!("task {task} failed"))?;

    tracing::info!(%task, %outcome, "done");
    Ok(())
}
