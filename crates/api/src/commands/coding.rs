use timebot_domain::{Result, TimebotError};

use super::timesheet::user_scope;
use super::{require, TaskCredentials, TaskOutcome};
use crate::context::AppContext;

/// Log tracked coding time the timesheet is missing
pub async fn reconcile(ctx: &AppContext, credentials: &TaskCredentials) -> Result<TaskOutcome> {
    let reconciler = ctx
        .reconciler
        .as_ref()
        .ok_or_else(|| TimebotError::Config("WakaTime is not configured".into()))?;
    let coding_token = require(&credentials.wakatime_access_token, "TIMEBOT_WAKATIME_ACCESS_TOKEN")?;
    let scope = user_scope(ctx, credentials).await?;

    reconciler
        .reconcile_week(&scope, coding_token, ctx.calendar.today())
        .await
        .map(TaskOutcome::Reconciled)
}
