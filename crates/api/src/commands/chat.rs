//! Admin-only chat tasks

use timebot_core::authorize_admin;
use timebot_domain::{AuthScope, Result};

use super::{require, TaskCredentials, TaskOutcome};
use crate::context::AppContext;

async fn admin_scope(ctx: &AppContext, credentials: &TaskCredentials) -> Result<AuthScope> {
    let email = require(&credentials.admin_email, "TIMEBOT_ADMIN_EMAIL")?;
    let password = require(&credentials.admin_password, "TIMEBOT_ADMIN_PASSWORD")?;
    authorize_admin(ctx.harvest.as_ref(), email, password, &ctx.config.harvest.email_domain).await
}

/// Post the weekly reminder to the general channel
pub async fn warn(ctx: &AppContext, credentials: &TaskCredentials) -> Result<TaskOutcome> {
    admin_scope(ctx, credentials).await?;
    ctx.notifier.warn_everyone().await?;
    Ok(TaskOutcome::Warned)
}

/// Message everyone under the weekly minimum, then name them publicly
pub async fn destroy(ctx: &AppContext, credentials: &TaskCredentials) -> Result<TaskOutcome> {
    let scope = admin_scope(ctx, credentials).await?;
    let report = ctx
        .notifier
        .call_out_delinquents(&scope, ctx.config.app.min_hours, ctx.calendar.today())
        .await?;
    Ok(TaskOutcome::CalledOut(report))
}
