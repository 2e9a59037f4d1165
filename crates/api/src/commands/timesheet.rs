//! Tasks acting on one user's own timesheet

use timebot_core::TimesheetSource;
use timebot_domain::{AuthScope, Result, TimebotError};
use timebot_infra::GrantType;
use tracing::{info, warn};

use super::{require, TaskCredentials, TaskOutcome};
use crate::context::AppContext;

/// Bearer scope for the Harvest user behind the task credentials.
///
/// The access token is checked with `who_am_i` first. When Harvest rejects
/// it, or none is set, the refresh token is exchanged for a new pair.
pub(super) async fn user_scope(ctx: &AppContext, credentials: &TaskCredentials) -> Result<AuthScope> {
    let refresh_token = credentials.harvest_refresh_token.as_deref();

    if let Some(access_token) = credentials.harvest_access_token.as_deref() {
        let scope = AuthScope::bearer(access_token);
        match ctx.harvest.who_am_i(&scope).await {
            Ok(user) => {
                info!(user_id = user.id, "Harvest access token accepted");
                return Ok(scope);
            }
            Err(TimebotError::Auth(reason)) if refresh_token.is_some() => {
                warn!(%reason, "Harvest access token rejected, refreshing");
            }
            Err(err) => return Err(err),
        }
    }

    let refresh_token = require(&credentials.harvest_refresh_token, "TIMEBOT_HARVEST_ACCESS_TOKEN")?;
    let tokens = ctx.harvest.exchange_token(GrantType::RefreshToken, refresh_token, None).await?;
    let scope = AuthScope::bearer(tokens.access_token);
    let user = ctx.harvest.who_am_i(&scope).await?;
    info!(
        user_id = user.id,
        rotated_refresh_token = tokens.refresh_token.is_some(),
        "Harvest tokens refreshed; the new pair is not persisted"
    );
    Ok(scope)
}

/// Hours logged so far this week
pub async fn hours(ctx: &AppContext, credentials: &TaskCredentials) -> Result<TaskOutcome> {
    let scope = user_scope(ctx, credentials).await?;
    ctx.hours.aggregate_week(&scope).await.map(TaskOutcome::Hours)
}

/// Copy last week's entries that are missing from this week
pub async fn copy(ctx: &AppContext, credentials: &TaskCredentials) -> Result<TaskOutcome> {
    let scope = user_scope(ctx, credentials).await?;
    ctx.copier.copy(&scope, ctx.calendar.today()).await.map(TaskOutcome::Copied)
}
