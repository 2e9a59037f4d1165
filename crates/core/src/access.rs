//! Admin gate for the bulk chat tasks

use timebot_domain::{AuthScope, Result, TimebotError};
use tracing::{info, warn};

use crate::timesheet::ports::TimesheetSource;

/// Check that `email`/`password` belong to an admin inside `email_domain`.
///
/// Returns a basic-auth scope for the admin. Any failure, including a
/// rejected login, surfaces as `Auth("Not authorized.")`.
pub async fn authorize_admin(
    source: &dyn TimesheetSource,
    email: &str,
    password: &str,
    email_domain: &str,
) -> Result<AuthScope> {
    let scope = AuthScope::basic(email, password);

    let account = match source.who_am_i(&scope).await {
        Ok(account) => account,
        Err(err) => {
            warn!(error = %err, "admin lookup failed");
            return Err(TimebotError::not_authorized());
        }
    };

    let suffix = format!("@{}", email_domain.trim().to_lowercase());
    if account.is_admin && account.normalized_email().ends_with(&suffix) {
        info!(user_id = account.id, "admin authorized");
        Ok(scope)
    } else {
        warn!(user_id = account.id, is_admin = account.is_admin, "admin check rejected");
        Err(TimebotError::not_authorized())
    }
}
