//! Reminders and public call-outs in team chat

use std::sync::Arc;

use chrono::NaiveDate;
use timebot_domain::{AuthScope, CallOutReport, ChatUser, MessageContext, MessageTemplates, Result};
use tracing::{info, instrument, warn};

use super::ports::ChatClient;
use crate::timesheet::DelinquencyScanner;

/// Chat user whose email matches `email`, ignoring case
pub fn find_chat_user_by_email<'a>(users: &'a [ChatUser], email: &str) -> Option<&'a ChatUser> {
    users.iter().find(|user| user.has_email(email))
}

/// Where and what the notifier posts
#[derive(Debug, Clone, PartialEq)]
pub struct NotifierSettings {
    /// Public channel, or `@person` to redirect every message to one person
    pub general_channel: String,
    pub templates: MessageTemplates,
    /// Link to the weekly timesheet view
    pub week_url: String,
    /// Link to the "copy last week" action
    pub copy_url: String,
}

impl NotifierSettings {
    fn redirects_direct_messages(&self) -> bool {
        self.general_channel.starts_with('@')
    }
}

/// Sends timesheet reminders and delinquency call-outs
pub struct NotificationService {
    chat: Arc<dyn ChatClient>,
    scanner: DelinquencyScanner,
    settings: NotifierSettings,
}

impl NotificationService {
    pub fn new(
        chat: Arc<dyn ChatClient>,
        scanner: DelinquencyScanner,
        settings: NotifierSettings,
    ) -> Self {
        Self { chat, scanner, settings }
    }

    fn context(&self, names: Vec<String>, threshold: f64) -> MessageContext {
        MessageContext {
            names,
            week_url: self.settings.week_url.clone(),
            copy_url: self.settings.copy_url.clone(),
            min_hours: threshold,
        }
    }

    /// Post the weekly reminder to the general channel
    #[instrument(skip(self))]
    pub async fn warn_everyone(&self) -> Result<()> {
        let text = self.context(Vec::new(), 0.0).render(&self.settings.templates.reminder);
        self.chat.post_message(&self.settings.general_channel, &text).await?;
        info!(channel = %self.settings.general_channel, "reminder posted");
        Ok(())
    }

    /// Message every delinquent directly, then name them in the general
    /// channel.
    ///
    /// Unmatched members and failed direct messages are counted in the report
    /// and never abort the run. Roster, chat-user and summary failures do.
    #[instrument(skip(self, scope))]
    pub async fn call_out_delinquents(
        &self,
        scope: &AuthScope,
        threshold: f64,
        today: NaiveDate,
    ) -> Result<CallOutReport> {
        let delinquents = self.scanner.scan_roster(scope, threshold, today).await?;
        let chat_users = self.chat.list_users().await?;

        let mut report = CallOutReport {
            delinquents: delinquents.iter().map(|record| record.member.display_name()).collect(),
            ..CallOutReport::default()
        };

        let direct = self.context(Vec::new(), threshold).render(&self.settings.templates.delinquent);
        for record in &delinquents {
            let Some(chat_user) = find_chat_user_by_email(&chat_users, &record.member.email) else {
                warn!(user_id = record.member.id, "no chat account for delinquent");
                report.unmatched += 1;
                continue;
            };

            let channel = if self.settings.redirects_direct_messages() {
                self.settings.general_channel.as_str()
            } else {
                chat_user.id.as_str()
            };

            match self.chat.post_message(channel, &direct).await {
                Ok(()) => report.notified += 1,
                Err(err) => {
                    warn!(user_id = record.member.id, error = %err, "direct message failed");
                    report.failed += 1;
                }
            }
        }

        let template = if report.delinquents.is_empty() {
            &self.settings.templates.all_clear
        } else {
            &self.settings.templates.shame
        };
        let summary = self.context(report.delinquents.clone(), threshold).render(template);
        self.chat.post_message(&self.settings.general_channel, &summary).await?;

        info!(
            delinquents = report.delinquents.len(),
            notified = report.notified,
            unmatched = report.unmatched,
            failed = report.failed,
            "call-out finished"
        );
        Ok(report)
    }
}
