//! Application context - dependency injection container

use std::sync::Arc;

use timebot_core::{
    ChatClient, CodingActivitySource, CodingTimeReconciler, DelinquencyScanner, HoursAggregator,
    NotificationService, NotifierSettings, OrgCalendar, TimesheetSource, WeekCopyEngine,
};
use timebot_domain::{Config, Result};
use timebot_infra::{config, AppUrl, HarvestClient, HttpClient, SlackClient, WakaTimeClient};
use tracing::info;

/// Application context - holds all services and dependencies
pub struct AppContext {
    pub config: Config,
    pub calendar: OrgCalendar,
    pub app_url: AppUrl,
    pub harvest: Arc<HarvestClient>,
    pub hours: HoursAggregator,
    pub copier: WeekCopyEngine,
    pub notifier: NotificationService,
    /// Present only when the coding-activity tracker is configured
    pub reconciler: Option<CodingTimeReconciler>,
}

impl AppContext {
    /// Load configuration and wire every service
    pub fn new() -> Result<Self> {
        Self::new_with_config(config::load()?)
    }

    /// Wire every service from an explicit configuration.
    ///
    /// Each external API gets one rate limiter shared by all services
    /// talking to it.
    pub fn new_with_config(config: Config) -> Result<Self> {
        let calendar = OrgCalendar::from_name(&config.app.timezone)?;
        let app_url = AppUrl::new(&config.app.url)?;
        let http = HttpClient::new()?;

        let harvest = Arc::new(HarvestClient::new(
            http.clone(),
            &config.harvest,
            config::rate_limiter("harvest", &config.limits.harvest)?,
        )?);
        let slack = SlackClient::new(
            http.clone(),
            &config.slack,
            config::rate_limiter("slack", &config.limits.slack)?,
        )?;

        let timesheets: Arc<dyn TimesheetSource> = harvest.clone();
        let chat: Arc<dyn ChatClient> = Arc::new(slack);

        let hours = HoursAggregator::new(Arc::clone(&timesheets), calendar);
        let copier = WeekCopyEngine::new(Arc::clone(&timesheets));
        let notifier = NotificationService::new(
            chat,
            DelinquencyScanner::new(hours.clone()),
            NotifierSettings {
                general_channel: config.slack.general_channel.clone(),
                templates: config.messages.clone(),
                week_url: harvest.weekly_url(),
                copy_url: app_url.resolve("copy", &[]),
            },
        );

        let reconciler = match &config.wakatime {
            Some(wakatime) => {
                let client = WakaTimeClient::new(
                    http,
                    wakatime,
                    config::rate_limiter("wakatime", &config.limits.wakatime)?,
                )?;
                let coding: Arc<dyn CodingActivitySource> = Arc::new(client);
                Some(CodingTimeReconciler::new(Arc::clone(&timesheets), coding))
            }
            None => None,
        };

        info!(
            timezone = %calendar.timezone(),
            coding_bridge = reconciler.is_some(),
            "application context ready"
        );

        Ok(Self { config, calendar, app_url, harvest, hours, copier, notifier, reconciler })
    }
}
