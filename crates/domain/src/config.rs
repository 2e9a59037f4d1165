//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_APP_URL, DEFAULT_MIN_HOURS, DEFAULT_SLACK_API_URL, DEFAULT_TIMEZONE,
    DEFAULT_WAKATIME_API_URL, HARVEST_MAX_OPERATIONS, HARVEST_WINDOW_MS, SLACK_MAX_OPERATIONS,
    SLACK_WINDOW_MS, WAKATIME_MAX_OPERATIONS, WAKATIME_WINDOW_MS,
};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub app: AppSettings,
    pub harvest: HarvestConfig,
    pub slack: SlackConfig,
    /// Optional: the coding-time bridge is disabled when absent
    #[serde(default)]
    pub wakatime: Option<WakaTimeConfig>,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub messages: MessageTemplates,
}

/// Settings that are not tied to a single external service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Public base URL of this bot, used to build links in messages
    pub url: String,
    /// Weekly hours below which an active member is delinquent
    pub min_hours: f64,
    /// IANA timezone name all week boundaries are computed in
    pub timezone: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_APP_URL.to_string(),
            min_hours: DEFAULT_MIN_HOURS,
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

/// Time-tracking service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Account base URL, e.g. `https://example.harvestapp.com/`
    pub api_url: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing)]
    pub client_secret: Option<String>,
    /// Admins must have an email in this domain
    pub email_domain: String,
}

/// Team-chat configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlackConfig {
    #[serde(default = "default_slack_api_url")]
    pub api_url: String,
    #[serde(skip_serializing)]
    pub bot_token: String,
    /// Channel for public announcements. A value starting with `@` names a
    /// person instead, and then every direct message is redirected there.
    pub general_channel: String,
}

fn default_slack_api_url() -> String {
    DEFAULT_SLACK_API_URL.to_string()
}

/// Coding-activity tracker configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WakaTimeConfig {
    #[serde(default = "default_wakatime_api_url")]
    pub api_url: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing)]
    pub client_secret: Option<String>,
}

fn default_wakatime_api_url() -> String {
    DEFAULT_WAKATIME_API_URL.to_string()
}

/// Outbound quota for one external API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitSettings {
    pub max_operations: u32,
    pub window_ms: u64,
    #[serde(default = "default_burst_first")]
    pub burst_first: bool,
}

impl RateLimitSettings {
    pub const fn new(max_operations: u32, window_ms: u64) -> Self {
        Self { max_operations, window_ms, burst_first: true }
    }
}

fn default_burst_first() -> bool {
    true
}

/// Per-service outbound quotas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub harvest: RateLimitSettings,
    pub slack: RateLimitSettings,
    pub wakatime: RateLimitSettings,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            harvest: RateLimitSettings::new(HARVEST_MAX_OPERATIONS, HARVEST_WINDOW_MS),
            slack: RateLimitSettings::new(SLACK_MAX_OPERATIONS, SLACK_WINDOW_MS),
            wakatime: RateLimitSettings::new(WAKATIME_MAX_OPERATIONS, WAKATIME_WINDOW_MS),
        }
    }
}

/// Chat message templates.
///
/// Placeholders: `{names}`, `{week_url}`, `{copy_url}`, `{min_hours}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageTemplates {
    /// Posted to the general channel by the `warn` task
    pub reminder: String,
    /// Sent directly to each delinquent
    pub delinquent: String,
    /// Public summary naming the delinquents
    pub shame: String,
    /// Public summary when nobody is delinquent
    pub all_clear: String,
}

impl Default for MessageTemplates {
    fn default() -> Self {
        Self {
            reminder: ":key: Do your timesheets! <{week_url}|Use a blank timesheet>, or \
                       <{copy_url}|copy hours from last week>."
                .to_string(),
            delinquent: "You have not submitted {min_hours} hours this week! Please do so now: \
                         {week_url}"
                .to_string(),
            shame: "The following people have not submitted their timesheets: {names}"
                .to_string(),
            all_clear: "Everyone submitted their timesheets!".to_string(),
        }
    }
}

/// Values substituted into [`MessageTemplates`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MessageContext {
    pub names: Vec<String>,
    pub week_url: String,
    pub copy_url: String,
    pub min_hours: f64,
}

impl MessageContext {
    /// Replace every known placeholder in `template`
    pub fn render(&self, template: &str) -> String {
        template
            .replace("{names}", &self.names.join(", "))
            .replace("{week_url}", &self.week_url)
            .replace("{copy_url}", &self.copy_url)
            .replace("{min_hours}", &format_hours(self.min_hours))
    }
}

/// `40.0` renders as `40`, `37.5` as `37.5`
fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{hours:.0}")
    } else {
        hours.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_json_fills_defaults() {
        let json = r#"{
            "harvest": { "api_url": "https://acme.harvestapp.com/", "email_domain": "acme.com" },
            "slack": { "bot_token": "xoxb-1", "general_channel": "general" }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.app, AppSettings::default());
        assert_eq!(config.slack.api_url, DEFAULT_SLACK_API_URL);
        assert_eq!(config.limits, LimitsConfig::default());
        assert_eq!(config.limits.harvest.max_operations, 100);
        assert_eq!(config.limits.slack.window_ms, 1_000);
        assert!(config.wakatime.is_none());
    }

    #[test]
    fn secrets_are_not_serialized() {
        let slack = SlackConfig {
            api_url: DEFAULT_SLACK_API_URL.to_string(),
            bot_token: "xoxb-secret".to_string(),
            general_channel: "general".to_string(),
        };
        let json = serde_json::to_string(&slack).unwrap();
        assert!(!json.contains("xoxb-secret"));
    }

    #[test]
    fn render_substitutes_placeholders() {
        let context = MessageContext {
            names: vec!["Ada Lovelace".into(), "Alan Turing".into()],
            week_url: "https://acme.harvestapp.com/time/week".into(),
            copy_url: "http://localhost:3000/copy".into(),
            min_hours: 40.0,
        };

        assert_eq!(context.render("{names}!"), "Ada Lovelace, Alan Turing!");
        assert_eq!(
            context.render("log {min_hours}h at {week_url}"),
            "log 40h at https://acme.harvestapp.com/time/week"
        );
        assert_eq!(context.render("{copy_url}"), "http://localhost:3000/copy");
    }

    #[test]
    fn fractional_threshold_keeps_decimals() {
        let context = MessageContext { min_hours: 37.5, ..Default::default() };
        assert_eq!(context.render("{min_hours}"), "37.5");
    }
}
