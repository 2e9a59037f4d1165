//! Shared fixtures for the app integration tests

#![allow(dead_code)]

use timebot_domain::{
    AppSettings, Config, HarvestConfig, LimitsConfig, MessageTemplates, RateLimitSettings,
    SlackConfig, WakaTimeConfig,
};
use wiremock::MockServer;

/// Configuration pointing every API at `server`, with quotas loose enough
/// that tests never wait on a limiter
pub fn config_for(server: &MockServer) -> Config {
    let loose = RateLimitSettings::new(1_000, 1_000);
    Config {
        app: AppSettings::default(),
        harvest: HarvestConfig {
            api_url: format!("{}/harvest/", server.uri()),
            client_id: None,
            client_secret: None,
            email_domain: "acme.com".into(),
        },
        slack: SlackConfig {
            api_url: format!("{}/slack/", server.uri()),
            bot_token: "xoxb-test".into(),
            general_channel: "#general".into(),
        },
        wakatime: None,
        limits: LimitsConfig { harvest: loose, slack: loose, wakatime: loose },
        messages: MessageTemplates::default(),
    }
}

pub fn with_wakatime(mut config: Config, server: &MockServer) -> Config {
    config.wakatime = Some(WakaTimeConfig {
        api_url: format!("{}/wakatime/", server.uri()),
        client_id: None,
        client_secret: None,
    });
    config
}
