//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If a required variable is missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! Required:
//! - `TIMEBOT_HARVEST_API_URL`: Harvest account URL
//! - `TIMEBOT_HARVEST_EMAIL_DOMAIN`: Domain admins must belong to
//! - `TIMEBOT_SLACK_BOT_TOKEN`: Slack bot token
//! - `TIMEBOT_SLACK_GENERAL_CHANNEL`: Announcement channel (or `@person`)
//!
//! Optional:
//! - `TIMEBOT_APP_URL`, `TIMEBOT_MIN_HOURS`, `TIMEBOT_TIMEZONE`
//! - `TIMEBOT_HARVEST_CLIENT_ID`, `TIMEBOT_HARVEST_CLIENT_SECRET`
//! - `TIMEBOT_SLACK_API_URL`
//! - `TIMEBOT_WAKATIME_API_URL`, `TIMEBOT_WAKATIME_CLIENT_ID`,
//!   `TIMEBOT_WAKATIME_CLIENT_SECRET` (any of the first two enables the
//!   coding-time bridge)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./timebot.json` or `./timebot.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::time::Duration;

use timebot_common::resilience::{RateLimiter, RateLimiterConfig};
use timebot_domain::constants::DEFAULT_WAKATIME_API_URL;
use timebot_domain::{
    AppSettings, Config, HarvestConfig, LimitsConfig, MessageTemplates, RateLimitSettings,
    Result, SlackConfig, TimebotError, WakaTimeConfig,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variable is missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `TimebotError::Config` if configuration cannot be loaded from
/// either source.
pub fn load() -> Result<Config> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `TimebotError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let defaults = AppSettings::default();
    let app = AppSettings {
        url: env_opt("TIMEBOT_APP_URL").unwrap_or(defaults.url),
        min_hours: match env_opt("TIMEBOT_MIN_HOURS") {
            Some(raw) => parse_hours(&raw)?,
            None => defaults.min_hours,
        },
        timezone: env_opt("TIMEBOT_TIMEZONE").unwrap_or(defaults.timezone),
    };

    let harvest = HarvestConfig {
        api_url: env_var("TIMEBOT_HARVEST_API_URL")?,
        client_id: env_opt("TIMEBOT_HARVEST_CLIENT_ID"),
        client_secret: env_opt("TIMEBOT_HARVEST_CLIENT_SECRET"),
        email_domain: env_var("TIMEBOT_HARVEST_EMAIL_DOMAIN")?,
    };

    let mut slack = SlackConfig {
        api_url: timebot_domain::constants::DEFAULT_SLACK_API_URL.to_string(),
        bot_token: env_var("TIMEBOT_SLACK_BOT_TOKEN")?,
        general_channel: env_var("TIMEBOT_SLACK_GENERAL_CHANNEL")?,
    };
    if let Some(api_url) = env_opt("TIMEBOT_SLACK_API_URL") {
        slack.api_url = api_url;
    }

    let wakatime_url = env_opt("TIMEBOT_WAKATIME_API_URL");
    let wakatime_client = env_opt("TIMEBOT_WAKATIME_CLIENT_ID");
    let wakatime = if wakatime_url.is_some() || wakatime_client.is_some() {
        Some(WakaTimeConfig {
            api_url: wakatime_url.unwrap_or_else(|| DEFAULT_WAKATIME_API_URL.to_string()),
            client_id: wakatime_client,
            client_secret: env_opt("TIMEBOT_WAKATIME_CLIENT_SECRET"),
        })
    } else {
        None
    };

    Ok(Config {
        app,
        harvest,
        slack,
        wakatime,
        limits: LimitsConfig::default(),
        messages: MessageTemplates::default(),
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `TimebotError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(TimebotError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            TimebotError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| TimebotError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, format chosen by extension
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| TimebotError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| TimebotError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(TimebotError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its parents (up to 2 levels)
/// and the executable's directory.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("timebot.json"),
        dir.join("timebot.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Build the limiter for one external API from its configured quota
///
/// # Errors
/// Returns `TimebotError::Config` for a zero quota or an empty window.
pub fn rate_limiter(name: &str, settings: &RateLimitSettings) -> Result<RateLimiter> {
    let config = RateLimiterConfig::builder()
        .max_operations(settings.max_operations)
        .window(Duration::from_millis(settings.window_ms))
        .burst_first(settings.burst_first)
        .build()
        .map_err(|e| TimebotError::Config(format!("{name} rate limit: {e}")))?;
    RateLimiter::new(name, config).map_err(|e| TimebotError::Config(format!("{name} rate limit: {e}")))
}

/// Get required environment variable
///
/// # Errors
/// Returns `TimebotError::Config` if the variable is not set or blank.
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        TimebotError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Optional environment variable; blank values count as unset
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
pub fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}

fn parse_hours(raw: &str) -> Result<f64> {
    match raw.parse::<f64>() {
        Ok(hours) if hours.is_finite() && hours >= 0.0 => Ok(hours),
        Ok(_) => Err(TimebotError::Config(format!("Invalid minimum hours: {raw}"))),
        Err(e) => Err(TimebotError::Config(format!("Invalid minimum hours: {}", e))),
    }
}
