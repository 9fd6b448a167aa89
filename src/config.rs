use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::engine::StrategyConfig;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub hub: HubConfig,
    #[serde(default)]
    pub engine: StrategyConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// REST root of the statistics source
    #[serde(default = "default_provider_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Upper bound on matches returned by one live listing
    #[serde(default = "default_live_match_limit")]
    pub live_match_limit: usize,
    /// Match clock assumed when the provider does not report one
    #[serde(default = "default_elapsed_minutes")]
    pub default_elapsed_minutes: u32,
}

fn default_provider_url() -> String {
    "https://api.sofascore.com/api/v1".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36".to_string()
}

fn default_live_match_limit() -> usize {
    20
}

fn default_elapsed_minutes() -> u32 {
    60
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_provider_url(),
            request_timeout_ms: default_request_timeout_ms(),
            user_agent: default_user_agent(),
            live_match_limit: default_live_match_limit(),
            default_elapsed_minutes: default_elapsed_minutes(),
        }
    }
}

impl ProviderConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    /// Delay between successful cycles
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Delay after a failed cycle
    #[serde(default = "default_error_backoff_secs")]
    pub error_backoff_secs: u64,
    #[serde(default = "default_max_matches_per_cycle")]
    pub max_matches_per_cycle: usize,
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_error_backoff_secs() -> u64 {
    5
}

fn default_max_matches_per_cycle() -> usize {
    5
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            error_backoff_secs: default_error_backoff_secs(),
            max_matches_per_cycle: default_max_matches_per_cycle(),
        }
    }
}

impl SchedulerConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn error_backoff(&self) -> Duration {
        Duration::from_secs(self.error_backoff_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HubConfig {
    /// Updates buffered per subscriber before it is considered stalled
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Upper bound on a single send to one subscriber
    #[serde(default = "default_send_timeout_ms")]
    pub send_timeout_ms: u64,
}

fn default_queue_capacity() -> usize {
    32
}

fn default_send_timeout_ms() -> u64 {
    5_000
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            queue_capacity: default_queue_capacity(),
            send_timeout_ms: default_send_timeout_ms(),
        }
    }
}

impl HubConfig {
    pub fn send_timeout(&self) -> Duration {
        Duration::from_millis(self.send_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Enable JSON formatted logs
    #[serde(default)]
    pub json: bool,
    /// Directory for daily rotated log files; console only when unset
    #[serde(default)]
    pub dir: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
            dir: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from files and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            // Start with default values
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .set_default("scheduler.poll_interval_secs", 30)?
            .set_default("scheduler.error_backoff_secs", 5)?
            .set_default("scheduler.max_matches_per_cycle", 5)?
            // Load default config file
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Load environment-specific config (e.g., config/production.toml)
            .add_source(
                File::from(config_dir.join(
                    std::env::var("MATCHPULSE_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // Override with environment variables (MATCHPULSE_SCHEDULER__POLL_INTERVAL_SECS, etc.)
            .add_source(
                Environment::with_prefix("MATCHPULSE")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_live_feed_cadence() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.scheduler.poll_interval(), Duration::from_secs(30));
        assert_eq!(cfg.scheduler.error_backoff(), Duration::from_secs(5));
        assert_eq!(cfg.scheduler.max_matches_per_cycle, 5);
        assert_eq!(cfg.provider.default_elapsed_minutes, 60);
        assert_eq!(cfg.engine, StrategyConfig::default());
    }

    #[test]
    fn test_load_from_missing_dir_uses_defaults() {
        let cfg = AppConfig::load_from("/nonexistent/matchpulse-config").unwrap();
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.hub.queue_capacity, 32);
        assert_eq!(cfg.api.bind_addr, "0.0.0.0:8000");
    }
}
