//! Server configuration parsed from environment variables.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 13316;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 5000;
pub const DEFAULT_INDEX_FETCH_TIMEOUT_MS: u64 = 2000;
pub const DEFAULT_STORYBOOK_URL: &str = "http://localhost:5173";
pub const DEFAULT_STORYBOOK_STATIC_PATH: &str = "storybook-static";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub log_level: tracing::Level,
    pub poll_interval: Duration,
    /// Live documentation server base URL. `None` disables live fetch and polling.
    pub storybook_url: Option<String>,
    /// Directory holding a pre-built `index.json`.
    pub static_dir: PathBuf,
    pub fetch_timeout: Duration,
}

impl Config {
    /// Build typed server config from environment variables.
    ///
    /// - `PORT`: default 13316
    /// - `LOG_LEVEL`: `info` (default), `debug`, `trace`, `warn` or `error`
    /// - `POLL_INTERVAL`: reload interval in milliseconds, default 5000
    /// - `STORYBOOK_URL`: default `http://localhost:5173`; empty disables polling
    /// - `STORYBOOK_STATIC_PATH`: default `storybook-static`
    /// - `INDEX_FETCH_TIMEOUT_MS`: live index fetch timeout, default 2000
    #[must_use]
    pub fn from_env() -> Self {
        let storybook_url = std::env::var("STORYBOOK_URL").unwrap_or_else(|_| DEFAULT_STORYBOOK_URL.to_string());
        let static_dir = std::env::var("STORYBOOK_STATIC_PATH")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_STORYBOOK_STATIC_PATH.to_string());

        Self {
            port: env_parse("PORT", DEFAULT_PORT),
            log_level: parse_log_level(std::env::var("LOG_LEVEL").ok().as_deref()),
            poll_interval: Duration::from_millis(env_parse("POLL_INTERVAL", DEFAULT_POLL_INTERVAL_MS)),
            storybook_url: normalize_url(&storybook_url),
            static_dir: PathBuf::from(static_dir),
            fetch_timeout: Duration::from_millis(env_parse("INDEX_FETCH_TIMEOUT_MS", DEFAULT_INDEX_FETCH_TIMEOUT_MS)),
        }
    }

    /// Whether the periodic reload task should run. A zero interval disables it.
    #[must_use]
    pub fn polling_enabled(&self) -> bool {
        self.storybook_url.is_some() && !self.poll_interval.is_zero()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            log_level: tracing::Level::INFO,
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            storybook_url: Some(DEFAULT_STORYBOOK_URL.to_string()),
            static_dir: PathBuf::from(DEFAULT_STORYBOOK_STATIC_PATH),
            fetch_timeout: Duration::from_millis(DEFAULT_INDEX_FETCH_TIMEOUT_MS),
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn parse_log_level(raw: Option<&str>) -> tracing::Level {
    match raw.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        Some("trace") => tracing::Level::TRACE,
        Some("debug") => tracing::Level::DEBUG,
        Some("warn") => tracing::Level::WARN,
        Some("error") => tracing::Level::ERROR,
        _ => tracing::Level::INFO,
    }
}

fn normalize_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
