//! Runtime configuration for the console.
//!
//! Everything comes from environment variables (a `.env` file is honored
//! via `dotenvy` in `main`) with development defaults, plus a CLI override
//! for the base URL.

use std::time::Duration;

/// Development default values.
pub mod defaults {
    pub const API_URL: &str = "http://localhost:9090/api/pipeline";
    /// List-view cadence: the dashboard polls unconditionally on this interval.
    pub const LIST_INTERVAL_SECS: u64 = 5;
    /// Detail-view cadence: a single execution is polled on this interval
    /// while it is still PENDING/RUNNING.
    pub const DETAIL_INTERVAL_SECS: u64 = 3;
}

/// Resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub list_interval: Duration,
    pub detail_interval: Duration,
}

impl Config {
    /// Resolve from the process environment.
    ///
    /// * `PIPEWATCH_API_URL` — backend base path
    /// * `PIPEWATCH_LIST_INTERVAL_SECS` — dashboard poll cadence
    /// * `PIPEWATCH_DETAIL_INTERVAL_SECS` — watch-view poll cadence
    ///
    /// `api_url_override` (the `--api-url` flag) wins over the environment.
    pub fn from_env(api_url_override: Option<&str>) -> Self {
        Self::resolve(api_url_override, |key| std::env::var(key).ok())
    }

    fn resolve(
        api_url_override: Option<&str>,
        get: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let api_url = api_url_override
            .map(str::to_string)
            .or_else(|| get("PIPEWATCH_API_URL").filter(|v| !v.is_empty()))
            .unwrap_or_else(|| defaults::API_URL.to_string());

        let list_interval = interval_from(
            get("PIPEWATCH_LIST_INTERVAL_SECS"),
            defaults::LIST_INTERVAL_SECS,
        );
        let detail_interval = interval_from(
            get("PIPEWATCH_DETAIL_INTERVAL_SECS"),
            defaults::DETAIL_INTERVAL_SECS,
        );

        Self {
            api_url,
            list_interval,
            detail_interval,
        }
    }
}

/// Parse an interval in whole seconds, ignoring unparseable or zero values.
fn interval_from(raw: Option<String>, default_secs: u64) -> Duration {
    let secs = raw
        .and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|&secs| secs > 0)
        .unwrap_or(default_secs);
    Duration::from_secs(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = Config::resolve(None, |_| None);
        assert_eq!(config.api_url, defaults::API_URL);
        assert_eq!(config.list_interval, Duration::from_secs(5));
        assert_eq!(config.detail_interval, Duration::from_secs(3));
    }

    #[test]
    fn environment_values_override_defaults() {
        let config = Config::resolve(None, |key| match key {
            "PIPEWATCH_API_URL" => Some("http://ci.example.com/api/pipeline".into()),
            "PIPEWATCH_LIST_INTERVAL_SECS" => Some("10".into()),
            "PIPEWATCH_DETAIL_INTERVAL_SECS" => Some("2".into()),
            _ => None,
        });
        assert_eq!(config.api_url, "http://ci.example.com/api/pipeline");
        assert_eq!(config.list_interval, Duration::from_secs(10));
        assert_eq!(config.detail_interval, Duration::from_secs(2));
    }

    #[test]
    fn cli_override_wins_over_environment() {
        let config = Config::resolve(Some("http://flag.example.com"), |key| match key {
            "PIPEWATCH_API_URL" => Some("http://env.example.com".into()),
            _ => None,
        });
        assert_eq!(config.api_url, "http://flag.example.com");
    }

    #[test]
    fn garbage_and_zero_intervals_fall_back() {
        let config = Config::resolve(None, |key| match key {
            "PIPEWATCH_LIST_INTERVAL_SECS" => Some("soon".into()),
            "PIPEWATCH_DETAIL_INTERVAL_SECS" => Some("0".into()),
            _ => None,
        });
        assert_eq!(config.list_interval, Duration::from_secs(5));
        assert_eq!(config.detail_interval, Duration::from_secs(3));
    }
}
