use std::env;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:3000/api";
const DEFAULT_JOIN_SETTLE_MS: u64 = 1500;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime settings for talking to the backend.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    /// Pause between a successful join and the refresh that follows it, to let
    /// the backend catch up.
    pub join_settle_delay: Duration,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            join_settle_delay: Duration::from_millis(DEFAULT_JOIN_SETTLE_MS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Read `TRAVELMATE_API_URL`, `TRAVELMATE_JOIN_SETTLE_MS` and
    /// `TRAVELMATE_TIMEOUT_SECS`, falling back to defaults for anything unset
    /// or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: env::var("TRAVELMATE_API_URL")
                .map(|u| normalize_url(&u))
                .unwrap_or(defaults.api_url),
            join_settle_delay: env_u64("TRAVELMATE_JOIN_SETTLE_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.join_settle_delay),
            request_timeout: env_u64("TRAVELMATE_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
        }
    }

    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_url = normalize_url(url);
        self
    }
}

fn env_u64(name: &str) -> Option<u64> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn normalize_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_backend() {
        let cfg = Config::default();
        assert_eq!(cfg.api_url, "http://localhost:3000/api");
        assert_eq!(cfg.join_settle_delay, Duration::from_millis(1500));
    }

    #[test]
    fn with_api_url_strips_trailing_slash() {
        let cfg = Config::default().with_api_url(" https://api.travelmate.example/v1/ ");
        assert_eq!(cfg.api_url, "https://api.travelmate.example/v1");
    }
}
