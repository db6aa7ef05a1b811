//! Client configuration
//!
//! | variable | default |
//! |----------|---------|
//! | `RESERVE_API_URL` | `http://127.0.0.1:3000` |
//! | `RESERVE_GRAPHQL_PATH` | `/graphql` |
//! | `RESERVE_AUTH_PATH` | `/auth` |
//! | `RESERVE_TIMEOUT_SECS` | `30` |
//! | `RESERVE_LIST_STALE_MS` | `1000` |
//! | `RESERVE_SESSION_FILE` | `./.reserve/session.json` |
//! | `RESERVE_LOG_LEVEL` | `info` |
//! | `RESERVE_LOG_DIR` | unset (stderr only) |

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
const DEFAULT_SESSION_FILE: &str = "./.reserve/session.json";

/// Configuration for reaching the reservation backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "http://127.0.0.1:3000")
    pub base_url: String,

    /// Path of the GraphQL endpoint under `base_url`
    pub graphql_path: String,

    /// Path prefix of the REST auth service under `base_url`
    pub auth_path: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// How long a fetched list is served without refetching, in milliseconds
    pub list_stale_ms: u64,

    /// Where the signed-in principal is persisted
    pub session_file: PathBuf,

    pub log_level: String,

    /// Daily rolling log files go here when set
    pub log_dir: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            graphql_path: "/graphql".to_string(),
            auth_path: "/auth".to_string(),
            timeout: 30,
            list_stale_ms: 1000,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            log_level: "info".to_string(),
            log_dir: None,
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparsable values fall back to the defaults above.
    pub fn from_env() -> Self {
        let defaults = Self::new(env_or("RESERVE_API_URL", DEFAULT_API_URL));
        Self {
            graphql_path: env_or("RESERVE_GRAPHQL_PATH", &defaults.graphql_path),
            auth_path: env_or("RESERVE_AUTH_PATH", &defaults.auth_path),
            timeout: env_parse("RESERVE_TIMEOUT_SECS").unwrap_or(defaults.timeout),
            list_stale_ms: env_parse("RESERVE_LIST_STALE_MS").unwrap_or(defaults.list_stale_ms),
            session_file: std::env::var("RESERVE_SESSION_FILE")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| defaults.session_file.clone()),
            log_level: env_or("RESERVE_LOG_LEVEL", &defaults.log_level),
            log_dir: std::env::var("RESERVE_LOG_DIR").ok().filter(|s| !s.is_empty()),
            ..defaults
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    pub fn with_list_stale_ms(mut self, millis: u64) -> Self {
        self.list_stale_ms = millis;
        self
    }

    pub fn with_session_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_file = path.into();
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn graphql_url(&self) -> String {
        join_url(&self.base_url, &self.graphql_path)
    }

    /// URL of an auth endpoint, e.g. `auth_url("login")`
    pub fn auth_url(&self, endpoint: &str) -> String {
        join_url(&join_url(&self.base_url, &self.auth_path), endpoint)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn list_stale_time(&self) -> Duration {
        Duration::from_millis(self.list_stale_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn join_url(base: &str, path: &str) -> String {
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return base.trim_end_matches('/').to_string();
    }
    format!("{}/{}", base.trim_end_matches('/'), path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.graphql_url(), "http://127.0.0.1:3000/graphql");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.list_stale_time(), Duration::from_millis(1000));
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn test_auth_urls() {
        let config = ClientConfig::new("http://api.local:3000/");
        assert_eq!(config.auth_url("login"), "http://api.local:3000/auth/login");
        assert_eq!(config.auth_url("/register"), "http://api.local:3000/auth/register");
    }

    #[test]
    fn test_builders() {
        let config = ClientConfig::default()
            .with_base_url("http://10.0.0.2:4000")
            .with_timeout(5)
            .with_list_stale_ms(0)
            .with_session_file("/tmp/s.json")
            .with_log_level("reserve_client=debug");
        assert_eq!(config.graphql_url(), "http://10.0.0.2:4000/graphql");
        assert_eq!(config.timeout, 5);
        assert_eq!(config.list_stale_time(), Duration::ZERO);
        assert_eq!(config.session_file, PathBuf::from("/tmp/s.json"));
        assert_eq!(config.log_level, "reserve_client=debug");
    }
}
