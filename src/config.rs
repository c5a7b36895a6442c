// ⚙️ Runtime configuration (environment + optional .env)

use crate::source::DEFAULT_API_URL;
use std::time::Duration;
use thiserror::Error;

pub const ENV_API_URL: &str = "DOCTOR_DIRECTORY_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "DOCTOR_DIRECTORY_TIMEOUT_SECS";
pub const ENV_ADDR: &str = "DOCTOR_DIRECTORY_ADDR";

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("{var} must be an http(s) URL, got {value:?}")]
    InvalidUrl { var: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Record endpoint (GET, JSON array)
    pub api_url: String,
    pub request_timeout: Duration,
    /// Bind address for directory-server
    pub server_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            server_addr: DEFAULT_ADDR.to_string(),
        }
    }
}

impl Config {
    /// Load from the process environment (after reading `.env` if present)
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup. Missing keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(url) = lookup(ENV_API_URL) {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl {
                    var: ENV_API_URL,
                    value: url,
                });
            }
            config.api_url = url;
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout {
                    var: ENV_TIMEOUT_SECS,
                    value: raw.clone(),
                })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(addr) = lookup(ENV_ADDR) {
            config.server_addr = addr;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            (ENV_API_URL, "http://localhost:9000/doctors.json"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_ADDR, "127.0.0.1:8080"),
        ]))
        .unwrap();

        assert_eq!(config.api_url, "http://localhost:9000/doctors.json");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.server_addr, "127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_timeout() {
        let err = Config::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "0")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));

        let err = Config::from_lookup(lookup(&[(ENV_TIMEOUT_SECS, "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));
    }

    #[test]
    fn test_invalid_url() {
        let err = Config::from_lookup(lookup(&[(ENV_API_URL, "ftp://example.com")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }
}
