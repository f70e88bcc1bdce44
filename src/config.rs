//! Runtime configuration.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use crate::auth::{InvalidLocale, Locale};

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("{var} has an invalid value {value:?}")]
    InvalidValue { var: &'static str, value: String },
    #[error(transparent)]
    Locale(#[from] InvalidLocale),
}

/// Configuration for the marketplace console.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the backend serving `/api/auth/login`.
    pub backend_url: String,
    /// Locale used for routes and the `Accept-Language` header.
    pub locale: Locale,
    /// Where the signed-in session is stored. `None` keeps sessions in memory.
    pub session_path: Option<PathBuf>,
    /// Artificial delay applied by every record actor (default: 0).
    pub simulated_latency: Duration,
    /// Timeout for backend HTTP calls (default: 10 seconds).
    pub request_timeout: Duration,
    /// Channel capacity of each record actor (default: 32).
    pub actor_buffer: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:3001".into(),
            locale: Locale::default(),
            session_path: None,
            simulated_latency: Duration::ZERO,
            request_timeout: Duration::from_secs(10),
            actor_buffer: 32,
        }
    }
}

impl AppConfig {
    /// Reads `MARKET_*` environment variables over the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(url) = lookup("MARKET_BACKEND_URL") {
            config.backend_url = url;
        }
        if let Some(locale) = lookup("MARKET_LOCALE") {
            config.locale = Locale::new(locale)?;
        }
        if let Some(path) = lookup("MARKET_SESSION_PATH").filter(|p| !p.is_empty()) {
            config.session_path = Some(PathBuf::from(path));
        }
        if let Some(ms) = parse_var::<u64>(&lookup, "MARKET_SIMULATED_LATENCY_MS")? {
            config.simulated_latency = Duration::from_millis(ms);
        }
        if let Some(secs) = parse_var::<u64>(&lookup, "MARKET_REQUEST_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(buffer) = parse_var::<usize>(&lookup, "MARKET_ACTOR_BUFFER")? {
            if buffer == 0 {
                return Err(ConfigError::InvalidValue { var: "MARKET_ACTOR_BUFFER", value: "0".into() });
            }
            config.actor_buffer = buffer;
        }
        Ok(config)
    }
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<Option<T>, ConfigError> {
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.backend_url, "http://localhost:3001");
        assert_eq!(config.locale.as_str(), "en");
        assert!(config.session_path.is_none());
        assert_eq!(config.simulated_latency, Duration::ZERO);
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("MARKET_LOCALE", "vi"),
            ("MARKET_SIMULATED_LATENCY_MS", "250"),
            ("MARKET_SESSION_PATH", "/tmp/session.json"),
        ]))
        .unwrap();
        assert_eq!(config.locale.as_str(), "vi");
        assert_eq!(config.simulated_latency, Duration::from_millis(250));
        assert_eq!(config.session_path, Some(PathBuf::from("/tmp/session.json")));

        let err = AppConfig::from_lookup(lookup_from(&[("MARKET_REQUEST_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidValue { var: "MARKET_REQUEST_TIMEOUT_SECS", value: "soon".into() });
        assert!(AppConfig::from_lookup(lookup_from(&[("MARKET_ACTOR_BUFFER", "0")])).is_err());
    }
}
