use std::time::Duration;

use thiserror::Error;

use replicate_client::PollConfig;

/// Errors surfaced while resolving service configuration at startup.
///
/// A missing secret means the service is misconfigured and must not start;
/// this is deliberately distinct from per-request validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not configured")]
    MissingSecret(&'static str),

    #[error("{name} must be a positive integer, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

/// Process-wide configuration, resolved from the environment once at startup
/// and injected into handlers via [`crate::state::AppState`].
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub vision_api_key: String,
    pub replicate_api_token: String,
    pub poll_interval_ms: u64,
    pub poll_max_attempts: u32,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            vision_api_key: require_secret("VISION_API_KEY", env("VISION_API_KEY"))?,
            replicate_api_token: require_secret("REPLICATE_API_TOKEN", env("REPLICATE_API_TOKEN"))?,
            poll_interval_ms: positive_number("POLL_INTERVAL_MS", env("POLL_INTERVAL_MS"), 1000)?,
            poll_max_attempts: positive_number("POLL_MAX_ATTEMPTS", env("POLL_MAX_ATTEMPTS"), 60)?
                as u32,
        })
    }

    /// The poll pacing derived from this configuration.
    pub fn poll_config(&self) -> PollConfig {
        PollConfig {
            interval: Duration::from_millis(self.poll_interval_ms),
            max_attempts: self.poll_max_attempts,
        }
    }
}

fn env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn require_secret(name: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingSecret(name)),
    }
}

fn positive_number(
    name: &'static str,
    value: Option<String>,
    default: u64,
) -> Result<u64, ConfigError> {
    let Some(raw) = value else {
        return Ok(default);
    };
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 && n <= u32::MAX as u64 => Ok(n),
        _ => Err(ConfigError::InvalidNumber { name, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_secret_is_rejected() {
        let err = require_secret("VISION_API_KEY", None).unwrap_err();
        assert_eq!(err.to_string(), "VISION_API_KEY is not configured");
    }

    #[test]
    fn blank_secret_is_rejected() {
        assert!(require_secret("REPLICATE_API_TOKEN", Some("   ".into())).is_err());
    }

    #[test]
    fn present_secret_is_kept_verbatim() {
        let key = require_secret("VISION_API_KEY", Some("k-123".into())).unwrap();
        assert_eq!(key, "k-123");
    }

    #[test]
    fn absent_number_uses_default() {
        assert_eq!(positive_number("POLL_INTERVAL_MS", None, 1000).unwrap(), 1000);
    }

    #[test]
    fn zero_is_rejected() {
        let err = positive_number("POLL_MAX_ATTEMPTS", Some("0".into()), 60).unwrap_err();
        assert!(err.to_string().contains("positive integer"));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(positive_number("POLL_INTERVAL_MS", Some("soon".into()), 1000).is_err());
    }

    #[test]
    fn poll_config_carries_interval_and_budget() {
        let config = ServiceConfig {
            vision_api_key: "k".into(),
            replicate_api_token: "t".into(),
            poll_interval_ms: 250,
            poll_max_attempts: 8,
        };
        let poll = config.poll_config();
        assert_eq!(poll.interval, Duration::from_millis(250));
        assert_eq!(poll.max_attempts, 8);
    }
}
