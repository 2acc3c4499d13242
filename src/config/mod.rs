// ABOUTME: Configuration types and parsing for rollout-stream.yml.
// ABOUTME: Holds the poll interval, failure keywords, and listener buffering.

mod deserialize;
mod target;

pub use target::StreamTarget;

use crate::error::{Error, Result};
use deserialize::{deserialize_failure_keywords, deserialize_listener_capacity};
use nonempty::NonEmpty;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILENAME: &str = "rollout-stream.yml";
pub const CONFIG_FILENAME_ALT: &str = "rollout-stream.yaml";

/// Substrings that mark a service event as a failure. Matched case-sensitively.
pub const DEFAULT_FAILURE_KEYWORDS: [&str; 6] =
    ["fail", "unhealthy", "error", "throttle", "unable", "missing"];

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StreamerConfig {
    /// Advisory delay between collects, added to "now" when a collect succeeds.
    #[serde(default = "default_fetch_interval", with = "humantime_serde")]
    pub fetch_interval: Duration,

    #[serde(
        default = "default_failure_keywords",
        deserialize_with = "deserialize_failure_keywords"
    )]
    pub failure_keywords: NonEmpty<String>,

    /// Per-listener channel capacity. 1 keeps publish in near lock-step with readers.
    #[serde(
        default = "default_listener_capacity",
        deserialize_with = "deserialize_listener_capacity"
    )]
    pub listener_capacity: usize,
}

fn default_fetch_interval() -> Duration {
    Duration::from_secs(4)
}

fn default_failure_keywords() -> NonEmpty<String> {
    let [head, tail @ ..] = DEFAULT_FAILURE_KEYWORDS;
    NonEmpty {
        head: head.to_string(),
        tail: tail.iter().map(|kw| kw.to_string()).collect(),
    }
}

fn default_listener_capacity() -> usize {
    1
}

impl Default for StreamerConfig {
    fn default() -> Self {
        Self {
            fetch_interval: default_fetch_interval(),
            failure_keywords: default_failure_keywords(),
            listener_capacity: default_listener_capacity(),
        }
    }
}

impl StreamerConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [dir.join(CONFIG_FILENAME), dir.join(CONFIG_FILENAME_ALT)];

        for path in &candidates {
            if path.exists() {
                tracing::debug!("Loading streamer config from {}", path.display());
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Checks invariants serde cannot express on its own.
    pub fn validate(&self) -> Result<()> {
        if self.fetch_interval.is_zero() {
            return Err(Error::InvalidConfig(
                "fetch_interval must be greater than zero".to_string(),
            ));
        }
        if self.listener_capacity == 0 {
            return Err(Error::InvalidConfig(
                "listener_capacity must be at least 1".to_string(),
            ));
        }
        if self.failure_keywords.iter().any(|kw| kw.is_empty()) {
            return Err(Error::InvalidConfig(
                "failure_keywords cannot contain empty strings".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_keywords_match_known_failures() {
        let config = StreamerConfig::default();
        let keywords: Vec<&str> = config.failure_keywords.iter().map(String::as_str).collect();
        assert_eq!(keywords, DEFAULT_FAILURE_KEYWORDS);
    }

    #[test]
    fn default_is_valid() {
        assert!(StreamerConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = StreamerConfig {
            fetch_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }
}
