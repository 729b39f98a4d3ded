//! Runner configuration
//!
//! The polling cadence and attempt budget are policy constants, not
//! negotiated timeouts: the defaults give a wall-clock ceiling of roughly 60
//! seconds per run.

use std::time::Duration;

/// Polling policy for one scrape run
#[derive(Debug, Clone)]
pub struct Config {
    /// Delay between status checks
    pub poll_interval: Duration,

    /// Number of status checks before the run is declared timed out
    pub max_attempts: u32,
}

impl Config {
    /// Creates a new configuration
    pub fn new(poll_interval: Duration, max_attempts: u32) -> Self {
        Self {
            poll_interval,
            max_attempts,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Recognized environment variables:
    /// - POLL_INTERVAL_MS (optional, milliseconds, default: 2000)
    /// - MAX_POLL_ATTEMPTS (optional, default: 30)
    pub fn from_env() -> Self {
        let poll_interval = std::env::var("POLL_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Duration::from_millis(2000));

        let max_attempts = std::env::var("MAX_POLL_ATTEMPTS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(30);

        Self {
            poll_interval,
            max_attempts,
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.poll_interval.as_millis() == 0 {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        if self.max_attempts == 0 {
            anyhow::bail!("max_attempts must be greater than 0");
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Duration::from_millis(2000), 30)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.poll_interval, Duration::from_millis(2000));
        assert_eq!(config.max_attempts, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.max_attempts = 0;
        assert!(config.validate().is_err());

        config.max_attempts = 30;
        config.poll_interval = Duration::from_millis(0);
        assert!(config.validate().is_err());
    }
}
