//! Centralized configuration management for regform

use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Simulated submission delay (milliseconds)
    pub submit_delay_ms: u64,
    /// Value pre-populated into the email field on startup
    pub default_email: String,
    /// Accept sign-ups instead of the demo's deterministic rejection
    pub accept_signups: bool,
    /// Log file path
    pub log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            submit_delay_ms: 1000,
            default_email: "@".to_string(),
            accept_signups: false,
            log_file: "regform.log".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        Ok(Config {
            submit_delay_ms: parse_env_var("REGFORM_SUBMIT_DELAY_MS")?
                .unwrap_or(defaults.submit_delay_ms),
            default_email: std::env::var("REGFORM_DEFAULT_EMAIL")
                .unwrap_or(defaults.default_email),
            accept_signups: parse_env_var("REGFORM_ACCEPT_SIGNUPS")?
                .unwrap_or(defaults.accept_signups),
            log_file: std::env::var("REGFORM_LOG_FILE").unwrap_or(defaults.log_file),
        })
    }

    /// Get submission delay as Duration
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        // An hour-long simulated round-trip is a typo, not a demo.
        if self.submit_delay_ms > 3_600_000 {
            return Err(anyhow::anyhow!(
                "Submission delay too large: {}ms",
                self.submit_delay_ms
            ));
        }
        if self.log_file.is_empty() {
            return Err(anyhow::anyhow!("Log file path must not be empty"));
        }
        Ok(())
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}
