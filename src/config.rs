use anyhow::{bail, Context, Result};
use std::net::SocketAddr;

use crate::calculators::vat::DEFAULT_RATE;
use crate::notify::DEFAULT_DURATION_SECS;

/// Longest a notification may stay on screen
pub const MAX_NOTIFICATION_SECS: i64 = 3600;

/// Application configuration loaded from environment variables.
/// Every value has a default; only malformed values are errors.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub default_vat_rate: f64,
    pub notification_secs: i64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the environment, or a map in tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("HUB_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse::<SocketAddr>()
            .context("HUB_ADDR must be a socket address like 0.0.0.0:3000")?;

        let default_vat_rate = match lookup("HUB_DEFAULT_VAT_RATE") {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .context("HUB_DEFAULT_VAT_RATE must be a number")?,
            None => DEFAULT_RATE,
        };
        if !default_vat_rate.is_finite() || default_vat_rate < 0.0 {
            bail!("HUB_DEFAULT_VAT_RATE must be a non-negative number, got {default_vat_rate}");
        }

        let notification_secs = match lookup("HUB_NOTIFICATION_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .context("HUB_NOTIFICATION_SECS must be a whole number of seconds")?,
            None => DEFAULT_DURATION_SECS,
        };
        if !(1..=MAX_NOTIFICATION_SECS).contains(&notification_secs) {
            bail!(
                "HUB_NOTIFICATION_SECS must be between 1 and {MAX_NOTIFICATION_SECS}, got {notification_secs}"
            );
        }

        Ok(Config {
            bind_addr,
            default_vat_rate,
            notification_secs,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// Default VAT rate as it appears in a freshly reset form field
    pub fn vat_rate_field(&self) -> String {
        format!("{}", self.default_vat_rate)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            default_vat_rate: DEFAULT_RATE,
            notification_secs: DEFAULT_DURATION_SECS,
            rust_log: "info".to_string(),
        }
    }
}
