//! Server configuration read from the environment

use std::env;
use gauge_plugin::DEFAULT_PRECISION;
use tracing::warn;

pub const PRECISION_VAR: &str = "GAUGE_PRECISION";
pub const LOG_VAR: &str = "RUST_LOG";
pub const DEFAULT_LOG_FILTER: &str = "gauge=info";

/// Upper bound for decimal places in rendered results
pub const MAX_PRECISION: u32 = 17;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Decimal places in human-readable results
    pub precision: u32,
    /// Log filter directive
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Invalid values warn and fall back.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(PRECISION_VAR) {
            match parse_precision(&raw) {
                Some(precision) => config.precision = precision,
                None => warn!(
                    value = %raw,
                    default = DEFAULT_PRECISION,
                    "invalid {}, using default", PRECISION_VAR
                ),
            }
        }

        if let Some(filter) = lookup(LOG_VAR).filter(|f| !f.trim().is_empty()) {
            config.log_filter = filter;
        }

        config
    }
}

/// Parse a precision value, accepting 0..=17
pub fn parse_precision(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|&p| p <= MAX_PRECISION)
}
