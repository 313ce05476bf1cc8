//! Runtime configuration for the order system.
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `ORDER_MAILBOX_CAPACITY` | 32 | Requests each actor buffers before senders wait |
//! | `ORDER_STOCK_UPDATE_ATTEMPTS` | 16 | Read-write cycles the stock ledger makes before giving up |
//! | `RUST_LOG` | `info` | Log filter directive |
//!
//! Unset variables take the default. Unparseable or zero values are logged
//! and also fall back to the default, so install the subscriber with
//! [`SystemConfig::log_filter_from_env`] before calling
//! [`SystemConfig::from_env`].

use tracing::warn;

pub const DEFAULT_MAILBOX_CAPACITY: usize = 32;
pub const DEFAULT_STOCK_UPDATE_ATTEMPTS: usize = 16;
pub const DEFAULT_LOG_FILTER: &str = "info";

pub const MAILBOX_CAPACITY_VAR: &str = "ORDER_MAILBOX_CAPACITY";
pub const STOCK_UPDATE_ATTEMPTS_VAR: &str = "ORDER_STOCK_UPDATE_ATTEMPTS";
pub const LOG_FILTER_VAR: &str = "RUST_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemConfig {
    pub mailbox_capacity: usize,
    pub stock_update_attempts: usize,
    pub log_filter: String,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            stock_update_attempts: DEFAULT_STOCK_UPDATE_ATTEMPTS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl SystemConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// The log filter alone, readable before any subscriber exists.
    pub fn log_filter_from_env() -> String {
        log_filter_from(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            mailbox_capacity: positive_or_default(
                MAILBOX_CAPACITY_VAR,
                lookup(MAILBOX_CAPACITY_VAR),
                DEFAULT_MAILBOX_CAPACITY,
            ),
            stock_update_attempts: positive_or_default(
                STOCK_UPDATE_ATTEMPTS_VAR,
                lookup(STOCK_UPDATE_ATTEMPTS_VAR),
                DEFAULT_STOCK_UPDATE_ATTEMPTS,
            ),
            log_filter: log_filter_from(&lookup),
        }
    }
}

fn log_filter_from(lookup: impl Fn(&str) -> Option<String>) -> String {
    lookup(LOG_FILTER_VAR)
        .filter(|filter| !filter.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}

fn positive_or_default(key: &str, raw: Option<String>, default: usize) -> usize {
    let Some(raw) = raw else {
        return default;
    };
    match raw.trim().parse::<usize>() {
        Ok(value) if value > 0 => value,
        _ => {
            warn!(key, value = %raw, default, "Invalid setting, using default");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_empty_environment_gives_defaults() {
        assert_eq!(SystemConfig::from_lookup(|_| None), SystemConfig::default());
    }

    #[test]
    fn test_values_are_read() {
        let config = SystemConfig::from_lookup(lookup_from(&[
            (MAILBOX_CAPACITY_VAR, "8"),
            (STOCK_UPDATE_ATTEMPTS_VAR, " 3 "),
            (LOG_FILTER_VAR, "order_service=debug"),
        ]));

        assert_eq!(config.mailbox_capacity, 8);
        assert_eq!(config.stock_update_attempts, 3);
        assert_eq!(config.log_filter, "order_service=debug");
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = SystemConfig::from_lookup(lookup_from(&[
            (MAILBOX_CAPACITY_VAR, "0"),
            (STOCK_UPDATE_ATTEMPTS_VAR, "many"),
            (LOG_FILTER_VAR, ""),
        ]));

        assert_eq!(config, SystemConfig::default());
    }

    #[test]
    fn test_log_filter_matches_full_config() {
        let lookup = lookup_from(&[
            (MAILBOX_CAPACITY_VAR, "zero"),
            (LOG_FILTER_VAR, "warn"),
        ]);

        assert_eq!(log_filter_from(&lookup), "warn");
        assert_eq!(log_filter_from(&lookup), SystemConfig::from_lookup(&lookup).log_filter);
        assert_eq!(log_filter_from(|_| None), DEFAULT_LOG_FILTER);
    }
}
