//! Paging configuration.

use chrono::Duration;

use crate::domain::MAX_SEARCH_WINDOW_SECS;

/// Environment variable overriding the default search window.
pub const SEARCH_WINDOW_ENV: &str = "PAGING_SEARCH_WINDOW_MINS";

/// Environment variable overriding the maximum itineraries per page.
pub const MAX_ITINERARIES_ENV: &str = "PAGING_MAX_ITINERARIES";

/// Error reading configuration from the environment.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but is not a valid number
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },

    /// The default search window exceeds one day
    #[error("{name} must be at most one day, got {value} minutes")]
    SearchWindowTooLong { name: &'static str, value: i64 },
}

/// Configuration parameters for paging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagingConfig {
    /// Search window used when a request specifies none (minutes).
    pub default_search_window_mins: i64,

    /// Maximum number of itineraries returned per page.
    /// Results beyond this are cropped and the cursors adjusted.
    pub max_itineraries: usize,
}

impl PagingConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(default_search_window_mins: i64, max_itineraries: usize) -> Self {
        Self {
            default_search_window_mins,
            max_itineraries,
        }
    }

    /// Read the configuration from the process environment.
    ///
    /// Unset variables fall back to the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration using `lookup` to resolve variable names.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let default_search_window_mins = match lookup(SEARCH_WINDOW_ENV) {
            Some(value) => parse_positive(SEARCH_WINDOW_ENV, &value)?,
            None => defaults.default_search_window_mins,
        };
        if default_search_window_mins > MAX_SEARCH_WINDOW_SECS / 60 {
            return Err(ConfigError::SearchWindowTooLong {
                name: SEARCH_WINDOW_ENV,
                value: default_search_window_mins,
            });
        }
        let max_itineraries = match lookup(MAX_ITINERARIES_ENV) {
            Some(value) => parse_positive(MAX_ITINERARIES_ENV, &value)? as usize,
            None => defaults.max_itineraries,
        };

        Ok(Self {
            default_search_window_mins,
            max_itineraries,
        })
    }

    /// Returns the default search window as a Duration.
    pub fn search_window(&self) -> Duration {
        Duration::minutes(self.default_search_window_mins)
    }
}

impl Default for PagingConfig {
    fn default() -> Self {
        Self {
            default_search_window_mins: 40,
            max_itineraries: 5,
        }
    }
}

fn parse_positive(name: &'static str, value: &str) -> Result<i64, ConfigError> {
    value
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| ConfigError::InvalidNumber {
            name,
            value: value.to_string(),
        })
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
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn default_config() {
        let config = PagingConfig::default();

        assert_eq!(config.default_search_window_mins, 40);
        assert_eq!(config.max_itineraries, 5);
    }

    #[test]
    fn duration_methods() {
        let config = PagingConfig::default();

        assert_eq!(config.search_window(), Duration::minutes(40));
    }

    #[test]
    fn custom_config() {
        let config = PagingConfig::new(120, 12);

        assert_eq!(config.default_search_window_mins, 120);
        assert_eq!(config.max_itineraries, 12);
        assert_eq!(config.search_window(), Duration::hours(2));
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = PagingConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, PagingConfig::default());
    }

    #[test]
    fn environment_overrides() {
        let config = PagingConfig::from_lookup(lookup(&[
            (SEARCH_WINDOW_ENV, "90"),
            (MAX_ITINERARIES_ENV, " 8 "),
        ]))
        .unwrap();

        assert_eq!(config, PagingConfig::new(90, 8));
    }

    #[test]
    fn invalid_environment_value() {
        let err = PagingConfig::from_lookup(lookup(&[(MAX_ITINERARIES_ENV, "many")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "PAGING_MAX_ITINERARIES must be a positive integer, got \"many\""
        );

        let err = PagingConfig::from_lookup(lookup(&[(SEARCH_WINDOW_ENV, "0")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                name: SEARCH_WINDOW_ENV,
                value: "0".to_string()
            }
        );
    }

    #[test]
    fn search_window_longer_than_a_day() {
        let config = PagingConfig::from_lookup(lookup(&[(SEARCH_WINDOW_ENV, "1440")])).unwrap();
        assert_eq!(config.search_window(), Duration::days(1));

        let err = PagingConfig::from_lookup(lookup(&[(SEARCH_WINDOW_ENV, "9223372036854775807")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::SearchWindowTooLong {
                name: SEARCH_WINDOW_ENV,
                value: i64::MAX
            }
        );
    }
}
