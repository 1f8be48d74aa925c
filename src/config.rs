// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the client. Configuration is loaded from the environment once
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `WALLET_API_URL` | Origin of the remote wallet service | `http://127.0.0.1:5000` |
//! | `WALLET_API_PREFIX` | Base path prepended to every endpoint | `/api` |
//! | `WALLET_HTTP_TIMEOUT_SECS` | Transport timeout in seconds | unset (no timeout) |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::{env, time::Duration};

use url::Url;

/// Environment variable name for the wallet service origin.
pub const WALLET_API_URL_ENV: &str = "WALLET_API_URL";

/// Environment variable name for the fixed API base path.
pub const WALLET_API_PREFIX_ENV: &str = "WALLET_API_PREFIX";

/// Environment variable name for the optional transport timeout.
///
/// The gateway never times out on its own; when this is unset a slow call
/// simply stays in flight until the service answers.
pub const WALLET_HTTP_TIMEOUT_ENV: &str = "WALLET_HTTP_TIMEOUT_SECS";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Default wallet service origin (the service's development server).
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Default base path under which every endpoint lives.
pub const DEFAULT_API_PREFIX: &str = "/api";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not a valid URL: {reason}")]
    InvalidUrl { name: &'static str, reason: String },

    #[error("{name} must be a whole number of seconds, got {value:?}")]
    InvalidTimeout { name: &'static str, value: String },

    #[error("{name} must be `json` or `pretty`, got {value:?}")]
    InvalidLogFormat { name: &'static str, value: String },
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
}

impl LogFormat {
    fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" | "" => Ok(Self::Pretty),
            _ => Err(ConfigError::InvalidLogFormat {
                name: LOG_FORMAT_ENV,
                value: raw.to_string(),
            }),
        }
    }
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Service origin, e.g. `https://wallet.example`.
    pub api_url: Url,
    /// Base path, always starting with `/` and never ending with one.
    pub api_prefix: String,
    /// Transport timeout; `None` leaves timing out to the caller.
    pub timeout: Option<Duration>,
    pub log_format: LogFormat,
}

impl ClientConfig {
    /// Configuration for `api_url` with the default prefix and no timeout.
    pub fn new(api_url: Url) -> Self {
        Self {
            api_url,
            api_prefix: DEFAULT_API_PREFIX.to_string(),
            timeout: None,
            log_format: LogFormat::default(),
        }
    }

    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = lookup(WALLET_API_URL_ENV).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(raw_url.trim()).map_err(|e| ConfigError::InvalidUrl {
            name: WALLET_API_URL_ENV,
            reason: e.to_string(),
        })?;

        let api_prefix = normalize_prefix(
            &lookup(WALLET_API_PREFIX_ENV).unwrap_or_else(|| DEFAULT_API_PREFIX.to_string()),
        );

        let timeout = match lookup(WALLET_HTTP_TIMEOUT_ENV) {
            Some(raw) if !raw.trim().is_empty() => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidTimeout {
                    name: WALLET_HTTP_TIMEOUT_ENV,
                    value: raw.clone(),
                })?;
                Some(Duration::from_secs(secs))
            }
            _ => None,
        };

        let log_format = match lookup(LOG_FORMAT_ENV) {
            Some(raw) => LogFormat::parse(&raw)?,
            None => LogFormat::default(),
        };

        Ok(Self {
            api_url,
            api_prefix,
            timeout,
            log_format,
        })
    }

    /// Full URL for an endpoint path such as `/login`.
    pub fn endpoint(&self, path: &str) -> String {
        let origin = self.api_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{origin}{}/{path}", self.api_prefix)
    }
}

fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
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
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_url.as_str(), "http://127.0.0.1:5000/");
        assert_eq!(config.api_prefix, "/api");
        assert_eq!(config.timeout, None);
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.endpoint("/login"), "http://127.0.0.1:5000/api/login");
    }

    #[test]
    fn reads_overrides() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (WALLET_API_URL_ENV, "https://wallet.example/"),
            (WALLET_API_PREFIX_ENV, "v2/"),
            (WALLET_HTTP_TIMEOUT_ENV, "30"),
            (LOG_FORMAT_ENV, "JSON"),
        ]))
        .unwrap();

        assert_eq!(config.api_prefix, "/v2");
        assert_eq!(config.timeout, Some(Duration::from_secs(30)));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.endpoint("balance"), "https://wallet.example/v2/balance");
    }

    #[test]
    fn empty_prefix_joins_at_root() {
        let config =
            ClientConfig::from_lookup(lookup_from(&[(WALLET_API_PREFIX_ENV, "/")])).unwrap();
        assert_eq!(config.endpoint("/send"), "http://127.0.0.1:5000/send");
    }

    #[test]
    fn rejects_bad_values() {
        let err = ClientConfig::from_lookup(lookup_from(&[(WALLET_API_URL_ENV, "not a url")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));

        let err = ClientConfig::from_lookup(lookup_from(&[(WALLET_HTTP_TIMEOUT_ENV, "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout { .. }));

        let err =
            ClientConfig::from_lookup(lookup_from(&[(LOG_FORMAT_ENV, "xml")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLogFormat { .. }));
    }
}
