//! Service settings read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use chrono_tz::Tz;

use crate::error::{EngineError, EngineResult};

/// Directory holding the dataset YAML files.
pub const DATA_DIR_VAR: &str = "PAYROLL_DATA_DIR";
/// Address the HTTP server binds to.
pub const BIND_ADDR_VAR: &str = "PAYROLL_BIND_ADDR";
/// Bearer token required by the `/v1` routes.
pub const API_TOKEN_VAR: &str = "PAYROLL_API_TOKEN";
/// IANA zone used for `calculated_at` timestamps.
pub const TIMEZONE_VAR: &str = "PAYROLL_TIMEZONE";

const DEFAULT_DATA_DIR: &str = "config/demo";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_API_TOKEN: &str = "demo-token";
const DEFAULT_TIMEZONE: &str = "Asia/Jerusalem";

/// Settings for the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSettings {
    /// Directory loaded by [`ConfigLoader`](super::ConfigLoader).
    pub data_dir: PathBuf,
    /// Socket address to listen on.
    pub bind_addr: SocketAddr,
    /// Expected bearer token.
    pub api_token: String,
    /// Zone for response timestamps.
    pub timezone: Tz,
}

impl ServiceSettings {
    /// Reads the settings from process environment variables.
    pub fn from_env() -> EngineResult<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Reads the settings through a variable lookup, using defaults for
    /// anything unset or empty.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::ServiceSettings;
    ///
    /// let settings = ServiceSettings::from_vars(|key| match key {
    ///     "PAYROLL_API_TOKEN" => Some("secret".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    ///
    /// assert_eq!(settings.api_token, "secret");
    /// assert_eq!(settings.bind_addr.port(), 3000);
    /// ```
    pub fn from_vars<F>(lookup: F) -> EngineResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let bind_addr = var(BIND_ADDR_VAR, DEFAULT_BIND_ADDR);
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|e| EngineError::ConfigParseError {
                path: BIND_ADDR_VAR.to_string(),
                message: format!("'{}' is not a socket address: {}", bind_addr, e),
            })?;

        let timezone = var(TIMEZONE_VAR, DEFAULT_TIMEZONE);
        let timezone = timezone
            .parse::<Tz>()
            .map_err(|e| EngineError::ConfigParseError {
                path: TIMEZONE_VAR.to_string(),
                message: format!("'{}' is not a known time zone: {}", timezone, e),
            })?;

        Ok(Self {
            data_dir: PathBuf::from(var(DATA_DIR_VAR, DEFAULT_DATA_DIR)),
            bind_addr,
            api_token: var(API_TOKEN_VAR, DEFAULT_API_TOKEN),
            timezone,
        })
    }
}
