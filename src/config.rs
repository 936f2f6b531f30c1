//! Client configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_TIMEOUT_MS: u64 = 5000;
pub const DEFAULT_SESSION_FILE: &str = ".portal-session.json";
pub const DEFAULT_APP_TITLE: &str = "Software Engineering";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// Account service origin; request paths are appended to it.
    pub base_url: String,
    /// Fixed bound on every request, connect through body.
    pub timeout: Duration,
    /// Where the session id is persisted between runs.
    pub session_file: PathBuf,
    /// Suffix for page titles and the title of untitled routes.
    pub app_title: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            app_title: DEFAULT_APP_TITLE.to_owned(),
        }
    }
}

impl PortalConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `PORTAL_BASE_URL`: default `http://127.0.0.1:8080`
    /// - `PORTAL_TIMEOUT_MS`: default 5000
    /// - `PORTAL_SESSION_FILE`: default `.portal-session.json`
    /// - `PORTAL_APP_TITLE`: default `Software Engineering`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for a base URL without an http(s)
    /// scheme or a timeout that is not a positive integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let base_url = match std::env::var("PORTAL_BASE_URL") {
            Ok(raw) => parse_base_url(&raw)?,
            Err(_) => defaults.base_url,
        };
        let timeout = match std::env::var("PORTAL_TIMEOUT_MS") {
            Ok(raw) => parse_timeout_ms(&raw)?,
            Err(_) => defaults.timeout,
        };
        let session_file = std::env::var("PORTAL_SESSION_FILE").map_or(defaults.session_file, PathBuf::from);
        let app_title = std::env::var("PORTAL_APP_TITLE").unwrap_or(defaults.app_title);

        Ok(Self { base_url, timeout, session_file, app_title })
    }
}

/// Validate and normalize a base URL (trailing slashes removed).
///
/// # Errors
///
/// Returns `ConfigError::Invalid` unless the URL parses with an `http` or
/// `https` scheme and a host.
pub fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid { var: "PORTAL_BASE_URL", reason };
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| invalid(format!("'{raw}' is not a URL: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid(format!("expected http:// or https:// URL, got '{raw}'")));
    }
    Ok(trimmed.to_owned())
}

/// Parse a positive millisecond timeout.
///
/// # Errors
///
/// Returns `ConfigError::Invalid` for non-numeric or zero values.
pub fn parse_timeout_ms(raw: &str) -> Result<Duration, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(ms) if ms > 0 => Ok(Duration::from_millis(ms)),
        _ => Err(ConfigError::Invalid {
            var: "PORTAL_TIMEOUT_MS",
            reason: format!("expected a positive integer, got '{raw}'"),
        }),
    }
}
