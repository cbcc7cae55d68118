//! Console configuration: backend base URL, session file location and request
//! timeout. Values come from CLI flags or their environment variables; blank
//! values fall back to the defaults. Configuration is not secret.

use std::{path::PathBuf, time::Duration};

pub const DEFAULT_API_BASE_URL: &str = "http://cancapp.runasp.net";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub timeout: Duration,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            session_file: default_session_file(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

impl ConsoleConfig {
    /// Applies overrides on top of the defaults, ignoring blank values and a
    /// zero timeout.
    #[must_use]
    pub fn with_overrides(
        api_base_url: Option<&str>,
        session_file: Option<&str>,
        timeout_seconds: Option<u64>,
    ) -> Self {
        let mut config = Self::default();

        if let Some(value) = api_base_url.and_then(normalize_value) {
            config.api_base_url = value;
        }
        if let Some(value) = session_file.and_then(normalize_value) {
            config.session_file = PathBuf::from(value);
        }
        if let Some(seconds) = timeout_seconds.filter(|seconds| *seconds > 0) {
            config.timeout = Duration::from_secs(seconds);
        }

        config
    }
}

/// `<config dir>/cancapp-admin/session.json`, or the working directory when
/// the platform has no config dir.
#[must_use]
pub fn default_session_file() -> PathBuf {
    super::storage::FileStorage::default_path()
        .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_PKG_NAME"), "-session.json")))
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_value_trims_and_rejects_empty() {
        assert_eq!(normalize_value(""), None);
        assert_eq!(normalize_value("   "), None);
        assert_eq!(
            normalize_value("  http://cancapp.runasp.net "),
            Some("http://cancapp.runasp.net".to_string())
        );
    }

    #[test]
    fn with_overrides_ignores_blank_values() {
        let config = ConsoleConfig::with_overrides(Some(" "), Some(""), Some(0));
        assert_eq!(config, ConsoleConfig::default());
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECONDS));
    }

    #[test]
    fn with_overrides_overwrites_when_present() {
        let config = ConsoleConfig::with_overrides(
            Some("https://staging.cancapp.test"),
            Some("/tmp/cancapp-session.json"),
            Some(30),
        );
        assert_eq!(config.api_base_url, "https://staging.cancapp.test");
        assert_eq!(config.session_file, PathBuf::from("/tmp/cancapp-session.json"));
        assert_eq!(config.timeout, Duration::from_secs(30));
    }
}
