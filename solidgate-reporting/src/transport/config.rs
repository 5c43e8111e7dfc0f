//! `[http]` table of the client configuration.
//!
//! ```toml
//! [http]
//! timeout_secs = 120
//! connect_timeout_secs = 5
//! user_agent = "finance-export/2.1"
//! ```

use std::time::Duration;

use serde::Deserialize;

use crate::error::{ReportError, Result};

/// User agent sent when none is configured.
pub const DEFAULT_USER_AGENT: &str = concat!("solidgate-reporting/", env!("CARGO_PKG_VERSION"));

/// Request limits for the reporting API.
///
/// A report page is one POST, so `timeout_secs` bounds a single page rather
/// than a whole query. A page that does not arrive in time fails the query
/// with [`ReportError::Http`]; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpConfig {
    /// Seconds allowed for one page, from sending the request to reading the
    /// last body byte.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Seconds allowed to open the connection.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// `User-Agent` header value.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl HttpConfig {
    /// Checks the limits and the user agent.
    ///
    /// Month-long card order reports can take minutes per page, so the page
    /// timeout goes up to ten minutes.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Config`] if:
    /// - `timeout_secs` is outside 1-600
    /// - `connect_timeout_secs` is outside 1-60
    /// - `user_agent` is empty or not printable ASCII
    pub fn validate(&self) -> Result<()> {
        if !(1..=600).contains(&self.timeout_secs) {
            return Err(ReportError::Config(format!(
                "http.timeout_secs must be between 1 and 600, got {}",
                self.timeout_secs
            )));
        }
        if !(1..=60).contains(&self.connect_timeout_secs) {
            return Err(ReportError::Config(format!(
                "http.connect_timeout_secs must be between 1 and 60, got {}",
                self.connect_timeout_secs
            )));
        }
        if self.user_agent.is_empty()
            || !self.user_agent.bytes().all(|b| b == b' ' || b.is_ascii_graphic())
        {
            return Err(ReportError::Config(
                "http.user_agent must be non-empty printable ASCII".to_owned(),
            ));
        }
        Ok(())
    }

    /// Page timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Connect timeout.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.connect_timeout(), Duration::from_secs(10));
        assert!(config.user_agent.starts_with("solidgate-reporting/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_table_keeps_defaults() {
        let config: HttpConfig = toml::from_str("timeout_secs = 120").unwrap();
        assert_eq!(config.timeout_secs, 120);
        assert_eq!(config, HttpConfig { timeout_secs: 120, ..HttpConfig::default() });
    }

    #[test]
    fn test_custom_user_agent() {
        let config: HttpConfig = toml::from_str("user_agent = \"finance-export/2.1\"").unwrap();
        assert_eq!(config.user_agent, "finance-export/2.1");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_dropped_transport_knobs_are_unknown() {
        assert!(toml::from_str::<HttpConfig>("pool_max_idle_per_host = 4").is_err());
        assert!(toml::from_str::<HttpConfig>("retries = 3").is_err());
    }

    #[test]
    fn test_page_timeout_bounds() {
        let slow_month = HttpConfig { timeout_secs: 600, ..HttpConfig::default() };
        assert!(slow_month.validate().is_ok());

        for timeout_secs in [0, 601] {
            let config = HttpConfig { timeout_secs, ..HttpConfig::default() };
            let err = config.validate().unwrap_err();
            assert!(err.to_string().contains("http.timeout_secs"));
        }
    }

    #[test]
    fn test_connect_timeout_bounds() {
        for connect_timeout_secs in [0, 61] {
            let config = HttpConfig { connect_timeout_secs, ..HttpConfig::default() };
            assert!(matches!(config.validate(), Err(ReportError::Config(_))));
        }
    }

    #[test]
    fn test_user_agent_must_be_header_safe() {
        let empty = HttpConfig { user_agent: String::new(), ..HttpConfig::default() };
        let newline = HttpConfig { user_agent: "agent\r\nX-Injected: 1".to_owned(), ..HttpConfig::default() };

        assert!(empty.validate().is_err());
        assert!(newline.validate().is_err());
    }
}
