//! Client configuration.
//!
//! Everything except credentials is configurable from TOML:
//!
//! ```toml
//! base_url = "https://reports.solidgate.com/api/v1/"
//!
//! [http]
//! timeout_secs = 60
//! ```

use serde::Deserialize;
use url::{Host, Url};

use crate::{
    error::{ReportError, Result},
    transport::HttpConfig,
};

/// Production reporting API root.
pub const DEFAULT_BASE_URL: &str = "https://reports.solidgate.com/api/v1/";

/// Root client configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {
    /// Reporting API root; report paths are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { base_url: default_base_url(), http: HttpConfig::default() }
    }
}

impl ClientConfig {
    /// Parses and validates a TOML configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Config`] if the TOML is malformed or fails
    /// [`validate`](Self::validate).
    ///
    /// # Examples
    ///
    /// ```
    /// use solidgate_reporting::ClientConfig;
    ///
    /// let config = ClientConfig::from_toml(
    ///     r#"
    ///     base_url = "https://reports.example.com/api/v1"
    ///
    ///     [http]
    ///     timeout_secs = 90
    ///     "#,
    /// )?;
    /// assert_eq!(config.http.timeout_secs, 90);
    /// assert_eq!(config.normalized_base_url()?, "https://reports.example.com/api/v1/");
    /// # Ok::<(), solidgate_reporting::ReportError>(())
    /// ```
    pub fn from_toml(toml: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(toml).map_err(|e| ReportError::Config(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates base URL and HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Config`] if any value is out of bounds.
    pub fn validate(&self) -> Result<()> {
        normalize_base_url(&self.base_url)?;
        self.http.validate()
    }

    /// Base URL with a guaranteed trailing slash.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::Config`] if the base URL is not an absolute
    /// HTTPS URL (or plain HTTP on a loopback host).
    pub fn normalized_base_url(&self) -> Result<String> {
        normalize_base_url(&self.base_url)
    }
}

/// Validates a base URL and appends a trailing slash if it lacks one.
///
/// Report paths are relative (`card-orders`), so the root must end with `/`
/// for plain concatenation to land under it. Plain `http` is accepted only for
/// loopback hosts (local mock servers and proxies).
pub(crate) fn normalize_base_url(base_url: &str) -> Result<String> {
    let url = Url::parse(base_url)
        .map_err(|e| ReportError::Config(format!("invalid base_url '{base_url}': {e}")))?;

    match url.scheme() {
        "https" => {}
        "http" if is_loopback(&url) => {}
        scheme => {
            return Err(ReportError::Config(format!(
                "base_url must use HTTPS unless it points at a loopback host, got: {scheme}"
            )));
        }
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ReportError::Config(
            "base_url must not carry a query string or fragment".to_owned(),
        ));
    }

    let mut normalized = base_url.to_owned();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    Ok(normalized)
}

fn is_loopback(url: &Url) -> bool {
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.validate().is_ok());
        assert_eq!(config.normalized_base_url().unwrap(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.http.timeout_secs, 30);
    }

    #[test]
    fn test_trailing_slash_appended() {
        assert_eq!(
            normalize_base_url("https://reports.example.com/api/v1").unwrap(),
            "https://reports.example.com/api/v1/"
        );
    }

    #[test]
    fn test_plain_http_rejected() {
        let result = normalize_base_url("http://reports.solidgate.com/api/v1/");
        assert!(matches!(result, Err(ReportError::Config(msg)) if msg.contains("HTTPS")));
    }

    #[test]
    fn test_plain_http_allowed_for_loopback() {
        assert_eq!(
            normalize_base_url("http://127.0.0.1:8080/api/v1").unwrap(),
            "http://127.0.0.1:8080/api/v1/"
        );
        assert!(normalize_base_url("http://localhost:9000/").is_ok());
        assert!(normalize_base_url("http://[::1]/api/v1/").is_ok());
    }

    #[test]
    fn test_plain_http_rejected_for_lookalike_hosts() {
        assert!(normalize_base_url("http://localhost.example.com/api/v1/").is_err());
        assert!(normalize_base_url("http://10.0.0.1/api/v1/").is_err());
    }

    #[test]
    fn test_other_schemes_rejected_even_on_loopback() {
        assert!(normalize_base_url("ftp://127.0.0.1/api/v1/").is_err());
    }

    #[test]
    fn test_relative_url_rejected() {
        assert!(normalize_base_url("api/v1/").is_err());
    }

    #[test]
    fn test_query_string_rejected() {
        assert!(normalize_base_url("https://reports.example.com/api/v1/?debug=1").is_err());
    }

    #[test]
    fn test_from_toml_validates_http_section() {
        let result = ClientConfig::from_toml("[http]\ntimeout_secs = 0\n");
        assert!(matches!(result, Err(ReportError::Config(_))));
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        let result = ClientConfig::from_toml("private_key = \"oops\"\n");
        assert!(matches!(result, Err(ReportError::Config(msg)) if msg.contains("invalid TOML")));
    }
}
