use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::CopperError;

/// Default Copper API base URL
pub const COPPER_DEFAULT_BASE: &str = "https://api.copper.com";
/// Default Copper API version
pub const COPPER_DEFAULT_API_VERSION: &str = "v1";
/// Default request timeout
pub const COPPER_DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Header name carrying the API key
pub const HDR_ACCESS_TOKEN: &str = "x-pw-accesstoken";
/// Header name carrying the email of the key's owner
pub const HDR_USER_EMAIL: &str = "x-pw-useremail";
/// Header name identifying the calling application type
pub const HDR_APPLICATION: &str = "x-pw-application";
/// Application value Copper expects from API clients
pub const APPLICATION_DEVELOPER_API: &str = "developer_api";

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Configuration for the Copper client
///
/// Debug output automatically redacts `api_key` via [`SecretString`].
#[derive(Clone, Debug)]
pub struct CopperConfig {
    api_base: String,
    api_version: String,
    api_key: Option<SecretString>,
    user_email: Option<String>,
    timeout: Duration,
}

impl Default for CopperConfig {
    fn default() -> Self {
        let timeout = env_value("COPPER_TIMEOUT")
            .and_then(|v| v.parse::<u64>().ok())
            .map_or(COPPER_DEFAULT_TIMEOUT, Duration::from_secs);

        Self {
            api_base: env_value("COPPER_BASE_URL").unwrap_or_else(|| COPPER_DEFAULT_BASE.into()),
            api_version: env_value("COPPER_API_VERSION")
                .unwrap_or_else(|| COPPER_DEFAULT_API_VERSION.into()),
            api_key: env_value("COPPER_API_KEY").map(SecretString::from),
            user_email: env_value("COPPER_USER_EMAIL"),
            timeout,
        }
    }
}

impl CopperConfig {
    /// Creates a new configuration with default settings
    ///
    /// Attempts to read from environment variables:
    /// - `COPPER_API_KEY` for the API key
    /// - `COPPER_USER_EMAIL` for the email of the key's owner
    /// - `COPPER_BASE_URL` for a custom API base URL (defaults to `https://api.copper.com`)
    /// - `COPPER_API_VERSION` for the API version (defaults to `v1`)
    /// - `COPPER_TIMEOUT` for the request timeout in seconds (defaults to 30)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API base URL
    #[must_use]
    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    /// Sets the API version path segment
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Sets the API key
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Sets the user email
    #[must_use]
    pub fn with_user_email(mut self, email: impl Into<String>) -> Self {
        self.user_email = Some(email.into());
        self
    }

    /// Sets the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Returns the configured API base URL
    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Returns the configured API version
    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Returns the configured user email, if any
    #[must_use]
    pub fn user_email(&self) -> Option<&str> {
        self.user_email.as_deref()
    }

    fn credentials(&self) -> Option<(&str, &str)> {
        let key = self.api_key.as_ref()?.expose_secret().trim();
        let email = self.user_email.as_deref()?.trim();
        if key.is_empty() || email.is_empty() {
            return None;
        }
        Some((key, email))
    }
}

/// Configuration trait for the Copper client
///
/// Implement this trait to provide custom authentication and API configuration.
pub trait Config: Send + Sync {
    /// Returns HTTP headers to include in requests
    ///
    /// # Errors
    ///
    /// Returns an error if header values contain invalid characters.
    fn headers(&self) -> Result<HeaderMap, CopperError>;

    /// Constructs the full URL for an API endpoint
    fn url(&self, path: &str) -> String;

    /// Returns query parameters to include in requests
    fn query(&self) -> Vec<(&str, &str)>;

    /// Returns the per-request timeout
    fn timeout(&self) -> Duration;

    /// Validates that authentication credentials are present.
    ///
    /// # Errors
    ///
    /// Returns an error if authentication is not properly configured.
    fn validate_auth(&self) -> Result<(), CopperError>;
}

impl Config for CopperConfig {
    fn headers(&self) -> Result<HeaderMap, CopperError> {
        let mut h = HeaderMap::new();
        h.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        h.insert(
            HDR_APPLICATION,
            HeaderValue::from_static(APPLICATION_DEVELOPER_API),
        );

        if let Some((key, email)) = self.credentials() {
            h.insert(
                HDR_ACCESS_TOKEN,
                HeaderValue::from_str(key)
                    .map_err(|_| CopperError::Config("Invalid X-PW-AccessToken value".into()))?,
            );
            h.insert(
                HDR_USER_EMAIL,
                HeaderValue::from_str(email)
                    .map_err(|_| CopperError::Config("Invalid X-PW-UserEmail value".into()))?,
            );

            let token = STANDARD.encode(format!("{email}:{key}"));
            let mut basic = HeaderValue::from_str(&format!("Basic {token}"))
                .map_err(|_| CopperError::Config("Invalid Authorization value".into()))?;
            basic.set_sensitive(true);
            h.insert(AUTHORIZATION, basic);
        }

        Ok(h)
    }

    fn url(&self, path: &str) -> String {
        let base = self.api_base.trim_end_matches('/');
        let version = self.api_version.trim_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/api/{version}/{path}")
    }

    fn query(&self) -> Vec<(&str, &str)> {
        vec![]
    }

    fn timeout(&self) -> Duration {
        self.timeout
    }

    fn validate_auth(&self) -> Result<(), CopperError> {
        match self.credentials() {
            Some(_) => Ok(()),
            None => Err(CopperError::Config(
                "Missing Copper credentials: set COPPER_API_KEY and COPPER_USER_EMAIL environment variables".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::EnvGuard;
    use serial_test::serial;

    #[test]
    #[serial(env)]
    fn config_reads_env_vars() {
        let _key = EnvGuard::set("COPPER_API_KEY", "test-key-123");
        let _email = EnvGuard::set("COPPER_USER_EMAIL", "dev@example.com");
        let _base = EnvGuard::set("COPPER_BASE_URL", "https://custom.copper.test");
        let _version = EnvGuard::set("COPPER_API_VERSION", "v2");
        let _timeout = EnvGuard::set("COPPER_TIMEOUT", "12");

        let cfg = CopperConfig::new();
        assert_eq!(cfg.api_base(), "https://custom.copper.test");
        assert_eq!(cfg.api_version(), "v2");
        assert_eq!(cfg.user_email(), Some("dev@example.com"));
        assert_eq!(cfg.timeout(), Duration::from_secs(12));

        let h = cfg.headers().unwrap();
        assert_eq!(
            h.get(HDR_ACCESS_TOKEN).unwrap().to_str().unwrap(),
            "test-key-123"
        );
        assert_eq!(
            h.get(HDR_USER_EMAIL).unwrap().to_str().unwrap(),
            "dev@example.com"
        );
    }

    #[test]
    #[serial(env)]
    fn config_defaults() {
        let _base = EnvGuard::remove("COPPER_BASE_URL");
        let _version = EnvGuard::remove("COPPER_API_VERSION");
        let _timeout = EnvGuard::set("COPPER_TIMEOUT", "not-a-number");

        let cfg = CopperConfig::new();
        assert_eq!(cfg.api_base(), COPPER_DEFAULT_BASE);
        assert_eq!(cfg.api_version(), COPPER_DEFAULT_API_VERSION);
        assert_eq!(cfg.timeout(), COPPER_DEFAULT_TIMEOUT);
    }

    #[test]
    #[serial(env)]
    fn validate_auth_requires_key_and_email() {
        let _key = EnvGuard::set("COPPER_API_KEY", "k");
        let _email = EnvGuard::remove("COPPER_USER_EMAIL");

        let err = CopperConfig::new().validate_auth().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("COPPER_API_KEY"));
        assert!(msg.contains("COPPER_USER_EMAIL"));

        let cfg = CopperConfig::new().with_user_email("me@example.com");
        assert!(cfg.validate_auth().is_ok());
    }

    #[test]
    fn basic_auth_header_encodes_email_and_key() {
        let cfg = CopperConfig::new()
            .with_api_key("secret")
            .with_user_email("me@example.com");
        let h = cfg.headers().unwrap();

        // base64("me@example.com:secret")
        assert_eq!(
            h.get(AUTHORIZATION).unwrap().to_str().unwrap(),
            "Basic bWVAZXhhbXBsZS5jb206c2VjcmV0"
        );
        assert_eq!(
            h.get(HDR_APPLICATION).unwrap().to_str().unwrap(),
            "developer_api"
        );
        assert_eq!(
            h.get(CONTENT_TYPE).unwrap().to_str().unwrap(),
            "application/json"
        );
    }

    #[test]
    fn url_joins_base_version_and_path() {
        let cfg = CopperConfig::new()
            .with_api_base("https://api.copper.com/")
            .with_api_version("v1");
        assert_eq!(
            cfg.url("/people/42"),
            "https://api.copper.com/api/v1/people/42"
        );
        assert_eq!(cfg.url("tasks"), "https://api.copper.com/api/v1/tasks");
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let cfg = CopperConfig::new().with_api_key("super-secret-key-12345");
        let debug_str = format!("{cfg:?}");

        assert!(
            !debug_str.contains("super-secret-key-12345"),
            "Debug output should not contain the API key"
        );
        assert!(
            debug_str.contains("[REDACTED]"),
            "Debug output should contain '[REDACTED]', got: {debug_str}"
        );
    }

    #[test]
    fn validate_auth_rejects_empty_or_whitespace() {
        let cfg = CopperConfig::new()
            .with_api_key("")
            .with_user_email("me@example.com");
        assert!(cfg.validate_auth().is_err());

        let cfg = CopperConfig::new()
            .with_api_key("key")
            .with_user_email("   ");
        assert!(cfg.validate_auth().is_err());

        let cfg = CopperConfig::new()
            .with_api_key("  valid-key  ")
            .with_user_email(" me@example.com\n");
        assert!(cfg.validate_auth().is_ok());

        let h = cfg.headers().unwrap();
        assert_eq!(h.get(HDR_ACCESS_TOKEN).unwrap().to_str().unwrap(), "valid-key");
        assert_eq!(
            h.get(HDR_USER_EMAIL).unwrap().to_str().unwrap(),
            "me@example.com"
        );
    }

    #[test]
    fn headers_without_credentials_omit_auth() {
        let cfg = CopperConfig::new().with_api_key("key");
        let cfg = CopperConfig {
            user_email: None,
            ..cfg
        };
        let h = cfg.headers().unwrap();
        assert!(h.get(AUTHORIZATION).is_none());
        assert!(h.get(HDR_ACCESS_TOKEN).is_none());
    }
}
