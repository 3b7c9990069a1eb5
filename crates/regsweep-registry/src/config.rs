//! Configuration types for registry client.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the registry client.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Registry base URL (e.g., "<https://registry.example.com>").
    pub url: String,

    /// Request timeout.
    pub timeout: Duration,

    /// TLS configuration.
    pub tls: Option<TlsConfig>,

    /// User agent string.
    pub user_agent: String,
}

impl RegistryConfig {
    /// Creates a new registry configuration with the given URL.
    ///
    /// Trailing slashes are stripped so paths can be appended directly.
    ///
    /// # Examples
    ///
    /// ```
    /// use regsweep_registry::RegistryConfig;
    ///
    /// let config = RegistryConfig::new("https://registry.example.com/");
    /// assert_eq!(config.url, "https://registry.example.com");
    /// ```
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            url: url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(30),
            tls: None,
            user_agent: format!("regsweep/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the TLS configuration.
    #[must_use]
    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls = Some(tls);
        self
    }

    /// Returns the absolute URL of a registry API path.
    ///
    /// # Examples
    ///
    /// ```
    /// use regsweep_registry::RegistryConfig;
    ///
    /// let config = RegistryConfig::new("http://localhost:5000");
    /// assert_eq!(
    ///     config.endpoint("/v2/_catalog"),
    ///     "http://localhost:5000/v2/_catalog"
    /// );
    /// ```
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.url)
    }
}

/// TLS configuration for the registry connection.
#[derive(Debug, Clone, Default)]
pub struct TlsConfig {
    /// Path to an additional CA certificate file (PEM).
    pub ca_cert: Option<PathBuf>,

    /// Whether to skip certificate verification (NOT recommended for production).
    pub insecure_skip_verify: bool,
}

impl TlsConfig {
    /// Creates a new TLS configuration with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ca_cert: None,
            insecure_skip_verify: false,
        }
    }

    /// Sets the CA certificate path.
    #[must_use]
    pub fn with_ca_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_cert = Some(path.into());
        self
    }

    /// Enables insecure mode (skips certificate verification).
    ///
    /// # Warning
    ///
    /// This should only be used for testing. Never use in production.
    #[must_use]
    pub const fn insecure(mut self) -> Self {
        self.insecure_skip_verify = true;
        self
    }
}
