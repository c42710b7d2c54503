//! Client configuration.
//!
//! Everything a [`crate::ClassificationClient`] needs is held in one
//! [`ClientConfig`], built via [`ClientConfigBuilder`]. The endpoint and the
//! credential source are values passed in at construction time; nothing is
//! read from module-level globals.

use crate::credentials::CredentialSource;
use crate::error::ClassifyError;
use std::fmt;

/// Default classification endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://delicate-bird-c901.sam-b0c.workers.dev/classify";

/// Configuration for a [`crate::ClassificationClient`].
///
/// # Example
/// ```rust
/// use doc_classify::{ClientConfig, CredentialSource};
///
/// let config = ClientConfig::builder()
///     .endpoint("https://classifier.example.com/classify")
///     .credentials(CredentialSource::Env("MY_API_KEY".into()))
///     .timeout_secs(30)
///     .build()
///     .unwrap();
/// assert_eq!(config.timeout_secs, 30);
/// ```
#[derive(Clone)]
pub struct ClientConfig {
    /// Full URL of the classification endpoint. Default: [`DEFAULT_ENDPOINT`].
    pub endpoint: String,

    /// Where the bearer token is read from. Default: `INFERENCE_API_KEY`
    /// from the environment, then from `./.env`.
    pub credentials: CredentialSource,

    /// Whole-request timeout in seconds. Default: 60.
    ///
    /// Covers connect, upload of the encoded document and the wait for the
    /// classifier's answer.
    pub timeout_secs: u64,

    /// TCP/TLS connect timeout in seconds. Default: 10.
    pub connect_timeout_secs: u64,

    /// Reject files that do not start with `%PDF`. Default: false.
    pub require_pdf: bool,

    /// Reject documents larger than this many bytes. Default: None (no limit).
    pub max_document_bytes: Option<u64>,

    /// `User-Agent` header. Default: `doc-classify/<version>`.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            credentials: CredentialSource::default(),
            timeout_secs: 60,
            connect_timeout_secs: 10,
            require_pdf: false,
            max_document_bytes: None,
            user_agent: concat!("doc-classify/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .field("timeout_secs", &self.timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("require_pdf", &self.require_pdf)
            .field("max_document_bytes", &self.max_document_bytes)
            .finish()
    }
}

impl ClientConfig {
    /// Create a new builder for `ClientConfig`.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: Self::default(),
        }
    }

    /// Check the invariants `build()` enforces. Also called by
    /// [`crate::ClassificationClient::new`] for hand-assembled configs.
    pub fn validate(&self) -> Result<(), ClassifyError> {
        let url = reqwest::Url::parse(&self.endpoint).map_err(|e| {
            ClassifyError::InvalidConfig(format!("endpoint '{}' is not a URL: {}", self.endpoint, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClassifyError::InvalidConfig(format!(
                "endpoint must be http or https, got '{}'",
                url.scheme()
            )));
        }
        if self.timeout_secs == 0 {
            return Err(ClassifyError::InvalidConfig("timeout must be ≥ 1s".into()));
        }
        if self.connect_timeout_secs == 0 {
            return Err(ClassifyError::InvalidConfig(
                "connect timeout must be ≥ 1s".into(),
            ));
        }
        Ok(())
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    pub fn credentials(mut self, source: CredentialSource) -> Self {
        self.config.credentials = source;
        self
    }

    /// Use a fixed token instead of looking one up.
    pub fn api_key(mut self, token: impl Into<String>) -> Self {
        self.config.credentials = CredentialSource::token(token);
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs;
        self
    }

    pub fn connect_timeout_secs(mut self, secs: u64) -> Self {
        self.config.connect_timeout_secs = secs;
        self
    }

    pub fn require_pdf(mut self, v: bool) -> Self {
        self.config.require_pdf = v;
        self
    }

    pub fn max_document_bytes(mut self, limit: u64) -> Self {
        self.config.max_document_bytes = Some(limit);
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ClientConfig, ClassifyError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
