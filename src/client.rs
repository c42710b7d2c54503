//! The classification client and its convenience entry points.
//!
//! A [`ClassificationClient`] holds an immutable [`ClientConfig`] and a pooled
//! HTTP client. It keeps no per-call state: the token is looked up, the file
//! read and the request sent afresh on every call, so two identical calls
//! against the same service yield the same result.

use crate::config::ClientConfig;
use crate::credentials::BearerToken;
use crate::error::ClassifyError;
use crate::pipeline::{encode, http, input};
use crate::types::{ClassificationRequest, ClassificationResult};
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Client for one classification endpoint.
///
/// # Example
/// ```rust,no_run
/// use doc_classify::{ClassificationClient, ClientConfig};
///
/// # async fn run() -> Result<(), doc_classify::ClassifyError> {
/// let client = ClassificationClient::new(ClientConfig::default())?;
/// let result = client
///     .classify_with_labels("sample.pdf", ["Invoice", "Contract"])
///     .await?;
/// println!("{:?} {}", result.labels(), result.metadata());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ClassificationClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl ClassificationClient {
    /// Create a client, validating the configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClassifyError> {
        config.validate()?;
        let http = http::build_http_client(&config)?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Classify the file at `path` with no additional labels.
    pub async fn classify(&self, path: impl AsRef<Path>) -> Result<ClassificationResult, ClassifyError> {
        self.classify_with_labels(path, Vec::<String>::new()).await
    }

    /// Classify the file at `path`, passing `labels` as hints.
    ///
    /// # Errors
    /// - credential or file errors are returned before any request is sent
    /// - [`ClassifyError::Transport`] for network failures
    /// - [`ClassifyError::Api`] for any status other than 200
    /// - [`ClassifyError::InvalidResponse`] for a 200 whose body is not JSON
    pub async fn classify_with_labels<I, S>(
        &self,
        path: impl AsRef<Path>,
        labels: I,
    ) -> Result<ClassificationResult, ClassifyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let path = path.as_ref();
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        info!(
            "Classifying {} ({} additional labels)",
            path.display(),
            labels.len()
        );

        let token = self.resolve_token().await?;
        let bytes = input::read_document(path, &self.config).await?;
        self.send(&token, &bytes, labels).await
    }

    /// Classify an in-memory document.
    ///
    /// The same input checks as for files apply; errors name the document
    /// as `<memory>`.
    pub async fn classify_bytes<I, S>(
        &self,
        bytes: &[u8],
        labels: I,
    ) -> Result<ClassificationResult, ClassifyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        info!(
            "Classifying {} in-memory bytes ({} additional labels)",
            bytes.len(),
            labels.len()
        );

        let token = self.resolve_token().await?;
        input::check_document(bytes, Path::new("<memory>"), &self.config)?;
        self.send(&token, bytes, labels).await
    }

    /// Resolve the bearer token on the blocking pool; file sources read
    /// from disk.
    async fn resolve_token(&self) -> Result<BearerToken, ClassifyError> {
        let source = self.config.credentials.clone();
        tokio::task::spawn_blocking(move || source.resolve())
            .await
            .map_err(|e| ClassifyError::Internal(format!("Credential lookup task failed: {}", e)))?
    }

    async fn send(
        &self,
        token: &BearerToken,
        bytes: &[u8],
        additional_labels: Vec<String>,
    ) -> Result<ClassificationResult, ClassifyError> {
        let start = Instant::now();
        let request = ClassificationRequest {
            document: encode::encode_document(bytes),
            additional_labels,
        };

        let result = http::send_request(&self.http, &self.config.endpoint, token, &request).await?;

        info!(
            "Classified in {}ms: {} labels",
            start.elapsed().as_millis(),
            result.labels().len()
        );
        Ok(result)
    }
}

/// Classify a file with a one-off client.
pub async fn classify<I, S>(
    path: impl AsRef<Path>,
    labels: I,
    config: &ClientConfig,
) -> Result<ClassificationResult, ClassifyError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ClassificationClient::new(config.clone())?
        .classify_with_labels(path, labels)
        .await
}

/// Synchronous wrapper around [`classify`].
///
/// Creates a tokio runtime internally and blocks until the call completes.
/// Must not be called from inside an async context.
pub fn classify_sync<I, S>(
    path: impl AsRef<Path>,
    labels: I,
    config: &ClientConfig,
) -> Result<ClassificationResult, ClassifyError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    tokio::runtime::Runtime::new()
        .map_err(|e| ClassifyError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(classify(path, labels, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_invalid_hand_built_config() {
        let config = ClientConfig {
            endpoint: "nope".into(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            ClassificationClient::new(config),
            Err(ClassifyError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn file_credentials_resolve_on_blocking_pool() {
        use std::io::Write;
        let mut env_file = tempfile::NamedTempFile::new().unwrap();
        writeln!(env_file, "CLIENT_TEST_KEY= from-file ").unwrap();

        let config = ClientConfig::builder()
            .credentials(crate::CredentialSource::File {
                path: env_file.path().to_path_buf(),
                key: "CLIENT_TEST_KEY".into(),
            })
            .build()
            .unwrap();
        let client = ClassificationClient::new(config).unwrap();
        let token = client.resolve_token().await.unwrap();
        assert_eq!(token.as_str(), "from-file");
    }

    #[tokio::test]
    async fn missing_credentials_fail_before_reading_file() {
        let config = ClientConfig::builder()
            .credentials(crate::CredentialSource::Chain(vec![]))
            .build()
            .unwrap();
        let client = ClassificationClient::new(config).unwrap();
        let err = client.classify("/does/not/exist.pdf").await.unwrap_err();
        assert!(matches!(err, ClassifyError::MissingCredentials { .. }));
    }
}
