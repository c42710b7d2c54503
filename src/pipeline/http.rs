//! HTTP stage: POST the request and interpret the response.
//!
//! The only stage with network I/O. It sends exactly one request; there is
//! no retry. The body is always read as text first, so a non-200 answer can
//! be reported verbatim and a 200 with a broken body keeps its raw text in
//! the error.

use crate::config::ClientConfig;
use crate::credentials::BearerToken;
use crate::error::ClassifyError;
use crate::types::{ClassificationRequest, ClassificationResult};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Build the pooled `reqwest` client for a configuration.
pub fn build_http_client(config: &ClientConfig) -> Result<reqwest::Client, ClassifyError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| ClassifyError::Internal(format!("Failed to build HTTP client: {}", e)))
}

/// Send one classification request and decode the answer.
pub async fn send_request(
    http: &reqwest::Client,
    endpoint: &str,
    token: &BearerToken,
    request: &ClassificationRequest,
) -> Result<ClassificationResult, ClassifyError> {
    let start = Instant::now();

    let response = http
        .post(endpoint)
        .header(AUTHORIZATION, token.header_value())
        .header(CONTENT_TYPE, "application/json")
        .header(ACCEPT, "application/json")
        .json(request)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    debug!(
        "POST {} → {} ({} bytes, {:?})",
        endpoint,
        status,
        body.len(),
        start.elapsed()
    );

    if status != StatusCode::OK {
        warn!("Classification endpoint returned HTTP {}", status.as_u16());
        return Err(ClassifyError::Api {
            status: status.as_u16(),
            body,
        });
    }

    // Only the JSON syntax is checked; field shapes belong to the service.
    let json: Value = serde_json::from_str(&body).map_err(|e| ClassifyError::InvalidResponse {
        detail: e.to_string(),
        body,
    })?;
    Ok(ClassificationResult::from_json(json))
}
