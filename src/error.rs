//! Error types for the doc-classify library.
//!
//! Every failure is fatal to the single classification call, so there is one
//! error enum, [`ClassifyError`]. Its variants fall into three groups:
//!
//! * **Local** — the document or the credentials could not be read, or the
//!   configuration is invalid. Raised before any network traffic.
//! * **Transport** — DNS, connect, TLS or timeout failures reported by
//!   `reqwest`, passed through uninterpreted.
//! * **Application** — the endpoint answered with a non-200 status, or with a
//!   200 whose body is not JSON.

use std::path::PathBuf;
use thiserror::Error;

/// All errors returned by the doc-classify library.
#[derive(Debug, Error)]
pub enum ClassifyError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("Document not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// Any other I/O failure while reading the document.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `require_pdf` is set and the file does not start with `%PDF`.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: Vec<u8> },

    /// Document exceeds the configured `max_document_bytes`.
    #[error("Document is {size} bytes, limit is {limit} bytes")]
    DocumentTooLarge { size: u64, limit: u64 },

    // ── Credential errors ─────────────────────────────────────────────────
    /// No bearer token could be found.
    #[error("No API key found.\n{hint}")]
    MissingCredentials { hint: String },

    /// A line in the credential file is not `KEY=VALUE`.
    #[error("Malformed line {line} in credential file '{path}': expected KEY=VALUE")]
    MalformedCredentials { path: PathBuf, line: usize },

    /// The credential file exists but could not be read.
    #[error("Failed to read credential file '{path}': {source}")]
    CredentialFileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Network errors ────────────────────────────────────────────────────
    /// DNS, connect, TLS or timeout failure.
    #[error("Request to classification endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The endpoint returned a status other than 200.
    #[error("Classification endpoint returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The endpoint returned 200 but the body is not syntactically valid JSON.
    /// The shape of `labels` and `metadata` is never checked.
    #[error("Invalid response from classification endpoint: {detail}\nBody: {body}")]
    InvalidResponse { detail: String, body: String },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ClassifyError {
    /// HTTP status code for [`ClassifyError::Api`], or the status carried by a
    /// transport error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClassifyError::Api { status, .. } => Some(*status),
            ClassifyError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// True for 401/403 — the token is missing, wrong, or lacks access.
    pub fn is_auth_error(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}
