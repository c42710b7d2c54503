//! # doc-classify
//!
//! Classify documents (usually PDFs) against a remote labelling endpoint.
//!
//! ## Pipeline Overview
//!
//! ```text
//! file
//!  │
//!  ├─ 1. Credentials  bearer token from env var / .env file / caller
//!  ├─ 2. Input        read the whole file (optional %PDF + size checks)
//!  ├─ 3. Encode       bytes → base64
//!  ├─ 4. POST         {"document", "additional_labels"} → /classify
//!  └─ 5. Decode       {"labels", "metadata"} or a ClassifyError
//! ```
//!
//! One request per call, no retries, explicit timeouts.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use doc_classify::{classify, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Token read from INFERENCE_API_KEY, falling back to ./.env
//!     let config = ClientConfig::default();
//!     let result = classify("sample.pdf", ["Invoice", "Contract"], &config).await?;
//!     println!("{:?} {}", result.labels(), result.metadata());
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `classify` binary (clap + anyhow + tracing-subscriber + indicatif) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod pipeline;
pub mod types;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use client::{classify, classify_sync, ClassificationClient};
pub use config::{ClientConfig, ClientConfigBuilder, DEFAULT_ENDPOINT};
pub use credentials::{BearerToken, CredentialSource, DEFAULT_API_KEY_ENV, DEFAULT_ENV_FILE};
pub use error::ClassifyError;
pub use types::{ClassificationRequest, ClassificationResult};
