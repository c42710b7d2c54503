//! Pipeline stages for one classification call.
//!
//! Each submodule implements exactly one step.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ encode ──▶ http
//! (bytes)   (base64)   (POST + decode)
//! ```
//!
//! 1. [`input`]  — read the local file, apply the optional PDF / size checks
//! 2. [`encode`] — base64-wrap the bytes for the JSON request body
//! 3. [`http`]   — send the request and map the status and body onto
//!    [`crate::ClassificationResult`] or [`crate::ClassifyError`]

pub mod encode;
pub mod http;
pub mod input;
