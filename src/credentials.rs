//! Bearer-token resolution.
//!
//! The token is looked up afresh at the start of every classification call
//! and never cached by the client. Three sources are supported, and can be
//! chained so the first one that yields a token wins:
//!
//! * an environment variable (default `INFERENCE_API_KEY`);
//! * a local `KEY=VALUE` file (default `.env`);
//! * a static value supplied by the caller.
//!
//! ## Credential file format
//!
//! ```text
//! # comments and blank lines are ignored
//! export INFERENCE_API_KEY="sk-abc=="
//! ```
//!
//! The value is everything after the first `=`, trimmed and unquoted. A line
//! that is neither blank, a comment, nor `KEY=VALUE` is rejected with
//! [`ClassifyError::MalformedCredentials`] rather than silently skipped.

use crate::error::ClassifyError;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default environment variable holding the API key.
pub const DEFAULT_API_KEY_ENV: &str = "INFERENCE_API_KEY";

/// Default credential file, relative to the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// A bearer token. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The `Authorization` header value: `Bearer <token>`.
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BearerToken(<redacted, {} chars>)", self.0.len())
    }
}

/// Where the bearer token comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Read the named environment variable.
    Env(String),
    /// Read `key` from a `KEY=VALUE` file. If the key is absent and the file
    /// holds exactly one entry, that entry's value is used.
    File { path: PathBuf, key: String },
    /// A token supplied directly by the caller.
    Static(BearerToken),
    /// Try each source in order; the first one that yields a token wins.
    Chain(Vec<CredentialSource>),
}

impl Default for CredentialSource {
    /// `INFERENCE_API_KEY` from the environment, then from `./.env`.
    fn default() -> Self {
        CredentialSource::Chain(vec![
            CredentialSource::Env(DEFAULT_API_KEY_ENV.to_string()),
            CredentialSource::File {
                path: PathBuf::from(DEFAULT_ENV_FILE),
                key: DEFAULT_API_KEY_ENV.to_string(),
            },
        ])
    }
}

impl CredentialSource {
    /// Shorthand for [`CredentialSource::Static`].
    pub fn token(token: impl Into<String>) -> Self {
        CredentialSource::Static(BearerToken::new(token))
    }

    /// Resolve the token.
    ///
    /// Missing sources produce [`ClassifyError::MissingCredentials`]; a
    /// [`CredentialSource::Chain`] moves on to its next entry in that case but
    /// stops on any other error (an unreadable or malformed file).
    pub fn resolve(&self) -> Result<BearerToken, ClassifyError> {
        match self {
            CredentialSource::Env(var) => match std::env::var(var) {
                Ok(v) if !v.trim().is_empty() => {
                    debug!("API key read from ${}", var);
                    Ok(BearerToken::new(v.trim()))
                }
                _ => Err(ClassifyError::MissingCredentials {
                    hint: format!("Set the {var} environment variable."),
                }),
            },
            CredentialSource::File { path, key } => resolve_file(path, key),
            CredentialSource::Static(token) => {
                if token.as_str().trim().is_empty() {
                    Err(ClassifyError::MissingCredentials {
                        hint: "The supplied API key is empty.".into(),
                    })
                } else {
                    Ok(BearerToken::new(token.as_str().trim()))
                }
            }
            CredentialSource::Chain(sources) => {
                let mut hints = Vec::new();
                for source in sources {
                    match source.resolve() {
                        Ok(token) => return Ok(token),
                        Err(ClassifyError::MissingCredentials { hint }) => hints.push(hint),
                        Err(e) => return Err(e),
                    }
                }
                if hints.is_empty() {
                    hints.push("No credential source configured.".into());
                }
                Err(ClassifyError::MissingCredentials {
                    hint: hints.join("\n"),
                })
            }
        }
    }
}

fn resolve_file(path: &Path, key: &str) -> Result<BearerToken, ClassifyError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ClassifyError::MissingCredentials {
                hint: format!("Create {} with a line {key}=<token>.", path.display()),
            });
        }
        Err(e) => {
            return Err(ClassifyError::CredentialFileUnreadable {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let entries = parse_env_file(&contents, path)?;

    let value = match entries.iter().find(|(k, _)| k == key) {
        Some((_, v)) => Some(v),
        None if entries.len() == 1 => Some(&entries[0].1),
        None => None,
    };

    match value {
        Some(v) if !v.is_empty() => {
            debug!("API key read from {}", path.display());
            Ok(BearerToken::new(v.as_str()))
        }
        _ => Err(ClassifyError::MissingCredentials {
            hint: format!("{} has no non-empty {key} entry.", path.display()),
        }),
    }
}

/// Parse `KEY=VALUE` lines, preserving file order.
///
/// `path` is only used for error reporting.
pub fn parse_env_file(contents: &str, path: &Path) -> Result<Vec<(String, String)>, ClassifyError> {
    let mut entries = Vec::new();

    for (idx, raw) in contents.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);

        let malformed = || ClassifyError::MalformedCredentials {
            path: path.to_path_buf(),
            line: idx + 1,
        };

        let (key, value) = line.split_once('=').ok_or_else(|| malformed())?;
        let key = key.trim();
        if key.is_empty() {
            return Err(malformed());
        }

        entries.push((key.to_string(), unquote(value.trim()).to_string()));
    }

    Ok(entries)
}

fn unquote(v: &str) -> &str {
    for q in ['"', '\''] {
        if v.len() >= 2 && v.starts_with(q) && v.ends_with(q) {
            return &v[1..v.len() - 1];
        }
    }
    v
}
