//! Input stage: read the local document into memory.
//!
//! The whole file is read in one go and the handle dropped before encoding.
//! Failures map onto [`ClassifyError`] so a missing file is reported before
//! any request is built.

use crate::config::ClientConfig;
use crate::error::ClassifyError;
use std::io::ErrorKind;
use std::path::Path;
use tracing::debug;

const PDF_MAGIC: &[u8; 4] = b"%PDF";

/// Read the document at `path`, applying the configured input checks.
pub async fn read_document(path: &Path, config: &ClientConfig) -> Result<Vec<u8>, ClassifyError> {
    // Size check first so an oversized file is never pulled into memory.
    if let Some(limit) = config.max_document_bytes {
        let meta = tokio::fs::metadata(path)
            .await
            .map_err(|e| map_io_error(path, e))?;
        if meta.len() > limit {
            return Err(ClassifyError::DocumentTooLarge {
                size: meta.len(),
                limit,
            });
        }
    }

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| map_io_error(path, e))?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());

    check_document(&bytes, path, config)?;
    Ok(bytes)
}

/// Apply `require_pdf` and `max_document_bytes` to an in-memory document.
///
/// `path` is only used for error reporting.
pub fn check_document(bytes: &[u8], path: &Path, config: &ClientConfig) -> Result<(), ClassifyError> {
    if let Some(limit) = config.max_document_bytes {
        let size = bytes.len() as u64;
        if size > limit {
            return Err(ClassifyError::DocumentTooLarge { size, limit });
        }
    }

    if config.require_pdf && !bytes.starts_with(PDF_MAGIC) {
        return Err(ClassifyError::NotAPdf {
            path: path.to_path_buf(),
            magic: bytes.iter().take(4).copied().collect(),
        });
    }

    Ok(())
}

fn map_io_error(path: &Path, e: std::io::Error) -> ClassifyError {
    match e.kind() {
        ErrorKind::NotFound => ClassifyError::FileNotFound {
            path: path.to_path_buf(),
        },
        ErrorKind::PermissionDenied => ClassifyError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => ClassifyError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(bytes).unwrap();
        f
    }

    #[tokio::test]
    async fn reads_exact_bytes() {
        let payload: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let f = write_temp(&payload);
        let read = read_document(f.path(), &ClientConfig::default()).await.unwrap();
        assert_eq!(read, payload);
    }

    #[tokio::test]
    async fn missing_file_is_file_not_found() {
        let err = read_document(Path::new("/definitely/not/here.pdf"), &ClientConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ClassifyError::FileNotFound { .. }));
    }

    #[tokio::test]
    async fn require_pdf_rejects_other_files() {
        let f = write_temp(b"PK\x03\x04zip");
        let config = ClientConfig::builder().require_pdf(true).build().unwrap();
        let err = read_document(f.path(), &config).await.unwrap_err();
        match err {
            ClassifyError::NotAPdf { magic, .. } => assert_eq!(magic, b"PK\x03\x04".to_vec()),
            other => panic!("unexpected error: {other:?}"),
        }

        let f = write_temp(b"%PDF-1.7\n");
        assert!(read_document(f.path(), &config).await.is_ok());
    }

    #[tokio::test]
    async fn size_limit_is_enforced() {
        let f = write_temp(&[0u8; 100]);
        let config = ClientConfig::builder().max_document_bytes(10).build().unwrap();
        let err = read_document(f.path(), &config).await.unwrap_err();
        assert!(matches!(
            err,
            ClassifyError::DocumentTooLarge { size: 100, limit: 10 }
        ));
    }

    #[test]
    fn check_document_passes_by_default() {
        assert!(check_document(b"anything", Path::new("x"), &ClientConfig::default()).is_ok());
        assert!(check_document(b"", Path::new("x"), &ClientConfig::default()).is_ok());
    }
}
