//! Document encoding: raw bytes → base64 text for the JSON request body.
//!
//! Standard alphabet with padding, which is what the classification service
//! decodes. No line wrapping.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use tracing::debug;

/// Encode a document as base64.
pub fn encode_document(bytes: &[u8]) -> String {
    let b64 = STANDARD.encode(bytes);
    debug!("Encoded {} bytes → {} bytes base64", bytes.len(), b64.len());
    b64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_known_value() {
        assert_eq!(encode_document(b"%PDF-1.4"), "JVBERi0xLjQ=");
        assert_eq!(encode_document(b""), "");
    }

    #[test]
    fn binary_content_survives_decode() {
        let bytes: Vec<u8> = (0..=255u8).rev().collect();
        let decoded = STANDARD.decode(encode_document(&bytes)).expect("valid base64");
        assert_eq!(decoded, bytes);
    }
}
