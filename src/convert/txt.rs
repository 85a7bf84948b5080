//! Plain text passthrough.

use std::fs;
use std::path::Path;

use crate::error::Result;
use crate::model::{DocumentKind, ExtractionResult, Fragment};
use crate::options::ExtractOptions;

use super::DocumentExtractor;

/// Reads `.txt` files as UTF-8, dropping undecodable bytes.
#[derive(Debug, Clone, Default)]
pub struct TxtExtractor {
    _private: (),
}

impl TxtExtractor {
    /// Create a new text extractor.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentExtractor for TxtExtractor {
    fn supported_extensions(&self) -> &[&str] {
        &["txt"]
    }

    fn name(&self) -> &str {
        "txt"
    }

    fn extract(&self, path: &Path, _options: &ExtractOptions) -> Result<ExtractionResult> {
        let fragment = match fs::read(path) {
            Ok(bytes) => Fragment::text_layer(None, decode_utf8_ignoring_invalid(&bytes)),
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                Fragment::error(None, format!("Error reading TXT file: {}", e))
            }
        };
        Ok(ExtractionResult::single(DocumentKind::Txt, fragment))
    }
}

/// Decode UTF-8, skipping every invalid or truncated byte sequence.
pub fn decode_utf8_ignoring_invalid(mut bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    loop {
        match std::str::from_utf8(bytes) {
            Ok(valid) => {
                out.push_str(valid);
                return out;
            }
            Err(e) => {
                let (valid, rest) = bytes.split_at(e.valid_up_to());
                // valid_up_to marks a char boundary, so this slice is UTF-8.
                out.push_str(std::str::from_utf8(valid).unwrap_or_default());
                match e.error_len() {
                    Some(len) => bytes = &rest[len..],
                    None => return out,
                }
            }
        }
    }
}
