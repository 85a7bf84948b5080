//! Extracted text fragments and the ordered result that holds them.

use super::DocumentKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the text of a fragment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FragmentSource {
    /// Embedded text layer (or the whole content of a DOCX/TXT file)
    TextLayer,
    /// Text recognized from a rasterized page
    OcrFallback,
    /// Extraction failed; the fragment text describes the failure
    Error,
}

impl FragmentSource {
    /// Human-readable label used in page headers.
    pub fn label(&self) -> &'static str {
        match self {
            FragmentSource::TextLayer => "Text Layer",
            FragmentSource::OcrFallback => "OCR Fallback",
            FragmentSource::Error => "Error",
        }
    }
}

impl fmt::Display for FragmentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One unit of extracted text with its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fragment {
    /// Page number (1-indexed) for PDF fragments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Extracted text, or the failure description for error fragments
    pub text: String,

    /// Provenance tag
    pub source: FragmentSource,

    /// Text-layer read failure that was masked by falling through to OCR
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_layer_error: Option<String>,
}

impl Fragment {
    /// A fragment taken from the text layer.
    pub fn text_layer(page: Option<u32>, text: impl Into<String>) -> Self {
        Self {
            page,
            text: text.into(),
            source: FragmentSource::TextLayer,
            text_layer_error: None,
        }
    }

    /// A fragment produced by OCR.
    pub fn ocr(page: u32, text: impl Into<String>) -> Self {
        Self {
            page: Some(page),
            text: text.into(),
            source: FragmentSource::OcrFallback,
            text_layer_error: None,
        }
    }

    /// A fragment recording a failure.
    pub fn error(page: Option<u32>, message: impl Into<String>) -> Self {
        Self {
            page,
            text: message.into(),
            source: FragmentSource::Error,
            text_layer_error: None,
        }
    }

    /// Attach a masked text-layer read failure.
    pub fn with_text_layer_error(mut self, error: impl Into<String>) -> Self {
        self.text_layer_error = Some(error.into());
        self
    }

    /// Whether this fragment records a failure.
    pub fn is_error(&self) -> bool {
        self.source == FragmentSource::Error
    }
}

/// Ordered fragments extracted from one document.
///
/// Fragment order always equals page (or document) order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Kind of the source document
    pub kind: DocumentKind,

    /// Total number of pages in the source (PDF only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,

    /// OCR engine language code in effect (PDF only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Extracted fragments in order
    pub fragments: Vec<Fragment>,
}

impl ExtractionResult {
    /// Create an empty result for a document kind.
    pub fn new(kind: DocumentKind) -> Self {
        Self {
            kind,
            page_count: None,
            language: None,
            fragments: Vec::new(),
        }
    }

    /// A single-fragment result for a whole document.
    pub fn single(kind: DocumentKind, fragment: Fragment) -> Self {
        let mut result = Self::new(kind);
        result.push(fragment);
        result
    }

    /// Append a fragment.
    pub fn push(&mut self, fragment: Fragment) {
        self.fragments.push(fragment);
    }

    /// Number of fragments.
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Whether the result holds no fragments.
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Iterate fragments with a given source.
    pub fn by_source(&self, source: FragmentSource) -> impl Iterator<Item = &Fragment> {
        self.fragments.iter().filter(move |f| f.source == source)
    }

    /// Whether any fragment records a failure.
    pub fn has_errors(&self) -> bool {
        self.fragments.iter().any(Fragment::is_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_labels() {
        assert_eq!(FragmentSource::TextLayer.label(), "Text Layer");
        assert_eq!(FragmentSource::OcrFallback.to_string(), "OCR Fallback");
        assert_eq!(FragmentSource::Error.label(), "Error");
    }

    #[test]
    fn test_source_serializes_kebab_case() {
        let json = serde_json::to_string(&FragmentSource::OcrFallback).unwrap();
        assert_eq!(json, "\"ocr-fallback\"");
        let json = serde_json::to_string(&FragmentSource::TextLayer).unwrap();
        assert_eq!(json, "\"text-layer\"");
    }

    #[test]
    fn test_result_by_source() {
        let mut result = ExtractionResult::new(DocumentKind::Pdf);
        result.push(Fragment::text_layer(Some(1), "a"));
        result.push(Fragment::ocr(2, "b"));
        result.push(Fragment::error(Some(3), "boom"));

        assert_eq!(result.len(), 3);
        assert_eq!(result.by_source(FragmentSource::OcrFallback).count(), 1);
        assert!(result.has_errors());
    }

    #[test]
    fn test_text_layer_error_is_recorded() {
        let fragment = Fragment::ocr(4, "scanned").with_text_layer_error("bad stream");
        assert_eq!(fragment.text_layer_error.as_deref(), Some("bad stream"));
        assert!(!fragment.is_error());
    }
}
