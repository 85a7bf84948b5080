//! Summary statistics of an extraction.

use crate::model::{ExtractionResult, FragmentSource};
use serde::{Deserialize, Serialize};

/// Counts collected from an [`ExtractionResult`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Number of fragments (pages for PDF)
    pub fragment_count: u32,

    /// Fragments taken from the text layer
    pub text_layer_count: u32,

    /// Fragments produced by OCR
    pub ocr_count: u32,

    /// Fragments recording a failure
    pub error_count: u32,

    /// Text-layer read failures that fell through to OCR
    pub masked_read_errors: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl ExtractionStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics from a result.
    pub fn from_result(result: &ExtractionResult) -> Self {
        let mut stats = Self::new();
        for fragment in &result.fragments {
            stats.fragment_count += 1;
            match fragment.source {
                FragmentSource::TextLayer => stats.text_layer_count += 1,
                FragmentSource::OcrFallback => stats.ocr_count += 1,
                FragmentSource::Error => stats.error_count += 1,
            }
            if fragment.text_layer_error.is_some() {
                stats.masked_read_errors += 1;
            }
            if !fragment.is_error() {
                stats.count_text(&fragment.text);
            }
        }
        stats
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}
