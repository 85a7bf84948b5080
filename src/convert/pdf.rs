//! PDF extractor: hybrid text-layer / OCR extraction.

use std::path::Path;

use crate::error::Result;
use crate::hybrid::HybridExtractor;
use crate::model::ExtractionResult;
use crate::options::ExtractOptions;
use crate::source::{PdfPageSource, PdftoppmRasterizer, TesseractEngine};

use super::DocumentExtractor;

/// PDF extractor backed by lopdf, `pdftoppm`, and `tesseract`.
#[derive(Debug, Clone, Default)]
pub struct PdfExtractor {
    _private: (),
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl DocumentExtractor for PdfExtractor {
    fn supported_extensions(&self) -> &[&str] {
        &["pdf"]
    }

    fn name(&self) -> &str {
        "pdf"
    }

    fn extract(&self, path: &Path, options: &ExtractOptions) -> Result<ExtractionResult> {
        // The scratch workspace lives inside the rasterizer and is removed
        // when `source` goes out of scope.
        let rasterizer =
            PdftoppmRasterizer::new(&options.tools.pdftoppm, options.dpi, options.ocr_format)?;
        let source = PdfPageSource::open(path, rasterizer)?;
        let ocr = TesseractEngine::new(&options.tools.tesseract);

        let extractor = HybridExtractor::from_options(ocr, options);
        log::info!(
            "Extracting {} (lang={}, threshold={})",
            path.display(),
            extractor.language(),
            options.min_text_chars
        );
        Ok(extractor.extract(&source))
    }
}
