//! # docsift
//!
//! Plain text extraction from PDF, DOCX, and TXT files with a per-page
//! OCR fallback for PDFs.
//!
//! Each PDF page is handled on its own: if its embedded text layer holds
//! more than a threshold of non-whitespace-trimmed characters it is used
//! directly, otherwise the page is rasterized with `pdftoppm` and read
//! with `tesseract`. A page that fails is reported inline and the rest of
//! the document is still extracted.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docsift::{extract, render};
//!
//! fn main() -> docsift::Result<()> {
//!     let result = extract("scan.pdf", "traditional-chinese")?;
//!     println!("{}", render::assemble(&result));
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Hybrid PDF extraction**: text layer where trustworthy, OCR elsewhere
//! - **Failure isolation**: per-page errors become tagged fragments
//! - **DOCX and TXT**: paragraph text and lossy-UTF-8 passthrough
//! - **Page image export**: every page as a base64 data URI

pub mod convert;
pub mod detect;
pub mod error;
pub mod export;
pub mod hybrid;
pub mod lang;
pub mod model;
pub mod options;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use convert::{DocumentExtractor, ExtractorRegistry, UNSUPPORTED_FILE_TYPE};
pub use error::{Error, Result};
pub use export::{export_images, export_pages};
pub use hybrid::{HybridExtractor, TextLayerPolicy};
pub use lang::{map_language, LanguageTable, BASELINE_LANGUAGE};
pub use model::{
    Document, DocumentKind, EncodedImage, ExtractionResult, Fragment, FragmentSource, ImageFormat,
    RasterImage,
};
pub use options::{
    ExportOptions, ExtractOptions, PageSelection, ToolPaths, DEFAULT_DPI, DEFAULT_MIN_TEXT_CHARS,
};
pub use render::{assemble, ExtractionStats, JsonFormat};
pub use source::{OcrEngine, PageSource, Rasterizer};

use std::path::Path;

/// Extract a file with a language tag and default options.
///
/// # Example
///
/// ```no_run
/// use docsift::extract;
///
/// let result = extract("report.docx", "english").unwrap();
/// println!("{} fragments", result.len());
/// ```
pub fn extract<P: AsRef<Path>>(path: P, language: &str) -> Result<ExtractionResult> {
    let options = ExtractOptions::new().with_language(language);
    extract_with_options(path, &options)
}

/// Extract a file with custom options.
pub fn extract_with_options<P: AsRef<Path>>(
    path: P,
    options: &ExtractOptions,
) -> Result<ExtractionResult> {
    ExtractorRegistry::with_defaults().extract(path.as_ref(), options)
}

/// Extract a file and assemble the fragments into one string.
///
/// # Example
///
/// ```no_run
/// use docsift::extract_text;
///
/// let text = extract_text("scan.pdf", "traditional-chinese").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P, language: &str) -> Result<String> {
    let result = extract(path, language)?;
    Ok(render::assemble(&result))
}

/// Builder for extraction and export.
///
/// # Example
///
/// ```no_run
/// use docsift::Docsift;
///
/// let text = Docsift::new()
///     .with_language("traditional-chinese")
///     .with_min_text_chars(40)
///     .with_dpi(300)
///     .extract("scan.pdf")?
///     .to_text();
/// # Ok::<(), docsift::Error>(())
/// ```
pub struct Docsift {
    extract_options: ExtractOptions,
    export_options: ExportOptions,
    registry: ExtractorRegistry,
}

impl Docsift {
    /// Create a new builder with the default extractors.
    pub fn new() -> Self {
        Self {
            extract_options: ExtractOptions::default(),
            export_options: ExportOptions::default(),
            registry: ExtractorRegistry::with_defaults(),
        }
    }

    /// Set the language tag.
    pub fn with_language(mut self, tag: impl Into<String>) -> Self {
        self.extract_options = self.extract_options.with_language(tag);
        self
    }

    /// Replace the language table.
    pub fn with_languages(mut self, table: LanguageTable) -> Self {
        self.extract_options = self.extract_options.with_languages(table);
        self
    }

    /// Set the text-layer trust threshold.
    pub fn with_min_text_chars(mut self, chars: usize) -> Self {
        self.extract_options = self.extract_options.with_min_text_chars(chars);
        self
    }

    /// Set rasterization DPI for both OCR and export.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.extract_options = self.extract_options.with_dpi(dpi);
        self.export_options = self.export_options.with_dpi(dpi);
        self
    }

    /// Set page selection for both extraction and export.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.extract_options = self.extract_options.with_pages(pages.clone());
        self.export_options = self.export_options.with_pages(pages);
        self
    }

    /// Set the image format used by export.
    pub fn with_export_format(mut self, format: ImageFormat) -> Self {
        self.export_options = self.export_options.with_format(format);
        self
    }

    /// Set external tool locations.
    pub fn with_tools(mut self, tools: ToolPaths) -> Self {
        self.extract_options = self.extract_options.with_tools(tools.clone());
        self.export_options = self.export_options.with_tools(tools);
        self
    }

    /// Register an additional extractor.
    pub fn with_extractor(mut self, extractor: std::sync::Arc<dyn DocumentExtractor>) -> Self {
        self.registry.register(extractor);
        self
    }

    /// Extract a file.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<DocsiftResult> {
        let result = self.registry.extract(path.as_ref(), &self.extract_options)?;
        Ok(DocsiftResult { result })
    }

    /// Export the pages of a PDF as encoded images.
    pub fn export_images<P: AsRef<Path>>(&self, path: P) -> Result<Vec<EncodedImage>> {
        export::export_images(path, &self.export_options)
    }
}

impl Default for Docsift {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of extracting a document.
pub struct DocsiftResult {
    /// The ordered fragments
    pub result: ExtractionResult,
}

impl DocsiftResult {
    /// Assemble into plain text.
    pub fn to_text(&self) -> String {
        render::assemble(&self.result)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.result, format)
    }

    /// Summary statistics.
    pub fn stats(&self) -> ExtractionStats {
        ExtractionStats::from_result(&self.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builder_options() {
        let builder = Docsift::new()
            .with_language("traditional-chinese")
            .with_min_text_chars(10)
            .with_dpi(150)
            .with_export_format(ImageFormat::Png)
            .with_pages(PageSelection::Range(1..=2));

        assert_eq!(builder.extract_options.engine_language(), "chi_tra");
        assert_eq!(builder.extract_options.min_text_chars, 10);
        assert_eq!(builder.extract_options.dpi, 150);
        assert_eq!(builder.export_options.dpi, 150);
        assert_eq!(builder.export_options.format, ImageFormat::Png);
        assert_eq!(builder.export_options.pages, PageSelection::Range(1..=2));
    }

    #[test]
    fn test_builder_default() {
        let builder = Docsift::default();
        assert_eq!(builder.extract_options.min_text_chars, DEFAULT_MIN_TEXT_CHARS);
        assert_eq!(builder.export_options.format, ImageFormat::Jpeg);
    }

    #[test]
    fn test_extract_text_txt() {
        let mut file = tempfile::Builder::new().suffix(".TXT").tempfile().unwrap();
        file.write_all(b"hello\nworld").unwrap();
        assert_eq!(extract_text(file.path(), "eng").unwrap(), "hello\nworld");
    }

    #[test]
    fn test_extract_unsupported() {
        let text = extract_text("slides.pptx", "eng").unwrap();
        assert_eq!(text, UNSUPPORTED_FILE_TYPE);
    }

    #[test]
    fn test_extract_missing_pdf_is_error() {
        assert!(extract("/no/such/scan.pdf", "eng").is_err());
    }
}
