//! Per-page choice between the embedded text layer and OCR.
//!
//! For every selected page, in order:
//!
//! 1. read the text layer (a read failure counts as empty text);
//! 2. if the trimmed text is longer than the threshold, keep it;
//! 3. otherwise rasterize the page and run OCR on it;
//! 4. a rasterization or recognition failure becomes an error fragment.
//!
//! A failure on one page never affects any other page.

use crate::model::{DocumentKind, ExtractionResult, Fragment, FragmentSource};
use crate::options::{ExtractOptions, PageSelection, DEFAULT_MIN_TEXT_CHARS};
use crate::source::{OcrEngine, PageSource};

/// Prefix of the text of an error fragment produced by the OCR fallback.
pub const OCR_FAILURE_PREFIX: &str = "OCR failed for this page: ";

/// Number of characters left after trimming surrounding whitespace.
pub fn trimmed_len(text: &str) -> usize {
    text.trim().chars().count()
}

/// Threshold rule deciding whether a text layer is trustworthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextLayerPolicy {
    /// A text layer must be strictly longer than this after trimming
    pub min_text_chars: usize,
}

impl TextLayerPolicy {
    /// Create a policy with the given threshold.
    pub fn new(min_text_chars: usize) -> Self {
        Self { min_text_chars }
    }

    /// Whether `text` is kept as-is without OCR.
    pub fn trusts(&self, text: &str) -> bool {
        trimmed_len(text) > self.min_text_chars
    }
}

impl Default for TextLayerPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_TEXT_CHARS)
    }
}

/// Hybrid extraction over a [`PageSource`], with an [`OcrEngine`] fallback.
pub struct HybridExtractor<O> {
    ocr: O,
    policy: TextLayerPolicy,
    language: String,
    pages: PageSelection,
}

impl<O: OcrEngine> HybridExtractor<O> {
    /// Create an extractor using engine language code `language`.
    pub fn new(ocr: O, language: impl Into<String>) -> Self {
        Self {
            ocr,
            policy: TextLayerPolicy::default(),
            language: language.into(),
            pages: PageSelection::All,
        }
    }

    /// Create an extractor from options; the language tag is resolved here.
    pub fn from_options(ocr: O, options: &ExtractOptions) -> Self {
        Self {
            ocr,
            policy: TextLayerPolicy::new(options.min_text_chars),
            language: options.engine_language().to_string(),
            pages: options.pages.clone(),
        }
    }

    /// Replace the text-layer policy.
    pub fn with_policy(mut self, policy: TextLayerPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Restrict extraction to a page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Engine language code in use.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Extract every selected page. Never fails; failures become fragments.
    pub fn extract<S: PageSource>(&self, source: &S) -> ExtractionResult {
        let page_count = source.page_count();
        let mut result = ExtractionResult::new(DocumentKind::Pdf);
        result.page_count = Some(page_count);
        result.language = Some(self.language.clone());

        for page in self.pages.resolve(page_count) {
            result.push(self.extract_page(source, page));
        }

        log::info!(
            "Extracted {} pages ({} via OCR, {} failed)",
            result.len(),
            result.by_source(FragmentSource::OcrFallback).count(),
            result.by_source(FragmentSource::Error).count()
        );
        result
    }

    /// Extract one page (1-indexed).
    pub fn extract_page<S: PageSource>(&self, source: &S, page: u32) -> Fragment {
        let (text, read_error) = match source.read_text_layer(page) {
            Ok(text) => (text, None),
            Err(e) => {
                log::warn!("Page {}: text layer unreadable, falling back to OCR: {}", page, e);
                (String::new(), Some(e.to_string()))
            }
        };

        if self.policy.trusts(&text) {
            log::debug!("Page {}: using text layer ({} chars)", page, trimmed_len(&text));
            return Fragment::text_layer(Some(page), text);
        }

        log::debug!(
            "Page {}: text layer has {} chars (threshold {}), running OCR",
            page,
            trimmed_len(&text),
            self.policy.min_text_chars
        );

        let recognized = source
            .rasterize_page(page)
            .and_then(|image| self.ocr.recognize(&image, &self.language));

        let fragment = match recognized {
            Ok(text) => Fragment::ocr(page, text),
            Err(e) => {
                if e.is_page_local() {
                    log::warn!("Page {}: {}", page, e);
                } else {
                    log::error!("Page {}: {}", page, e);
                }
                Fragment::error(Some(page), format!("{}{}", OCR_FAILURE_PREFIX, e))
            }
        };

        match read_error {
            Some(err) => fragment.with_text_layer_error(err),
            None => fragment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::model::{ImageFormat, RasterImage};
    use std::cell::Cell;

    struct StubSource {
        pages: Vec<Option<&'static str>>,
        rasterized: Cell<u32>,
    }

    impl PageSource for StubSource {
        fn page_count(&self) -> u32 {
            self.pages.len() as u32
        }

        fn read_text_layer(&self, page: u32) -> Result<String> {
            match self.pages[(page - 1) as usize] {
                Some(text) => Ok(text.to_string()),
                None => Err(Error::PageRead {
                    page,
                    reason: "broken content stream".into(),
                }),
            }
        }

        fn rasterize_page(&self, page: u32) -> Result<RasterImage> {
            self.rasterized.set(self.rasterized.get() + 1);
            Ok(RasterImage::new(page, ImageFormat::Png, vec![page as u8]))
        }
    }

    struct EchoOcr;

    impl OcrEngine for EchoOcr {
        fn recognize(&self, image: &RasterImage, language: &str) -> Result<String> {
            Ok(format!("ocr page {} [{}]", image.page, language))
        }
    }

    fn source(pages: Vec<Option<&'static str>>) -> StubSource {
        StubSource {
            pages,
            rasterized: Cell::new(0),
        }
    }

    #[test]
    fn test_trimmed_len_counts_chars() {
        assert_eq!(trimmed_len("  abc \n"), 3);
        assert_eq!(trimmed_len("\t\n "), 0);
        assert_eq!(trimmed_len(" 繁體中文 "), 4);
    }

    #[test]
    fn test_policy_boundary() {
        let policy = TextLayerPolicy::default();
        assert!(!policy.trusts(&"x".repeat(20)));
        assert!(policy.trusts(&"x".repeat(21)));
        assert!(!policy.trusts(&format!("   {}   ", "x".repeat(20))));
    }

    #[test]
    fn test_read_error_falls_through_to_ocr() {
        let src = source(vec![None]);
        let extractor = HybridExtractor::new(EchoOcr, "eng");
        let fragment = extractor.extract_page(&src, 1);

        assert_eq!(fragment.source, FragmentSource::OcrFallback);
        assert_eq!(fragment.text, "ocr page 1 [eng]");
        assert!(fragment
            .text_layer_error
            .as_deref()
            .unwrap()
            .contains("broken content stream"));
        assert_eq!(src.rasterized.get(), 1);
    }

    #[test]
    fn test_page_selection_limits_pages() {
        let long = "a long enough text layer for the policy";
        let src = source(vec![Some(long), Some(""), Some(long)]);
        let extractor =
            HybridExtractor::new(EchoOcr, "eng").with_pages(PageSelection::Pages(vec![1, 3]));
        let result = extractor.extract(&src);

        let pages: Vec<_> = result.fragments.iter().map(|f| f.page).collect();
        assert_eq!(pages, vec![Some(1), Some(3)]);
        assert_eq!(result.page_count, Some(3));
        assert_eq!(src.rasterized.get(), 0);
    }

    #[test]
    fn test_from_options_resolves_language() {
        let options = ExtractOptions::new()
            .with_language("traditional-chinese")
            .with_min_text_chars(2);
        let extractor = HybridExtractor::from_options(EchoOcr, &options);
        assert_eq!(extractor.language(), "chi_tra");

        let src = source(vec![Some("abc")]);
        let result = extractor.extract(&src);
        assert_eq!(result.fragments[0].source, FragmentSource::TextLayer);
        assert_eq!(result.language.as_deref(), Some("chi_tra"));
    }
}
