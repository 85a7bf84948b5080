//! Extraction and export options.

use crate::error::{Error, Result};
use crate::lang::LanguageTable;
use crate::model::ImageFormat;
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Trimmed text-layer length a page must exceed to skip OCR.
pub const DEFAULT_MIN_TEXT_CHARS: usize = 20;

/// Rasterization resolution in dots per inch.
pub const DEFAULT_DPI: u32 = 200;

/// Options for hybrid text extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// User-facing language tag (e.g., "traditional-chinese")
    pub language: String,

    /// Tag to engine-code table
    pub languages: LanguageTable,

    /// A page whose trimmed text layer is longer than this is trusted
    pub min_text_chars: usize,

    /// Which pages to extract
    pub pages: PageSelection,

    /// Rasterization resolution for OCR
    pub dpi: u32,

    /// Raster format handed to the OCR engine
    pub ocr_format: ImageFormat,

    /// External tool locations
    pub tools: ToolPaths,
}

impl ExtractOptions {
    /// Create new extraction options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the language tag.
    pub fn with_language(mut self, tag: impl Into<String>) -> Self {
        self.language = tag.into();
        self
    }

    /// Replace the language table.
    pub fn with_languages(mut self, table: LanguageTable) -> Self {
        self.languages = table;
        self
    }

    /// Set the text-layer trust threshold.
    pub fn with_min_text_chars(mut self, chars: usize) -> Self {
        self.min_text_chars = chars;
        self
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Set rasterization DPI.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Set the raster format used for OCR.
    pub fn with_ocr_format(mut self, format: ImageFormat) -> Self {
        self.ocr_format = format;
        self
    }

    /// Set external tool locations.
    pub fn with_tools(mut self, tools: ToolPaths) -> Self {
        self.tools = tools;
        self
    }

    /// Engine language code for the configured tag.
    pub fn engine_language(&self) -> &str {
        self.languages.resolve(&self.language)
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            language: String::new(),
            languages: LanguageTable::default(),
            min_text_chars: DEFAULT_MIN_TEXT_CHARS,
            pages: PageSelection::All,
            dpi: DEFAULT_DPI,
            ocr_format: ImageFormat::Png,
            tools: ToolPaths::default(),
        }
    }
}

/// Options for exporting page images.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Which pages to export
    pub pages: PageSelection,

    /// Rasterization resolution
    pub dpi: u32,

    /// Output image format
    pub format: ImageFormat,

    /// External tool locations
    pub tools: ToolPaths,
}

impl ExportOptions {
    /// Create new export options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set page selection.
    pub fn with_pages(mut self, pages: PageSelection) -> Self {
        self.pages = pages;
        self
    }

    /// Set rasterization DPI.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Set the output image format.
    pub fn with_format(mut self, format: ImageFormat) -> Self {
        self.format = format;
        self
    }

    /// Set external tool locations.
    pub fn with_tools(mut self, tools: ToolPaths) -> Self {
        self.tools = tools;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            pages: PageSelection::All,
            dpi: DEFAULT_DPI,
            format: ImageFormat::Jpeg,
            tools: ToolPaths::default(),
        }
    }
}

/// Locations of the external rasterizer and OCR binaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    /// poppler `pdftoppm`
    pub pdftoppm: PathBuf,

    /// `tesseract`
    pub tesseract: PathBuf,
}

impl ToolPaths {
    /// Override the `pdftoppm` binary.
    pub fn with_pdftoppm(mut self, path: impl Into<PathBuf>) -> Self {
        self.pdftoppm = path.into();
        self
    }

    /// Override the `tesseract` binary.
    pub fn with_tesseract(mut self, path: impl Into<PathBuf>) -> Self {
        self.tesseract = path.into();
        self
    }
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            pdftoppm: PathBuf::from("pdftoppm"),
            tesseract: PathBuf::from("tesseract"),
        }
    }
}

/// Page selection for extraction and export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    /// All pages
    #[default]
    All,
    /// A range of pages (inclusive, 1-indexed)
    Range(RangeInclusive<u32>),
    /// Specific pages (1-indexed, sorted, deduplicated)
    Pages(Vec<u32>),
}

impl PageSelection {
    /// Check if a page number should be included.
    pub fn includes(&self, page: u32) -> bool {
        match self {
            PageSelection::All => true,
            PageSelection::Range(range) => range.contains(&page),
            PageSelection::Pages(pages) => pages.contains(&page),
        }
    }

    /// Selected page numbers of a document with `page_count` pages, ascending.
    pub fn resolve(&self, page_count: u32) -> Vec<u32> {
        (1..=page_count).filter(|p| self.includes(*p)).collect()
    }

    /// Parse a page selection string (e.g., "all", "1-10", "1,3,5,7-10").
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            return Ok(PageSelection::All);
        }

        if let Some((start, end)) = s.split_once('-') {
            if !start.contains(',') && !end.contains(',') {
                let (start, end) = parse_bounds(s, start, end)?;
                return Ok(PageSelection::Range(start..=end));
            }
        }

        let mut pages = Vec::new();
        for part in s.split(',') {
            let part = part.trim();
            if let Some((start, end)) = part.split_once('-') {
                let (start, end) = parse_bounds(part, start, end)?;
                pages.extend(start..=end);
            } else {
                pages.push(parse_page(part)?);
            }
        }

        pages.sort_unstable();
        pages.dedup();
        Ok(PageSelection::Pages(pages))
    }
}

fn parse_page(s: &str) -> Result<u32> {
    match s.trim().parse::<u32>() {
        Ok(0) | Err(_) => Err(Error::InvalidPageRange(format!(
            "'{}' is not a page number",
            s.trim()
        ))),
        Ok(page) => Ok(page),
    }
}

fn parse_bounds(range: &str, start: &str, end: &str) -> Result<(u32, u32)> {
    let start = parse_page(start)?;
    let end = parse_page(end)?;
    if start > end {
        return Err(Error::InvalidPageRange(format!(
            "'{}' ends before it starts",
            range
        )));
    }
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_options_builder() {
        let options = ExtractOptions::new()
            .with_language("traditional-chinese")
            .with_min_text_chars(5)
            .with_dpi(300);

        assert_eq!(options.engine_language(), "chi_tra");
        assert_eq!(options.min_text_chars, 5);
        assert_eq!(options.dpi, 300);
    }

    #[test]
    fn test_default_options() {
        let options = ExtractOptions::default();
        assert_eq!(options.min_text_chars, DEFAULT_MIN_TEXT_CHARS);
        assert_eq!(options.engine_language(), "eng");
        assert_eq!(options.pages, PageSelection::All);

        let export = ExportOptions::default();
        assert_eq!(export.format, ImageFormat::Jpeg);
        assert_eq!(export.tools.pdftoppm, PathBuf::from("pdftoppm"));
    }

    #[test]
    fn test_page_selection_includes() {
        let all = PageSelection::All;
        assert!(all.includes(1));
        assert!(all.includes(100));

        let range = PageSelection::Range(5..=10);
        assert!(!range.includes(4));
        assert!(range.includes(5));
        assert!(range.includes(10));
        assert!(!range.includes(11));

        let pages = PageSelection::Pages(vec![1, 3, 5, 7]);
        assert!(pages.includes(1));
        assert!(!pages.includes(2));
        assert!(pages.includes(3));
    }

    #[test]
    fn test_page_selection_parse() {
        assert_eq!(PageSelection::parse("all").unwrap(), PageSelection::All);
        assert_eq!(PageSelection::parse(" ").unwrap(), PageSelection::All);
        assert_eq!(
            PageSelection::parse("1-5").unwrap(),
            PageSelection::Range(1..=5)
        );
        assert_eq!(
            PageSelection::parse("5,1,3-4,3").unwrap(),
            PageSelection::Pages(vec![1, 3, 4, 5])
        );
    }

    #[test]
    fn test_page_selection_parse_rejects_garbage() {
        assert!(PageSelection::parse("0").is_err());
        assert!(PageSelection::parse("5-2").is_err());
        assert!(PageSelection::parse("a,b").is_err());
        assert!(matches!(
            PageSelection::parse("1,x"),
            Err(Error::InvalidPageRange(_))
        ));
    }

    #[test]
    fn test_page_selection_resolve() {
        assert_eq!(PageSelection::All.resolve(3), vec![1, 2, 3]);
        assert_eq!(PageSelection::Range(2..=9).resolve(3), vec![2, 3]);
        assert_eq!(PageSelection::Pages(vec![4]).resolve(3), Vec::<u32>::new());
    }
}
