//! Per-page access to a PDF: text layer reads and on-demand rasterization.
//!
//! The decision engine only talks to the traits in this module. Concrete
//! implementations read the text layer with lopdf, render pages with
//! poppler's `pdftoppm`, and recognize text with `tesseract`.

mod backend;
mod ocr;
mod raster;

pub use backend::{LopdfBackend, PdfPageSource};
pub use ocr::TesseractEngine;
pub use raster::{PdftoppmRasterizer, RasterWorkspace};

use crate::error::Result;
use crate::model::RasterImage;
use std::path::Path;

/// Two independently failable retrieval paths for the pages of one document.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Read the embedded text of a page (1-indexed).
    ///
    /// Pages without a text layer yield an empty string, not an error.
    fn read_text_layer(&self, page: u32) -> Result<String>;

    /// Render exactly one page (1-indexed) to a bitmap.
    fn rasterize_page(&self, page: u32) -> Result<RasterImage>;
}

/// Renders single PDF pages to images.
pub trait Rasterizer {
    /// Render page `page` (1-indexed) of `file`.
    fn rasterize(&self, file: &Path, page: u32) -> Result<RasterImage>;
}

/// Recognizes text in a page image.
pub trait OcrEngine {
    /// Recognize the text in `image` using engine language code `language`.
    fn recognize(&self, image: &RasterImage, language: &str) -> Result<String>;
}

impl<T: PageSource + ?Sized> PageSource for &T {
    fn page_count(&self) -> u32 {
        (**self).page_count()
    }

    fn read_text_layer(&self, page: u32) -> Result<String> {
        (**self).read_text_layer(page)
    }

    fn rasterize_page(&self, page: u32) -> Result<RasterImage> {
        (**self).rasterize_page(page)
    }
}

impl<T: OcrEngine + ?Sized> OcrEngine for &T {
    fn recognize(&self, image: &RasterImage, language: &str) -> Result<String> {
        (**self).recognize(image, language)
    }
}
