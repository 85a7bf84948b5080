//! Text-layer backend (lopdf) and the concrete PDF page source.

use std::path::{Path, PathBuf};

use lopdf::Document as LopdfDocument;

use crate::detect::parse_pdf_header;
use crate::error::{Error, Result};
use crate::model::RasterImage;

use super::{PageSource, Rasterizer};

/// Reads embedded page text through `lopdf::Document`.
pub struct LopdfBackend {
    doc: LopdfDocument,
    page_count: u32,
}

impl LopdfBackend {
    /// Load from a file path.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::load_bytes(&data)
    }

    /// Load from an in-memory byte slice.
    ///
    /// The `%PDF-` header is located before the body is parsed, so non-PDF
    /// input fails with [`Error::UnknownFormat`]. Bytes ahead of the header
    /// are dropped; cross-reference offsets count from the header.
    pub fn load_bytes(data: &[u8]) -> Result<Self> {
        let header = parse_pdf_header(data)?;
        if header.offset > 0 {
            log::debug!("Skipping {} bytes before the PDF header", header.offset);
        }
        let doc = LopdfDocument::load_mem(&data[header.offset..])?;
        Ok(Self::from_document(doc))
    }

    fn from_document(doc: LopdfDocument) -> Self {
        if doc.is_encrypted() {
            log::warn!("PDF is encrypted; text layer reads will likely fail and fall back to OCR");
        }
        let page_count = doc.get_pages().len() as u32;
        Self { doc, page_count }
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }

    /// Extract the text layer of one page (1-indexed).
    pub fn page_text(&self, page: u32) -> Result<String> {
        if page == 0 || page > self.page_count {
            return Err(Error::PageOutOfRange(page, self.page_count));
        }
        self.doc
            .extract_text(&[page])
            .map_err(|e| Error::PageRead {
                page,
                reason: e.to_string(),
            })
    }
}

/// A PDF on disk: lopdf for the text layer, a [`Rasterizer`] for images.
pub struct PdfPageSource<R> {
    path: PathBuf,
    backend: LopdfBackend,
    rasterizer: R,
}

impl<R: Rasterizer> PdfPageSource<R> {
    /// Open a PDF. Fails if the file cannot be read or parsed at all.
    pub fn open<P: AsRef<Path>>(path: P, rasterizer: R) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let backend = LopdfBackend::load_file(&path)?;
        log::debug!(
            "Opened {} (PDF {}, {} pages)",
            path.display(),
            backend.version(),
            backend.page_count()
        );
        Ok(Self {
            path,
            backend,
            rasterizer,
        })
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The text-layer backend.
    pub fn backend(&self) -> &LopdfBackend {
        &self.backend
    }
}

impl<R: Rasterizer> PageSource for PdfPageSource<R> {
    fn page_count(&self) -> u32 {
        self.backend.page_count()
    }

    fn read_text_layer(&self, page: u32) -> Result<String> {
        self.backend.page_text(page)
    }

    fn rasterize_page(&self, page: u32) -> Result<RasterImage> {
        let page_count = self.backend.page_count();
        if page == 0 || page > page_count {
            return Err(Error::Raster {
                page,
                reason: Error::PageOutOfRange(page, page_count).to_string(),
            });
        }
        self.rasterizer.rasterize(&self.path, page)
    }
}
