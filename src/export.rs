//! Export of every PDF page as an encoded image.
//!
//! Unlike hybrid extraction this path is all-or-nothing: the first page
//! that fails to rasterize fails the whole export.

use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{Document, DocumentKind, EncodedImage};
use crate::options::{ExportOptions, PageSelection};
use crate::source::{PageSource, PdfPageSource, PdftoppmRasterizer};

/// Rasterize and encode the selected pages of a page source, in order.
pub fn export_pages<S: PageSource>(source: &S, pages: &PageSelection) -> Result<Vec<EncodedImage>> {
    pages
        .resolve(source.page_count())
        .into_iter()
        .map(|page| source.rasterize_page(page).map(|image| image.encode()))
        .collect()
}

/// Rasterize and encode every selected page of a PDF file.
///
/// # Example
///
/// ```no_run
/// use docsift::{export_images, ExportOptions};
///
/// let images = export_images("scan.pdf", &ExportOptions::default())?;
/// for image in &images {
///     println!("{}", image.data_uri().len());
/// }
/// # Ok::<(), docsift::Error>(())
/// ```
pub fn export_images<P: AsRef<Path>>(path: P, options: &ExportOptions) -> Result<Vec<EncodedImage>> {
    let document = Document::new(path.as_ref());
    if document.kind() != DocumentKind::Pdf {
        return Err(Error::UnsupportedFormat(format!(
            "image export needs a PDF, got {}",
            document.kind()
        )));
    }

    let rasterizer = PdftoppmRasterizer::new(&options.tools.pdftoppm, options.dpi, options.format)?;
    let source = PdfPageSource::open(document.path(), rasterizer)?;
    let images = export_pages(&source, &options.pages)?;
    log::info!(
        "Exported {} page images from {}",
        images.len(),
        document.path().display()
    );
    Ok(images)
}
