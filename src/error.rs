//! Error types for docsift.

use std::io;
use thiserror::Error;

/// Result type alias for docsift operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while extracting or exporting a document.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file is not a PDF (missing `%PDF-` header).
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version header is malformed.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// The operation does not accept this kind of document.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// The text layer of a single page could not be read.
    #[error("Failed to read text layer of page {page}: {reason}")]
    PageRead { page: u32, reason: String },

    /// A single page could not be rasterized.
    #[error("Failed to rasterize page {page}: {reason}")]
    Raster { page: u32, reason: String },

    /// Character recognition failed for a page image.
    #[error("OCR failed on page {page}: {reason}")]
    Ocr { page: u32, reason: String },

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),

    /// Error reading a DOCX package.
    #[error("DOCX error: {0}")]
    Docx(String),

    /// Error serializing output.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl Error {
    /// Whether this error belongs to a single page rather than the whole document.
    pub fn is_page_local(&self) -> bool {
        matches!(
            self,
            Error::PageRead { .. } | Error::Raster { .. } | Error::Ocr { .. }
        )
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            _ => Error::Docx(err.to_string()),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Docx(format!("XML error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Encrypted;
        assert_eq!(err.to_string(), "Document is encrypted");

        let err = Error::PageOutOfRange(10, 5);
        assert_eq!(
            err.to_string(),
            "Page 10 is out of range (document has 5 pages)"
        );

        let err = Error::Raster {
            page: 2,
            reason: "pdftoppm exited with status 99".into(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to rasterize page 2: pdftoppm exited with status 99"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_page_local_errors() {
        assert!(Error::Ocr {
            page: 1,
            reason: "x".into()
        }
        .is_page_local());
        assert!(!Error::UnknownFormat.is_page_local());
        assert!(!Error::Docx("bad".into()).is_page_local());
    }
}
