//! PDF header detection.
//!
//! The `%PDF-x.y` marker does not have to open the file: some producers
//! write junk bytes ahead of it. It is searched for within the first
//! [`HEADER_SEARCH_LEN`] bytes, as PDF readers generally do.

use crate::error::{Error, Result};

/// Parsed `%PDF-x.y` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfHeader {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
    /// Byte offset of `%PDF-` in the input
    pub offset: usize,
}

impl std::fmt::Display for PdfHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_MAGIC_LEN: usize = 5;
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// The header must start within this many leading bytes.
pub const HEADER_SEARCH_LEN: usize = 1024;

/// Locate and validate the PDF header in leading bytes.
///
/// Fails with [`Error::UnknownFormat`] if no `%PDF-` starts within the
/// first [`HEADER_SEARCH_LEN`] bytes and [`Error::UnsupportedVersion`] if
/// the version that follows is malformed.
pub fn parse_pdf_header(data: &[u8]) -> Result<PdfHeader> {
    let window = &data[..data.len().min(HEADER_SEARCH_LEN + PDF_MAGIC_LEN - 1)];
    let offset = window
        .windows(PDF_MAGIC_LEN)
        .position(|w| w == PDF_MAGIC)
        .ok_or(Error::UnknownFormat)?;

    let version_start = offset + PDF_MAGIC_LEN;
    let version_bytes = data
        .get(version_start..version_start + VERSION_LEN)
        .ok_or(Error::UnknownFormat)?;
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(PdfHeader { version, offset })
}

fn is_valid_version(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 3 && bytes[0].is_ascii_digit() && bytes[1] == b'.' && bytes[2].is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_header() {
        let header = parse_pdf_header(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3").unwrap();
        assert_eq!(header.version, "1.7");
        assert_eq!(header.offset, 0);
        assert_eq!(header.to_string(), "PDF 1.7");
    }

    #[test]
    fn test_parse_invalid_header() {
        assert!(matches!(
            parse_pdf_header(b"<!DOCTYPE html>"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(parse_pdf_header(b"%PDF"), Err(Error::UnknownFormat)));
        assert!(matches!(parse_pdf_header(b""), Err(Error::UnknownFormat)));
        assert!(matches!(
            parse_pdf_header(b"%PDF-x.y"),
            Err(Error::UnsupportedVersion(_))
        ));
    }

    #[test]
    fn test_header_after_leading_junk() {
        let header = parse_pdf_header(b"\x00\x00garbage\r\n%PDF-1.4\n").unwrap();
        assert_eq!(header.version, "1.4");
        assert_eq!(header.offset, 11);
    }

    #[test]
    fn test_header_search_limit() {
        let mut data = vec![b' '; HEADER_SEARCH_LEN - 1];
        data.extend_from_slice(b"%PDF-1.6\n");
        assert_eq!(parse_pdf_header(&data).unwrap().offset, HEADER_SEARCH_LEN - 1);

        let mut data = vec![b' '; HEADER_SEARCH_LEN];
        data.extend_from_slice(b"%PDF-1.6\n");
        assert!(matches!(parse_pdf_header(&data), Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_version_validation() {
        assert!(is_valid_version("1.0"));
        assert!(is_valid_version("2.0"));
        assert!(!is_valid_version("10.0"));
        assert!(!is_valid_version("abc"));
    }
}
