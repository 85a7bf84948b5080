//! Document-level types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// The kind of input file, decided by its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// PDF: hybrid text-layer / OCR extraction per page
    Pdf,
    /// Word document: paragraphs joined with newlines
    Docx,
    /// Plain text passthrough
    Txt,
    /// Anything else
    Unsupported,
}

impl DocumentKind {
    /// Map a file extension (without the dot, any case) to a kind.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => DocumentKind::Pdf,
            "docx" => DocumentKind::Docx,
            "txt" => DocumentKind::Txt,
            _ => DocumentKind::Unsupported,
        }
    }

    /// Map a path to a kind. Paths without an extension are unsupported.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(DocumentKind::Unsupported)
    }

    /// Whether output for this kind is split into pages.
    pub fn is_paged(&self) -> bool {
        matches!(self, DocumentKind::Pdf)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
            DocumentKind::Txt => "txt",
            DocumentKind::Unsupported => "unsupported",
        };
        f.write_str(s)
    }
}

/// An input document: a path and the kind it was detected as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    kind: DocumentKind,
}

impl Document {
    /// Create a document, detecting its kind from the extension.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let kind = DocumentKind::from_path(&path);
        Self { path, kind }
    }

    /// Path of the input file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Detected kind.
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }
}
