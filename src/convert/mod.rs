//! Routing of input files to format-specific extractors.
//!
//! Extractors are registered per file extension. A file whose extension
//! has no extractor is not an error: it yields the fixed
//! [`UNSUPPORTED_FILE_TYPE`] text.
//!
//! # Example
//!
//! ```no_run
//! use docsift::convert::ExtractorRegistry;
//! use docsift::ExtractOptions;
//! use std::path::Path;
//!
//! fn main() -> docsift::Result<()> {
//!     let registry = ExtractorRegistry::with_defaults();
//!     let options = ExtractOptions::new().with_language("traditional-chinese");
//!     let result = registry.extract(Path::new("scan.pdf"), &options)?;
//!     println!("{}", docsift::render::assemble(&result));
//!     Ok(())
//! }
//! ```

mod docx;
mod pdf;
mod txt;

pub use docx::{parse_document_xml, read_paragraphs, DocxExtractor};
pub use pdf::PdfExtractor;
pub use txt::{decode_utf8_ignoring_invalid, TxtExtractor};

use crate::error::Result;
use crate::model::{DocumentKind, ExtractionResult, Fragment};
use crate::options::ExtractOptions;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Content produced for files of an unsupported type.
pub const UNSUPPORTED_FILE_TYPE: &str = "Unsupported file type.";

/// Trait for format-specific extractors.
///
/// Implementations convert expected read failures into error fragments and
/// return `Err` only when the document cannot be opened at all.
pub trait DocumentExtractor: Send + Sync {
    /// Supported file extensions, lowercase without the leading dot.
    fn supported_extensions(&self) -> &[&str];

    /// Name of this extractor.
    fn name(&self) -> &str;

    /// Extract the file at `path`.
    fn extract(&self, path: &Path, options: &ExtractOptions) -> Result<ExtractionResult>;

    /// Check if this extractor supports the given extension.
    fn supports_extension(&self, ext: &str) -> bool {
        let ext_lower = ext.to_lowercase();
        self.supported_extensions().iter().any(|e| *e == ext_lower)
    }
}

/// Registry mapping file extensions to extractors.
pub struct ExtractorRegistry {
    extractors: HashMap<String, Arc<dyn DocumentExtractor>>,
}

impl ExtractorRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// Create a registry with the PDF, DOCX, and TXT extractors.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(PdfExtractor::new()));
        registry.register(Arc::new(DocxExtractor::new()));
        registry.register(Arc::new(TxtExtractor::new()));
        registry
    }

    /// Register an extractor for all its supported extensions.
    pub fn register(&mut self, extractor: Arc<dyn DocumentExtractor>) {
        for ext in extractor.supported_extensions() {
            self.extractors
                .insert(ext.to_lowercase(), extractor.clone());
        }
    }

    /// Get an extractor by file extension.
    pub fn get_by_extension(&self, ext: &str) -> Option<Arc<dyn DocumentExtractor>> {
        self.extractors.get(&ext.to_lowercase()).cloned()
    }

    /// Check if an extension is supported.
    pub fn supports(&self, ext: &str) -> bool {
        self.extractors.contains_key(&ext.to_lowercase())
    }

    /// Get all supported extensions.
    pub fn supported_extensions(&self) -> Vec<&str> {
        let mut exts: Vec<&str> = self.extractors.keys().map(|s| s.as_str()).collect();
        exts.sort_unstable();
        exts
    }

    /// Extract a file with the extractor registered for its extension.
    pub fn extract(&self, path: &Path, options: &ExtractOptions) -> Result<ExtractionResult> {
        let extractor = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(|ext| self.get_by_extension(ext));

        match extractor {
            Some(extractor) => {
                log::debug!("Routing {} to {} extractor", path.display(), extractor.name());
                extractor.extract(path, options)
            }
            None => {
                log::debug!("No extractor for {}", path.display());
                Ok(unsupported())
            }
        }
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// The fixed result for unsupported files.
pub fn unsupported() -> ExtractionResult {
    ExtractionResult::single(
        DocumentKind::Unsupported,
        Fragment::text_layer(None, UNSUPPORTED_FILE_TYPE),
    )
}
