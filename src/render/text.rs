//! Plain text assembly of extraction results.

use crate::model::{ExtractionResult, Fragment};

/// Page header line, e.g. `--- Page 3 (OCR Fallback) ---`.
pub fn page_header(fragment: &Fragment, index: u32) -> String {
    format!(
        "--- Page {} ({}) ---\n",
        fragment.page.unwrap_or(index),
        fragment.source.label()
    )
}

/// Concatenate fragments into one string.
///
/// Paged documents get a header per fragment followed by a blank line;
/// unpaged documents are returned unmodified.
pub fn assemble(result: &ExtractionResult) -> String {
    if !result.kind.is_paged() {
        return result
            .fragments
            .iter()
            .map(|f| f.text.as_str())
            .collect();
    }

    let mut output = String::new();
    for (i, fragment) in result.fragments.iter().enumerate() {
        output.push_str(&page_header(fragment, i as u32 + 1));
        output.push_str(&fragment.text);
        output.push_str("\n\n");
    }
    output
}
