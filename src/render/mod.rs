//! Rendering of extraction results to text and JSON.

mod json;
mod result;
mod text;

pub use json::{to_json, to_json_array, JsonFormat};
pub use result::ExtractionStats;
pub use text::{assemble, page_header};
