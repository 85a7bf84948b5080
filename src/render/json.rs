//! JSON rendering of extraction results and exported images.

use crate::error::{Error, Result};
use crate::model::{EncodedImage, ExtractionResult};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

fn serialize<T: serde::Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Convert an extraction result to JSON.
pub fn to_json(result: &ExtractionResult, format: JsonFormat) -> Result<String> {
    serialize(result, format)
}

/// Render exported images as a compact JSON array of data URIs.
pub fn to_json_array(images: &[EncodedImage]) -> Result<String> {
    serialize(images, JsonFormat::Compact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DocumentKind, Fragment, ImageFormat, RasterImage};

    #[test]
    fn test_to_json_pretty() {
        let mut result = ExtractionResult::new(DocumentKind::Pdf);
        result.page_count = Some(1);
        result.push(Fragment::ocr(1, "Hello"));

        let json = to_json(&result, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"ocr-fallback\""));
        assert!(json.contains("\"kind\": \"pdf\""));
        assert!(json.contains('\n'));
    }

    #[test]
    fn test_to_json_compact_skips_empty_fields() {
        let result =
            ExtractionResult::single(DocumentKind::Txt, Fragment::text_layer(None, "x"));
        let json = to_json(&result, JsonFormat::Compact).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"txt","fragments":[{"text":"x","source":"text-layer"}]}"#
        );
    }

    #[test]
    fn test_to_json_array() {
        let images = vec![
            RasterImage::new(1, ImageFormat::Jpeg, b"a".to_vec()).encode(),
            RasterImage::new(2, ImageFormat::Jpeg, b"b".to_vec()).encode(),
        ];
        assert_eq!(
            to_json_array(&images).unwrap(),
            r#"["data:image/jpeg;base64,YQ==","data:image/jpeg;base64,Yg=="]"#
        );
        assert_eq!(to_json_array(&[]).unwrap(), "[]");
    }
}
