//! Raster images of PDF pages and their encoded export form.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Bitmap encoding produced by the rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Lossless PNG
    #[default]
    Png,
    /// JPEG
    Jpeg,
}

impl ImageFormat {
    /// MIME type (e.g., "image/jpeg").
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }

    /// File extension written by `pdftoppm` for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFormat::Png => write!(f, "png"),
            ImageFormat::Jpeg => write!(f, "jpeg"),
        }
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpeg" | "jpg" => Ok(ImageFormat::Jpeg),
            other => Err(format!("Unknown image format: {}", other)),
        }
    }
}

/// A single rendered page held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    /// Page number (1-indexed)
    pub page: u32,

    /// Encoding of `data`
    pub format: ImageFormat,

    /// Encoded image bytes
    pub data: Vec<u8>,
}

impl RasterImage {
    /// Create a raster image.
    pub fn new(page: u32, format: ImageFormat, data: Vec<u8>) -> Self {
        Self { page, format, data }
    }

    /// Encode as a self-describing data string.
    pub fn encode(&self) -> EncodedImage {
        EncodedImage {
            page: self.page,
            format: self.format,
            payload: STANDARD.encode(&self.data),
        }
    }
}

/// A page image encoded as base64 together with its format tag.
///
/// Serializes as a data URI: `data:image/jpeg;base64,...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    /// Page number (1-indexed)
    pub page: u32,

    /// Image format
    pub format: ImageFormat,

    /// Base64 payload (standard alphabet, padded)
    pub payload: String,
}

impl EncodedImage {
    /// Render as a data URI.
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.format.mime_type(), self.payload)
    }
}

impl fmt::Display for EncodedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "data:{};base64,{}", self.format.mime_type(), self.payload)
    }
}

impl Serialize for EncodedImage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_str() {
        assert_eq!("JPG".parse::<ImageFormat>(), Ok(ImageFormat::Jpeg));
        assert_eq!("jpeg".parse::<ImageFormat>(), Ok(ImageFormat::Jpeg));
        assert_eq!("png".parse::<ImageFormat>(), Ok(ImageFormat::Png));
        assert!("gif".parse::<ImageFormat>().is_err());
    }

    #[test]
    fn test_data_uri() {
        let image = RasterImage::new(1, ImageFormat::Jpeg, b"hi".to_vec());
        let encoded = image.encode();
        assert_eq!(encoded.data_uri(), "data:image/jpeg;base64,aGk=");
        assert_eq!(STANDARD.decode(&encoded.payload).unwrap(), b"hi");
        assert_eq!(encoded.to_string(), encoded.data_uri());
    }

    #[test]
    fn test_encoded_image_serializes_as_string() {
        let encoded = RasterImage::new(3, ImageFormat::Png, vec![1, 2, 3]).encode();
        let json = serde_json::to_string(&encoded).unwrap();
        assert_eq!(json, "\"data:image/png;base64,AQID\"");
    }
}
