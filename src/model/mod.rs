//! Data model for extraction input and output.
//!
//! A [`Document`] names the input file; extraction turns it into an
//! [`ExtractionResult`] of provenance-tagged [`Fragment`]s. The export
//! path produces [`EncodedImage`]s instead.

mod document;
mod fragment;
mod image;

pub use document::{Document, DocumentKind};
pub use fragment::{ExtractionResult, Fragment, FragmentSource};
pub use image::{EncodedImage, ImageFormat, RasterImage};
