//! Upload normalization: classify by declared content type and produce
//! storable document fields

pub mod adapter;
pub mod image;
pub mod pdf;

pub use adapter::{ContentAdapter, TEXT_MEDIA_TYPE, PDF_MEDIA_TYPE};
pub use image::{encode_image, is_supported_image, EncodedImage, SUPPORTED_IMAGE_TYPES};
pub use pdf::{LopdfExtractor, PdfExtractor};
