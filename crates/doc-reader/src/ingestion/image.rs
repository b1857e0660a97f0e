//! Image support checks and inline attachment encoding

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};

use super::adapter::media_type_essence;

/// Image media types the reasoning backend accepts
pub const SUPPORTED_IMAGE_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Check a declared media type against the supported image set (case-insensitive)
pub fn is_supported_image(media_type: &str) -> bool {
    let media_type = media_type.trim().to_ascii_lowercase();
    SUPPORTED_IMAGE_TYPES.contains(&media_type.as_str())
}

/// Inline binary attachment: base64 payload tagged with its media type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    pub mime_type: String,
    /// Standard base64 with padding
    pub data: String,
}

/// Base64-encode image bytes for the reasoning backend. The media type is
/// sent without parameters.
pub fn encode_image(data: &[u8], media_type: &str) -> EncodedImage {
    EncodedImage {
        mime_type: media_type_essence(media_type),
        data: BASE64.encode(data),
    }
}
