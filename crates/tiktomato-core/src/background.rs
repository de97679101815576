//! Background images: the built-in choices and conversion of uploaded files
//! into self-contained `data:` references.

use base64::prelude::*;

use crate::error::ImageError;

/// Built-in backgrounds. The first entry is the default.
pub const DEFAULT_IMAGES: [&str; 4] = [
    "https://images.unsplash.com/photo-1506744038136-46273834b3fb?w=1920",
    "https://images.unsplash.com/photo-1501785888041-af3ef285b470?w=1920",
    "https://images.unsplash.com/photo-1470071459604-3b5ec3a7fe05?w=1920",
    "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=1920",
];

/// Index of `reference` in [`DEFAULT_IMAGES`], if it is one of them.
pub fn default_index(reference: &str) -> Option<usize> {
    DEFAULT_IMAGES.iter().position(|img| *img == reference)
}

const BMP_HEADER_LEN: usize = 14;

/// Media type inferred from the file signature.
pub fn sniff_media_type(bytes: &[u8]) -> Option<&'static str> {
    const SIGNATURES: [(&[u8], &str); 4] = [
        (b"\x89PNG\r\n\x1a\n", "image/png"),
        (b"\xff\xd8\xff", "image/jpeg"),
        (b"GIF87a", "image/gif"),
        (b"GIF89a", "image/gif"),
    ];

    if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        return Some("image/webp");
    }
    // 14-byte file header: "BM", file size, two reserved zero words.
    if bytes.len() >= BMP_HEADER_LEN && &bytes[..2] == b"BM" && bytes[6..10] == [0; 4] {
        return Some("image/bmp");
    }
    SIGNATURES
        .iter()
        .find(|(magic, _)| bytes.starts_with(magic))
        .map(|(_, mime)| *mime)
}

/// Encode an uploaded file as a `data:<mime>;base64,<payload>` reference.
///
/// A declared `image/*` type is trusted as-is; otherwise the type is sniffed
/// from the bytes.
///
/// # Errors
/// Returns [`ImageError::Empty`] for empty input and
/// [`ImageError::Unsupported`] when no image type can be established.
pub fn encode_data_url(bytes: &[u8], declared_type: Option<&str>) -> Result<String, ImageError> {
    if bytes.is_empty() {
        return Err(ImageError::Empty);
    }

    let declared = declared_type
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_ascii_lowercase);
    let mime = match declared.as_deref() {
        Some(t) if t.starts_with("image/") => t.to_string(),
        _ => sniff_media_type(bytes)
            .ok_or_else(|| ImageError::Unsupported {
                declared: declared.clone(),
            })?
            .to_string(),
    };

    Ok(format!("data:{mime};base64,{}", BASE64_STANDARD.encode(bytes)))
}
