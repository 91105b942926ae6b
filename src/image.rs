// src/image.rs
//
// Image attachments arrive as raw bytes from whatever picker the frontend
// uses. The legacy picker filtered on *.jpg / *.png file names; here the
// filter is enforced on content instead.

use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
const JPEG_MAGIC: [u8; 3] = [0xff, 0xd8, 0xff];

/// Identify the image format from its leading magic bytes.
pub fn sniff_format(bytes: &[u8]) -> Option<ImageFormat> {
    if bytes.starts_with(&PNG_MAGIC) {
        Some(ImageFormat::Png)
    } else if bytes.starts_with(&JPEG_MAGIC) {
        Some(ImageFormat::Jpeg)
    } else {
        None
    }
}

/// Gate for the attach path: anything that is not a JPG or PNG is refused.
pub fn ensure_supported(bytes: &[u8]) -> Result<ImageFormat, CatalogError> {
    sniff_format(bytes)
        .ok_or_else(|| CatalogError::validation("only JPG or PNG images are supported"))
}
