use std::fmt;

use base64::{Engine as _, engine::general_purpose};
use bytes::Bytes;
use thiserror::Error;

pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024; // 10MB

const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("Image cannot be empty")]
    Empty,

    #[error("Image too large: {size} bytes (max {max} bytes)")]
    TooLarge { size: usize, max: usize },

    #[error("Unsupported image format: {0}. Only JPEG and PNG are supported")]
    UnsupportedFormat(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageMimeType {
    Jpeg,
    Png,
}

impl ImageMimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMimeType::Jpeg => "image/jpeg",
            ImageMimeType::Png => "image/png",
        }
    }

    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => Some(ImageMimeType::Jpeg),
            "image/png" => Some(ImageMimeType::Png),
            _ => None,
        }
    }

    /// Detects the encoding from the file signature.
    pub fn sniff(data: &[u8]) -> Option<Self> {
        if data.starts_with(JPEG_SIGNATURE) {
            Some(ImageMimeType::Jpeg)
        } else if data.starts_with(PNG_SIGNATURE) {
            Some(ImageMimeType::Png)
        } else {
            None
        }
    }
}

impl fmt::Display for ImageMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated raster image ready to be sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    data: Bytes,
    mime_type: ImageMimeType,
}

impl ImageUpload {
    /// Validates the bytes and settles the mime type.
    ///
    /// The byte signature is authoritative: a declared `image/*` type that
    /// disagrees with it is overridden, while a declared non-image type is
    /// rejected outright.
    pub fn new(data: impl Into<Bytes>, declared_type: Option<&str>) -> Result<Self, ImageError> {
        let data = data.into();

        if data.is_empty() {
            return Err(ImageError::Empty);
        }

        if data.len() > MAX_IMAGE_SIZE {
            return Err(ImageError::TooLarge {
                size: data.len(),
                max: MAX_IMAGE_SIZE,
            });
        }

        if let Some(declared) = declared_type
            && ImageMimeType::from_content_type(declared).is_none()
            && !declared.trim().to_ascii_lowercase().starts_with("image/")
            && declared.trim() != "application/octet-stream"
        {
            return Err(ImageError::UnsupportedFormat(declared.to_string()));
        }

        let mime_type = ImageMimeType::sniff(&data).ok_or_else(|| {
            ImageError::UnsupportedFormat(declared_type.unwrap_or("unknown").to_string())
        })?;

        if let Some(declared) = declared_type.and_then(ImageMimeType::from_content_type)
            && declared != mime_type
        {
            tracing::warn!(
                declared = %declared,
                detected = %mime_type,
                "Declared image type does not match file signature"
            );
        }

        Ok(Self { data, mime_type })
    }

    pub fn data(&self) -> &Bytes {
        &self.data
    }

    pub fn mime_type(&self) -> ImageMimeType {
        self.mime_type
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn to_base64(&self) -> String {
        general_purpose::STANDARD.encode(&self.data)
    }
}
