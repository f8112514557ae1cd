//! Image header probing.
//!
//! Uploaded images are never decoded in full; only the header is read to
//! learn the container format and the pixel size needed for aspect ratio.

use crate::error::{Error, Result};
use std::io::Cursor;

/// Image formats that can be embedded in a deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
}

impl MediaFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
        }
    }

    fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Png => Some(Self::Png),
            image::ImageFormat::Jpeg => Some(Self::Jpeg),
            image::ImageFormat::Gif => Some(Self::Gif),
            image::ImageFormat::Bmp => Some(Self::Bmp),
            _ => None,
        }
    }
}

/// Format and pixel size of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub format: MediaFormat,
    pub width: u32,
    pub height: u32,
}

/// Sniff the format and read the pixel dimensions of `bytes`.
///
/// Fails with [`Error::ImagePlacement`] for anything that is not a readable
/// PNG, JPEG, GIF or BMP header.
pub fn probe(bytes: &[u8]) -> Result<ImageInfo> {
    if bytes.is_empty() {
        return Err(Error::ImagePlacement("image data is empty".to_string()));
    }

    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| Error::ImagePlacement(format!("Failed to sniff image format: {}", e)))?;

    let format = reader
        .format()
        .and_then(MediaFormat::from_image_format)
        .ok_or_else(|| Error::ImagePlacement("unrecognized image format".to_string()))?;

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| Error::ImagePlacement(format!("Failed to read image header: {}", e)))?;

    if width == 0 || height == 0 {
        return Err(Error::ImagePlacement(format!(
            "image has zero size ({}x{})",
            width, height
        )));
    }

    Ok(ImageInfo {
        format,
        width,
        height,
    })
}

/// Encode a solid-color PNG, for tests across the workspace.
#[cfg(any(test, feature = "test-util"))]
pub fn sample_png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([0x31, 0x82, 0xce]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png)
        .expect("encode sample PNG");
    out.into_inner()
}
