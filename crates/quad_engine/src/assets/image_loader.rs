//! Image loading utilities for texture data
//!
//! Decodes BMP and PNG files into tightly packed RGBA8 pixels for upload.

use crate::assets::AssetError;
use std::path::Path;

/// Loaded image data ready for GPU upload
#[derive(Debug, Clone)]
pub struct ImageData {
    /// Raw RGBA pixel data
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Load an image from a file path, converting to 8-bit RGBA
    ///
    /// Rows are stored bottom-up, ready for `glTexImage2D`.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();

        log::debug!("Loading image from: {:?}", path_ref);

        if !path_ref.is_file() {
            return Err(AssetError::NotFound(path_ref.to_path_buf()));
        }

        let img = image::open(path_ref).map_err(|e| match e {
            image::ImageError::IoError(source) => AssetError::from_io(path_ref, source),
            other => AssetError::Decode {
                path: path_ref.to_path_buf(),
                message: other.to_string(),
            },
        })?;
        // GL takes the first row as t = 0, the bottom of the texture.
        // Palette and 24-bit bitmaps both end up as RGBA8.
        let rgba_img = img.flipv().to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::info!("Loaded image {}x{} from {:?}", width, height, path_ref);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
        })
    }

    /// Create a solid color image (useful for testing and defaults)
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let mut data = Vec::with_capacity(pixel_count(width, height) * 4);

        for _ in 0..pixel_count(width, height) {
            data.extend_from_slice(&color);
        }

        Self {
            data,
            width,
            height,
        }
    }

    /// Get the size of the image data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}

fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}
