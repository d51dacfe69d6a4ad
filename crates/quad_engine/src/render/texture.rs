//! 2D texture upload

use crate::assets::{image_loader::ImageData, AssetError};
use crate::config::{SamplerDesc, SamplerFilter, SamplerWrap};
use glow::{HasContext, PixelUnpackData};

impl SamplerFilter {
    /// GL filter enum for both minification and magnification
    pub const fn gl_filter(self) -> u32 {
        match self {
            Self::Linear => glow::LINEAR,
            Self::Nearest => glow::NEAREST,
        }
    }
}

impl SamplerWrap {
    /// GL wrap enum
    pub const fn gl_wrap(self) -> u32 {
        match self {
            Self::Repeat => glow::REPEAT,
            Self::Clamp => glow::CLAMP_TO_EDGE,
        }
    }
}

/// Create an `RGBA8` texture from decoded pixels
///
/// The texture is left bound to `TEXTURE_2D` on the active unit.
pub fn upload_texture(
    gl: &glow::Context,
    image: &ImageData,
    sampler: SamplerDesc,
) -> Result<glow::Texture, AssetError> {
    let width = i32::try_from(image.width).map_err(|_| AssetError::GpuObject {
        what: "texture",
        message: format!("width {} exceeds GL limits", image.width),
    })?;
    let height = i32::try_from(image.height).map_err(|_| AssetError::GpuObject {
        what: "texture",
        message: format!("height {} exceeds GL limits", image.height),
    })?;

    // SAFETY: plain object creation and upload on the current context; the
    // pixel slice holds width * height * 4 bytes.
    unsafe {
        let texture = gl
            .create_texture()
            .map_err(|message| AssetError::GpuObject { what: "texture", message })?;
        gl.bind_texture(glow::TEXTURE_2D, Some(texture));

        gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
        gl.tex_image_2d(
            glow::TEXTURE_2D,
            0,
            glow::RGBA8 as i32,
            width,
            height,
            0,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            PixelUnpackData::Slice(Some(image.data.as_slice())),
        );

        let filter = sampler.filter.gl_filter() as i32;
        let wrap = sampler.wrap.gl_wrap() as i32;
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, filter);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, filter);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, wrap);
        gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, wrap);

        log::debug!(
            "Uploaded {}x{} texture ({} bytes, {:?})",
            image.width,
            image.height,
            image.size_bytes(),
            sampler
        );

        Ok(texture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sampler_is_linear_repeat() {
        let sampler = SamplerDesc::default();
        assert_eq!(sampler.filter.gl_filter(), glow::LINEAR);
        assert_eq!(sampler.wrap.gl_wrap(), glow::REPEAT);
    }

    #[test]
    fn test_alternate_sampler_modes() {
        assert_eq!(SamplerFilter::Nearest.gl_filter(), glow::NEAREST);
        assert_eq!(SamplerWrap::Clamp.gl_wrap(), glow::CLAMP_TO_EDGE);
    }
}
