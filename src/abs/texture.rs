//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct, a handle to a texture stored
//! on the GPU side, plus the loading policy for texture assets: a texture
//! that cannot be found or decoded is replaced by a loud placeholder so the
//! application keeps running.

use std::sync::Arc;

use glow::HasContext;
use image::{DynamicImage, GenericImageView};
use log::warn;

use crate::asset::AssetResolver;

/// A 2x2 magenta and black checkerboard, RGBA, row by row. Substituted for
/// any texture asset that fails to load so the miss is visible on screen.
pub const FALLBACK_PIXELS: [u8; 16] = [
    255, 0, 255, 255, 0, 0, 0, 255, //
    0, 0, 0, 255, 255, 0, 255, 255, //
];

/// Decodes an encoded image (PNG and friends) from raw bytes.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, String> {
    image::load_from_memory(bytes).map_err(|e| e.to_string())
}

/// Represents a texture stored on the GPU side.
pub struct Texture {
    gl: Arc<glow::Context>,
    id: glow::Texture,
    width: u32,
    height: u32,
}

impl Texture {
    /// Creates a new texture from the given [`image::DynamicImage`].
    pub fn from_image(gl: &Arc<glow::Context>, image: &DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        Self::from_rgba(gl, width, height, &image.to_rgba8().into_raw())
    }

    /// Creates a new texture from raw RGBA pixels, one byte per channel.
    pub fn from_rgba(gl: &Arc<glow::Context>, width: u32, height: u32, data: &[u8]) -> Self {
        unsafe {
            let texture = gl.create_texture().unwrap();
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(data)),
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::NEAREST as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::NEAREST as i32,
            );
            gl.bind_texture(glow::TEXTURE_2D, None);

            Self {
                gl: Arc::clone(gl),
                id: texture,
                width,
                height,
            }
        }
    }

    /// The checkerboard placeholder texture.
    pub fn fallback(gl: &Arc<glow::Context>) -> Self {
        Self::from_rgba(gl, 2, 2, &FALLBACK_PIXELS)
    }

    /// Loads a texture asset. Textures are optional: when the asset cannot
    /// be resolved or decoded a warning is logged and the placeholder
    /// texture is returned, so this never fails.
    pub fn load(gl: &Arc<glow::Context>, resolver: &AssetResolver, request: &str) -> Self {
        match resolver
            .load_bytes(request)
            .and_then(|bytes| decode_image(&bytes))
        {
            Ok(image) => Self::from_image(gl, &image),
            Err(err) => {
                warn!("substituting the placeholder for texture '{request}': {err}");
                Self::fallback(gl)
            }
        }
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_is_a_magenta_black_checker() {
        let pixels: Vec<[u8; 4]> = FALLBACK_PIXELS.chunks(4).map(|c| c.try_into().unwrap()).collect();
        let magenta = [255, 0, 255, 255];
        let black = [0, 0, 0, 255];
        assert_eq!(pixels, [magenta, black, black, magenta]);
    }

    #[test]
    fn test_decode_image_roundtrip() {
        let image = DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            2,
            2,
            image::Rgba([255, 0, 255, 255]),
        ));
        let mut png = Vec::new();
        image
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let decoded = decode_image(&png).unwrap();
        assert_eq!(decoded.dimensions(), (2, 2));
        assert_eq!(decoded.to_rgba8().into_raw(), image.to_rgba8().into_raw());
    }

    #[test]
    fn test_decode_image_rejects_garbage() {
        assert!(decode_image(b"definitely not an image").is_err());
    }
}
