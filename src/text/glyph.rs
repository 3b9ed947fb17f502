use wgpu::{Device, Queue};

use crate::texture::GpuTexture;

use super::rasterizer::GlyphBitmap;

/// A rasterized character resident on the GPU.
pub struct Glyph {
    pub texture: GpuTexture,
    pub width: u32,
    pub height: u32,
    pub bearing_left: i32,
    pub bearing_top: i32,
    pub advance: f32,
}

impl Glyph {
    pub fn upload(bitmap: &GlyphBitmap, device: &Device, queue: &Queue) -> Self {
        let texture = bitmap.texture().upload(device, queue);
        log::info!(
            "uploaded glyph {:?}: {}x{} bearing ({}, {}) advance {}",
            bitmap.character,
            bitmap.width(),
            bitmap.height(),
            bitmap.bearing_left(),
            bitmap.bearing_top(),
            bitmap.advance()
        );

        Self {
            texture,
            width: bitmap.width(),
            height: bitmap.height(),
            bearing_left: bitmap.bearing_left(),
            bearing_top: bitmap.bearing_top(),
            advance: bitmap.advance(),
        }
    }
}
