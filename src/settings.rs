//! Compile-time defaults for the demo.

use wgpu::Color;

/// Font rasterized by the demo. Bundled with the crate so the path is always valid.
pub const FONT_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/assets/DejaVuSans.ttf");

pub const CHARACTER: char = 'H';

/// Pixel size the glyph is rasterized at.
pub const FONT_PX: f32 = 18.0;

/// World units per glyph pixel.
pub const QUAD_SCALE: f32 = 0.1;

pub const CLEAR_COLOR: Color = Color {
    r: 0.2,
    g: 0.4,
    b: 0.2,
    a: 1.0,
};

pub const WINDOW_TITLE: &str = "glyphquad";
pub const WINDOW_SIZE: (u32, u32) = (640, 480);
