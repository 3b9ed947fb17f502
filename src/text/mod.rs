// a single glyph is drawn as one textured quad:
// - fontdue turns the glyph outline into a coverage bitmap
// - the bitmap becomes a single channel texture
// - the fragment shader uses the coverage as alpha over a white fill

pub mod glyph;
pub mod pipeline;
pub mod rasterizer;
