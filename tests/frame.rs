use glyphquad::{
    camera::{Camera, Orthographic},
    error::GlyphError,
    settings,
    text::{pipeline::GlyphQuad, rasterizer::FontRasterizer},
    transform::Transform,
};
use glyphquad_asset::Loader;
use nalgebra::Point3;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

fn corners(quad: &GlyphQuad) -> (f32, f32, f32, f32) {
    quad.vertices.iter().fold(
        (f32::MAX, f32::MAX, f32::MIN, f32::MIN),
        |(x0, y0, x1, y1), v| {
            let [x, y, ..] = v.vertex;
            (x0.min(x), y0.min(y), x1.max(x), y1.max(y))
        },
    )
}

#[test]
fn twelve_by_eighteen_glyph_in_a_640x480_window() {
    let camera = Camera::for_framebuffer(640, 480);
    assert!(close(camera.projection.width(), 2.0 * 4.0 / 3.0));
    assert!(close(camera.projection.height(), 2.0));

    let quad = GlyphQuad::new(12.0, 18.0, 0.1);
    let (x0, y0, x1, y1) = corners(&quad);
    assert!(close(x0, -0.6) && close(y0, -0.9));
    assert!(close(x1, 0.6) && close(y1, 0.9));

    // the whole quad lands inside clip space, depth strictly inside wgpu's [0, 1]
    let mvp = camera.model_view_projection(Transform::default().matrix());
    for v in quad.vertices {
        let clip = mvp * Point3::new(v.vertex[0], v.vertex[1], 0.0).to_homogeneous();
        assert!(clip.x.abs() <= 1.0 && clip.y.abs() <= 1.0);
        assert!(clip.z > 0.0 && clip.z < 1.0);
    }
}

#[test]
fn horizontal_extent_is_linear_in_aspect() {
    let aspects = [1.0, 4.0 / 3.0, 16.0 / 9.0, 3.0];
    for pair in aspects.windows(2) {
        let (a, b) = (Orthographic::for_aspect(pair[0]), Orthographic::for_aspect(pair[1]));
        assert!(close(a.width() / b.width(), pair[0] / pair[1]));
        assert!(close(a.height(), b.height()));
    }
}

#[test]
fn bundled_glyph_fits_the_default_window() {
    let rasterizer =
        FontRasterizer::open(&mut Loader::new(), settings::FONT_PATH, settings::FONT_PX).unwrap();
    let bitmap = rasterizer.rasterize(settings::CHARACTER).unwrap();
    assert!(bitmap.width() > 0 && bitmap.height() > 0);
    assert!(bitmap.advance() > 0.0);

    let quad = GlyphQuad::new(
        bitmap.width() as f32,
        bitmap.height() as f32,
        settings::QUAD_SCALE,
    );
    let (x0, y0, x1, y1) = corners(&quad);
    assert!(close(x1 - x0, bitmap.width() as f32 * settings::QUAD_SCALE));
    assert!(close(y1 - y0, bitmap.height() as f32 * settings::QUAD_SCALE));
    assert!(close(x0 + x1, 0.0) && close(y0 + y1, 0.0));
}

#[test]
fn one_rasterizer_serves_many_glyphs() {
    let rasterizer =
        FontRasterizer::open(&mut Loader::new(), settings::FONT_PATH, settings::FONT_PX).unwrap();
    let wide = rasterizer.rasterize('W').unwrap();
    let narrow = rasterizer.rasterize('i').unwrap();
    assert!(wide.width() > narrow.width());
    assert!(wide.advance() > narrow.advance());
}

#[test]
fn failures_are_distinguishable() {
    let missing = FontRasterizer::open(&mut Loader::new(), "/missing/font.ttf", 18.0).err();
    assert!(matches!(missing, Some(GlyphError::FontNotFound(_))));

    let rasterizer =
        FontRasterizer::open(&mut Loader::new(), settings::FONT_PATH, settings::FONT_PX).unwrap();
    assert!(matches!(
        rasterizer.rasterize('\u{10FFFD}'),
        Err(GlyphError::GlyphUnavailable(_))
    ));
}
