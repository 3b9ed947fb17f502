use std::sync::Arc;

use anyhow::{Context, Result};
use glyphquad::{
    camera::Camera,
    render::Render,
    settings,
    text::{
        glyph::Glyph,
        pipeline::{GlyphPipeline, GlyphQuad},
        rasterizer::FontRasterizer,
    },
    transform::Transform,
    window::{make_window, AppLoop},
    Window,
};
use glyphquad_asset::Loader;

struct App {
    window: Arc<Window>,
    render: Render,
    glyph: Glyph,
    glyph_pipeline: GlyphPipeline,
    model: Transform,
}

impl AppLoop for App {
    fn init(window: Arc<Window>) -> Result<Self> {
        let render = Render::new(Arc::clone(&window)).context("failed to set up rendering")?;

        // the font is only needed until the glyph is on the gpu
        let bitmap = {
            let rasterizer =
                FontRasterizer::open(&mut Loader::new(), settings::FONT_PATH, settings::FONT_PX)
                    .context("failed to open font")?;
            rasterizer
                .rasterize(settings::CHARACTER)
                .with_context(|| format!("failed to rasterize {:?}", settings::CHARACTER))?
        };
        let glyph = Glyph::upload(&bitmap, render.device(), render.queue());

        let glyph_pipeline = GlyphPipeline::new(render.device(), render.format(), &glyph)
            .context("failed to build the glyph shader program")?;

        Ok(App {
            window,
            render,
            glyph,
            glyph_pipeline,
            model: Transform::default(),
        })
    }

    fn draw(&mut self) -> Result<()> {
        let size = self.window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Ok(());
        }
        self.render.resize(size);

        let camera = Camera::for_framebuffer(size.width, size.height);
        let quad = GlyphQuad::for_glyph(&self.glyph, settings::QUAD_SCALE);
        self.glyph_pipeline
            .prepare(self.render.queue(), &camera.uniform(self.model.matrix()), &quad);

        self.render
            .draw(settings::CLEAR_COLOR, &self.glyph_pipeline)
            .context("failed to draw frame")?;
        Ok(())
    }
}

fn main() -> Result<()> {
    make_window()
        .with_title(settings::WINDOW_TITLE)
        .with_window_size(settings::WINDOW_SIZE)
        .run(App::init)
}
