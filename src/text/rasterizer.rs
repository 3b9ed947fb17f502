use std::path::Path;

use fontdue::{Font, FontSettings, Metrics};
use glyphquad_asset::Loader;

use crate::{error::GlyphError, texture::Texture};

/// Coverage bitmap and metrics for one rasterized character.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphBitmap {
    pub character: char,
    pub metrics: Metrics,
    /// One byte per pixel, rows packed without padding.
    pub data: Vec<u8>,
}

impl GlyphBitmap {
    pub fn width(&self) -> u32 {
        self.metrics.width as u32
    }

    pub fn height(&self) -> u32 {
        self.metrics.height as u32
    }

    pub fn bearing_left(&self) -> i32 {
        self.metrics.xmin
    }

    /// Distance from the baseline up to the top row of the bitmap.
    pub fn bearing_top(&self) -> i32 {
        self.metrics.ymin + self.metrics.height as i32
    }

    pub fn advance(&self) -> f32 {
        self.metrics.advance_width
    }

    pub fn texture(&self) -> Texture {
        Texture::grayscale(self.data.clone(), self.width(), self.height())
    }
}

// one of these is opened per font and size, and kept around for as long as glyphs are needed
// so the font file is only read and parsed once
pub struct FontRasterizer {
    font: Font,
    px: f32,
}

impl FontRasterizer {
    pub fn open<P: AsRef<Path>>(loader: &mut Loader, font_path: P, px: f32) -> Result<Self, GlyphError> {
        let asset = loader.load(font_path.as_ref())?;
        let font = Font::from_bytes(asset.bytes.as_ref(), FontSettings::default())
            .map_err(|err| GlyphError::FontParse(err.into()))?;
        log::info!(
            "opened font {:?} ({} glyphs) at {}px",
            font_path.as_ref(),
            font.glyph_count(),
            px
        );

        Ok(Self { font, px })
    }

    pub fn has_glyph(&self, character: char) -> bool {
        self.font.lookup_glyph_index(character) != 0
    }

    pub fn rasterize(&self, character: char) -> Result<GlyphBitmap, GlyphError> {
        if !self.has_glyph(character) {
            return Err(GlyphError::GlyphUnavailable(character));
        }

        let (metrics, data) = self.font.rasterize(character, self.px);
        if metrics.width == 0 || metrics.height == 0 {
            return Err(GlyphError::EmptyBitmap(character));
        }

        Ok(GlyphBitmap {
            character,
            metrics,
            data,
        })
    }
}
